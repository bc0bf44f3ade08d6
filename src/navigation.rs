use std::path::{Path, PathBuf};

use crate::error::{LabelerError, Result};

/// The fixed, ordered list of images for a session.
#[derive(Clone, Debug)]
pub struct ImageList {
    paths: Vec<PathBuf>,
}

impl ImageList {
    pub fn new(paths: Vec<PathBuf>) -> Result<Self> {
        if paths.is_empty() {
            return Err(LabelerError::NoImages);
        }
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn path(&self, index: usize) -> &Path {
        &self.paths[index]
    }

    /// Identifier used as the point store and export key.
    pub fn id(&self, index: usize) -> String {
        self.paths[index].to_string_lossy().into_owned()
    }
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Next,
    Previous,
}

/// Circular cursor over an [`ImageList`]. Never out of range, never terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    len: usize,
}

impl Navigator {
    /// `len` must be non-zero; [`ImageList::new`] guarantees it.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0);
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn step(&mut self, direction: Direction) -> usize {
        self.index = match direction {
            Direction::Next => (self.index + 1) % self.len,
            Direction::Previous => (self.index + self.len - 1) % self.len,
        };
        self.index
    }

    pub fn next(&mut self) -> usize {
        self.step(Direction::Next)
    }

    pub fn previous(&mut self) -> usize {
        self.step(Direction::Previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_rejected() {
        assert!(matches!(ImageList::new(Vec::new()), Err(LabelerError::NoImages)));
    }

    #[test]
    fn test_next_wraps_to_start() {
        let mut nav = Navigator::new(3);
        assert_eq!(nav.next(), 1);
        assert_eq!(nav.next(), 2);
        assert_eq!(nav.next(), 0);
    }

    #[test]
    fn test_previous_wraps_to_end() {
        let mut nav = Navigator::new(3);
        assert_eq!(nav.previous(), 2);
        assert_eq!(nav.previous(), 1);
        assert_eq!(nav.previous(), 0);
    }

    #[test]
    fn test_single_image_stays_put() {
        let mut nav = Navigator::new(1);
        assert_eq!(nav.next(), 0);
        assert_eq!(nav.previous(), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_origin() {
        let mut nav = Navigator::new(5);
        nav.next();
        nav.next();
        let start = nav.index();
        for _ in 0..5 {
            nav.next();
        }
        assert_eq!(nav.index(), start);
    }

    #[test]
    fn test_id_is_path_string() {
        let list = ImageList::new(vec![PathBuf::from("shots/a.png")]).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.id(0), "shots/a.png");
    }
}
