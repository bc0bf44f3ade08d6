use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{LabelerError, Result};

// ── Point ───────────────────────────────────────────────────────────────────

/// A labeled pixel in the image's natural (unscaled) resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ── Point Store ─────────────────────────────────────────────────────────────

/// Per-image point lists, kept in the order images were first visited.
///
/// Each list is in click order; the last element is the one undo removes.
/// Entries are never dropped once created.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointStore {
    entries: Vec<(String, Vec<Point>)>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, image_id: &str) -> Option<usize> {
        self.entries.iter().position(|(id, _)| id == image_id)
    }

    /// Creates an empty list for `image_id` unless one exists already.
    pub fn ensure(&mut self, image_id: &str) {
        if self.position(image_id).is_none() {
            self.entries.push((image_id.to_owned(), Vec::new()));
        }
    }

    pub fn append(&mut self, image_id: &str, point: Point) -> Result<()> {
        let idx = self
            .position(image_id)
            .ok_or_else(|| LabelerError::UnknownImage(image_id.to_owned()))?;
        self.entries[idx].1.push(point);
        Ok(())
    }

    /// Pops the most recent point for `image_id`. `None` when there is nothing to remove.
    pub fn remove_last(&mut self, image_id: &str) -> Option<Point> {
        let idx = self.position(image_id)?;
        self.entries[idx].1.pop()
    }

    pub fn get(&self, image_id: &str) -> &[Point] {
        self.position(image_id)
            .map(|idx| self.entries[idx].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, image_id: &str) -> bool {
        self.position(image_id).is_some()
    }

    /// Every visited image with its points, in visit order.
    pub fn export_all(&self) -> impl Iterator<Item = (&str, &[Point])> {
        self.entries
            .iter()
            .map(|(id, points)| (id.as_str(), points.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_points(&self) -> usize {
        self.entries.iter().map(|(_, points)| points.len()).sum()
    }
}

impl Serialize for PointStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, points) in &self.entries {
            map.serialize_entry(id, points)?;
        }
        map.end()
    }
}
