//! Labeling session: the image list, the current position in it and every
//! point collected so far. All mutation goes through the `on_*` handlers,
//! which the host calls synchronously in event order.

use std::path::Path;

use eframe::egui;
use log::{debug, info, warn};

use crate::export::ExportDocument;
use crate::mapper::CoordinateMapper;
use crate::navigation::{ImageList, Navigator};
use crate::store::{Point, PointStore};

pub struct Session {
    images: ImageList,
    nav: Navigator,
    store: PointStore,
    /// Last pointer offset over the image. Survives image switches.
    reticle: Option<egui::Vec2>,
}

impl Session {
    /// Starts at the first image, which gets its (empty) point list right away.
    pub fn new(images: ImageList) -> Self {
        let nav = Navigator::new(images.len());
        let mut session = Self {
            images,
            nav,
            store: PointStore::new(),
            reticle: None,
        };
        session.enter_current();
        session
    }

    fn enter_current(&mut self) {
        let id = self.current_id();
        if !self.store.contains(&id) {
            debug!("First visit to {}", id);
        }
        self.store.ensure(&id);
        info!(
            "Showing {} ({}/{})",
            id,
            self.nav.index() + 1,
            self.images.len()
        );
    }

    pub fn index(&self) -> usize {
        self.nav.index()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn current_id(&self) -> String {
        self.images.id(self.nav.index())
    }

    pub fn current_path(&self) -> &Path {
        self.images.path(self.nav.index())
    }

    pub fn current_points(&self) -> &[Point] {
        self.store.get(&self.current_id())
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn reticle(&self) -> Option<egui::Vec2> {
        self.reticle
    }

    pub fn on_next(&mut self) {
        self.nav.next();
        self.enter_current();
    }

    pub fn on_previous(&mut self) {
        self.nav.previous();
        self.enter_current();
    }

    pub fn on_pointer_move(&mut self, offset: egui::Vec2) {
        self.reticle = Some(offset);
    }

    /// Records a click at `offset` inside the displayed image.
    ///
    /// Without a mapper (image not loaded or zero-sized) the click is ignored.
    pub fn on_click(
        &mut self,
        offset: egui::Vec2,
        mapper: Option<&CoordinateMapper>,
    ) -> Option<Point> {
        let Some(mapper) = mapper else {
            warn!("Ignoring click on {}: no usable image", self.current_id());
            return None;
        };
        let point = mapper.to_natural(offset);
        let id = self.current_id();
        if let Err(e) = self.store.append(&id, point) {
            warn!("Dropping point {:?}: {}", point, e);
            return None;
        }
        debug!("Added ({}, {}) to {}", point.x, point.y, id);
        Some(point)
    }

    /// Removes the newest point of the current image only.
    pub fn on_undo(&mut self) -> Option<Point> {
        let id = self.current_id();
        let removed = self.store.remove_last(&id);
        match removed {
            Some(point) => debug!("Undid ({}, {}) on {}", point.x, point.y, id),
            None => debug!("Nothing to undo on {}", id),
        }
        removed
    }

    pub fn on_export(&self) -> ExportDocument<'_> {
        ExportDocument::new(&self.store)
    }
}
