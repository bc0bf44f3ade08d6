use std::path::{Path, PathBuf};

use eframe::egui;
use log::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::export::{ExportDocument, CSV_FILE_NAME, JSON_FILE_NAME};
use crate::mapper::{self, CoordinateMapper};
use crate::overlay::Overlay;
use crate::session::Session;
use crate::store::Point;

const UNDO: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
const SAVE: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);

#[derive(Clone, Copy, Debug, PartialEq)]
enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Json => JSON_FILE_NAME,
            ExportFormat::Csv => CSV_FILE_NAME,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// The image currently uploaded to the GPU.
struct LoadedImage {
    index: usize,
    texture: Option<egui::TextureHandle>,
    natural_size: egui::Vec2,
}

pub struct LabelerApp {
    session: Session,
    scale: Option<f32>,
    output: Option<PathBuf>,
    loaded: Option<LoadedImage>,
    /// Mapping for the image as laid out in the latest frame.
    mapper: Option<CoordinateMapper>,
    /// Whether the pointer was over the image in the latest frame.
    pointer_over_image: bool,
    status: String,
}

/// Shortcut presses read from one frame of input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Shortcuts {
    undo: bool,
    save: bool,
    next: bool,
    previous: bool,
}

impl Shortcuts {
    /// Undo and save match only with Shift and Alt released; matched presses are consumed.
    fn read(i: &mut egui::InputState) -> Self {
        let plain = !i.modifiers.shift && !i.modifiers.alt;
        Self {
            undo: plain && i.consume_shortcut(&UNDO),
            save: plain && i.consume_shortcut(&SAVE),
            next: i.key_pressed(egui::Key::ArrowRight),
            previous: i.key_pressed(egui::Key::ArrowLeft),
        }
    }
}

impl LabelerApp {
    pub fn new(session: Session, config: &Config) -> Self {
        Self {
            session,
            scale: config.scale,
            output: config.output.clone(),
            loaded: None,
            mapper: None,
            pointer_over_image: false,
            status: String::new(),
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        let index = self.session.index();
        if self.loaded.as_ref().is_some_and(|l| l.index == index) {
            return;
        }

        self.mapper = None;
        self.pointer_over_image = false;
        let path = self.session.current_path().to_path_buf();
        let loaded = match load_color_image(&path) {
            Ok(color_image) => {
                let [w, h] = color_image.size;
                let texture = if w == 0 || h == 0 {
                    warn!("{} has zero size; clicks are disabled", path.display());
                    None
                } else {
                    Some(ctx.load_texture(
                        format!("image-{index}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ))
                };
                self.status.clear();
                LoadedImage {
                    index,
                    texture,
                    natural_size: egui::vec2(w as f32, h as f32),
                }
            }
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                self.status = format!("Could not load {}: {}", path.display(), e);
                LoadedImage {
                    index,
                    texture: None,
                    natural_size: egui::Vec2::ZERO,
                }
            }
        };
        self.loaded = Some(loaded);
    }

    fn export(&mut self, format: ExportFormat) {
        let target = match &self.output {
            Some(path) if format == ExportFormat::Json => Some(path.clone()),
            Some(path) => Some(path.with_extension(format.extension())),
            None => rfd::FileDialog::new()
                .set_file_name(format.file_name())
                .add_filter(format.extension().to_uppercase(), &[format.extension()])
                .save_file(),
        };
        let Some(path) = target else {
            return;
        };

        let doc: ExportDocument<'_> = self.session.on_export();
        let result = match format {
            ExportFormat::Json => doc.write_json(&path),
            ExportFormat::Csv => doc.write_csv(&path),
        };
        match result {
            Ok(()) => {
                let store = self.session.store();
                info!(
                    "Exported {} images with {} points to {}",
                    store.len(),
                    store.total_points(),
                    path.display()
                );
                self.status = format!("Saved {}", path.display());
            }
            Err(e) => {
                error!("Export to {} failed: {}", path.display(), e);
                self.status = format!("Export failed: {e}");
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let shortcuts = ctx.input_mut(Shortcuts::read);
        if shortcuts.undo {
            self.session.on_undo();
        }
        if shortcuts.save {
            self.export(ExportFormat::Json);
        }
        if shortcuts.next {
            self.session.on_next();
        }
        if shortcuts.previous {
            self.session.on_previous();
        }
    }

    /// Natural-space position under the pointer, only while it is over the image.
    fn pointer_readout(&self) -> Option<Point> {
        if !self.pointer_over_image {
            return None;
        }
        let mapper = self.mapper.as_ref()?;
        let p = mapper.to_natural(self.session.reticle()?);
        let natural = mapper.natural_size();
        let inside = p.x >= 0 && p.y >= 0 && p.x <= natural.x as i32 && p.y <= natural.y as i32;
        inside.then_some(p)
    }

    fn status_line(&self) -> String {
        let mut line = format!(
            "{} ({}/{}) · {} points",
            self.session.current_id(),
            self.session.index() + 1,
            self.session.image_count(),
            self.session.current_points().len()
        );
        if let Some(p) = self.pointer_readout() {
            line.push_str(&format!(" · pointer ({}, {})", p.x, p.y));
        }
        if !self.status.is_empty() {
            line.push_str(" · ");
            line.push_str(&self.status);
        }
        line
    }
}

fn load_color_image(path: &Path) -> Result<egui::ColorImage> {
    let rgba = image::open(path)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.as_flat_samples();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        pixels.as_slice(),
    ))
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Download JSON").clicked() {
                    self.export(ExportFormat::Json);
                }
                if ui.button("Download CSV").clicked() {
                    self.export(ExportFormat::Csv);
                }
                ui.separator();
                if ui.button("Undo").clicked() {
                    self.session.on_undo();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Next Image").clicked() {
                        self.session.on_next();
                    }
                    if ui.button("Previous Image").clicked() {
                        self.session.on_previous();
                    }
                });
            });
        });

        // Navigation above may have changed the current image.
        self.ensure_texture(ctx);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_line());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(loaded) = self.loaded.as_ref() else {
                return;
            };
            let Some(texture) = loaded.texture.clone() else {
                self.pointer_over_image = false;
                ui.centered_and_justified(|ui| {
                    ui.label(format!("Cannot show {}", self.session.current_id()));
                });
                return;
            };

            let natural = loaded.natural_size;
            let display = mapper::display_size(natural, ui.available_size(), self.scale);
            self.mapper = CoordinateMapper::new(natural, display);
            let mapper = self.mapper;

            egui::ScrollArea::both().show(ui, |ui| {
                let (response, painter) = ui.allocate_painter(display, egui::Sense::click());
                let image_rect = response.rect;

                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                self.pointer_over_image = response.hover_pos().is_some();
                if let Some(pos) = response.hover_pos() {
                    self.session.on_pointer_move(pos - image_rect.min);
                }
                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.session.on_click(pos - image_rect.min, mapper.as_ref());
                    }
                }

                Overlay::build(
                    image_rect,
                    mapper.as_ref(),
                    self.session.current_points(),
                    self.session.reticle(),
                )
                .paint(&painter, image_rect);
            });
        });
    }
}
