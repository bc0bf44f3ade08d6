mod app;
mod config;
mod error;
mod export;
mod mapper;
mod navigation;
mod overlay;
mod session;
mod store;

use eframe::egui;

use crate::app::LabelerApp;
use crate::config::{Config, SUPPORTED_IMAGE_EXTENSIONS, USAGE};
use crate::error::Result;
use crate::navigation::ImageList;
use crate::session::Session;

// ── Main ────────────────────────────────────────────────────────────────────

/// Image list from the command line, or from a file picker when none was given.
fn image_list(config: &Config) -> Result<ImageList> {
    if !config.inputs.is_empty() {
        return ImageList::new(config.resolve_images()?);
    }
    let picked = rfd::FileDialog::new()
        .set_title("Select Images")
        .add_filter("Image files", &SUPPORTED_IMAGE_EXTENSIONS)
        .pick_files()
        .unwrap_or_default();
    ImageList::new(picked)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(1);
        }
    };
    if config.show_help {
        println!("{USAGE}");
        return;
    }

    let images = match image_list(&config) {
        Ok(images) => images,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(1);
        }
    };

    let session = Session::new(images);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Image Labeler"),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "Image Labeler",
        options,
        Box::new(move |_cc| Ok(Box::new(LabelerApp::new(session, &config)))),
    ) {
        log::error!("Window failed: {e}");
        std::process::exit(1);
    }
}
