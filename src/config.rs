//! Startup configuration from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{LabelerError, Result};

pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

pub const USAGE: &str = "Usage: point-labeler [--scale <factor>] [--output <file>] [<image|dir>...]";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Paths as given; directories are expanded by [`Config::resolve_images`].
    pub inputs: Vec<PathBuf>,
    /// Fixed display scale. `None` fits the image to the window.
    pub scale: Option<f32>,
    /// Write exports here instead of asking with a save dialog.
    pub output: Option<PathBuf>,
    pub show_help: bool,
}

impl Config {
    /// Parses arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => config.show_help = true,
                "-s" | "--scale" => {
                    let value = args.next().ok_or(LabelerError::MissingValue("--scale"))?;
                    config.scale = Some(parse_scale(&value)?);
                }
                "-o" | "--output" => {
                    let value = args.next().ok_or(LabelerError::MissingValue("--output"))?;
                    config.output = Some(PathBuf::from(value));
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(LabelerError::UnknownFlag(flag.to_owned()));
                }
                path => config.inputs.push(PathBuf::from(path)),
            }
        }
        Ok(config)
    }

    /// Expands directories into their image files. Files are kept as given.
    pub fn resolve_images(&self) -> Result<Vec<PathBuf>> {
        let mut images = Vec::new();
        for input in &self.inputs {
            if input.is_dir() {
                let found = scan_directory(input)?;
                if found.is_empty() {
                    warn!("No images found in {}", input.display());
                }
                images.extend(found);
            } else {
                images.push(input.clone());
            }
        }
        if images.is_empty() {
            return Err(LabelerError::NoImages);
        }
        info!("Labeling {} images", images.len());
        Ok(images)
    }
}

fn parse_scale(value: &str) -> Result<f32> {
    match value.parse::<f32>() {
        Ok(scale) if scale.is_finite() && scale > 0.0 => Ok(scale),
        _ => Err(LabelerError::InvalidScale(value.to_owned())),
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    images.sort();
    Ok(images)
}
