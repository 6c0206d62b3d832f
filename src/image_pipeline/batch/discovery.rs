//! Input expansion: files pass through, directories contribute their images.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{QuantError, Result};

/// Extensions picked up when scanning a directory (lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["tif", "tiff", "png", "jpg", "jpeg", "bmp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expands `inputs` into an ordered list of image files.
///
/// Explicit files keep their position; each directory is replaced by its
/// supported images sorted by path.
pub fn discover_images(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            collect_images_from_dir(input, recursive, &mut found)?;
            found.sort();
            debug!(dir = %input.display(), count = found.len(), "Scanned directory");
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(QuantError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("path not found: {}", input.display()),
            )));
        }
    }

    Ok(files)
}

fn collect_images_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                collect_images_from_dir(&path, recursive, files)?;
            }
        } else if path.is_file() && is_supported_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}
