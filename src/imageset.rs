//! Xcode image set writer
//!
//! Materializes generated bytes as `<name>.imageset` inside an existing asset
//! catalog: three density variants with identical content plus the
//! `Contents.json` manifest Xcode reads.

use crate::mime::ImageFormat;
use crate::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const BUNDLE_EXTENSION: &str = "imageset";
pub const MANIFEST_FILE: &str = "Contents.json";

const SCALES: [&str; 3] = ["1x", "2x", "3x"];

// Field order is alphabetical so the manifest comes out with sorted keys.
#[derive(Debug, Serialize)]
struct ImageEntry {
    filename: String,
    idiom: &'static str,
    scale: &'static str,
}

#[derive(Debug, Serialize)]
struct ManifestInfo {
    author: &'static str,
    version: u32,
}

#[derive(Debug, Serialize)]
struct Manifest {
    images: Vec<ImageEntry>,
    info: ManifestInfo,
}

/// Write `image_bytes` as an image set under `catalog` and return its directory.
///
/// `catalog` must already exist. Re-running with the same name overwrites the
/// image files and manifest in place.
pub fn write_imageset(catalog: &Path, asset_name: &str, image_bytes: &[u8]) -> Result<PathBuf> {
    if !catalog.is_dir() {
        return Err(Error::PreconditionFailed(format!(
            "Asset catalog not found: {}",
            catalog.display()
        )));
    }

    let asset_dir = catalog.join(format!("{}.{}", asset_name, BUNDLE_EXTENSION));
    fs::create_dir_all(&asset_dir)?;

    let extension = ImageFormat::detect(image_bytes).extension();
    let mut images = Vec::with_capacity(SCALES.len());
    for scale in SCALES {
        let filename = format!("{}@{}.{}", asset_name, scale, extension);
        fs::write(asset_dir.join(&filename), image_bytes)?;
        images.push(ImageEntry {
            filename,
            idiom: "universal",
            scale,
        });
    }

    let manifest = Manifest {
        images,
        info: ManifestInfo {
            author: "xcode",
            version: 1,
        },
    };
    let mut contents = serde_json::to_string_pretty(&manifest)?;
    contents.push('\n');
    fs::write(asset_dir.join(MANIFEST_FILE), contents)?;

    tracing::info!("Wrote image set {}", asset_dir.display());
    Ok(asset_dir)
}
