//! Persisting generated images.
//!
//! Output structure:
//!   <output_dir>/
//!     Images/     {prefix}_{index:05}.png
//!     Labels/     {prefix}_MASK_{index:05}.png
//!     Topviews/   TopView{prefix}_{index:05}.png   (only when enabled)

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::core::{Error, Result};

pub const IMAGES_DIR: &str = "Images";
pub const LABELS_DIR: &str = "Labels";
pub const TOPVIEWS_DIR: &str = "Topviews";

/// Destination for image buffers.
pub trait ImageStore: Sync {
    /// Create a directory and its parents. Succeeds if it already exists.
    fn ensure_dir(&self, dir: &Path) -> Result<()>;

    fn write_image(&self, path: &Path, image: &RgbImage) -> Result<()>;

    /// Delete a previously written image. Succeeds if it does not exist.
    fn remove_image(&self, path: &Path) -> Result<()>;
}

/// Writes PNG files to the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngStore;

impl ImageStore for PngStore {
    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        Ok(())
    }

    fn write_image(&self, path: &Path, image: &RgbImage) -> Result<()> {
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| Error::Storage {
                path: path.to_path_buf(),
                source,
            })
    }

    fn remove_image(&self, path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Directory tree and file naming for one batch.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub prefix: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.root.join(LABELS_DIR)
    }

    pub fn topviews_dir(&self) -> PathBuf {
        self.root.join(TOPVIEWS_DIR)
    }

    pub fn image_path(&self, index: u32) -> PathBuf {
        self.images_dir().join(format!("{}_{:05}.png", self.prefix, index))
    }

    pub fn mask_path(&self, index: u32) -> PathBuf {
        self.labels_dir().join(format!("{}_MASK_{:05}.png", self.prefix, index))
    }

    pub fn topview_path(&self, index: u32) -> PathBuf {
        self.topviews_dir().join(format!("TopView{}_{:05}.png", self.prefix, index))
    }

    /// Create the output directories. `Topviews/` only when requested.
    pub fn create_dirs(&self, store: &dyn ImageStore, with_topviews: bool) -> Result<()> {
        store.ensure_dir(&self.images_dir())?;
        store.ensure_dir(&self.labels_dir())?;
        if with_topviews {
            store.ensure_dir(&self.topviews_dir())?;
        }
        Ok(())
    }
}
