// Name -> image lookup

pub mod directory;

pub use directory::DirectorySource;

use image::RgbaImage;
use std::collections::HashMap;

use crate::model::Dimension;

/// A collection of named icons that can be rendered at a requested size.
pub trait ImageSource {
    /// Every distinct name, in enumeration order.
    fn names(&self) -> &[String];

    /// None when there is no rendering of `name` at this size.
    fn lookup(&self, name: &str, width: Dimension, height: Dimension) -> Option<RgbaImage>;

    /// First name in `candidates` that renders at this size.
    fn lookup_first(
        &self,
        candidates: &[&str],
        width: Dimension,
        height: Dimension,
    ) -> Option<RgbaImage> {
        candidates
            .iter()
            .find_map(|name| self.lookup(name, width, height))
    }
}

/// Names tried in turn for the gallery's own window icon.
pub const WINDOW_ICON_NAMES: [&str; 2] = ["DesignAccentsGallery", "GroupSmartArtQuickStyles"];

/// Fixed renderings held in memory; only exact sizes are found.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    names: Vec<String>,
    images: HashMap<(String, Dimension, Dimension), RgbaImage>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rendering, keyed by the image's own dimensions. Returns false,
    /// and adds nothing, when a side does not fit in a `Dimension`.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) -> bool {
        let (Ok(width), Ok(height)) = (
            Dimension::try_from(image.width()),
            Dimension::try_from(image.height()),
        ) else {
            return false;
        };
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name.clone());
        }
        self.images.insert((name, width, height), image);
        true
    }

    pub fn with(mut self, name: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(name, image);
        self
    }
}

impl ImageSource for MemorySource {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn lookup(&self, name: &str, width: Dimension, height: Dimension) -> Option<RgbaImage> {
        self.images.get(&(name.to_string(), width, height)).cloned()
    }
}
