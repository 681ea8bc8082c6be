// Library exports for icon-gallery

pub mod clipboard;
pub mod config;
pub mod gallery;
pub mod model;
pub mod pipeline;
pub mod source;

// Re-export commonly used types
pub use config::GalleryConfig;
pub use gallery::{Gallery, GallerySlot, ViewMode};
pub use model::{DimensionList, FormatTag, ParseError};
pub use source::{DirectorySource, ImageSource, MemorySource};
