use anyhow::{Context, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{self, Dimension, FormatTag};

/// One entry of the export-size menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeChoice {
    pub size: String,
    #[serde(default)]
    pub selected: bool,
}

/// One entry of the save-format menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatChoice {
    pub format: FormatTag,
    #[serde(default)]
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_pixels")]
    pub pixels: String,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_export_sizes")]
    pub export_sizes: Vec<SizeChoice>,

    #[serde(default = "default_save_formats")]
    pub save_formats: Vec<FormatChoice>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            pixels: default_pixels(),
            background: default_background(),
            source_dir: None,
            output_dir: None,
            export_sizes: default_export_sizes(),
            save_formats: default_save_formats(),
        }
    }
}

impl GalleryConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("icon-gallery").join("config.toml"))
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = self.to_toml_string()?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Defaults when the file does not exist yet.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The pixel field as a (width, height) pair.
    pub fn pixel_size(&self) -> Result<(Dimension, Dimension)> {
        let dims = model::parse(&self.pixels.to_lowercase())
            .with_context(|| format!("Invalid pixel size {:?}", self.pixels))?;
        dims.size()
            .with_context(|| format!("Invalid pixel size {:?}", self.pixels))
    }

    pub fn background_color(&self) -> Result<Rgb<u8>> {
        model::parse_color(&self.background)
            .with_context(|| format!("Invalid background {:?}", self.background))
    }

    /// Checked export sizes in menu order. Labels that do not parse are left out.
    pub fn selected_sizes(&self) -> Vec<(Dimension, Dimension)> {
        self.export_sizes
            .iter()
            .filter(|c| c.selected)
            .filter_map(|c| model::parse(&c.size.to_lowercase()).ok()?.size())
            .collect()
    }

    /// Checked save formats in menu order.
    pub fn selected_formats(&self) -> Vec<FormatTag> {
        self.save_formats
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.format)
            .collect()
    }

    /// Flips an export size; returns false when the menu has no such entry.
    pub fn toggle_size(&mut self, label: &str) -> bool {
        match self.export_sizes.iter_mut().find(|c| c.size == label) {
            Some(choice) => {
                choice.selected ^= true;
                true
            }
            None => false,
        }
    }

    pub fn toggle_format(&mut self, format: FormatTag) -> bool {
        match self.save_formats.iter_mut().find(|c| c.format == format) {
            Some(choice) => {
                choice.selected ^= true;
                true
            }
            None => false,
        }
    }
}

fn default_pixels() -> String {
    "32 x 32".to_string()
}

fn default_background() -> String {
    "Black".to_string()
}

fn default_export_sizes() -> Vec<SizeChoice> {
    [16, 24, 32, 48, 64, 128]
        .into_iter()
        .map(|side| SizeChoice {
            size: model::dimension::format_pixels(side, side),
            selected: matches!(side, 16 | 32 | 48),
        })
        .collect()
}

fn default_save_formats() -> Vec<FormatChoice> {
    [
        FormatTag::Bmp,
        FormatTag::Gif,
        FormatTag::Jpeg,
        FormatTag::Png,
        FormatTag::Tiff,
        FormatTag::Icon,
    ]
    .into_iter()
    .map(|format| FormatChoice {
        format,
        selected: format == FormatTag::Png,
    })
    .collect()
}
