// Icons loaded from a folder of SVG, ICO and raster files

use anyhow::{Context, Result, bail};
use image::RgbaImage;
use image::imageops::FilterType;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::ImageSource;
use crate::model::Dimension;
use crate::pipeline::ico::IconContainer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Svg,
    Ico,
    Raster,
}

impl SourceKind {
    fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "svg" => Some(SourceKind::Svg),
            "ico" => Some(SourceKind::Ico),
            "png" | "bmp" | "gif" | "jpg" | "jpeg" | "tif" | "tiff" => Some(SourceKind::Raster),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct SourceEntry {
    path: PathBuf,
    kind: SourceKind,
}

/// Every supported file under a directory, named by its file stem.
///
/// SVGs render at any size, ICO files only at the sizes they contain, and
/// raster images are resized when the requested size differs.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    names: Vec<String>,
    entries: HashMap<String, SourceEntry>,
}

impl DirectorySource {
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!("Icon directory not found: {}", dir.display());
        }

        let mut names = Vec::new();
        let mut entries = HashMap::new();

        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(kind) = SourceKind::detect(path) else {
                continue;
            };
            let Some(name) = path.file_stem().and_then(|n| n.to_str()) else {
                continue;
            };
            if entries.contains_key(name) {
                continue;
            }

            names.push(name.to_string());
            entries.insert(
                name.to_string(),
                SourceEntry {
                    path: path.to_path_buf(),
                    kind,
                },
            );
        }

        Ok(Self {
            root: dir.to_path_buf(),
            names,
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn render(&self, entry: &SourceEntry, width: u32, height: u32) -> Result<Option<RgbaImage>> {
        match entry.kind {
            SourceKind::Svg => render_svg(&entry.path, width, height).map(Some),
            SourceKind::Ico => {
                let icon = IconContainer::read_from(&entry.path)?;
                Ok(icon
                    .frames()
                    .iter()
                    .find(|f| f.dimensions() == (width, height))
                    .cloned())
            }
            SourceKind::Raster => {
                let image = image::open(&entry.path)
                    .with_context(|| format!("Failed to decode {}", entry.path.display()))?
                    .to_rgba8();
                if image.dimensions() == (width, height) {
                    Ok(Some(image))
                } else {
                    Ok(Some(image::imageops::resize(
                        &image,
                        width,
                        height,
                        FilterType::Lanczos3,
                    )))
                }
            }
        }
    }
}

impl ImageSource for DirectorySource {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn lookup(&self, name: &str, width: Dimension, height: Dimension) -> Option<RgbaImage> {
        if width == 0 || height == 0 {
            return None;
        }
        let entry = self.entries.get(name)?;
        // unreadable files count as missing renderings
        self.render(entry, width as u32, height as u32).ok().flatten()
    }
}

fn render_svg(path: &Path, width: u32, height: u32) -> Result<RgbaImage> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .with_context(|| format!("Failed to parse SVG {}", path.display()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to create {}x{} pixmap", width, height))?;
    let scale_x = width as f32 / tree.size().width();
    let scale_y = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale_x, scale_y),
        &mut pixmap.as_mut(),
    );

    // tiny-skia keeps premultiplied alpha
    let mut image = RgbaImage::new(width, height);
    for (pixel, color) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = color.demultiply();
        *pixel = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}
