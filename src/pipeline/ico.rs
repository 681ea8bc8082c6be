// ICO container reading and writing

use anyhow::{Context, Result, bail};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::RgbaImage;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

const MAX_SIDE: u32 = 256;

/// Several renderings of one icon name, written as a single .ico file.
#[derive(Debug, Clone)]
pub struct IconContainer {
    name: String,
    frames: Vec<RgbaImage>,
}

impl IconContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a frame. Frames keep the order they were added in.
    pub fn add(&mut self, image: RgbaImage) -> Result<()> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            bail!("Icon frame for {} is empty", self.name);
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            bail!(
                "Icon frame {}x{} for {} exceeds {}x{}",
                width,
                height,
                self.name,
                MAX_SIDE,
                MAX_SIDE
            );
        }
        self.frames.push(image);
        Ok(())
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The largest frame, for showing the icon as a whole.
    pub fn preview(&self) -> Option<&RgbaImage> {
        self.frames.iter().max_by_key(|f| f.width() * f.height())
    }

    fn to_icon_dir(&self) -> Result<IconDir> {
        let mut dir = IconDir::new(ResourceType::Icon);
        for frame in &self.frames {
            dir.add_entry(encode_frame(frame).with_context(|| {
                format!(
                    "Failed to encode {}x{} frame of {}",
                    frame.width(),
                    frame.height(),
                    self.name
                )
            })?);
        }
        Ok(dir)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.to_icon_dir()?.write(&mut output)?;
        Ok(output)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let dir = self.to_icon_dir()?;
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        dir.write(&mut writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Reads every frame, whatever bit depth or compression it was stored with.
    pub fn decode(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let name = name.into();
        let dir = IconDir::read(Cursor::new(data))
            .with_context(|| format!("{} is not a valid .ico file", name))?;
        if dir.resource_type() != ResourceType::Icon {
            bail!("{} is a cursor, not an icon", name);
        }

        let mut container = Self::new(name);
        for entry in dir.entries() {
            let image = entry.decode().with_context(|| {
                format!(
                    "Failed to decode {}x{} frame of {}",
                    entry.width(),
                    entry.height(),
                    container.name
                )
            })?;
            container.frames.push(to_rgba_image(&image)?);
        }
        Ok(container)
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("icon")
            .to_string();
        Self::decode(name, &data)
    }
}

/// Full-size frames are PNG compressed, smaller ones are BMPs with an AND mask.
fn encode_frame(frame: &RgbaImage) -> std::io::Result<IconDirEntry> {
    let image = IconImage::from_rgba_data(frame.width(), frame.height(), frame.as_raw().clone());
    if frame.width() >= MAX_SIDE || frame.height() >= MAX_SIDE {
        IconDirEntry::encode_as_png(&image)
    } else {
        IconDirEntry::encode_as_bmp(&image)
    }
}

fn to_rgba_image(image: &IconImage) -> Result<RgbaImage> {
    RgbaImage::from_raw(image.width(), image.height(), image.rgba_data().to_vec())
        .context("Decoded icon frame has the wrong pixel count")
}
