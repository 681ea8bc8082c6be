// Copying pictures and names to the clipboard

use anyhow::{Context, Result, anyhow};
use image::ImageFormat;
use std::borrow::Cow;

use crate::model::Dimension;
use crate::pipeline::encode_png;
use crate::source::ImageSource;

pub trait ClipboardSink {
    /// Places a PNG-encoded picture on the clipboard.
    fn set_png(&mut self, png: Vec<u8>) -> Result<()>;

    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("Failed to open the clipboard")?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_png(&mut self, png: Vec<u8>) -> Result<()> {
        let image = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .context("Failed to decode clipboard picture")?
            .to_rgba8();
        let (width, height) = image.dimensions();
        self.inner
            .set_image(arboard::ImageData {
                width: width as usize,
                height: height as usize,
                bytes: Cow::Owned(image.into_raw()),
            })
            .context("Failed to place picture on the clipboard")
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .context("Failed to place text on the clipboard")
    }
}

pub fn copy_picture<S, C>(
    source: &S,
    clipboard: &mut C,
    name: &str,
    size: (Dimension, Dimension),
) -> Result<()>
where
    S: ImageSource + ?Sized,
    C: ClipboardSink + ?Sized,
{
    let (width, height) = size;
    let image = source
        .lookup(name, width, height)
        .ok_or_else(|| anyhow!("No {}x{} image for {}", width, height, name))?;
    clipboard.set_png(encode_png(&image)?)
}

/// Copies the names one per line; nothing happens when there are none.
pub fn copy_text<N, C>(clipboard: &mut C, names: &[N]) -> Result<bool>
where
    N: AsRef<str>,
    C: ClipboardSink + ?Sized,
{
    let value = names
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    let value = value.trim();
    if value.is_empty() {
        return Ok(false);
    }
    clipboard.set_text(value)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use image::{Rgba, RgbaImage};

    #[derive(Default)]
    struct RecordingClipboard {
        png: Option<Vec<u8>>,
        text: Option<String>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_png(&mut self, png: Vec<u8>) -> Result<()> {
            self.png = Some(png);
            Ok(())
        }

        fn set_text(&mut self, text: &str) -> Result<()> {
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_picture_keeps_alpha() {
        let image = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 40]));
        let source = MemorySource::new().with("CopyPicture", image.clone());
        let mut clipboard = RecordingClipboard::default();

        copy_picture(&source, &mut clipboard, "CopyPicture", (16, 16)).unwrap();

        let png = clipboard.png.unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_copy_picture_missing_size() {
        let source = MemorySource::new().with("CopyPicture", RgbaImage::new(16, 16));
        let mut clipboard = RecordingClipboard::default();

        assert!(copy_picture(&source, &mut clipboard, "CopyPicture", (32, 32)).is_err());
        assert!(clipboard.png.is_none());
    }

    #[test]
    fn test_copy_text_joins_lines() {
        let mut clipboard = RecordingClipboard::default();
        assert!(copy_text(&mut clipboard, &["Copy", "FileSave"]).unwrap());
        assert_eq!(clipboard.text.as_deref(), Some("Copy\nFileSave"));
    }

    #[test]
    fn test_copy_text_empty_selection() {
        let mut clipboard = RecordingClipboard::default();
        let none: [&str; 0] = [];
        assert!(!copy_text(&mut clipboard, &none).unwrap());
        assert!(clipboard.text.is_none());
    }
}
