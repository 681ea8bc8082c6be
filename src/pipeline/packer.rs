// Multi-size icon packing

use anyhow::Result;
use image::RgbaImage;

use super::ico::IconContainer;
use crate::model::Dimension;
use crate::source::ImageSource;

/// Builds a container from already rendered frames, in the order given.
/// A missing rendering skips that size; the rest are still packed.
pub fn pack<F>(
    name: &str,
    sized_images: Vec<((Dimension, Dimension), Option<RgbaImage>)>,
    mut log_fn: F,
) -> IconContainer
where
    F: FnMut(String),
{
    let mut icon = IconContainer::new(name);

    for ((width, height), image) in sized_images {
        match image {
            Some(image) => {
                if let Err(e) = icon.add(image) {
                    log_fn(format!("  ✗ {} {}x{}: {}", name, width, height, e));
                }
            }
            None => {
                log_fn(format!(
                    "  ✗ {} has no {}x{} image, skipping size",
                    name, width, height
                ));
            }
        }
    }

    icon
}

/// Asks `source` for `name` at every size and packs whatever it returns.
pub fn pack_from_source<S, F>(
    source: &S,
    name: &str,
    sizes: &[(Dimension, Dimension)],
    log_fn: F,
) -> IconContainer
where
    S: ImageSource + ?Sized,
    F: FnMut(String),
{
    let sized_images = sizes
        .iter()
        .map(|&(width, height)| ((width, height), source.lookup(name, width, height)))
        .collect();
    pack(name, sized_images, log_fn)
}

/// Packs and serializes in one step.
pub fn pack_bytes<S>(source: &S, name: &str, sizes: &[(Dimension, Dimension)]) -> Result<Vec<u8>>
where
    S: ImageSource + ?Sized,
{
    pack_from_source(source, name, sizes, |_| {}).encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn source() -> MemorySource {
        MemorySource::new()
            .with("FileSave", RgbaImage::new(16, 16))
            .with("FileSave", RgbaImage::new(32, 32))
    }

    #[test]
    fn test_missing_size_is_skipped() {
        let mut logs = Vec::new();
        let icon = pack_from_source(
            &source(),
            "FileSave",
            &[(16, 16), (32, 32), (48, 48)],
            |msg| logs.push(msg),
        );

        let sizes: Vec<_> = icon.frames().iter().map(|f| f.dimensions()).collect();
        assert_eq!(sizes, vec![(16, 16), (32, 32)]);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("48x48"));
    }

    #[test]
    fn test_frames_follow_requested_order() {
        let icon = pack_from_source(&source(), "FileSave", &[(32, 32), (16, 16)], |_| {});
        let widths: Vec<_> = icon.frames().iter().map(|f| f.width()).collect();
        assert_eq!(widths, vec![32, 16]);
    }

    #[test]
    fn test_pack_bytes_decodes() {
        let bytes = pack_bytes(&source(), "FileSave", &[(16, 16), (32, 32), (48, 48)]).unwrap();
        let decoded = IconContainer::decode("FileSave", &bytes).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_packed_bytes_read_by_other_decoders() {
        use image::{ImageFormat, Rgba};
        use std::io::Cursor;

        let frame = |size: u32| {
            RgbaImage::from_fn(size, size, |x, _| {
                if x < size / 2 {
                    Rgba([0, 0, 0, 0])
                } else {
                    Rgba([0, 120, 200, 220])
                }
            })
        };
        let source = MemorySource::new()
            .with("Help", frame(16))
            .with("Help", frame(32));

        let bytes = pack_bytes(&source, "Help", &[(16, 16), (32, 32), (48, 48)]).unwrap();

        let dir = ico::IconDir::read(Cursor::new(&bytes)).unwrap();
        let sizes: Vec<_> = dir.entries().iter().map(|e| (e.width(), e.height())).collect();
        assert_eq!(sizes, vec![(16, 16), (32, 32)]);
        for entry in dir.entries() {
            let image = entry.decode().unwrap();
            let rgba = image.rgba_data();
            assert_eq!(rgba[3], 0);
            assert_eq!(rgba[rgba.len() - 1], 220);
        }

        // image picks the largest frame
        let largest = image::load_from_memory_with_format(&bytes, ImageFormat::Ico)
            .unwrap()
            .to_rgba8();
        assert_eq!(largest.dimensions(), (32, 32));
        assert_eq!(largest.get_pixel(0, 0)[3], 0);
        assert_eq!(*largest.get_pixel(31, 31), Rgba([0, 120, 200, 220]));
    }

    #[test]
    fn test_oversized_frame_is_skipped() {
        let icon = pack(
            "Huge",
            vec![
                ((300, 300), Some(RgbaImage::new(300, 300))),
                ((16, 16), Some(RgbaImage::new(16, 16))),
            ],
            |_| {},
        );
        assert_eq!(icon.len(), 1);
    }
}
