use anyhow::{Context, Result, bail};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::model::FormatTag;

/// Writes one rendering in `format`. Icons go through the packer instead.
///
/// Emf, Wmf and Exif have no raster encoder, so those files hold PNG data
/// under their own extension.
pub fn write_image(image: &RgbaImage, format: FormatTag, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let result = match format {
        FormatTag::Png | FormatTag::Emf | FormatTag::Wmf | FormatTag::Exif => {
            image.save_with_format(path, ImageFormat::Png)
        }
        FormatTag::Gif => image.save_with_format(path, ImageFormat::Gif),
        FormatTag::Tiff => image.save_with_format(path, ImageFormat::Tiff),
        FormatTag::Bmp => to_rgb(image).save_with_format(path, ImageFormat::Bmp),
        FormatTag::Jpeg => to_rgb(image).save_with_format(path, ImageFormat::Jpeg),
        FormatTag::Icon => bail!("Icons are written with the icon packer"),
    };

    result.with_context(|| format!("Failed to write {}", path.display()))
}

/// PNG keeps the alpha channel, which a plain bitmap copy would lose.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(png)
}

fn to_rgb(image: &RgbaImage) -> image::RgbImage {
    DynamicImage::ImageRgba8(image.clone()).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(16, 16, |x, _| {
            if x < 8 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn test_png_keeps_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Help.png");

        write_image(&sample(), FormatTag::Png, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(12, 0)[3], 0);
    }

    #[test]
    fn test_every_raster_format_writes() {
        let dir = tempdir().unwrap();
        for format in FormatTag::ALL {
            if format == FormatTag::Icon {
                continue;
            }
            let path = dir.path().join(format.file_name("Help"));
            write_image(&sample(), format, &path).unwrap();
            assert!(path.exists(), "{} not written", format);
        }
    }

    #[test]
    fn test_placeholder_formats_hold_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Help.wmf");
        write_image(&sample(), FormatTag::Wmf, &path).unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(&data[1..4], b"PNG");
    }

    #[test]
    fn test_icon_is_refused() {
        let dir = tempdir().unwrap();
        assert!(write_image(&sample(), FormatTag::Icon, &dir.path().join("Help.ico")).is_err());
    }

    #[test]
    fn test_jpeg_is_opaque() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Help.jpg");
        write_image(&sample(), FormatTag::Jpeg, &path).unwrap();

        let loaded = image::open(&path).unwrap();
        assert!(!loaded.color().has_alpha());
    }
}
