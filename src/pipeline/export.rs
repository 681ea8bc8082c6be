// Batch export of the selected icons

use anyhow::Result;
use image::{Rgb, RgbaImage};
use std::path::{Path, PathBuf};

use super::compositor::composite;
use super::fs_ops::ensure_dir;
use super::ico::IconContainer;
use super::packer::pack_from_source;
use super::writer::write_image;
use crate::model::{Dimension, FormatTag};
use crate::source::ImageSource;

/// What a batch did. Items that could not be written are counted, never fatal.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!(
            "{} files written, {} skipped, {} failed",
            self.written.len(),
            self.skipped,
            self.failed
        )
    }

    fn record(&mut self, path: PathBuf, result: Result<()>, log_fn: &mut impl FnMut(String)) {
        match result {
            Ok(()) => {
                log_fn(format!("  ✓ Wrote {}", path.display()));
                self.written.push(path);
            }
            Err(e) => {
                log_fn(format!("  ✗ Failed to write {}: {:#}", path.display(), e));
                self.failed += 1;
            }
        }
    }
}

/// Writes `<name>.ico` for every name, one frame per requested size.
pub fn export_icons<S, N, F>(
    source: &S,
    names: &[N],
    sizes: &[(Dimension, Dimension)],
    output_dir: &Path,
    mut log_fn: F,
) -> Result<BatchReport>
where
    S: ImageSource + ?Sized,
    N: AsRef<str>,
    F: FnMut(String),
{
    ensure_dir(output_dir)?;
    let mut report = BatchReport::default();

    for (idx, name) in names.iter().enumerate() {
        let name = name.as_ref();
        log_fn(format!("Exporting {}/{}: {}", idx + 1, names.len(), name));

        let icon = pack_from_source(source, name, sizes, &mut log_fn);
        if icon.is_empty() {
            log_fn(format!("  ✗ No images found for {}", name));
            report.skipped += 1;
            continue;
        }

        let path = output_dir.join(FormatTag::Icon.file_name(name));
        let result = icon.write_to(&path);
        report.record(path, result, &mut log_fn);
    }

    Ok(report)
}

/// Writes every name once per format at a single size. Formats without
/// alpha get the rendering drawn over `background`; `Icon` writes a
/// one-frame icon.
pub fn save_images<S, N, F>(
    source: &S,
    names: &[N],
    size: (Dimension, Dimension),
    formats: &[FormatTag],
    background: Rgb<u8>,
    output_dir: &Path,
    mut log_fn: F,
) -> Result<BatchReport>
where
    S: ImageSource + ?Sized,
    N: AsRef<str>,
    F: FnMut(String),
{
    ensure_dir(output_dir)?;
    let mut report = BatchReport::default();
    let (width, height) = size;

    for (idx, name) in names.iter().enumerate() {
        let name = name.as_ref();
        log_fn(format!("Saving {}/{}: {}", idx + 1, names.len(), name));

        let Some(image) = source.lookup(name, width, height) else {
            log_fn(format!("  ✗ {} has no {}x{} image, skipping", name, width, height));
            report.skipped += 1;
            continue;
        };

        let canvas = formats
            .iter()
            .any(|f| f.needs_opaque_background())
            .then(|| composite(&image, background, width as u32, height as u32));

        for &format in formats {
            let path = output_dir.join(format.file_name(name));
            let result = match (&canvas, format) {
                (_, FormatTag::Icon) => write_single_icon(name, &image, &path),
                (Some(canvas), f) if f.needs_opaque_background() => write_image(canvas, f, &path),
                (_, f) => write_image(&image, f, &path),
            };
            report.record(path, result, &mut log_fn);
        }
    }

    Ok(report)
}

fn write_single_icon(name: &str, image: &RgbaImage, path: &Path) -> Result<()> {
    let mut icon = IconContainer::new(name);
    icon.add(image.clone())?;
    icon.write_to(path)
}
