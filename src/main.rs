use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use icon_gallery::clipboard::{self, SystemClipboard};
use icon_gallery::model::{self, FormatTag};
use icon_gallery::pipeline::{export_icons, save_images};
use icon_gallery::source::WINDOW_ICON_NAMES;
use icon_gallery::{DirectorySource, Gallery, GalleryConfig, GallerySlot, ImageSource};

#[derive(Parser)]
#[command(version, about = "Browse, filter and export a stock icon collection", long_about = None)]
struct Cli {
    /// Directory holding the icon collection (svg, ico, png, ...).
    #[arg(long, env = "ICON_GALLERY_SOURCE")]
    source: Option<PathBuf>,

    /// Configuration file; defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List icon names, optionally filtered ("copy save" = both, "copy, save" = either).
    List {
        #[arg(long, short)]
        filter: Option<String>,
    },
    /// Write <name>.ico with one frame per export size.
    Export {
        #[arg(required = true)]
        names: Vec<String>,
        /// Export size such as "16 x 16"; repeatable. Defaults to the checked sizes.
        #[arg(long = "size")]
        sizes: Vec<String>,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Write <name>.<ext> for each format at the current pixel size.
    Save {
        #[arg(required = true)]
        names: Vec<String>,
        /// Output format (bmp, gif, jpg, png, tif, ico, ...); repeatable.
        #[arg(long = "format")]
        formats: Vec<FormatTag>,
        #[arg(long)]
        pixels: Option<String>,
        /// Background for formats without transparency, e.g. "White" or "#336699".
        #[arg(long)]
        background: Option<String>,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Copy one icon to the clipboard as a PNG.
    CopyPicture {
        name: String,
        #[arg(long)]
        pixels: Option<String>,
    },
    /// Copy icon names to the clipboard, one per line.
    CopyText { names: Vec<String> },
    /// Print the effective configuration.
    Config,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(GalleryConfig::default_path);
    let mut config = match &config_path {
        Some(path) => GalleryConfig::load_or_default(path)?,
        None => GalleryConfig::default(),
    };

    if let Command::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let source_dir = cli
        .source
        .clone()
        .or_else(|| config.source_dir.clone())
        .context("No icon directory given; pass --source or set source_dir in the config")?;
    let source = DirectorySource::open(&source_dir)?;

    let mut slot = GallerySlot::new();
    let gallery = slot.open_or_activate(|| Ok(Gallery::load(&source, &config.pixels)))?;
    if source.lookup_first(&WINDOW_ICON_NAMES, 32, 32).is_none() {
        eprintln!("Note: collection has no gallery icon");
    }

    match cli.command {
        Command::List { filter } => {
            gallery.apply_filter(filter.as_deref().unwrap_or(""));
            for name in gallery.visible() {
                println!("{}", name);
            }
        }
        Command::Export { names, sizes, out } => {
            let selection = select(gallery, &names)?;
            let sizes = if sizes.is_empty() {
                config.selected_sizes()
            } else {
                parse_sizes(&sizes)?
            };
            if sizes.is_empty() {
                bail!("No export sizes selected");
            }
            let out = output_dir(out, &config)?;

            let report = export_icons(&source, &selection, &sizes, &out, |msg| eprintln!("{}", msg))?;
            eprintln!("{}", report.summary());
            println!("Export Complete.");
        }
        Command::Save {
            names,
            formats,
            pixels,
            background,
            out,
        } => {
            let selection = select(gallery, &names)?;
            if let Some(pixels) = pixels {
                gallery.commit_pixels(&pixels);
            }
            if let Some(background) = background {
                config.background = background;
            }
            let formats = if formats.is_empty() {
                config.selected_formats()
            } else {
                formats
            };
            if formats.is_empty() {
                bail!("No save formats selected");
            }
            let out = output_dir(out, &config)?;

            let report = save_images(
                &source,
                &selection,
                gallery.pixel_size()?,
                &formats,
                config.background_color()?,
                &out,
                |msg| eprintln!("{}", msg),
            )?;
            eprintln!("{}", report.summary());
            println!("Save Complete.");
        }
        Command::CopyPicture { name, pixels } => {
            if let Some(pixels) = pixels {
                gallery.commit_pixels(&pixels);
            }
            let mut sink = SystemClipboard::new()?;
            clipboard::copy_picture(&source, &mut sink, &name, gallery.pixel_size()?)?;
        }
        Command::CopyText { names } => {
            let selection = select(gallery, &names)?;
            let mut sink = SystemClipboard::new()?;
            if !clipboard::copy_text(&mut sink, &selection)? {
                eprintln!("Nothing to copy");
            }
        }
        Command::Config => {}
    }

    Ok(())
}

/// Selects the given names; unknown names are reported and dropped.
fn select(gallery: &mut Gallery, names: &[String]) -> Result<Vec<String>> {
    gallery.clear_selection();
    gallery.select(names);
    let selection: Vec<String> = gallery.selected().into_iter().map(String::from).collect();

    for name in names {
        if !selection.contains(name) {
            eprintln!("Warning: no icon named {}", name);
        }
    }
    if selection.is_empty() {
        bail!("None of the given names are in the collection");
    }
    Ok(selection)
}

fn parse_sizes(labels: &[String]) -> Result<Vec<(model::Dimension, model::Dimension)>> {
    labels
        .iter()
        .map(|label| {
            model::parse(&label.to_lowercase())
                .with_context(|| format!("Invalid size {:?}", label))?
                .size()
                .with_context(|| format!("Invalid size {:?}", label))
        })
        .collect()
}

fn output_dir(out: Option<PathBuf>, config: &GalleryConfig) -> Result<PathBuf> {
    out.or_else(|| config.output_dir.clone())
        .or_else(|| std::env::current_dir().ok())
        .map(|p| absolute_or_same(&p))
        .context("No output directory")
}

fn absolute_or_same(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
