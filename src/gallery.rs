// Gallery session state: the loaded names, the current filter, the pixel
// field and the selection.

use anyhow::Result;

use crate::model::{self, Dimension};
use crate::source::ImageSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    LargeIcon,
}

impl ViewMode {
    /// Pixel preset that goes with each view.
    pub fn pixels(self) -> &'static str {
        match self {
            ViewMode::List => "16 x 16",
            ViewMode::LargeIcon => "32 x 32",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gallery {
    names: Vec<String>,
    pattern: String,
    visible: Vec<usize>,
    history: Vec<String>,
    pixels: String,
    selected: Vec<usize>,
    view: ViewMode,
}

impl Gallery {
    /// Loads the name list once; it is not refreshed afterwards.
    pub fn load<S: ImageSource + ?Sized>(source: &S, pixels: &str) -> Self {
        Self::from_names(source.names().to_vec(), pixels)
    }

    pub fn from_names(names: Vec<String>, pixels: &str) -> Self {
        let visible = (0..names.len()).collect();
        Self {
            names,
            pattern: String::new(),
            visible,
            history: Vec::new(),
            pixels: model::validate_pixels(pixels)
                .unwrap_or_else(|| ViewMode::default().pixels().to_string()),
            selected: Vec::new(),
            view: ViewMode::default(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_filtered(&self) -> bool {
        !self.pattern.is_empty()
    }

    /// Patterns used so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn visible(&self) -> Vec<&str> {
        self.visible.iter().map(|&i| self.names[i].as_str()).collect()
    }

    /// Re-filters the list. Returns false when the pattern did not change.
    /// The selection is cleared whenever the list is rebuilt.
    pub fn apply_filter(&mut self, pattern: &str) -> bool {
        let pattern = pattern.trim();
        if !pattern.is_empty() && !self.history.iter().any(|p| p == pattern) {
            self.history.push(pattern.to_string());
        }
        if pattern == self.pattern {
            return false;
        }

        self.pattern = pattern.to_string();
        self.visible = match model::FilterExpression::parse(pattern) {
            Some(expr) => (0..self.names.len())
                .filter(|&i| expr.matches(&self.names[i]))
                .collect(),
            None => (0..self.names.len()).collect(),
        };
        self.selected.clear();
        true
    }

    pub fn clear_filter(&mut self) -> bool {
        if !self.is_filtered() {
            return false;
        }
        self.apply_filter("")
    }

    pub fn pixels(&self) -> &str {
        &self.pixels
    }

    pub fn pixel_size(&self) -> Result<(Dimension, Dimension)> {
        let dims = model::parse(&self.pixels)?;
        dims.size()
            .ok_or_else(|| anyhow::anyhow!("Invalid pixel size {:?}", self.pixels))
    }

    /// Accepts the edited pixel field, or keeps the last valid value.
    pub fn commit_pixels(&mut self, text: &str) -> &str {
        if let Some(pixels) = model::validate_pixels(text) {
            self.pixels = pixels;
        }
        &self.pixels
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        if self.view != view {
            self.view = view;
            self.pixels = view.pixels().to_string();
        }
    }

    /// Selects visible names; unknown or hidden names are ignored.
    pub fn select<N: AsRef<str>>(&mut self, names: &[N]) -> usize {
        for name in names {
            let found = self
                .visible
                .iter()
                .copied()
                .find(|&i| self.names[i] == name.as_ref());
            if let Some(i) = found {
                if !self.selected.contains(&i) {
                    self.selected.push(i);
                }
            }
        }
        self.selected.len()
    }

    pub fn select_all(&mut self) {
        self.selected = self.visible.clone();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected names in list order.
    pub fn selected(&self) -> Vec<&str> {
        self.visible
            .iter()
            .filter(|i| self.selected.contains(*i))
            .map(|&i| self.names[i].as_str())
            .collect()
    }
}

/// Holds at most one open gallery for the life of the process.
#[derive(Debug, Default)]
pub struct GallerySlot {
    current: Option<Gallery>,
    activations: usize,
}

impl GallerySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the open gallery, building one first if none is open.
    pub fn open_or_activate<F>(&mut self, build: F) -> Result<&mut Gallery>
    where
        F: FnOnce() -> Result<Gallery>,
    {
        let gallery = match self.current.take() {
            Some(gallery) => {
                self.activations += 1;
                gallery
            }
            None => {
                self.activations = 0;
                build()?
            }
        };
        Ok(self.current.insert(gallery))
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Times the open gallery was reused instead of rebuilt.
    pub fn activations(&self) -> usize {
        self.activations
    }

    pub fn close(&mut self) -> Option<Gallery> {
        self.current.take()
    }
}
