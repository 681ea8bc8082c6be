use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output image formats offered by the save menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormatTag {
    Bmp,
    Emf,
    Gif,
    Icon,
    Jpeg,
    Exif,
    Png,
    Tiff,
    Wmf,
}

impl FormatTag {
    pub const ALL: [FormatTag; 9] = [
        FormatTag::Bmp,
        FormatTag::Emf,
        FormatTag::Gif,
        FormatTag::Icon,
        FormatTag::Jpeg,
        FormatTag::Exif,
        FormatTag::Png,
        FormatTag::Tiff,
        FormatTag::Wmf,
    ];

    /// Canonical file extension, always lowercase.
    pub fn extension(self) -> &'static str {
        match self {
            FormatTag::Bmp => "bmp",
            FormatTag::Emf => "emf",
            FormatTag::Gif => "gif",
            FormatTag::Icon => "ico",
            FormatTag::Jpeg => "jpg",
            FormatTag::Exif => "exif",
            FormatTag::Png => "png",
            FormatTag::Tiff => "tif",
            FormatTag::Wmf => "wmf",
        }
    }

    /// Case-insensitive; accepts `jpeg` and `tiff` as synonyms.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "bmp" => Some(FormatTag::Bmp),
            "emf" => Some(FormatTag::Emf),
            "gif" => Some(FormatTag::Gif),
            "ico" => Some(FormatTag::Icon),
            "jpg" | "jpeg" => Some(FormatTag::Jpeg),
            "exif" => Some(FormatTag::Exif),
            "png" => Some(FormatTag::Png),
            "tif" | "tiff" => Some(FormatTag::Tiff),
            "wmf" => Some(FormatTag::Wmf),
            _ => None,
        }
    }

    /// Formats without an alpha channel get drawn onto the background color first.
    pub fn needs_opaque_background(self) -> bool {
        matches!(self, FormatTag::Bmp | FormatTag::Gif | FormatTag::Jpeg)
    }

    pub fn file_name(self, name: &str) -> String {
        format!("{}.{}", name, self.extension())
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FormatTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatTag::from_extension(s.trim().trim_start_matches('.'))
            .ok_or_else(|| format!("unknown image format: {}", s))
    }
}

impl TryFrom<String> for FormatTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FormatTag> for String {
    fn from(tag: FormatTag) -> Self {
        tag.extension().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table() {
        assert_eq!(FormatTag::Jpeg.extension(), "jpg");
        assert_eq!(FormatTag::Tiff.extension(), "tif");
        assert_eq!(FormatTag::Icon.extension(), "ico");
        assert_eq!(FormatTag::Exif.extension(), "exif");
    }

    #[test]
    fn test_synonyms() {
        assert_eq!(FormatTag::from_extension("jpeg"), Some(FormatTag::Jpeg));
        assert_eq!(FormatTag::from_extension("jpg"), Some(FormatTag::Jpeg));
        assert_eq!(FormatTag::from_extension("TIFF"), Some(FormatTag::Tiff));
        assert_eq!(FormatTag::from_extension("Tif"), Some(FormatTag::Tiff));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(FormatTag::from_extension("xyz"), None);
        assert_eq!(FormatTag::from_extension(""), None);
        assert!("xyz".parse::<FormatTag>().is_err());
    }

    #[test]
    fn test_every_tag_maps_back_to_itself() {
        for tag in FormatTag::ALL {
            assert_eq!(FormatTag::from_extension(tag.extension()), Some(tag));
        }
        let png = FormatTag::from_extension(FormatTag::Png.extension()).unwrap();
        assert_eq!(png.extension(), "png");
    }

    #[test]
    fn test_opaque_formats() {
        let opaque: Vec<_> = FormatTag::ALL
            .into_iter()
            .filter(|t| t.needs_opaque_background())
            .collect();
        assert_eq!(opaque, vec![FormatTag::Bmp, FormatTag::Gif, FormatTag::Jpeg]);
    }

    #[test]
    fn test_parse_with_dot() {
        assert_eq!(".PNG".parse::<FormatTag>(), Ok(FormatTag::Png));
        assert_eq!(FormatTag::Png.file_name("FileSave"), "FileSave.png");
    }
}
