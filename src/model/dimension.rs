// Pixel size parsing for the "W x H" text field and export size labels

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub type Dimension = u16;

pub const MIN_PIXELS: Dimension = 16;
pub const MAX_PIXELS: Dimension = 128;

static PIXELS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2,3}\s*(x)?\s*(\d{2,3})?$").expect("static pixel pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
}

/// Ordered dimensions parsed from one text field, e.g. `[32, 32]` from "32 x 32".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionList(Vec<Dimension>);

impl DimensionList {
    pub fn values(&self) -> &[Dimension] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Width and height; a single value means a square.
    pub fn size(&self) -> Option<(Dimension, Dimension)> {
        match self.0.as_slice() {
            [] => None,
            [side] => Some((*side, *side)),
            [width, height, ..] => Some((*width, *height)),
        }
    }
}

/// Splits on `x` (either case), trims each piece and parses it as a signed
/// 16-bit integer; negative values are rejected. Empty pieces are dropped;
/// no pieces at all is an error.
pub fn parse(text: &str) -> Result<DimensionList, ParseError> {
    let values = text
        .split(['x', 'X'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<i16>()
                .ok()
                .and_then(|value| Dimension::try_from(value).ok())
                .ok_or_else(|| ParseError::NotANumber(segment.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.is_empty() {
        return Err(ParseError::NotANumber(text.trim().to_string()));
    }

    Ok(DimensionList(values))
}

/// Checks text typed into the pixel field and returns it normalized to
/// "W x H", or None when the field should revert to its last valid value.
pub fn validate_pixels(text: &str) -> Option<String> {
    let text = text.trim().to_lowercase();
    if !PIXELS_PATTERN.is_match(&text) {
        return None;
    }

    let dims = parse(&text).ok()?;
    let first = dims.values()[0];
    let in_range = dims
        .values()
        .iter()
        .all(|d| (MIN_PIXELS..=MAX_PIXELS).contains(d));
    let square = dims.values().iter().all(|d| *d == first);
    if !in_range || !square {
        return None;
    }

    let (width, height) = dims.size()?;
    Some(format_pixels(width, height))
}

pub fn format_pixels(width: Dimension, height: Dimension) -> String {
    format!("{} x {}", width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse("32 x 32").unwrap().values(), &[32, 32]);
        assert_eq!(parse("48").unwrap().values(), &[48]);
        assert_eq!(parse("24X16").unwrap().values(), &[24, 16]);
    }

    #[test]
    fn test_parse_many_segments() {
        let dims = parse("16 x 24 x 32").unwrap();
        assert_eq!(dims.len(), 3);
        assert_eq!(dims.size(), Some((16, 24)));
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse("abc"), Err(ParseError::NotANumber("abc".to_string())));
        assert!(parse("32 x ab").is_err());
        assert!(parse("-4").is_err());
        assert!(parse("70000").is_err());
        assert_eq!(parse("40000"), Err(ParseError::NotANumber("40000".to_string())));
        assert!(parse("32768").is_err());
        assert_eq!(parse("32767").unwrap().values(), &[32767]);
        assert!(parse("   ").is_err());
        assert!(parse("x").is_err());
    }

    #[test]
    fn test_size_single_value_is_square() {
        assert_eq!(parse("48").unwrap().size(), Some((48, 48)));
    }

    #[test]
    fn test_validate_pixels() {
        assert_eq!(validate_pixels("32"), Some("32 x 32".to_string()));
        assert_eq!(validate_pixels(" 64 X 64 "), Some("64 x 64".to_string()));
        assert_eq!(validate_pixels("128x128"), Some("128 x 128".to_string()));
    }

    #[test]
    fn test_validate_pixels_rejects() {
        // out of range
        assert_eq!(validate_pixels("12"), None);
        assert_eq!(validate_pixels("256"), None);
        // not square
        assert_eq!(validate_pixels("16 x 32"), None);
        // malformed
        assert_eq!(validate_pixels("32 x 32 x 32"), None);
        assert_eq!(validate_pixels("big"), None);
        assert_eq!(validate_pixels("5"), None);
    }
}
