use image::Rgb;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("unknown color: {0:?}")]
    Unknown(String),
}

const NAMED: &[(&str, [u8; 3])] = &[
    ("Black", [0, 0, 0]),
    ("White", [255, 255, 255]),
    ("Red", [255, 0, 0]),
    ("Lime", [0, 255, 0]),
    ("Blue", [0, 0, 255]),
    ("Yellow", [255, 255, 0]),
    ("Cyan", [0, 255, 255]),
    ("Magenta", [255, 0, 255]),
    ("Gray", [128, 128, 128]),
    ("Silver", [192, 192, 192]),
    ("Maroon", [128, 0, 0]),
    ("Green", [0, 128, 0]),
    ("Navy", [0, 0, 128]),
    ("Olive", [128, 128, 0]),
    ("Purple", [128, 0, 128]),
    ("Teal", [0, 128, 128]),
    ("Orange", [255, 165, 0]),
];

/// Accepts a color name ("Red"), "#RRGGBB" or "RRGGBB".
pub fn parse_color(text: &str) -> Result<Rgb<u8>, ColorError> {
    let text = text.trim();

    if let Some((_, rgb)) = NAMED.iter().find(|(n, _)| n.eq_ignore_ascii_case(text)) {
        return Ok(Rgb(*rgb));
    }

    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
            return Ok(Rgb([r, g, b]));
        }
    }

    Err(ColorError::Unknown(text.to_string()))
}

pub fn color_name(color: Rgb<u8>) -> String {
    NAMED
        .iter()
        .find(|(_, rgb)| *rgb == color.0)
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2]))
}
