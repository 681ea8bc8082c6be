pub mod color;
pub mod dimension;
pub mod filter;
pub mod format;

pub use color::{ColorError, color_name, parse_color};
pub use dimension::{Dimension, DimensionList, ParseError, parse, validate_pixels};
pub use filter::{FilterExpression, filter};
pub use format::FormatTag;
