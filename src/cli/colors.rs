//! To maintain a theme of colors, I will add colors here as constants so
//! the output does not look bad at any point.
//!
//! - TAFLA_BLUE: Main Color

use colored::Color;

pub(crate) const TAFLA_BLUE: Color = Color::TrueColor {
    r: 2,
    g: 82,
    b: 156,
};
