use crate::error::{Error, Result};

/// RGB color for PDF graphics operations.
///
/// Each component is in the range 0.0 (none) to 1.0 (full intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a color from RGB components (each 0.0–1.0).
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Create a grayscale color (r = g = b = level).
    pub fn gray(level: f64) -> Self {
        Color::rgb(level, level, level)
    }

    pub fn black() -> Self {
        Color::gray(0.0)
    }

    /// Parse a 6-digit hex color such as `"ff0000"` or `"#e3e3e3"`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Color(hex.to_string()));
        }
        let channel = |i: usize| -> Result<f64> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| Error::Color(hex.to_string()))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase hex form without a leading `#`, e.g. `"ff0000"`.
    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Color::from_hex("ff0000").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hex("#000000").unwrap(), Color::black());
    }

    #[test]
    fn hex_round_trips() {
        for hex in ["e3e3e3", "aaaaaa", "d9d9d9", "ededed"] {
            assert_eq!(Color::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("fff").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
    }
}
