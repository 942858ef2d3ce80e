//! Hex color decoding.

use thiserror::Error;

/// Red, green, blue and alpha channels.
pub type Rgba = [u8; 4];

/// Errors from [`decode_color`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit in '{0}'")]
    InvalidDigit(String),
}

/// Decode `#rrggbb` or `#rrggbbaa` (the `#` is optional, digits are
/// case-insensitive). Six-digit colors are opaque.
pub fn decode_color(hex: &str) -> Result<Rgba, ColorError> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit(hex.to_string()));
    }
    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorError::InvalidLength(digits.len()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| ColorError::InvalidDigit(hex.to_string()))
    };
    let alpha = if digits.len() == 8 { channel(3)? } else { 255 };
    Ok([channel(0)?, channel(1)?, channel(2)?, alpha])
}
