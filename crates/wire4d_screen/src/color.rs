//! 24-bit RGB color

use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::ScreenError;

/// RGB color, one byte per channel.
///
/// `repr(C)` and `Pod` so a slice of colors can be viewed as packed RGB bytes.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Checked construction; every channel must lie in `[0, 255]`
    pub fn try_new(r: i32, g: i32, b: i32) -> Result<Self, ScreenError> {
        let channel = |what: &'static str, v: i32| {
            u8::try_from(v).map_err(|_| ScreenError::OutOfRange {
                what,
                value: i64::from(v),
                min: 0,
                max: 255,
            })
        };
        Ok(Self::new(channel("red channel", r)?, channel("green channel", g)?, channel("blue channel", b)?))
    }

    /// Parse `rrggbb` (an optional leading `#` is accepted)
    pub fn from_hex(s: &str) -> Result<Self, ScreenError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ScreenError::InvalidArgument(format!("'{}' is not an rrggbb color", s)));
        }
        let pair = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| ScreenError::InvalidArgument(format!("'{}': {}", s, e)))
        };
        Ok(Self::new(pair(0)?, pair(2)?, pair(4)?))
    }

    /// Lower-case `rrggbb`, each channel zero-padded to two digits
    pub fn hex_string(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgb(r,g,b)`
    pub fn css_string(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    #[inline]
    pub fn array_value(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex_string())
    }
}
