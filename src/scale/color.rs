//! Color values used for region fills.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, ensure, Result};
use serde::{Deserialize, Serialize};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Format as CSS hex: #rrggbb
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance in [0, 1], used to check light→dark ordering of a ramp.
    pub fn luminance(&self) -> f64 {
        0.2126 * self.r as f64 / 255.0 + 0.7152 * self.g as f64 / 255.0 + 0.0722 * self.b as f64 / 255.0
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Parse `#rrggbb` or `#rgb`.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#')
            .ok_or_else(|| anyhow!("[scale::color] expected a hex color like #74c476, got {s:?}"))?;
        ensure!(hex.is_ascii(), "[scale::color] invalid hex color {s:?}");

        let channel = |digits: &str| u8::from_str_radix(digits, 16)
            .map_err(|_| anyhow!("[scale::color] invalid hex color {s:?}"));

        match hex.len() {
            6 => Ok(Rgb::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(anyhow!("[scale::color] invalid hex color {s:?}")),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self { color.to_hex() }
}

/// Seven-class sequential green ramp, light → dark.
pub const GREENS_7: [Rgb; 7] = [
    Rgb::new(0xed, 0xf8, 0xe9),
    Rgb::new(0xc7, 0xe9, 0xc0),
    Rgb::new(0xa1, 0xd9, 0x9b),
    Rgb::new(0x74, 0xc4, 0x76),
    Rgb::new(0x41, 0xab, 0x5d),
    Rgb::new(0x23, 0x8b, 0x45),
    Rgb::new(0x00, 0x5a, 0x32),
];
