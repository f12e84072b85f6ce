//! Hex colors and the named palettes installed as default color cycles.

use std::{ fmt, str::FromStr };
use serde::{ Deserialize, Deserializer, Serialize, Serializer };
use crate::mkerr;

const COLORS_PUBLICATION: &[&str] = &[
    "#5da5da", // blue
    "#faa43a", // orange
    "#60bd68", // green
    "#f17cb0", // pink
    "#b2912f", // brown
    "#b276b2", // purple
    "#decf3f", // yellow
    "#f15854", // red
    "#4d4d4d", // gray
];

const COLORS_GRAYSCALE: &[&str] = &[
    "#000000", "#555555", "#888888", "#aaaaaa", "#cccccc",
];

const COLORS_MATPLOTLIB: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Color set selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorSet {
    /// Muted nine-color palette suited to print.
    Publication,
    /// Black through light gray, for monochrome output.
    Grayscale,
    /// Matplotlib's factory `tab10` cycle.
    Matplotlib,
}

impl ColorSet {
    /// Return the raw hex color strings for the colorset, all with leading "#".
    pub fn hex(self) -> &'static [&'static str] {
        match self {
            Self::Publication => COLORS_PUBLICATION,
            Self::Grayscale   => COLORS_GRAYSCALE,
            Self::Matplotlib  => COLORS_MATPLOTLIB,
        }
    }

    /// Parse the colorset into [`Rgb`] values.
    pub fn colors(self) -> Vec<Rgb> {
        // constant tables above are all well-formed
        self.hex().iter()
            .filter_map(|h| h.parse().ok())
            .collect()
    }
}

mkerr!(RgbParseError: {
    MalformedRgb => "malformed hex color: expected 3 or 6 hex digits with an optional leading '#'",
    InvalidDigit => "malformed hex color: invalid hex digit",
});

/// An RGB color triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Convert from an RGB hex string.
    ///
    /// Strings can be either three or six hex digits, with or without a leading
    /// "#".
    pub fn from_hex(hex: &str) -> Result<Self, RgbParseError> {
        hex.parse()
    }

    /// Convert to an ordinary RGB hex string.
    ///
    /// Output from this function contains a leading "#".
    pub fn as_string(self) -> String { self.to_string() }
}

fn digits(hex: &str, width: usize) -> Result<Rgb, RgbParseError> {
    let channel = |k: usize| -> Result<u8, RgbParseError> {
        hex.get(k * width..(k + 1) * width)
            .ok_or(RgbParseError::MalformedRgb)
            .and_then(|s| {
                u8::from_str_radix(s, 16)
                    .map_err(|_| RgbParseError::InvalidDigit)
            })
    };
    let scale: u8 = if width == 1 { 17 } else { 1 };
    Ok(Rgb(channel(0)? * scale, channel(1)? * scale, channel(2)? * scale))
}

impl FromStr for Rgb {
    type Err = RgbParseError;

    fn from_str(hex: &str) -> Result<Self, Self::Err> {
        let bare = hex.strip_prefix('#').unwrap_or(hex);
        if !bare.is_ascii() { return Err(RgbParseError::InvalidDigit); }
        match bare.len() {
            3 => digits(bare, 1),
            6 => digits(bare, 2),
            _ => Err(RgbParseError::MalformedRgb),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_and_long_forms() {
        assert_eq!("#fff".parse::<Rgb>(), Ok(Rgb(255, 255, 255)));
        assert_eq!("a0b".parse::<Rgb>(), Ok(Rgb(0xaa, 0x00, 0xbb)));
        assert_eq!("#5da5da".parse::<Rgb>(), Ok(Rgb(0x5d, 0xa5, 0xda)));
        assert_eq!(Rgb::from_hex("4D4D4D"), Ok(Rgb(0x4d, 0x4d, 0x4d)));
    }

    #[test]
    fn reject_malformed() {
        assert_eq!("#ffff".parse::<Rgb>(), Err(RgbParseError::MalformedRgb));
        assert_eq!("#gg0000".parse::<Rgb>(), Err(RgbParseError::InvalidDigit));
        assert_eq!("".parse::<Rgb>(), Err(RgbParseError::MalformedRgb));
    }

    #[test]
    fn display_pads_channels() {
        assert_eq!(Rgb(0, 10, 255).as_string(), "#000aff");
    }

    #[test]
    fn palettes_parse_fully() {
        for set in [ColorSet::Publication, ColorSet::Grayscale, ColorSet::Matplotlib] {
            assert_eq!(set.colors().len(), set.hex().len());
        }
    }
}
