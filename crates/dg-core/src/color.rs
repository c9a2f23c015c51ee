//! RGBA colors with hex parsing and shortest-form emission.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RGBA color, one byte per channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    /// Default edge stroke (violet).
    pub const VIOLET: Color = Color::rgb(0x77, 0x00, 0xff);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as the shortest lowercase hex string that round-trips.
    pub fn to_hex(&self) -> String {
        let channels: &[u8] = if self.a == 255 {
            &[self.r, self.g, self.b]
        } else {
            &[self.r, self.g, self.b, self.a]
        };
        let collapsible = channels.iter().all(|c| c >> 4 == c & 0xF);

        let mut out = String::with_capacity(1 + channels.len() * 2);
        out.push('#');
        for c in channels {
            if collapsible {
                out.push_str(&format!("{:x}", c & 0xF));
            } else {
                out.push_str(&format!("{c:02x}"));
            }
        }
        out
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid hex color: {s:?}"))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
