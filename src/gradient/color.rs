//! Color stops: a single `#rrggbb` value.
//!
//! Stored as a packed 24-bit integer; formatted lowercase with zero padding.
//! Parsing accepts either hex case and canonicalizes.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::GradientError;

/// Largest 24-bit RGB value.
const RGB_MAX: u32 = 0x00FF_FFFF;

/// One color contributing to the gradient. Identity is positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorStop {
    rgb: u32,
}

impl ColorStop {
    /// Build from a packed `0xRRGGBB` value. Bits above 24 are dropped.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self { rgb: rgb & RGB_MAX }
    }

    pub const fn rgb(self) -> u32 {
        self.rgb
    }

    pub const fn r(self) -> u8 {
        (self.rgb >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.rgb >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.rgb as u8
    }

    /// Parse `#rrggbb`. Anything else (short form, names, missing `#`) is rejected.
    pub fn parse(s: &str) -> Result<Self, GradientError> {
        let invalid = || GradientError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        Ok(Self { rgb })
    }

    /// Channel-wise linear interpolation in sRGB, `t` clamped to [0, 1].
    pub fn lerp(self, other: ColorStop, t: f32) -> (u8, u8, u8) {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        (mix(self.r(), other.r()), mix(self.g(), other.g()), mix(self.b(), other.b()))
    }
}

impl fmt::Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.rgb)
    }
}

impl FromStr for ColorStop {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColorStop {
    type Error = GradientError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ColorStop> for String {
    fn from(c: ColorStop) -> Self {
        c.to_string()
    }
}

/// Draw one uniformly distributed 24-bit color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> ColorStop {
    ColorStop::from_rgb(rng.gen_range(0..=RGB_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    #[test]
    fn parse_canonical() {
        let c = ColorStop::parse("#ff8c00").unwrap();
        assert_eq!(c.rgb(), 0xff8c00);
        assert_eq!((c.r(), c.g(), c.b()), (0xff, 0x8c, 0x00));
        assert_eq!(c.to_string(), "#ff8c00");
    }

    #[test]
    fn parse_uppercase_canonicalizes() {
        let c: ColorStop = "#ABCDEF".parse().unwrap();
        assert_eq!(c.to_string(), "#abcdef");
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "#", "ff8c00", "#fff", "#ff8c0", "#ff8c000", "#gg0000", "red", "#+f8c00", " #ff8c00"] {
            assert_eq!(
                ColorStop::parse(bad),
                Err(GradientError::InvalidColor(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_keeps_leading_zeros() {
        assert_eq!(ColorStop::from_rgb(0x000001).to_string(), "#000001");
        assert_eq!(ColorStop::from_rgb(0).to_string(), "#000000");
    }

    #[test]
    fn from_rgb_masks_high_bits() {
        assert_eq!(ColorStop::from_rgb(0xAB_123456).rgb(), 0x123456);
    }

    #[test]
    fn random_color_always_six_lowercase_digits() {
        let re = Regex::new(r"^#[0-9a-f]{6}$").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = random_color(&mut rng).to_string();
            assert!(re.is_match(&c), "bad color: {c}");
        }
    }

    #[test]
    fn random_color_covers_high_and_low_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let colors: Vec<u32> = (0..2000).map(|_| random_color(&mut rng).rgb()).collect();
        assert!(colors.iter().any(|&c| c < 0x100000));
        assert!(colors.iter().any(|&c| c > 0xF00000));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let black = ColorStop::from_rgb(0x000000);
        let white = ColorStop::from_rgb(0xffffff);
        assert_eq!(black.lerp(white, 0.0), (0, 0, 0));
        assert_eq!(black.lerp(white, 1.0), (255, 255, 255));
        assert_eq!(black.lerp(white, 0.5), (128, 128, 128));
        assert_eq!(black.lerp(white, 2.0), (255, 255, 255));
    }

    #[test]
    fn serde_as_hex_string() {
        let c: ColorStop = serde_yaml::from_str("\"#123456\"").unwrap();
        assert_eq!(c.rgb(), 0x123456);
        let out = serde_yaml::to_string(&c).unwrap();
        assert!(out.contains("#123456"));
        assert!(serde_yaml::from_str::<ColorStop>("\"blue\"").is_err());
    }
}
