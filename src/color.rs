//! Hex ⇄ HSL color conversion.
//!
//! Colors travel through the system as `#RRGGBB` strings. The theme needs
//! them as integer HSL triples (`h s% l%`), which is what [`hex_to_hsl`]
//! produces. Rounding to whole degrees and percents costs up to
//! [`ROUNDED_ROUND_TRIP_TOLERANCE`] units per channel on the way back, so
//! [`Rgb`] also exposes the unrounded conversion for callers that need a
//! round trip within ±1.

use std::fmt;

use crate::error::{BrandError, Result};

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a 6-digit hex color, with or without a leading `#`.
    ///
    /// Case-insensitive. Shorthand (`#FFF`) and alpha (`#RRGGBBAA`) forms
    /// are rejected.
    pub fn parse_hex(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BrandError::invalid_color(input));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| BrandError::invalid_color(input))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Canonical `#RRGGBB` form (uppercase).
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Unrounded HSL: hue in degrees `[0, 360)`, saturation and lightness
    /// in percent `[0, 100]`.
    pub fn to_hsl_exact(&self) -> (f64, f64, f64) {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        // Red wins ties, then green.
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        ((h * 60.0).rem_euclid(360.0), s * 100.0, l * 100.0)
    }

    /// Inverse of [`Rgb::to_hsl_exact`]. Hue wraps modulo 360; saturation and
    /// lightness are clamped to `[0, 100]`.
    pub fn from_hsl_exact(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// HSL rounded to whole degrees and percents.
    pub fn to_hsl(&self) -> Hsl {
        let (h, s, l) = self.to_hsl_exact();
        Hsl::new(h.round() as i32, s.round() as i32, l.round() as i32)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// An HSL triple in whole degrees and percents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: u16,
    /// Saturation in percent, `[0, 100]`.
    pub s: u8,
    /// Lightness in percent, `[0, 100]`.
    pub l: u8,
}

impl Hsl {
    /// Builds a triple, taking hue modulo 360 and clamping saturation and
    /// lightness into `[0, 100]`.
    pub fn new(h: i32, s: i32, l: i32) -> Self {
        Self {
            h: h.rem_euclid(360) as u16,
            s: s.clamp(0, 100) as u8,
            l: l.clamp(0, 100) as u8,
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        Rgb::from_hsl_exact(self.h as f64, self.s as f64, self.l as f64)
    }
}

/// Formats as the space-separated components used by CSS custom properties,
/// e.g. `0 100% 50%`.
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

/// Returns true for strings of the exact form `#RRGGBB`.
pub fn is_hex_color(value: &str) -> bool {
    value.starts_with('#') && Rgb::parse_hex(value).is_ok()
}

/// Largest per-channel error of `hsl_to_hex(hex_to_hsl(x))` over every
/// 24-bit color. Whole degrees and percents cannot address every RGB value.
pub const ROUNDED_ROUND_TRIP_TOLERANCE: u8 = 5;

/// Converts a hex color to a rounded HSL triple.
///
/// Converting back with [`hsl_to_hex`] lands within
/// [`ROUNDED_ROUND_TRIP_TOLERANCE`] of the original on each channel. Use
/// [`Rgb::to_hsl_exact`] and [`Rgb::from_hsl_exact`] when a round trip must
/// stay within ±1.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl> {
    Ok(Rgb::parse_hex(hex)?.to_hsl())
}

/// Converts an HSL triple back to `#RRGGBB`.
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_rgb().to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn pure_red() {
        assert_eq!(hex_to_hsl("#FF0000").unwrap(), Hsl { h: 0, s: 100, l: 50 });
    }

    #[test]
    fn mid_gray() {
        assert_eq!(hex_to_hsl("#808080").unwrap(), Hsl { h: 0, s: 0, l: 50 });
    }

    #[test]
    fn primaries_and_extremes() {
        assert_eq!(hex_to_hsl("#00FF00").unwrap(), Hsl { h: 120, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("#0000FF").unwrap(), Hsl { h: 240, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("#FFFFFF").unwrap(), Hsl { h: 0, s: 0, l: 100 });
        assert_eq!(hex_to_hsl("#000000").unwrap(), Hsl { h: 0, s: 0, l: 0 });
    }

    #[test]
    fn parse_is_case_insensitive_and_hash_optional() {
        assert_eq!(Rgb::parse_hex("#a1B2c3").unwrap(), Rgb::new(0xA1, 0xB2, 0xC3));
        assert_eq!(Rgb::parse_hex("A1B2C3").unwrap(), Rgb::new(0xA1, 0xB2, 0xC3));
    }

    #[test]
    fn malformed_hex_is_format_error() {
        for bad in ["", "#", "#FFF", "#FFFFFFFF", "#GG0000", "red", "##FF0000", "#FF 000"] {
            let err = hex_to_hsl(bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidColor, "input {:?}", bad);
        }
    }

    #[test]
    fn is_hex_color_requires_hash() {
        assert!(is_hex_color("#1a2b3c"));
        assert!(!is_hex_color("1a2b3c"));
        assert!(!is_hex_color("#1a2b3"));
    }

    #[test]
    fn hue_is_modular() {
        for h in [0, 45, 120, 200, 359] {
            let a = hsl_to_hex(Hsl::new(h, 70, 40));
            let b = hsl_to_hex(Hsl::new(h + 360, 70, 40));
            let c = hsl_to_hex(Hsl::new(h - 360, 70, 40));
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }

    #[test]
    fn saturation_and_lightness_clamp() {
        assert_eq!(Hsl::new(10, 150, -5), Hsl { h: 10, s: 100, l: 0 });
        assert_eq!(Hsl::new(-90, 50, 50).h, 270);
    }

    #[test]
    fn integer_round_trip_of_primaries() {
        for hex in ["#FF0000", "#00FF00", "#0000FF", "#FFFFFF", "#000000", "#808080"] {
            assert_eq!(hsl_to_hex(hex_to_hsl(hex).unwrap()), hex);
        }
    }

    fn channel_error(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn rounded_round_trip_worst_case() {
        let back = hsl_to_hex(hex_to_hsl("#02E4E6").unwrap());
        assert_eq!(back, "#02DFE3");

        let mut worst = 0;
        for rgb in 0..=0xFF_FFFFu32 {
            let original = Rgb::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
            let back = original.to_hsl().to_rgb();
            worst = worst.max(channel_error(original, back));
        }
        assert_eq!(worst, ROUNDED_ROUND_TRIP_TOLERANCE);
    }

    #[test]
    fn exact_round_trip_within_one_unit() {
        for r in (0..=255u32).step_by(5) {
            for g in (0..=255u32).step_by(15) {
                for b in (0..=255u32).step_by(17) {
                    let original = Rgb::new(r as u8, g as u8, b as u8);
                    let (h, s, l) = original.to_hsl_exact();
                    let back = Rgb::from_hsl_exact(h, s, l);
                    assert!(
                        (original.r as i16 - back.r as i16).abs() <= 1
                            && (original.g as i16 - back.g as i16).abs() <= 1
                            && (original.b as i16 - back.b as i16).abs() <= 1,
                        "{} came back as {}",
                        original,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn display_uses_css_component_form() {
        assert_eq!(Hsl::new(210, 40, 96).to_string(), "210 40% 96%");
    }

    #[test]
    fn to_hex_is_uppercase() {
        assert_eq!(Rgb::new(0xab, 0x0c, 0xff).to_hex(), "#AB0CFF");
    }
}
