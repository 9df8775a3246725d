//! Chart styling: kind selection, colors, and the option record with defaults.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Which chart to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

/// RGB color with an alpha in `0..=1`, parsed from CSS-style strings.
///
/// Accepted forms: `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            // Length counts bytes; non-ASCII would break the fixed slicing below.
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(format!("expected #rrggbb, got `{s}`"));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|e| format!("bad hex in `{s}`: {e}"))
            };
            return Ok(Rgba::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(format!("unrecognized color `{s}`"));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| format!("missing `)` in `{s}`"))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(format!("expected {expected} components in `{s}`"));
        }
        let byte =
            |p: &str| -> Result<u8, String> { p.parse().map_err(|e| format!("bad `{p}`: {e}")) };
        let a = if has_alpha {
            let a: f64 = parts[3]
                .parse()
                .map_err(|e| format!("bad alpha `{}`: {e}", parts[3]))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(format!("alpha out of range in `{s}`"));
            }
            a
        } else {
            1.0
        };
        Ok(Rgba::rgba(byte(parts[0])?, byte(parts[1])?, byte(parts[2])?, a))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.a - 1.0).abs() < f64::EPSILON {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Style configuration for one chart.
///
/// Field names mirror the option object accepted by the hosting page
/// (`type`, `color`, `backgroundColor`, ...). Every field has a default;
/// caller-supplied JSON overrides defaults field-by-field, and unrecognized
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Marker fill for line charts.
    pub color: Rgba,
    /// Bar fill.
    #[serde(rename = "backgroundColor")]
    pub background_color: Rgba,
    /// Bar outline and line stroke.
    #[serde(rename = "borderColor")]
    pub border_color: Rgba,
    #[serde(rename = "borderWidth")]
    pub border_width: u32,
    /// Outer margin reserved on all four sides, in pixels.
    pub padding: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            color: Rgba::rgb(0x4a, 0x90, 0xe2),
            background_color: Rgba::rgba(74, 144, 226, 0.2),
            border_color: Rgba::rgb(0x4a, 0x90, 0xe2),
            border_width: 2,
            padding: 40,
        }
    }
}

impl ChartStyle {
    pub fn bar() -> Self {
        Self::default()
    }

    pub fn line() -> Self {
        Self {
            kind: ChartKind::Line,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_rgba() {
        assert_eq!("#4a90e2".parse::<Rgba>().unwrap(), Rgba::rgb(74, 144, 226));
        assert_eq!(
            "rgba(74, 144, 226, 0.2)".parse::<Rgba>().unwrap(),
            Rgba::rgba(74, 144, 226, 0.2)
        );
        assert_eq!(
            "rgb(46, 204, 113)".parse::<Rgba>().unwrap(),
            Rgba::rgb(46, 204, 113)
        );
        assert!("blue".parse::<Rgba>().is_err());
        assert!("rgba(1, 2, 3, 1.5)".parse::<Rgba>().is_err());
    }

    #[test]
    fn hex_with_multibyte_input_is_an_error() {
        // Six bytes but not six hex digits; must not slice mid-character.
        assert!("#a\u{e9}aaa".parse::<Rgba>().is_err());
        assert!("#aaaaa\u{e9}".parse::<Rgba>().is_err());
        assert!("#\u{4e16}\u{754c}".parse::<Rgba>().is_err());
    }

    #[test]
    fn style_defaults_match_documented_values() {
        let s = ChartStyle::default();
        assert_eq!(s.kind, ChartKind::Bar);
        assert_eq!(s.color, Rgba::rgb(74, 144, 226));
        assert_eq!(s.background_color, Rgba::rgba(74, 144, 226, 0.2));
        assert_eq!(s.border_color, Rgba::rgb(74, 144, 226));
        assert_eq!(s.border_width, 2);
        assert_eq!(s.padding, 40);
    }

    #[test]
    fn json_overrides_are_field_by_field() {
        let s: ChartStyle = serde_json::from_str(r#"{"borderWidth": 5}"#).unwrap();
        assert_eq!(s.border_width, 5);
        assert_eq!(s.color, ChartStyle::default().color);
        assert_eq!(s.background_color, ChartStyle::default().background_color);
    }

    #[test]
    fn unrecognized_options_pass_through_unused() {
        let s: ChartStyle =
            serde_json::from_str(r#"{"type": "line", "pointHoverRadius": 6}"#).unwrap();
        assert_eq!(s.kind, ChartKind::Line);
    }
}
