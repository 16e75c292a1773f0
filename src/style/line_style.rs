//! Line dash patterns and marker shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{StyleError, StyleResult};

/// Dash pattern for lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashPattern {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Alternating dash-dot pattern
    DashDot,
    /// No line at all (markers only)
    Invisible,
    /// Custom on/off sequence in points
    Custom(Vec<f64>),
}

impl DashPattern {
    /// Parse from matplotlib-style format string.
    pub fn parse(s: &str) -> StyleResult<Self> {
        match s {
            "-" | "solid" => Ok(DashPattern::Solid),
            "--" | "dashed" => Ok(DashPattern::Dashed),
            ":" | "dotted" => Ok(DashPattern::Dotted),
            "-." | "dashdot" => Ok(DashPattern::DashDot),
            "" | " " | "None" | "none" => Ok(DashPattern::Invisible),
            _ => Err(StyleError::config(format!("Unknown line style '{}'", s))),
        }
    }

    /// The short matplotlib spelling; custom patterns are written as a dash list.
    pub fn as_format_str(&self) -> String {
        match self {
            DashPattern::Solid => "-".to_string(),
            DashPattern::Dashed => "--".to_string(),
            DashPattern::Dotted => ":".to_string(),
            DashPattern::DashDot => "-.".to_string(),
            DashPattern::Invisible => "None".to_string(),
            DashPattern::Custom(arr) => arr
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl FromStr for DashPattern {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashPattern::parse(s)
    }
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_format_str())
    }
}

impl Serialize for DashPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DashPattern::Custom(arr) => arr.serialize(serializer),
            other => serializer.serialize_str(&other.as_format_str()),
        }
    }
}

/// Marker shapes for data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    TriangleDown,
    Diamond,
    Plus,
    Cross,
    Star,
    Pentagon,
    Hexagon,
    Point,
}

impl Marker {
    /// Parse from matplotlib-style format character.
    pub fn from_format_char(c: char) -> Option<Self> {
        match c {
            'o' => Some(Marker::Circle),
            's' => Some(Marker::Square),
            '^' => Some(Marker::Triangle),
            'v' => Some(Marker::TriangleDown),
            'D' | 'd' => Some(Marker::Diamond),
            '+' => Some(Marker::Plus),
            'x' | 'X' => Some(Marker::Cross),
            '*' => Some(Marker::Star),
            'p' => Some(Marker::Pentagon),
            'h' | 'H' => Some(Marker::Hexagon),
            '.' => Some(Marker::Point),
            _ => None,
        }
    }

    pub fn format_char(&self) -> char {
        match self {
            Marker::Circle => 'o',
            Marker::Square => 's',
            Marker::Triangle => '^',
            Marker::TriangleDown => 'v',
            Marker::Diamond => 'D',
            Marker::Plus => '+',
            Marker::Cross => 'x',
            Marker::Star => '*',
            Marker::Pentagon => 'p',
            Marker::Hexagon => 'h',
            Marker::Point => '.',
        }
    }
}

impl FromStr for Marker {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Marker::from_format_char(c),
            _ => None,
        }
        .ok_or_else(|| StyleError::config(format!("Unknown marker '{}'", s)))
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.format_char())
    }
}

/// Single-letter color codes allowed in a format string.
const FORMAT_COLORS: &str = "bgrcmykw";

/// Split a matplotlib format string such as `"o--"` or `"ro"` into marker
/// and dash pattern. Color letters are accepted and skipped. An empty
/// string yields neither; `"none"` yields an invisible line.
pub fn parse_format(fmt: &str) -> StyleResult<(Option<Marker>, Option<DashPattern>)> {
    if fmt == "none" || fmt == "None" {
        return Ok((None, Some(DashPattern::Invisible)));
    }
    let chars: Vec<char> = fmt.chars().collect();
    let mut marker = None;
    let mut color = None;
    let mut rest = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if FORMAT_COLORS.contains(c) {
            if color.replace(c).is_some() {
                return Err(StyleError::config(format!(
                    "Format string '{}' has more than one color",
                    fmt
                )));
            }
            continue;
        }
        // "-." is dash-dot, not a solid line with point markers
        let after_dash = i > 0 && chars[i - 1] == '-';
        match Marker::from_format_char(c) {
            Some(m) if marker.is_none() && !(c == '.' && after_dash) => marker = Some(m),
            _ => rest.push(c),
        }
    }
    let dash = if rest.is_empty() {
        None
    } else {
        Some(DashPattern::parse(&rest)?)
    };
    Ok((marker, dash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_parsing() {
        assert_eq!(DashPattern::parse("--").unwrap(), DashPattern::Dashed);
        assert_eq!("dotted".parse::<DashPattern>().unwrap(), DashPattern::Dotted);
        assert_eq!(DashPattern::parse("-.").unwrap().to_string(), "-.");
        assert!(DashPattern::parse("~~").unwrap_err().is_configuration());
    }

    #[test]
    fn test_marker_parsing() {
        assert_eq!("o".parse::<Marker>().unwrap(), Marker::Circle);
        assert_eq!("^".parse::<Marker>().unwrap().format_char(), '^');
        assert!("oo".parse::<Marker>().is_err());
        assert!("q".parse::<Marker>().is_err());
    }

    #[test]
    fn test_format_strings() {
        assert_eq!(parse_format("o").unwrap(), (Some(Marker::Circle), None));
        assert_eq!(
            parse_format("s--").unwrap(),
            (Some(Marker::Square), Some(DashPattern::Dashed))
        );
        assert_eq!(parse_format("-.").unwrap(), (None, Some(DashPattern::DashDot)));
        assert_eq!(parse_format("").unwrap(), (None, None));
    }

    #[test]
    fn test_format_strings_with_color() {
        assert_eq!(parse_format("ro").unwrap(), (Some(Marker::Circle), None));
        assert_eq!(parse_format("k-").unwrap(), (None, Some(DashPattern::Solid)));
        assert_eq!(
            parse_format("g^:").unwrap(),
            (Some(Marker::Triangle), Some(DashPattern::Dotted))
        );
        assert_eq!(parse_format("none").unwrap(), (None, Some(DashPattern::Invisible)));
        assert_eq!(parse_format("None").unwrap(), (None, Some(DashPattern::Invisible)));
        assert!(parse_format("rk").unwrap_err().is_configuration());
        assert!(parse_format("q-").unwrap_err().is_configuration());
    }
}
