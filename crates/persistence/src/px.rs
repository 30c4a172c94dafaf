use std::fmt;

use serde::de::{Error as DeError, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const PX_SUFFIX: &str = "px";

/// 以 `"<n>px"` 字串保存的像素長度。 / Pixel length stored as a `"<n>px"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLength(pub u32);

impl PixelLength {
    pub fn get(&self) -> u32 {
        self.0
    }

    fn parse(text: &str) -> Option<Self> {
        let digits = text.trim().strip_suffix(PX_SUFFIX)?.trim_end();
        if digits.is_empty() {
            return None;
        }
        // Sizes written by a browser may carry a fractional part.
        let value: f64 = digits.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(Self(value.round() as u32))
    }
}

impl fmt::Display for PixelLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PX_SUFFIX}", self.0)
    }
}

impl Serialize for PixelLength {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PixelLength {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PixelVisitor;

        impl<'de> Visitor<'de> for PixelVisitor {
            type Value = PixelLength;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a pixel length such as \"80px\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                PixelLength::parse(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: DeError,
            {
                u32::try_from(v)
                    .map(PixelLength)
                    .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
            }
        }

        deserializer.deserialize_any(PixelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_px_strings() {
        assert_eq!(PixelLength::parse("80px"), Some(PixelLength(80)));
        assert_eq!(PixelLength::parse(" 95.6px "), Some(PixelLength(96)));
        assert_eq!(PixelLength::parse("80"), None);
        assert_eq!(PixelLength::parse("px"), None);
        assert_eq!(PixelLength::parse("-3px"), None);
        assert_eq!(PixelLength::parse("12empx"), None);
    }

    #[test]
    fn serde_uses_px_strings() {
        let json = serde_json::to_string(&PixelLength(120)).unwrap();
        assert_eq!(json, "\"120px\"");
        let back: PixelLength = serde_json::from_str("\"120px\"").unwrap();
        assert_eq!(back, PixelLength(120));
        let bare: PixelLength = serde_json::from_str("64").unwrap();
        assert_eq!(bare, PixelLength(64));
        assert!(serde_json::from_str::<PixelLength>("\"wide\"").is_err());
    }
}
