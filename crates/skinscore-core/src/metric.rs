//! The closed set of skin-condition indicators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six skin-condition indicators.
///
/// Variant order is the canonical order used for output and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    Brightness,
    Dryness,
    TexturePores,
    Lines,
    Wrinkles,
    Pigmentation,
}

impl Metric {
    /// All metrics in canonical order.
    pub const ALL: [Metric; 6] = [
        Metric::Brightness,
        Metric::Dryness,
        Metric::TexturePores,
        Metric::Lines,
        Metric::Wrinkles,
        Metric::Pigmentation,
    ];

    /// Persisted / serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Dryness => "dryness",
            Self::TexturePores => "texture-pores",
            Self::Lines => "lines",
            Self::Wrinkles => "wrinkles",
            Self::Pigmentation => "pigmentation",
        }
    }

    /// Position in [`Metric::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Human-readable diagnosis shown when this metric scores highest.
    pub fn diagnosis_label(&self) -> &'static str {
        match self {
            Self::Brightness => "Low brightness (possibly suboptimal lighting).",
            Self::Dryness => "Prominent signs of dryness.",
            Self::TexturePores => "Accentuated texture/pores.",
            Self::Lines => "Visible fine lines.",
            Self::Wrinkles => "Marked wrinkles.",
            Self::Pigmentation => "Prominent pigmentation.",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brightness" => Ok(Self::Brightness),
            "dryness" => Ok(Self::Dryness),
            "texture-pores" | "texture_pores" | "texture" | "pores" => Ok(Self::TexturePores),
            "lines" => Ok(Self::Lines),
            "wrinkles" => Ok(Self::Wrinkles),
            "pigmentation" => Ok(Self::Pigmentation),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
        assert!(Metric::Brightness < Metric::Pigmentation);
    }

    #[test]
    fn test_name_roundtrip() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!("Texture_Pores".parse::<Metric>().unwrap(), Metric::TexturePores);
        assert!("freckles".parse::<Metric>().is_err());
    }

    #[test]
    fn test_serde_uses_persisted_names() {
        let json = serde_json::to_string(&Metric::TexturePores).unwrap();
        assert_eq!(json, "\"texture-pores\"");
        let back: Metric = serde_json::from_str("\"wrinkles\"").unwrap();
        assert_eq!(back, Metric::Wrinkles);
    }
}
