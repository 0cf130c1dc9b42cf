//! Effect level ceiling expressed as a Roman numeral.

use std::fmt;

/// Highest level an effect can reach, restricted to the numerals I through X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaxLevel {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    IX,
    X,
}

impl MaxLevel {
    /// All levels in ascending order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::I,
            Self::II,
            Self::III,
            Self::IV,
            Self::V,
            Self::VI,
            Self::VII,
            Self::VIII,
            Self::IX,
            Self::X,
        ]
    }

    /// Parse the exact numeral; surrounding whitespace or lowercase is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|level| level.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
            Self::VI => "VI",
            Self::VII => "VII",
            Self::VIII => "VIII",
            Self::IX => "IX",
            Self::X => "X",
        }
    }
}

impl fmt::Display for MaxLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_numeral() {
        for level in MaxLevel::all() {
            assert_eq!(MaxLevel::parse(&level.to_string()), Some(*level));
        }
        assert_eq!(MaxLevel::all().len(), 10);
    }

    #[test]
    fn rejects_non_canonical_spellings() {
        assert_eq!(MaxLevel::parse("i"), None);
        assert_eq!(MaxLevel::parse(" II"), None);
        assert_eq!(MaxLevel::parse("XI"), None);
        assert_eq!(MaxLevel::parse("1"), None);
        assert_eq!(MaxLevel::parse("IIII"), None);
    }
}
