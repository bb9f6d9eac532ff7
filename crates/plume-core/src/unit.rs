//! Physical-unit labels for materialized attribute arrays.

use std::fmt;

/// An opaque physical-unit label.
///
/// The core performs no unit arithmetic; it only carries the label
/// declared by the snapshot metadata so that consumers can tell what a
/// materialized array means. Conversion belongs to the outer layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Unit(pub String);

impl Unit {
    /// Create a unit label from anything string-like.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// The unit label for pure numbers.
    pub fn dimensionless() -> Self {
        Self("dimensionless".to_string())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_symbol() {
        assert_eq!(Unit::new("g/cm**3").to_string(), "g/cm**3");
        assert_eq!(Unit::dimensionless().to_string(), "dimensionless");
    }

    #[test]
    fn from_str_round_trips() {
        let u: Unit = "Mpc".into();
        assert_eq!(u, Unit::new("Mpc"));
    }
}
