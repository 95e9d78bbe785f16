//! Canonical complexity-bound representation.
//!
//! Adapted from a production Big-O data model: the same notion of a
//! compact, ordered complexity "class" plus a confidence score, but
//! generalized from a fixed enum of named classes to the general
//! `n^k` / `a^n` families spec §6 requires (`Θ(n^k)` for any integer
//! `k≥2`, `Θ(a^n)` for any integer `a≥2`), since a pseudocode dialect's
//! worst case is not restricted to quadratic/cubic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A complexity class family. Ordered by growth rate for `is_better_than`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BigOClass {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    /// `n^k`, `k >= 2` (`k == 2` renders as `n^2`, not a special-cased name).
    Polynomial(u32),
    /// `a^n`, `a >= 2`.
    Exponential(u32),
    Factorial,
    /// Too complex to determine, or confidence fell below the floor.
    Unknown,
}

impl BigOClass {
    /// Rank used for [`Self::is_better_than`]; ties within `Polynomial`
    /// and `Exponential` are broken on the carried exponent/base.
    fn rank(&self) -> (u8, u32) {
        match self {
            Self::Constant => (0, 0),
            Self::Logarithmic => (1, 0),
            Self::Linear => (2, 0),
            Self::Linearithmic => (3, 0),
            Self::Polynomial(k) => (4, *k),
            Self::Exponential(a) => (5, *a),
            Self::Factorial => (6, 0),
            Self::Unknown => (255, 0),
        }
    }

    pub fn is_better_than(&self, other: &Self) -> bool {
        self.rank() < other.rank()
    }

    pub fn notation(&self, notation: Notation) -> String {
        let glyph = notation.glyph();
        match self {
            Self::Constant => format!("{glyph}(1)"),
            Self::Logarithmic => format!("{glyph}(log n)"),
            Self::Linear => format!("{glyph}(n)"),
            Self::Linearithmic => format!("{glyph}(n log n)"),
            Self::Polynomial(1) => format!("{glyph}(n)"),
            Self::Polynomial(k) => format!("{glyph}(n^{k})"),
            Self::Exponential(a) => format!("{glyph}({a}^n)"),
            Self::Factorial => format!("{glyph}(n!)"),
            Self::Unknown => "O(?)".to_string(),
        }
    }
}

impl fmt::Display for BigOClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation(Notation::Theta))
    }
}

/// The three asymptotic notations the Orchestrator can attach to a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    Theta,
    BigO,
    Omega,
}

impl Notation {
    pub fn glyph(&self) -> &'static str {
        match self {
            Notation::Theta => "Θ",
            Notation::BigO => "O",
            Notation::Omega => "Ω",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A complexity bound: a class, the notation it is reported under, and
/// a confidence percentage (0-100) the Orchestrator uses to decide
/// whether to prefer this bound over another engine's (spec §9
/// "Reconciliation across engines").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityBound {
    pub class: BigOClass,
    pub notation: Notation,
    pub confidence: u8,
    pub explanation: String,
}

impl ComplexityBound {
    pub fn new(class: BigOClass, notation: Notation, confidence: u8) -> Self {
        Self {
            class,
            notation,
            confidence: confidence.min(100),
            explanation: String::new(),
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn constant() -> Self {
        Self::new(BigOClass::Constant, Notation::Theta, 100)
    }

    pub fn logarithmic() -> Self {
        Self::new(BigOClass::Logarithmic, Notation::Theta, 95)
    }

    pub fn linear() -> Self {
        Self::new(BigOClass::Linear, Notation::Theta, 95)
    }

    pub fn linearithmic() -> Self {
        Self::new(BigOClass::Linearithmic, Notation::Theta, 90)
    }

    pub fn polynomial(exponent: u32) -> Self {
        if exponent == 0 {
            return Self::constant();
        }
        if exponent == 1 {
            return Self::linear();
        }
        Self::new(BigOClass::Polynomial(exponent), Notation::Theta, 90)
    }

    pub fn exponential(base: u32) -> Self {
        Self::new(BigOClass::Exponential(base.max(2)), Notation::Theta, 80)
    }

    pub fn factorial() -> Self {
        Self::new(BigOClass::Factorial, Notation::Theta, 80)
    }

    pub fn unknown(explanation: impl Into<String>) -> Self {
        Self::new(BigOClass::Unknown, Notation::BigO, 0).with_explanation(explanation)
    }

    /// Downgrades to `O(?)` when confidence falls below `floor`
    /// (config-driven, spec §12 `confidence_floor`) rather than
    /// reporting false precision.
    pub fn floored(self, floor: u8) -> Self {
        if self.confidence < floor && !matches!(self.class, BigOClass::Unknown) {
            Self::unknown(format!(
                "confidence {} below floor {floor}: {}",
                self.confidence, self.explanation
            ))
        } else {
            self
        }
    }

    pub fn is_better_than(&self, other: &Self) -> bool {
        self.class.is_better_than(&other.class)
    }

    pub fn display(&self) -> String {
        self.class.notation(self.notation)
    }
}

impl fmt::Display for ComplexityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}% confidence)", self.display(), self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_o_ordering_matches_growth_rate() {
        assert!(BigOClass::Constant.is_better_than(&BigOClass::Linear));
        assert!(BigOClass::Logarithmic.is_better_than(&BigOClass::Linear));
        assert!(BigOClass::Linearithmic.is_better_than(&BigOClass::Polynomial(2)));
        assert!(BigOClass::Polynomial(2).is_better_than(&BigOClass::Polynomial(3)));
        assert!(BigOClass::Polynomial(4).is_better_than(&BigOClass::Exponential(2)));
    }

    #[test]
    fn notation_renders_canonical_forms() {
        assert_eq!(ComplexityBound::constant().display(), "Θ(1)");
        assert_eq!(ComplexityBound::logarithmic().display(), "Θ(log n)");
        assert_eq!(ComplexityBound::linearithmic().display(), "Θ(n log n)");
        assert_eq!(ComplexityBound::polynomial(4).display(), "Θ(n^4)");
        assert_eq!(ComplexityBound::exponential(2).display(), "Θ(2^n)");
        assert_eq!(ComplexityBound::factorial().display(), "Θ(n!)");
    }

    #[test]
    fn low_confidence_is_floored_to_unknown() {
        let bound = ComplexityBound::new(BigOClass::Polynomial(2), Notation::Theta, 30)
            .floored(50);
        assert_eq!(bound.display(), "O(?)");
    }
}
