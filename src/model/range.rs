//! Search-space axes.

use crate::error::{FwaError, Result};

/// A closed interval `[minimum, maximum]` with `minimum < maximum`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    minimum: f64,
    maximum: f64,
}

impl Range {
    /// Creates a range.
    ///
    /// Fails with [`FwaError::InvalidArgument`] if either bound is not
    /// finite, if `minimum >= maximum`, or if the length `maximum - minimum`
    /// overflows to infinity.
    pub fn new(minimum: f64, maximum: f64) -> Result<Self> {
        if !minimum.is_finite() {
            return Err(FwaError::invalid("minimum", format!("must be finite, got {minimum}")));
        }
        if !maximum.is_finite() {
            return Err(FwaError::invalid("maximum", format!("must be finite, got {maximum}")));
        }
        if minimum >= maximum {
            return Err(FwaError::invalid(
                "maximum",
                format!("must exceed minimum ({minimum}), got {maximum}"),
            ));
        }
        if !(maximum - minimum).is_finite() {
            return Err(FwaError::invalid(
                "maximum",
                format!("range length from {minimum} to {maximum} is not finite"),
            ));
        }
        Ok(Self { minimum, maximum })
    }

    /// Creates a range centered on `mean` with half-width `deviation`.
    pub fn with_deviation(mean: f64, deviation: f64) -> Result<Self> {
        Self::new(mean - deviation, mean + deviation)
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// `maximum - minimum`.
    pub fn length(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// Inclusive membership test.
    pub fn contains(&self, value: f64) -> bool {
        self.minimum <= value && value <= self.maximum
    }

    /// Half-open membership test: `minimum <= value < maximum`.
    pub fn contains_half_open(&self, value: f64) -> bool {
        self.minimum <= value && value < self.maximum
    }
}

/// One axis of the search space.
///
/// Sparks may move anywhere inside the variation range; initial fireworks
/// are sampled from the initial range, which defaults to the variation
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    variation_range: Range,
    initial_range: Option<Range>,
}

impl Dimension {
    pub fn new(variation_range: Range) -> Self {
        Self {
            variation_range,
            initial_range: None,
        }
    }

    /// Creates a dimension whose initial fireworks are drawn from a
    /// narrower (or otherwise distinct) range.
    pub fn with_initial_range(variation_range: Range, initial_range: Range) -> Self {
        Self {
            variation_range,
            initial_range: Some(initial_range),
        }
    }

    pub fn variation_range(&self) -> &Range {
        &self.variation_range
    }

    pub fn initial_range(&self) -> &Range {
        self.initial_range.as_ref().unwrap_or(&self.variation_range)
    }

    pub fn is_value_in_bounds(&self, value: f64) -> bool {
        self.variation_range.contains_half_open(value)
    }

    /// Maps an out-of-bounds value to `min + |value| mod length`.
    /// In-bounds values are returned unchanged.
    pub fn wrap(&self, value: f64) -> f64 {
        if self.is_value_in_bounds(value) {
            return value;
        }
        let range = &self.variation_range;
        let wrapped = range.minimum() + value.abs() % range.length();
        // `min + r` can round up to `max` when `r` is a hair below `length`.
        if wrapped >= range.maximum() {
            range.minimum()
        } else {
            wrapped
        }
    }
}
