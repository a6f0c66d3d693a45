//! Search configuration.

use tilestar_core::Dims;

use crate::distance::{Octile, diagonal_for};
use crate::error::ConfigError;
use crate::heap;

/// Cost of one orthogonal step unless configured otherwise.
pub const DEFAULT_SCALE: i32 = 10;

/// When a search declares the goal found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// Stop when the goal is popped as the open-set minimum. Paths are optimal.
    #[default]
    GoalPopped,
    /// Stop as soon as the goal is first relaxed from an expanded neighbor.
    /// Expands fewer cells but may settle for a slightly longer path.
    FirstTouch,
}

/// Parameters of a grid search.
///
/// Costs are fixed-point integers: an orthogonal step costs `scale` and a
/// diagonal step costs `diagonal` (√2 × `scale` by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub scale: i32,
    pub diagonal: i32,
    pub termination: Termination,
    /// Initial capacity of the open set.
    pub heap_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::with_scale(DEFAULT_SCALE)
    }
}

impl SearchConfig {
    /// Default configuration with orthogonal steps costing `scale`.
    pub fn with_scale(scale: i32) -> Self {
        Self {
            scale,
            diagonal: diagonal_for(scale),
            termination: Termination::default(),
            heap_capacity: heap::INITIAL_CAPACITY,
        }
    }

    /// Set the termination rule.
    pub fn termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Set the initial open-set capacity.
    pub fn heap_capacity(mut self, capacity: usize) -> Self {
        self.heap_capacity = capacity;
        self
    }

    /// The step metric described by this configuration.
    pub fn metric(&self) -> Octile {
        Octile::new(self.scale, self.diagonal)
    }

    /// Check that step costs are usable: both positive, and a diagonal step
    /// costing between one and two orthogonal steps. Outside that range the
    /// octile estimate overestimates and paths stop being optimal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale <= 0
            || self.diagonal < self.scale
            || self.diagonal > self.scale.saturating_mul(2)
        {
            return Err(ConfigError::InvalidScale {
                straight: self.scale,
                diagonal: self.diagonal,
            });
        }
        Ok(())
    }

    /// [`validate`](Self::validate), then check that no path cost or
    /// estimate on a `dims` map can overflow `i32`.
    ///
    /// A simple path has fewer steps than the map has cells and an estimate
    /// spans at most `rows + cols` steps, none dearer than `diagonal`.
    pub fn validate_for(&self, dims: Dims) -> Result<(), ConfigError> {
        self.validate()?;
        let steps = dims.len() as i64 + i64::from(dims.rows) + i64::from(dims.cols);
        if steps.saturating_mul(i64::from(self.diagonal)) > i64::from(i32::MAX) {
            return Err(ConfigError::CostOverflow {
                diagonal: self.diagonal,
                dims,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.scale, 10);
        assert_eq!(c.diagonal, 14);
        assert_eq!(c.termination, Termination::GoalPopped);
        assert_eq!(c.heap_capacity, 16);
        assert_eq!(c.metric(), Octile::new(10, 14));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let c = SearchConfig::with_scale(100)
            .termination(Termination::FirstTouch)
            .heap_capacity(64);
        assert_eq!(c.diagonal, 141);
        assert_eq!(c.termination, Termination::FirstTouch);
        assert_eq!(c.heap_capacity, 64);
    }

    #[test]
    fn rejects_bad_costs() {
        assert!(SearchConfig::with_scale(0).validate().is_err());
        let mut c = SearchConfig::default();
        c.diagonal = 5;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidScale {
                straight: 10,
                diagonal: 5
            })
        ));
    }

    #[test]
    fn rejects_diagonal_dearer_than_two_steps() {
        let mut c = SearchConfig::default();
        c.diagonal = 20;
        assert!(c.validate().is_ok());
        c.diagonal = 21;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidScale {
                straight: 10,
                diagonal: 21
            })
        ));
        c.diagonal = 100;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_costs_that_overflow_on_the_map() {
        let small = Dims::new(1, 5);
        assert!(SearchConfig::with_scale(1000).validate_for(small).is_ok());
        let huge = SearchConfig::with_scale(i32::MAX / 2);
        assert!(huge.validate().is_ok());
        assert!(matches!(
            huge.validate_for(small),
            Err(ConfigError::CostOverflow { dims, .. }) if dims == small
        ));
        // Fine on a small map, too dear on a big one.
        let c = SearchConfig::with_scale(100_000);
        assert!(c.validate_for(Dims::new(10, 10)).is_ok());
        assert!(c.validate_for(Dims::new(200, 200)).is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let c = SearchConfig::with_scale(100).termination(Termination::FirstTouch);
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let c: SearchConfig = serde_json::from_str(r#"{"termination":"first_touch"}"#).unwrap();
        assert_eq!(c.termination, Termination::FirstTouch);
        assert_eq!(c.scale, DEFAULT_SCALE);
        assert_eq!(c.diagonal, 14);
    }
}
