use crate::core::models::structure::CoordinateMode;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid range for axis {axis}: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange { axis: char, lower: f64, upper: f64 },
    #[error("Bound for axis {0} is not a finite number")]
    NonFiniteBound(char),
}

const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];

/// An axis-aligned box, inclusive on both ends, used to select ions.
///
/// Axes without a range are unconstrained. When `mode` is `None` the ranges are
/// interpreted in the coordinate mode of whichever structure is being queried.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionBox {
    pub ranges: [Option<RangeInclusive<f64>>; 3],
    pub mode: Option<CoordinateMode>,
}

impl SelectionBox {
    /// A box that contains every ion.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, point: &nalgebra::Vector3<f64>) -> bool {
        self.ranges
            .iter()
            .zip(point.iter())
            .all(|(range, v)| range.as_ref().is_none_or(|r| r.contains(v)))
    }
}

#[derive(Debug, Default)]
pub struct SelectionBoxBuilder {
    ranges: [Option<(f64, f64)>; 3],
    mode: Option<CoordinateMode>,
}

impl SelectionBoxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(self, lower: f64, upper: f64) -> Self {
        self.axis(0, lower, upper)
    }
    pub fn y(self, lower: f64, upper: f64) -> Self {
        self.axis(1, lower, upper)
    }
    pub fn z(self, lower: f64, upper: f64) -> Self {
        self.axis(2, lower, upper)
    }

    /// Sets the range for axis `index` (0 = x). Indices above 2 are ignored.
    pub fn axis(mut self, index: usize, lower: f64, upper: f64) -> Self {
        if let Some(slot) = self.ranges.get_mut(index) {
            *slot = Some((lower, upper));
        }
        self
    }

    pub fn mode(mut self, mode: CoordinateMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn maybe_mode(mut self, mode: Option<CoordinateMode>) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Result<SelectionBox, ConfigError> {
        let mut ranges: [Option<RangeInclusive<f64>>; 3] = [None, None, None];
        for ((slot, bounds), axis) in ranges.iter_mut().zip(self.ranges).zip(AXIS_NAMES) {
            let Some((lower, upper)) = bounds else {
                continue;
            };
            if !lower.is_finite() || !upper.is_finite() {
                return Err(ConfigError::NonFiniteBound(axis));
            }
            if lower > upper {
                return Err(ConfigError::InvalidRange { axis, lower, upper });
            }
            *slot = Some(lower..=upper);
        }
        Ok(SelectionBox {
            ranges,
            mode: self.mode,
        })
    }
}

/// Settings for generating images between two anchor structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationConfig {
    /// Number of intermediate images; the output holds `images + 2` structures.
    pub images: usize,
}

impl InterpolationConfig {
    pub fn total_structures(&self) -> usize {
        self.images + 2
    }
}

#[derive(Debug, Default)]
pub struct InterpolationConfigBuilder {
    images: Option<usize>,
}

impl InterpolationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(mut self, images: usize) -> Self {
        self.images = Some(images);
        self
    }

    pub fn build(self) -> Result<InterpolationConfig, ConfigError> {
        Ok(InterpolationConfig {
            images: self.images.ok_or(ConfigError::MissingParameter("images"))?,
        })
    }
}
