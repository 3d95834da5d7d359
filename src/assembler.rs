//! Series assembly: raw oracle arrays to labeled plot series.
//!
//! The assembler owns the display unit conversion, the snap-to-zero
//! tolerance, and the pairing policy for mismatched-length arrays. It has no
//! opinion about which queries were issued; that is the resolver's job.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{GraphError, GraphResult};
use crate::types::{Action, PenStyle, SectionValue};

/// Default snap-to-zero tolerance for converted y values
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-6;

/// Tighter tolerance used while plotting rotations, which are orders of
/// magnitude smaller than deflections
pub const ROTATION_ZERO_TOLERANCE: f64 = 1e-7;

/// Converts an internal (SI) value into display units. One implementation
/// per unit kind, injected where needed; never discovered by downcasting.
pub trait UnitConverter {
    /// Convert a value to display units
    fn convert(&self, value: f64) -> f64;

    /// Unit tag for axis titles, e.g. "kN-m"
    fn tag(&self) -> &str;
}

/// Pass-through converter
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityConverter;

impl UnitConverter for IdentityConverter {
    fn convert(&self, value: f64) -> f64 {
        value
    }

    fn tag(&self) -> &str {
        ""
    }
}

/// Linear scale converter
#[derive(Debug, Clone)]
pub struct ScaleConverter {
    factor: f64,
    tag: String,
}

impl ScaleConverter {
    /// Create a converter that multiplies by `factor`
    pub fn new(factor: f64, tag: impl Into<String>) -> Self {
        Self {
            factor,
            tag: tag.into(),
        }
    }
}

impl UnitConverter for ScaleConverter {
    fn convert(&self, value: f64) -> f64 {
        value * self.factor
    }

    fn tag(&self) -> &str {
        &self.tag
    }
}

/// How to pair x and y arrays of unequal length.
///
/// Result sources may return partial arrays. Whether silently pairing up to
/// the shorter length is legitimate tolerance or masks an upstream bug is an
/// open question, so the behavior is an explicit, named policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MismatchPolicy {
    /// Pair up to the shorter length, ignore the excess
    #[default]
    TruncateToShorter,
    /// Return [`GraphError::LengthMismatch`]
    FailOnMismatch,
}

/// One plotted curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    /// Synthetic id, unique within one graph build
    pub id: usize,
    /// Legend label; empty for secondary series of a pair
    pub label: String,
    /// Pen style
    pub pen: PenStyle,
    /// Color index into whatever palette the renderer uses
    pub color: usize,
    /// Converted (x, y) points in plot order
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Create an empty series
    pub fn new(id: usize, label: impl Into<String>, pen: PenStyle, color: usize) -> Self {
        Self {
            id,
            label: label.into(),
            pen,
            color,
            points: Vec::new(),
        }
    }
}

/// Assembles raw result arrays into series points
pub struct SeriesAssembler<'a> {
    x_converter: &'a dyn UnitConverter,
    y_converter: &'a dyn UnitConverter,
    zero_tolerance: f64,
    policy: MismatchPolicy,
}

impl<'a> SeriesAssembler<'a> {
    /// Create an assembler with the default tolerance and policy
    pub fn new(x_converter: &'a dyn UnitConverter, y_converter: &'a dyn UnitConverter) -> Self {
        Self {
            x_converter,
            y_converter,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            policy: MismatchPolicy::default(),
        }
    }

    /// Override the snap-to-zero tolerance
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = tolerance;
        self
    }

    /// Use the tolerance appropriate for an action
    pub fn for_action(self, action: Action) -> Self {
        let tolerance = if action == Action::Rotation {
            ROTATION_ZERO_TOLERANCE
        } else {
            DEFAULT_ZERO_TOLERANCE
        };
        self.with_zero_tolerance(tolerance)
    }

    /// Override the mismatched-length policy
    pub fn with_policy(mut self, policy: MismatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Convert one point, snapping near-zero y values to exactly zero so
    /// numerical noise does not render as a wavy line
    fn point(&self, x: f64, y: f64) -> (f64, f64) {
        let mut y = self.y_converter.convert(y);
        if y.abs() < self.zero_tolerance {
            y = 0.0;
        }
        (self.x_converter.convert(x), y)
    }

    fn check_lengths(&self, x_len: usize, y_len: usize) -> GraphResult<()> {
        if self.policy == MismatchPolicy::FailOnMismatch && x_len != y_len {
            return Err(GraphError::LengthMismatch { x: x_len, y: y_len });
        }
        Ok(())
    }

    /// Append scalar results, pairing per the mismatch policy
    pub fn push_points(&self, series: &mut Series, xs: &[f64], ys: &[f64]) -> GraphResult<()> {
        self.check_lengths(xs.len(), ys.len())?;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            series.points.push(self.point(x, y));
        }
        Ok(())
    }

    /// Append two-sided section results. Left and right values are emitted
    /// as separate points at the same x, producing the step plot that shows
    /// shear discontinuities at a section.
    pub fn push_section_values(
        &self,
        series: &mut Series,
        xs: &[f64],
        ys: &[SectionValue],
    ) -> GraphResult<()> {
        self.check_lengths(xs.len(), ys.len())?;
        for (&x, &sv) in xs.iter().zip(ys.iter()) {
            series.points.push(self.point(x, sv.left));
            series.points.push(self.point(x, sv.right));
        }
        Ok(())
    }

    /// Append one point
    pub fn push_point(&self, series: &mut Series, x: f64, y: f64) {
        series.points.push(self.point(x, y));
    }
}

/// Assign legend labels so each grouping key is labeled exactly once, in
/// first-appearance order. Returns one label per input; later occurrences
/// of an already-labeled key get an empty label. A pure fold over the
/// inputs, so multi-series builds carry no shared label state.
pub fn dedup_labels(items: &[(usize, String)]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|(key, label)| {
            if seen.insert(*key) {
                label.clone()
            } else {
                String::new()
            }
        })
        .collect()
}
