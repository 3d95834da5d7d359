//! Casting-yard allowable stress capacity curves.
//!
//! At the prestress-release interval the allowable tension is not a smooth
//! function of position: wherever bonded mild reinforcement is present, the
//! higher "with rebar" allowable applies instead of the plain formula. The
//! result is a piecewise-constant curve with jumps at the sections where the
//! governing rule flips. The jump placement convention is deliberate and
//! must be preserved for plot fidelity:
//!
//! - rising step: the jump happens at the current location, approached from
//!   the lower plateau (extra point at the new x with the old value);
//! - falling step: the jump is attributed to the previous location,
//!   approached from the upper plateau (extra point at the previous x with
//!   the new value).
//!
//! Compression allowables have no discrete trigger and plot as an ordinary
//! smooth minimum curve.

use crate::assembler::{Series, SeriesAssembler};
use crate::error::{GraphError, GraphResult};
use crate::oracle::SegmentArtifacts;
use crate::types::{IntervalIndex, LimitState, PenStyle, Poi, SegmentKey, StressKind};

// float equality guard for detecting a real jump vs roundoff
const JUMP_TOLERANCE: f64 = 1e-6;

fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < JUMP_TOLERANCE
}

/// Expand a piecewise-constant tension capacity profile into plot points,
/// inserting the extra point that renders each step vertically. Pairs xs
/// and values stop-at-shorter. Output length is input length plus the
/// number of distinct transitions.
pub fn tension_jump_points(xs: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(values.len());
    let mut prev: Option<(f64, f64)> = None;

    for (&x, &value) in xs.iter().zip(values.iter()) {
        if let Some((prev_x, prev_value)) = prev {
            if !is_equal(value, prev_value) {
                if prev_value < value {
                    // going up hill: jump is at this location
                    points.push((x, prev_value));
                } else {
                    // went down hill: jump was at the last location
                    points.push((prev_x, value));
                }
            }
        }
        points.push((x, value));
        prev = Some((x, value));
    }

    points
}

/// Build the casting-yard tension and compression capacity series from the
/// stored spec-check artifacts.
///
/// Returns the tension series (jump-aware, labeled) followed by the
/// compression series (smooth, unlabeled). POIs without a tension artifact
/// are skipped; a tension artifact without its compression counterpart is a
/// broken spec-check record and an error.
#[allow(clippy::too_many_arguments)]
pub fn cy_stress_capacity_series(
    artifacts: &dyn SegmentArtifacts,
    segment: SegmentKey,
    interval: IntervalIndex,
    limit_state: LimitState,
    pois: &[Poi],
    xs: &[f64],
    assembler: &SeriesAssembler<'_>,
    label: &str,
    color: usize,
    first_series_id: usize,
) -> GraphResult<Vec<Series>> {
    let mut tension_series = Series::new(first_series_id, label, PenStyle::Solid, color);
    let mut compression_series = Series::new(first_series_id + 1, "", PenStyle::Solid, color);

    let mut tension_xs = Vec::with_capacity(pois.len());
    let mut tension_values = Vec::with_capacity(pois.len());

    for (poi, &x) in pois.iter().zip(xs.iter()) {
        let tension = artifacts.flexural_stress_artifact(
            segment,
            interval,
            limit_state,
            StressKind::Tension,
            poi.id,
        );
        let Some(tension) = tension else {
            continue;
        };
        let compression = artifacts
            .flexural_stress_artifact(
                segment,
                interval,
                limit_state,
                StressKind::Compression,
                poi.id,
            )
            .ok_or(GraphError::ArtifactMissing(poi.id))?;

        assembler.push_point(
            &mut compression_series,
            x,
            compression.governing_compression(),
        );

        tension_xs.push(x);
        tension_values.push(tension.governing_tension());
    }

    for (x, value) in tension_jump_points(&tension_xs, &tension_values) {
        assembler.push_point(&mut tension_series, x, value);
    }

    Ok(vec![tension_series, compression_series])
}
