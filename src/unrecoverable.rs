//! Policy for the unrecoverable girder dead load pseudo-loading.
//!
//! While the girder sits in storage its self-weight deflection is elastic.
//! Once the concrete has hardened and the girder is hauled, part of that
//! deflection is locked in and no longer recovers when the support
//! conditions change. The graphs expose this as a synthetic loading whose
//! value is defined, not measured: zero before hauling, the hauling sag at
//! the haul interval, and the erection sag afterwards.

use serde::{Deserialize, Serialize};

use crate::types::{Action, IntervalIndex, ResultsKind, SagInterval};

/// Whether and how to include the unrecoverable contribution for one series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnrecoverableDecision {
    /// The contribution is exactly 0.0 at every POI
    Zero,
    /// Query the oracle for the given sag variant
    Include(SagInterval),
}

/// Decides per interval whether locked-in handling deflections appear in a
/// displayed series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecoverablePolicy {
    /// Interval at which the segment is hauled
    pub haul_interval: IntervalIndex,
    /// Interval at which the segment is erected
    pub erection_interval: IntervalIndex,
}

impl UnrecoverablePolicy {
    /// Create a policy for a segment's haul and erection intervals
    pub fn new(haul_interval: IntervalIndex, erection_interval: IntervalIndex) -> Self {
        Self {
            haul_interval,
            erection_interval,
        }
    }

    /// Sag variant governing the magnitude at an interval: hauling sag at
    /// the haul interval itself, erection sag beyond it
    pub fn sag_interval(&self, interval: IntervalIndex) -> SagInterval {
        if interval == self.haul_interval {
            SagInterval::Hauling
        } else {
            SagInterval::Erection
        }
    }

    /// Decision for a vertical deflection series.
    ///
    /// Cumulative results carry the locked-in value for every interval at or
    /// after hauling (when the toggle is on). Incremental results show it
    /// only at the boundary interval where each sag effect first appears, so
    /// it is never counted twice.
    pub fn deflection(
        &self,
        interval: IntervalIndex,
        results: ResultsKind,
        include_toggle: bool,
    ) -> UnrecoverableDecision {
        if !include_toggle || interval < self.haul_interval {
            return UnrecoverableDecision::Zero;
        }
        match results {
            ResultsKind::Cumulative => UnrecoverableDecision::Include(self.sag_interval(interval)),
            ResultsKind::Incremental => self.boundary_only(interval),
        }
    }

    /// Decision for a lateral deflection series. Matches the vertical rule
    /// except the display toggle is not consulted; lateral response has no
    /// elevation adjustment to trade against.
    pub fn x_deflection(
        &self,
        interval: IntervalIndex,
        results: ResultsKind,
    ) -> UnrecoverableDecision {
        if interval < self.haul_interval {
            return UnrecoverableDecision::Zero;
        }
        match results {
            ResultsKind::Cumulative => UnrecoverableDecision::Include(self.sag_interval(interval)),
            ResultsKind::Incremental => self.boundary_only(interval),
        }
    }

    /// Decision for a rotation series. Rotations show the locked-in value
    /// at the boundary intervals for both results kinds, and everywhere at
    /// or after hauling for cumulative results.
    pub fn rotation(
        &self,
        interval: IntervalIndex,
        results: ResultsKind,
        include_toggle: bool,
    ) -> UnrecoverableDecision {
        if !include_toggle || interval < self.haul_interval {
            return UnrecoverableDecision::Zero;
        }
        if results == ResultsKind::Cumulative
            || interval == self.haul_interval
            || interval == self.erection_interval
        {
            UnrecoverableDecision::Include(self.sag_interval(interval))
        } else {
            UnrecoverableDecision::Zero
        }
    }

    fn boundary_only(&self, interval: IntervalIndex) -> UnrecoverableDecision {
        if interval == self.haul_interval {
            UnrecoverableDecision::Include(SagInterval::Hauling)
        } else if interval == self.erection_interval {
            UnrecoverableDecision::Include(SagInterval::Erection)
        } else {
            UnrecoverableDecision::Zero
        }
    }

    /// Whether ordinary (non-synthetic) deflection queries should carry the
    /// unrecoverable component. Before hauling nothing is locked in yet, so
    /// the component is inherently included; afterwards it follows the
    /// display toggle.
    pub fn include_in_ordinary_results(
        &self,
        interval: IntervalIndex,
        include_toggle: bool,
    ) -> bool {
        interval < self.haul_interval || include_toggle
    }

    /// Whether the display toggle is applicable at all: only deflection and
    /// rotation plots with at least one selected interval at or after
    /// hauling
    pub fn toggle_applicable(&self, action: Action, selected_intervals: &[IntervalIndex]) -> bool {
        matches!(action, Action::Deflection | Action::Rotation)
            && selected_intervals
                .iter()
                .any(|&interval| interval >= self.haul_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> UnrecoverablePolicy {
        UnrecoverablePolicy::new(4, 5)
    }

    #[test]
    fn test_zero_before_haul_regardless_of_toggle() {
        let p = policy();
        for interval in 0..4 {
            for toggle in [false, true] {
                for results in [ResultsKind::Incremental, ResultsKind::Cumulative] {
                    assert_eq!(
                        p.deflection(interval, results, toggle),
                        UnrecoverableDecision::Zero
                    );
                    assert_eq!(
                        p.rotation(interval, results, toggle),
                        UnrecoverableDecision::Zero
                    );
                }
                assert_eq!(
                    p.x_deflection(interval, ResultsKind::Cumulative),
                    UnrecoverableDecision::Zero
                );
            }
        }
    }

    #[test]
    fn test_cumulative_deflection_follows_toggle() {
        let p = policy();
        assert_eq!(
            p.deflection(4, ResultsKind::Cumulative, true),
            UnrecoverableDecision::Include(SagInterval::Hauling)
        );
        assert_eq!(
            p.deflection(6, ResultsKind::Cumulative, true),
            UnrecoverableDecision::Include(SagInterval::Erection)
        );
        assert_eq!(
            p.deflection(6, ResultsKind::Cumulative, false),
            UnrecoverableDecision::Zero
        );
    }

    #[test]
    fn test_incremental_deflection_only_at_boundaries() {
        let p = policy();
        assert_eq!(
            p.deflection(4, ResultsKind::Incremental, true),
            UnrecoverableDecision::Include(SagInterval::Hauling)
        );
        assert_eq!(
            p.deflection(5, ResultsKind::Incremental, true),
            UnrecoverableDecision::Include(SagInterval::Erection)
        );
        // after erection the increment would double count
        assert_eq!(
            p.deflection(6, ResultsKind::Incremental, true),
            UnrecoverableDecision::Zero
        );
    }

    #[test]
    fn test_rotation_boundary_rule_differs_from_cumulative() {
        let p = policy();
        // cumulative: included everywhere at or after haul
        assert_eq!(
            p.rotation(6, ResultsKind::Cumulative, true),
            UnrecoverableDecision::Include(SagInterval::Erection)
        );
        // incremental: boundaries only
        assert_eq!(
            p.rotation(4, ResultsKind::Incremental, true),
            UnrecoverableDecision::Include(SagInterval::Hauling)
        );
        assert_eq!(
            p.rotation(5, ResultsKind::Incremental, true),
            UnrecoverableDecision::Include(SagInterval::Erection)
        );
        assert_eq!(
            p.rotation(6, ResultsKind::Incremental, true),
            UnrecoverableDecision::Zero
        );
    }

    #[test]
    fn test_x_deflection_ignores_toggle() {
        let p = policy();
        assert_eq!(
            p.x_deflection(5, ResultsKind::Cumulative),
            UnrecoverableDecision::Include(SagInterval::Erection)
        );
    }

    #[test]
    fn test_ordinary_results_inclusion() {
        let p = policy();
        assert!(p.include_in_ordinary_results(3, false)); // nothing locked in yet
        assert!(!p.include_in_ordinary_results(4, false));
        assert!(p.include_in_ordinary_results(4, true));
    }

    #[test]
    fn test_toggle_applicability() {
        let p = policy();
        assert!(p.toggle_applicable(Action::Deflection, &[3, 4]));
        assert!(p.toggle_applicable(Action::Rotation, &[5]));
        assert!(!p.toggle_applicable(Action::Deflection, &[2, 3]));
        assert!(!p.toggle_applicable(Action::Moment, &[5]));
        assert!(!p.toggle_applicable(Action::Deflection, &[]));
    }
}
