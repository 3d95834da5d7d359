//! Action/envelope resolver.
//!
//! Given the action being plotted, the project analysis method, and the
//! graph type, decides which concrete analysis queries to issue and what
//! role each resulting series plays. This is where the envelope rules live:
//! force actions split into a min and a max query under envelope analysis,
//! capacity-like graphs collapse back to a single max-envelope query, and
//! stress series pin the top fiber to the max envelope and the bottom fiber
//! to the min envelope.

use serde::{Deserialize, Serialize};

use crate::types::{
    Action, AnalysisMethod, EnvelopeTag, GraphType, Optimization, PenStyle, StressLocation,
};

/// What a planned series represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesRole {
    /// The only series for this loading
    Primary,
    /// Lower bound of an envelope pair
    MinEnvelope,
    /// Upper bound of an envelope pair
    MaxEnvelope,
    /// Stress at a top fiber
    TopStress,
    /// Stress at a bottom fiber
    BottomStress,
}

/// One analysis query the builder must issue, and how to style its series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Analysis-model tag to pass to the oracle
    pub tag: EnvelopeTag,
    /// Role of the resulting series
    pub role: SeriesRole,
    /// Fiber location, for stress actions only
    pub stress_location: Option<StressLocation>,
    /// Pen style for rendering
    pub pen: PenStyle,
}

impl PlanEntry {
    fn new(tag: EnvelopeTag, role: SeriesRole) -> Self {
        Self {
            tag,
            role,
            stress_location: None,
            pen: PenStyle::Solid,
        }
    }

    fn stress(tag: EnvelopeTag, location: StressLocation) -> Self {
        Self {
            tag,
            role: if location.is_top() {
                SeriesRole::TopStress
            } else {
                SeriesRole::BottomStress
            },
            stress_location: Some(location),
            pen: PenStyle::for_stress_location(location),
        }
    }
}

/// Resolve the ordered list of analysis queries for one (action, method,
/// graph type) combination.
///
/// `stress_selection` lists the fiber locations the caller wants plotted and
/// is only consulted for the stress action. A pure function of its inputs.
///
/// # Panics
///
/// Panics if asked for a combination the domain model rules out (a reaction
/// series under a capacity-like graph). That means a new graph type or
/// action was added without extending the resolver, which is a programming
/// error with no recoverable fallback.
pub fn resolve_series_plan(
    action: Action,
    method: AnalysisMethod,
    graph_type: GraphType,
    stress_selection: &[StressLocation],
) -> Vec<PlanEntry> {
    match action {
        Action::Axial
        | Action::Shear
        | Action::Moment
        | Action::Deflection
        | Action::XDeflection
        | Action::Rotation => force_plan(method, graph_type),
        Action::Reaction => {
            assert!(
                !graph_type.is_capacity_like(),
                "reaction series cannot be resolved for {graph_type:?} graphs"
            );
            force_plan(method, graph_type)
        }
        Action::Stress => stress_plan(method, stress_selection),
    }
}

/// Plan for the scalar force/deflection actions. One query for simple or
/// continuous analysis; a min/max pair under envelope analysis, except for
/// capacity-like graphs where only the max envelope is meaningful.
fn force_plan(method: AnalysisMethod, graph_type: GraphType) -> Vec<PlanEntry> {
    match method {
        AnalysisMethod::Simple | AnalysisMethod::Continuous => vec![PlanEntry::new(
            EnvelopeTag::for_analysis(method, Optimization::Maximize),
            SeriesRole::Primary,
        )],
        AnalysisMethod::Envelope if graph_type.is_capacity_like() => vec![PlanEntry::new(
            EnvelopeTag::MaxSimpleContinuousEnvelope,
            SeriesRole::Primary,
        )],
        AnalysisMethod::Envelope => vec![
            PlanEntry::new(
                EnvelopeTag::MinSimpleContinuousEnvelope,
                SeriesRole::MinEnvelope,
            ),
            PlanEntry::new(
                EnvelopeTag::MaxSimpleContinuousEnvelope,
                SeriesRole::MaxEnvelope,
            ),
        ],
    }
}

/// Plan for stress series: one per selected fiber location.
///
/// Under envelope analysis the pairing is deliberately asymmetric: the top
/// series always queries the max envelope and the bottom series the min
/// envelope. The governing load case for tension at the top fiber in
/// negative-moment regions is the maximum one, regardless of which span
/// condition produces it, so the two fibers do not share a tag the way the
/// scalar actions do.
fn stress_plan(method: AnalysisMethod, stress_selection: &[StressLocation]) -> Vec<PlanEntry> {
    stress_selection
        .iter()
        .map(|&location| {
            let tag = match method {
                AnalysisMethod::Envelope => {
                    if location.is_top() {
                        EnvelopeTag::MaxSimpleContinuousEnvelope
                    } else {
                        EnvelopeTag::MinSimpleContinuousEnvelope
                    }
                }
                AnalysisMethod::Simple => EnvelopeTag::SimpleSpan,
                AnalysisMethod::Continuous => EnvelopeTag::ContinuousSpan,
            };
            PlanEntry::stress(tag, location)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_analysis_yields_one_query() {
        for action in [
            Action::Axial,
            Action::Shear,
            Action::Moment,
            Action::Deflection,
            Action::XDeflection,
            Action::Rotation,
            Action::Reaction,
        ] {
            let plan =
                resolve_series_plan(action, AnalysisMethod::Simple, GraphType::Product, &[]);
            assert_eq!(plan.len(), 1, "{action:?}");
            assert_eq!(plan[0].tag, EnvelopeTag::SimpleSpan);
            assert_eq!(plan[0].role, SeriesRole::Primary);
        }
    }

    #[test]
    fn test_envelope_analysis_yields_min_max_pair() {
        let plan = resolve_series_plan(
            Action::Moment,
            AnalysisMethod::Envelope,
            GraphType::Combined,
            &[],
        );
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].tag, EnvelopeTag::MinSimpleContinuousEnvelope);
        assert_eq!(plan[0].role, SeriesRole::MinEnvelope);
        assert_eq!(plan[1].tag, EnvelopeTag::MaxSimpleContinuousEnvelope);
        assert_eq!(plan[1].role, SeriesRole::MaxEnvelope);
    }

    #[test]
    fn test_capacity_like_collapses_to_max_envelope() {
        for graph_type in [
            GraphType::Allowable,
            GraphType::Capacity,
            GraphType::MinCapacity,
            GraphType::LoadRating,
        ] {
            let plan = resolve_series_plan(
                Action::Moment,
                AnalysisMethod::Envelope,
                graph_type,
                &[],
            );
            assert_eq!(plan.len(), 1, "{graph_type:?}");
            assert_eq!(plan[0].tag, EnvelopeTag::MaxSimpleContinuousEnvelope);
        }
    }

    #[test]
    fn test_stress_envelope_asymmetry() {
        let plan = resolve_series_plan(
            Action::Stress,
            AnalysisMethod::Envelope,
            GraphType::Product,
            &[StressLocation::BottomGirder, StressLocation::TopGirder],
        );
        assert_eq!(plan.len(), 2);

        let bottom = &plan[0];
        assert_eq!(bottom.stress_location, Some(StressLocation::BottomGirder));
        assert_eq!(bottom.tag, EnvelopeTag::MinSimpleContinuousEnvelope);
        assert_eq!(bottom.role, SeriesRole::BottomStress);
        assert_eq!(bottom.pen, PenStyle::Dash);

        let top = &plan[1];
        assert_eq!(top.stress_location, Some(StressLocation::TopGirder));
        assert_eq!(top.tag, EnvelopeTag::MaxSimpleContinuousEnvelope);
        assert_eq!(top.role, SeriesRole::TopStress);
        assert_eq!(top.pen, PenStyle::Solid);

        assert_ne!(bottom.tag, top.tag);
    }

    #[test]
    fn test_stress_non_envelope_shares_one_tag() {
        for (method, expected) in [
            (AnalysisMethod::Simple, EnvelopeTag::SimpleSpan),
            (AnalysisMethod::Continuous, EnvelopeTag::ContinuousSpan),
        ] {
            let plan = resolve_series_plan(
                Action::Stress,
                method,
                GraphType::Product,
                &[StressLocation::BottomGirder, StressLocation::TopGirder],
            );
            assert!(plan.iter().all(|e| e.tag == expected));
        }
    }

    #[test]
    fn test_stress_empty_selection_yields_no_queries() {
        let plan = resolve_series_plan(
            Action::Stress,
            AnalysisMethod::Envelope,
            GraphType::Product,
            &[],
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn test_resolver_is_idempotent() {
        let selection = [StressLocation::TopGirder, StressLocation::BottomDeck];
        let a = resolve_series_plan(
            Action::Stress,
            AnalysisMethod::Envelope,
            GraphType::Demand,
            &selection,
        );
        let b = resolve_series_plan(
            Action::Stress,
            AnalysisMethod::Envelope,
            GraphType::Demand,
            &selection,
        );
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "reaction series cannot be resolved")]
    fn test_reaction_under_allowable_is_a_programming_error() {
        resolve_series_plan(
            Action::Reaction,
            AnalysisMethod::Simple,
            GraphType::Allowable,
            &[],
        );
    }
}
