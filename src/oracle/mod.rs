//! Boundary to the structural-analysis engine.
//!
//! The graph engine never computes structural results itself. Everything it
//! plots comes from these traits, which are implemented by the analysis
//! layer and injected into the builder. Keeping the boundary explicit makes
//! the decision logic testable against mock implementations.

use crate::error::OracleError;
use crate::types::{
    AnalysisMethod, CombinedLoadCase, EnvelopeTag, GirderKey, IntervalIndex, LimitState, Poi,
    ProductForceType, ResultsKind, SagInterval, SectionValue, SegmentKey, StressKind,
    StressLocation,
};

/// Result type for oracle queries
pub type OracleResult<T> = Result<T, OracleError>;

/// Construction timeline queries
pub trait Intervals {
    /// Interval at which prestress is released into the segment
    fn release_interval(&self, segment: SegmentKey) -> IntervalIndex;

    /// Interval during which the segment is hauled to the site
    fn haul_interval(&self, segment: SegmentKey) -> IntervalIndex;

    /// Interval at which the segment is erected
    fn erection_interval(&self, segment: SegmentKey) -> IntervalIndex;

    /// Interval at which the last segment of the girder is erected
    fn last_erection_interval(&self, girder: GirderKey) -> IntervalIndex;

    /// Human-readable description of an interval
    fn description(&self, interval: IntervalIndex) -> String;
}

/// Project settings and bridge topology predicates that determine which
/// loadings exist and how analysis queries are issued
pub trait ProjectCriteria {
    /// Project-wide analysis method setting
    fn analysis_method(&self) -> AnalysisMethod;

    /// Prestress losses computed with the time-step method
    fn is_time_step_losses(&self) -> bool;

    /// Spliced-girder bridge (post-tensioning loadings exist)
    fn is_spliced_girder(&self) -> bool;

    /// Girder cross-sections are asymmetric
    fn has_asymmetric_girders(&self) -> bool;

    /// Prestressing is asymmetric in plan
    fn has_asymmetric_prestress(&self) -> bool;

    /// Girders are installed tilted
    fn has_tilted_girders(&self) -> bool;

    /// Intervals at which stresses are spec-checked
    fn stress_check_intervals(&self, girder: GirderKey) -> Vec<IntervalIndex>;

    /// Display name for a product loading
    fn product_load_name(&self, load: ProductForceType) -> String;

    /// Display name for a load combination
    fn combination_name(&self, combo: CombinedLoadCase) -> String;
}

/// Geometry needed to place series on the x-axis
pub trait BridgeGeometry {
    /// Points of interest along the segment, ascending x
    fn points_of_interest(&self, segment: SegmentKey) -> Vec<Poi>;

    /// X of the left and right end faces of the segment
    fn segment_face_xs(&self, segment: SegmentKey) -> (f64, f64);

    /// X of the left and right support points during an interval. Support
    /// locations move between release, storage, hauling and erection.
    fn segment_support_xs(&self, segment: SegmentKey, interval: IntervalIndex) -> (f64, f64);
}

/// Results for individual product load cases
#[allow(clippy::too_many_arguments)]
pub trait ProductForces {
    fn axial(
        &self,
        interval: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<f64>>;

    fn shear(
        &self,
        interval: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<SectionValue>>;

    fn moment(
        &self,
        interval: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<f64>>;

    fn deflection(
        &self,
        interval: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
        include_elevation_adjustment: bool,
        include_unrecoverable: bool,
    ) -> OracleResult<Vec<f64>>;

    fn x_deflection(
        &self,
        interval: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<f64>>;

    fn rotation(
        &self,
        interval: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
        include_unrecoverable: bool,
    ) -> OracleResult<Vec<f64>>;

    /// Stresses at a top and a bottom fiber, as parallel arrays
    fn stress(
        &self,
        interval: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
        top: StressLocation,
        bottom: StressLocation,
    ) -> OracleResult<(Vec<f64>, Vec<f64>)>;

    /// Self-weight deflection locked in once the girder leaves storage
    fn unrecoverable_deflection(
        &self,
        sag: SagInterval,
        tag: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>>;

    /// Lateral counterpart of [`Self::unrecoverable_deflection`]
    fn unrecoverable_x_deflection(
        &self,
        sag: SagInterval,
        tag: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>>;

    /// Rotation counterpart of [`Self::unrecoverable_deflection`]
    fn unrecoverable_rotation(
        &self,
        sag: SagInterval,
        tag: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>>;

    /// Left and right support reactions for the segment
    fn segment_reactions(
        &self,
        segment: SegmentKey,
        interval: IntervalIndex,
        load: ProductForceType,
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<(f64, f64)>;
}

/// Results for load combinations
#[allow(clippy::too_many_arguments)]
pub trait CombinedForces {
    fn axial(
        &self,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<f64>>;

    fn shear(
        &self,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<SectionValue>>;

    fn moment(
        &self,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<f64>>;

    fn deflection(
        &self,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
        include_elevation_adjustment: bool,
        include_unrecoverable: bool,
    ) -> OracleResult<Vec<f64>>;

    fn x_deflection(
        &self,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<Vec<f64>>;

    fn rotation(
        &self,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
        include_unrecoverable: bool,
    ) -> OracleResult<Vec<f64>>;

    fn stress(
        &self,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
        top: StressLocation,
        bottom: StressLocation,
    ) -> OracleResult<(Vec<f64>, Vec<f64>)>;

    fn segment_reactions(
        &self,
        segment: SegmentKey,
        interval: IntervalIndex,
        combo: CombinedLoadCase,
        tag: EnvelopeTag,
        results: ResultsKind,
    ) -> OracleResult<(f64, f64)>;
}

/// Paired min/max result arrays from a limit state query
#[derive(Debug, Clone)]
pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

/// Factored limit-state results. Always min/max pairs; limit state results
/// are cumulative by definition.
#[allow(clippy::too_many_arguments)]
pub trait LimitStateForces {
    fn axial(
        &self,
        interval: IntervalIndex,
        limit_state: LimitState,
        pois: &[Poi],
        tag: EnvelopeTag,
    ) -> OracleResult<MinMax<Vec<f64>>>;

    fn shear(
        &self,
        interval: IntervalIndex,
        limit_state: LimitState,
        pois: &[Poi],
        tag: EnvelopeTag,
    ) -> OracleResult<MinMax<Vec<SectionValue>>>;

    fn moment(
        &self,
        interval: IntervalIndex,
        limit_state: LimitState,
        pois: &[Poi],
        tag: EnvelopeTag,
    ) -> OracleResult<MinMax<Vec<f64>>>;

    fn deflection(
        &self,
        interval: IntervalIndex,
        limit_state: LimitState,
        pois: &[Poi],
        tag: EnvelopeTag,
        include_prestress: bool,
        include_unrecoverable: bool,
    ) -> OracleResult<MinMax<Vec<f64>>>;

    fn x_deflection(
        &self,
        interval: IntervalIndex,
        limit_state: LimitState,
        pois: &[Poi],
        tag: EnvelopeTag,
        include_prestress: bool,
    ) -> OracleResult<MinMax<Vec<f64>>>;

    fn rotation(
        &self,
        interval: IntervalIndex,
        limit_state: LimitState,
        pois: &[Poi],
        tag: EnvelopeTag,
        include_prestress: bool,
        include_unrecoverable: bool,
    ) -> OracleResult<MinMax<Vec<f64>>>;

    /// Min/max stress at one fiber location
    fn stress(
        &self,
        interval: IntervalIndex,
        limit_state: LimitState,
        pois: &[Poi],
        tag: EnvelopeTag,
        include_prestress: bool,
        location: StressLocation,
    ) -> OracleResult<MinMax<Vec<f64>>>;
}

/// Closed-form allowable stress limits
pub trait StressLimits {
    /// Whether a tension or compression limit applies at all for the task
    fn is_limit_applicable(
        &self,
        segment: SegmentKey,
        interval: IntervalIndex,
        limit_state: LimitState,
        kind: StressKind,
    ) -> bool;

    /// Allowable tension curve for the girder (without rebar, outside the
    /// precompressed tensile zone)
    fn girder_tension_limit(
        &self,
        pois: &[Poi],
        interval: IntervalIndex,
        limit_state: LimitState,
    ) -> OracleResult<Vec<f64>>;

    /// Allowable compression curve for the girder
    fn girder_compression_limit(
        &self,
        pois: &[Poi],
        interval: IntervalIndex,
        limit_state: LimitState,
    ) -> OracleResult<Vec<f64>>;
}

/// Spec-check artifact for one POI and one stress check task. At the
/// release interval the allowable tension depends on whether mild
/// reinforcement unlocks the with-rebar alternative at that section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexuralStressArtifact {
    pub capacity_top: f64,
    pub capacity_bottom: f64,
    pub with_rebar_top: bool,
    pub with_rebar_bottom: bool,
    pub alt_tension_top: f64,
    pub alt_tension_bottom: f64,
}

impl FlexuralStressArtifact {
    /// Governing tension allowable: per flange, the with-rebar alternative
    /// if it governed, otherwise the raw capacity; then the max of the two.
    pub fn governing_tension(&self) -> f64 {
        let top = if self.with_rebar_top {
            self.alt_tension_top
        } else {
            self.capacity_top
        };
        let bottom = if self.with_rebar_bottom {
            self.alt_tension_bottom
        } else {
            self.capacity_bottom
        };
        top.max(bottom)
    }

    /// Governing compression allowable: min of the two flange capacities
    pub fn governing_compression(&self) -> f64 {
        self.capacity_top.min(self.capacity_bottom)
    }
}

/// Access to stored spec-check artifacts
pub trait SegmentArtifacts {
    /// Artifact for one POI, or `None` if the spec check did not cover it
    fn flexural_stress_artifact(
        &self,
        segment: SegmentKey,
        interval: IntervalIndex,
        limit_state: LimitState,
        kind: StressKind,
        poi_id: usize,
    ) -> Option<FlexuralStressArtifact>;
}

/// The full set of injected oracle references the builder needs.
/// Construction forces every dependency to be supplied explicitly.
#[derive(Clone, Copy)]
pub struct Oracle<'a> {
    pub intervals: &'a dyn Intervals,
    pub criteria: &'a dyn ProjectCriteria,
    pub geometry: &'a dyn BridgeGeometry,
    pub product: &'a dyn ProductForces,
    pub combined: &'a dyn CombinedForces,
    pub limit_state: &'a dyn LimitStateForces,
    pub stress_limits: &'a dyn StressLimits,
    pub artifacts: &'a dyn SegmentArtifacts,
}
