//! Shared mock bridge for integration tests.
//!
//! A single 10m segment with six POIs. Results are simple closed forms so
//! tests can predict every plotted value: moment `x * (L - x)`, deflection a
//! scaled parabola, and envelope min queries offset by a fixed amount from
//! the max queries.

use girder_graphs::prelude::*;

pub const LENGTH: f64 = 10.0;
pub const N_POIS: usize = 6;

/// Offset applied to min-envelope force results so tests can tell the two
/// halves of a pair apart
pub const MIN_ENVELOPE_OFFSET: f64 = 100.0;

pub const HAULING_SAG: f64 = -2.0;
pub const ERECTION_SAG: f64 = -1.0;

pub const HAULING_ROTATION: f64 = 2e-4;
pub const ERECTION_ROTATION: f64 = 1e-4;

pub struct MockTimeline;

impl Intervals for MockTimeline {
    fn release_interval(&self, _: SegmentKey) -> IntervalIndex {
        2
    }
    fn haul_interval(&self, _: SegmentKey) -> IntervalIndex {
        4
    }
    fn erection_interval(&self, _: SegmentKey) -> IntervalIndex {
        5
    }
    fn last_erection_interval(&self, _: GirderKey) -> IntervalIndex {
        6
    }
    fn description(&self, interval: IntervalIndex) -> String {
        format!("Interval {interval}")
    }
}

pub struct MockCriteria {
    pub method: AnalysisMethod,
    pub time_step: bool,
    pub spliced: bool,
}

impl Default for MockCriteria {
    fn default() -> Self {
        Self {
            method: AnalysisMethod::Simple,
            time_step: false,
            spliced: false,
        }
    }
}

impl ProjectCriteria for MockCriteria {
    fn analysis_method(&self) -> AnalysisMethod {
        self.method
    }
    fn is_time_step_losses(&self) -> bool {
        self.time_step
    }
    fn is_spliced_girder(&self) -> bool {
        self.spliced
    }
    fn has_asymmetric_girders(&self) -> bool {
        false
    }
    fn has_asymmetric_prestress(&self) -> bool {
        false
    }
    fn has_tilted_girders(&self) -> bool {
        false
    }
    fn stress_check_intervals(&self, _: GirderKey) -> Vec<IntervalIndex> {
        vec![2, 5, 6]
    }
    fn product_load_name(&self, load: ProductForceType) -> String {
        match load {
            ProductForceType::Girder => "Girder".to_string(),
            ProductForceType::Pretension => "Pretension".to_string(),
            other => format!("{other:?}"),
        }
    }
    fn combination_name(&self, combo: CombinedLoadCase) -> String {
        format!("{combo:?}").to_uppercase()
    }
}

pub struct MockGeometry;

impl BridgeGeometry for MockGeometry {
    fn points_of_interest(&self, _: SegmentKey) -> Vec<Poi> {
        (0..N_POIS)
            .map(|i| Poi::new(i, LENGTH * i as f64 / (N_POIS - 1) as f64))
            .collect()
    }
    fn segment_face_xs(&self, _: SegmentKey) -> (f64, f64) {
        (0.0, LENGTH)
    }
    fn segment_support_xs(&self, _: SegmentKey, _: IntervalIndex) -> (f64, f64) {
        (1.0, LENGTH - 1.0)
    }
}

pub fn moment_at(x: f64) -> f64 {
    x * (LENGTH - x)
}

pub fn deflection_at(x: f64) -> f64 {
    -1e-3 * x * (LENGTH - x)
}

fn tag_offset(tag: EnvelopeTag) -> f64 {
    if tag == EnvelopeTag::MinSimpleContinuousEnvelope {
        -MIN_ENVELOPE_OFFSET
    } else {
        0.0
    }
}

#[derive(Default)]
pub struct MockForces {
    /// Any query for the pretension loading fails
    pub fail_pretension: bool,
    /// Moment queries return two fewer values than there are POIs
    pub short_moment: bool,
}

impl MockForces {
    fn check_load(&self, load: ProductForceType) -> OracleResult<()> {
        if self.fail_pretension && load == ProductForceType::Pretension {
            Err(OracleError::new("pretension results not available"))
        } else {
            Ok(())
        }
    }
}

impl ProductForces for MockForces {
    fn axial(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        self.check_load(load)?;
        Ok(pois.iter().map(|_| 5.0 + tag_offset(tag)).collect())
    }
    fn shear(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<SectionValue>> {
        self.check_load(load)?;
        Ok(pois
            .iter()
            .map(|poi| SectionValue::uniform(LENGTH / 2.0 - poi.x))
            .collect())
    }
    fn moment(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        self.check_load(load)?;
        let mut values: Vec<f64> = pois
            .iter()
            .map(|poi| moment_at(poi.x) + tag_offset(tag))
            .collect();
        if self.short_moment {
            values.truncate(values.len().saturating_sub(2));
        }
        Ok(values)
    }
    fn deflection(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        _: ResultsKind,
        _: bool,
        _: bool,
    ) -> OracleResult<Vec<f64>> {
        self.check_load(load)?;
        Ok(pois
            .iter()
            .map(|poi| deflection_at(poi.x) + tag_offset(tag))
            .collect())
    }
    fn x_deflection(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        self.check_load(load)?;
        Ok(vec![0.0; pois.len()])
    }
    fn rotation(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
        _: bool,
    ) -> OracleResult<Vec<f64>> {
        self.check_load(load)?;
        Ok(pois
            .iter()
            .map(|poi| 1e-5 * (LENGTH / 2.0 - poi.x))
            .collect())
    }
    fn stress(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        tag: EnvelopeTag,
        _: ResultsKind,
        _: StressLocation,
        _: StressLocation,
    ) -> OracleResult<(Vec<f64>, Vec<f64>)> {
        self.check_load(load)?;
        let top = pois
            .iter()
            .map(|poi| -0.01 * moment_at(poi.x) + tag_offset(tag))
            .collect();
        let bottom = pois
            .iter()
            .map(|poi| 0.01 * moment_at(poi.x) + tag_offset(tag))
            .collect();
        Ok((top, bottom))
    }
    fn unrecoverable_deflection(
        &self,
        sag: SagInterval,
        _: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>> {
        let value = match sag {
            SagInterval::Hauling => HAULING_SAG,
            SagInterval::Erection => ERECTION_SAG,
        };
        Ok(vec![value; pois.len()])
    }
    fn unrecoverable_x_deflection(
        &self,
        sag: SagInterval,
        tag: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>> {
        self.unrecoverable_deflection(sag, tag, pois)
    }
    fn unrecoverable_rotation(
        &self,
        sag: SagInterval,
        _: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>> {
        let value = match sag {
            SagInterval::Hauling => HAULING_ROTATION,
            SagInterval::Erection => ERECTION_ROTATION,
        };
        Ok(vec![value; pois.len()])
    }
    fn segment_reactions(
        &self,
        _: SegmentKey,
        _: IntervalIndex,
        load: ProductForceType,
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<(f64, f64)> {
        self.check_load(load)?;
        Ok((60.0, 40.0))
    }
}

impl CombinedForces for MockForces {
    fn axial(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        Ok(pois.iter().map(|_| 5.0 + tag_offset(tag)).collect())
    }
    fn shear(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<SectionValue>> {
        Ok(pois
            .iter()
            .map(|poi| SectionValue::uniform(LENGTH / 2.0 - poi.x))
            .collect())
    }
    fn moment(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        Ok(pois
            .iter()
            .map(|poi| moment_at(poi.x) + tag_offset(tag))
            .collect())
    }
    fn deflection(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        _: ResultsKind,
        _: bool,
        _: bool,
    ) -> OracleResult<Vec<f64>> {
        Ok(pois
            .iter()
            .map(|poi| deflection_at(poi.x) + tag_offset(tag))
            .collect())
    }
    fn x_deflection(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![0.0; pois.len()])
    }
    fn rotation(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
        _: bool,
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![0.0; pois.len()])
    }
    fn stress(
        &self,
        interval: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        tag: EnvelopeTag,
        results: ResultsKind,
        top: StressLocation,
        bottom: StressLocation,
    ) -> OracleResult<(Vec<f64>, Vec<f64>)> {
        ProductForces::stress(
            self,
            interval,
            ProductForceType::Girder,
            pois,
            tag,
            results,
            top,
            bottom,
        )
    }
    fn segment_reactions(
        &self,
        _: SegmentKey,
        _: IntervalIndex,
        _: CombinedLoadCase,
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<(f64, f64)> {
        Ok((60.0, 40.0))
    }
}

impl LimitStateForces for MockForces {
    fn axial(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
    ) -> OracleResult<MinMax<Vec<f64>>> {
        Ok(MinMax {
            min: vec![4.0; pois.len()],
            max: vec![6.0; pois.len()],
        })
    }
    fn shear(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
    ) -> OracleResult<MinMax<Vec<SectionValue>>> {
        let base: Vec<SectionValue> = pois
            .iter()
            .map(|poi| SectionValue::uniform(LENGTH / 2.0 - poi.x))
            .collect();
        Ok(MinMax {
            min: base.clone(),
            max: base,
        })
    }
    fn moment(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
    ) -> OracleResult<MinMax<Vec<f64>>> {
        Ok(MinMax {
            min: pois.iter().map(|poi| 0.9 * moment_at(poi.x)).collect(),
            max: pois.iter().map(|poi| 1.25 * moment_at(poi.x)).collect(),
        })
    }
    fn deflection(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
        _: bool,
        _: bool,
    ) -> OracleResult<MinMax<Vec<f64>>> {
        Ok(MinMax {
            min: pois.iter().map(|poi| 1.25 * deflection_at(poi.x)).collect(),
            max: pois.iter().map(|poi| 0.9 * deflection_at(poi.x)).collect(),
        })
    }
    fn x_deflection(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
        _: bool,
    ) -> OracleResult<MinMax<Vec<f64>>> {
        Ok(MinMax {
            min: vec![0.0; pois.len()],
            max: vec![0.0; pois.len()],
        })
    }
    fn rotation(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
        _: bool,
        _: bool,
    ) -> OracleResult<MinMax<Vec<f64>>> {
        Ok(MinMax {
            min: vec![0.0; pois.len()],
            max: vec![0.0; pois.len()],
        })
    }
    fn stress(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
        _: bool,
        location: StressLocation,
    ) -> OracleResult<MinMax<Vec<f64>>> {
        let sign = if location.is_top() { -1.0 } else { 1.0 };
        let base: Vec<f64> = pois
            .iter()
            .map(|poi| sign * 0.01 * moment_at(poi.x))
            .collect();
        Ok(MinMax {
            min: base.iter().map(|v| v - 0.5).collect(),
            max: base.iter().map(|v| v + 0.5).collect(),
        })
    }
}

pub struct MockLimits;

impl StressLimits for MockLimits {
    fn is_limit_applicable(
        &self,
        _: SegmentKey,
        _: IntervalIndex,
        _: LimitState,
        _: StressKind,
    ) -> bool {
        true
    }
    fn girder_tension_limit(
        &self,
        pois: &[Poi],
        _: IntervalIndex,
        _: LimitState,
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![1.38; pois.len()])
    }
    fn girder_compression_limit(
        &self,
        pois: &[Poi],
        _: IntervalIndex,
        _: LimitState,
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![-12.4; pois.len()])
    }
}

pub struct MockArtifacts;

impl SegmentArtifacts for MockArtifacts {
    fn flexural_stress_artifact(
        &self,
        _: SegmentKey,
        _: IntervalIndex,
        _: LimitState,
        kind: StressKind,
        poi_id: usize,
    ) -> Option<FlexuralStressArtifact> {
        match kind {
            StressKind::Tension => {
                // rebar over the middle: profile 1,1,2,2,1,1
                let with_rebar = (2..4).contains(&poi_id);
                Some(FlexuralStressArtifact {
                    capacity_top: 1.0,
                    capacity_bottom: 1.0,
                    with_rebar_top: with_rebar,
                    with_rebar_bottom: with_rebar,
                    alt_tension_top: 2.0,
                    alt_tension_bottom: 2.0,
                })
            }
            StressKind::Compression => Some(FlexuralStressArtifact {
                capacity_top: -10.0,
                capacity_bottom: -12.0,
                with_rebar_top: false,
                with_rebar_bottom: false,
                alt_tension_top: 0.0,
                alt_tension_bottom: 0.0,
            }),
        }
    }
}

/// One fully wired mock bridge. Owns every trait implementation so a test
/// can hand out a borrowed [`Oracle`] bundle.
pub struct MockBridge {
    pub timeline: MockTimeline,
    pub criteria: MockCriteria,
    pub geometry: MockGeometry,
    pub forces: MockForces,
    pub limits: MockLimits,
    pub artifacts: MockArtifacts,
}

impl MockBridge {
    pub fn new() -> Self {
        Self {
            timeline: MockTimeline,
            criteria: MockCriteria::default(),
            geometry: MockGeometry,
            forces: MockForces::default(),
            limits: MockLimits,
            artifacts: MockArtifacts,
        }
    }

    pub fn with_method(method: AnalysisMethod) -> Self {
        let mut bridge = Self::new();
        bridge.criteria.method = method;
        bridge
    }

    pub fn oracle(&self) -> Oracle<'_> {
        Oracle {
            intervals: &self.timeline,
            criteria: &self.criteria,
            geometry: &self.geometry,
            product: &self.forces,
            combined: &self.forces,
            limit_state: &self.forces,
            stress_limits: &self.limits,
            artifacts: &self.artifacts,
        }
    }

    pub fn segment(&self) -> SegmentKey {
        SegmentKey::new(0, 0, 0)
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}
