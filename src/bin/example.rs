//! Girder Graphs Example - Single 100m Segment

use girder_graphs::prelude::*;

const LENGTH: f64 = 100.0;
const UNIT_WEIGHT: f64 = 20_000.0; // N/m

struct DemoTimeline;

impl Intervals for DemoTimeline {
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
        let what = match interval {
            2 => "Prestress Release",
            3 => "Storage",
            4 => "Hauling",
            5 => "Erection",
            6 => "Final",
            _ => "Construction",
        };
        what.to_string()
    }
}

struct DemoCriteria;

impl ProjectCriteria for DemoCriteria {
    fn analysis_method(&self) -> AnalysisMethod {
        AnalysisMethod::Simple
    }
    fn is_time_step_losses(&self) -> bool {
        false
    }
    fn is_spliced_girder(&self) -> bool {
        false
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

struct DemoGeometry;

impl DemoGeometry {
    fn n_pois() -> usize {
        11
    }
}

impl BridgeGeometry for DemoGeometry {
    fn points_of_interest(&self, _: SegmentKey) -> Vec<Poi> {
        (0..Self::n_pois())
            .map(|i| Poi::new(i, LENGTH * i as f64 / (Self::n_pois() - 1) as f64))
            .collect()
    }
    fn segment_face_xs(&self, _: SegmentKey) -> (f64, f64) {
        (0.0, LENGTH)
    }
    fn segment_support_xs(&self, _: SegmentKey, interval: IntervalIndex) -> (f64, f64) {
        // supports pull in from the faces while the segment is handled
        match interval {
            3 | 4 => (5.0, LENGTH - 5.0),
            _ => (0.5, LENGTH - 0.5),
        }
    }
}

/// Simple-span closed forms for a uniform load
fn moment_at(x: f64) -> f64 {
    UNIT_WEIGHT * x * (LENGTH - x) / 2.0
}

fn deflection_at(x: f64) -> f64 {
    // shape only; scaled to a plausible midspan sag
    let shape = x * (LENGTH - x) / (LENGTH * LENGTH / 4.0);
    -0.050 * shape
}

fn shear_at(x: f64) -> f64 {
    UNIT_WEIGHT * (LENGTH / 2.0 - x)
}

struct DemoForces;

impl ProductForces for DemoForces {
    fn axial(
        &self,
        _: IntervalIndex,
        _: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![0.0; pois.len()])
    }
    fn shear(
        &self,
        _: IntervalIndex,
        _: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<SectionValue>> {
        Ok(pois
            .iter()
            .map(|poi| SectionValue::uniform(shear_at(poi.x)))
            .collect())
    }
    fn moment(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        let sign = if load == ProductForceType::Pretension {
            -0.6
        } else {
            1.0
        };
        Ok(pois.iter().map(|poi| sign * moment_at(poi.x)).collect())
    }
    fn deflection(
        &self,
        _: IntervalIndex,
        load: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
        _: bool,
        _: bool,
    ) -> OracleResult<Vec<f64>> {
        let sign = if load == ProductForceType::Pretension {
            -0.8
        } else {
            1.0
        };
        Ok(pois.iter().map(|poi| sign * deflection_at(poi.x)).collect())
    }
    fn x_deflection(
        &self,
        _: IntervalIndex,
        _: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![0.0; pois.len()])
    }
    fn rotation(
        &self,
        _: IntervalIndex,
        _: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
        _: bool,
    ) -> OracleResult<Vec<f64>> {
        Ok(pois
            .iter()
            .map(|poi| 1e-3 * (LENGTH / 2.0 - poi.x) / LENGTH)
            .collect())
    }
    fn stress(
        &self,
        _: IntervalIndex,
        _: ProductForceType,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
        _: StressLocation,
        _: StressLocation,
    ) -> OracleResult<(Vec<f64>, Vec<f64>)> {
        let top = pois.iter().map(|poi| -6e3 * moment_at(poi.x) / 1e9).collect();
        let bottom = pois.iter().map(|poi| 6e3 * moment_at(poi.x) / 1e9).collect();
        Ok((top, bottom))
    }
    fn unrecoverable_deflection(
        &self,
        sag: SagInterval,
        _: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>> {
        let scale = match sag {
            SagInterval::Hauling => 0.4,
            SagInterval::Erection => 0.25,
        };
        Ok(pois
            .iter()
            .map(|poi| scale * deflection_at(poi.x))
            .collect())
    }
    fn unrecoverable_x_deflection(
        &self,
        _: SagInterval,
        _: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![0.0; pois.len()])
    }
    fn unrecoverable_rotation(
        &self,
        _: SagInterval,
        _: EnvelopeTag,
        pois: &[Poi],
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![0.0; pois.len()])
    }
    fn segment_reactions(
        &self,
        _: SegmentKey,
        _: IntervalIndex,
        _: ProductForceType,
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<(f64, f64)> {
        let half = UNIT_WEIGHT * LENGTH / 2.0;
        Ok((half, half))
    }
}

impl CombinedForces for DemoForces {
    fn axial(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        Ok(vec![0.0; pois.len()])
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
            .map(|poi| SectionValue::uniform(shear_at(poi.x)))
            .collect())
    }
    fn moment(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
    ) -> OracleResult<Vec<f64>> {
        Ok(pois.iter().map(|poi| moment_at(poi.x)).collect())
    }
    fn deflection(
        &self,
        _: IntervalIndex,
        _: CombinedLoadCase,
        pois: &[Poi],
        _: EnvelopeTag,
        _: ResultsKind,
        _: bool,
        _: bool,
    ) -> OracleResult<Vec<f64>> {
        Ok(pois.iter().map(|poi| deflection_at(poi.x)).collect())
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
        let half = UNIT_WEIGHT * LENGTH / 2.0;
        Ok((half, half))
    }
}

impl LimitStateForces for DemoForces {
    fn axial(
        &self,
        _: IntervalIndex,
        _: LimitState,
        pois: &[Poi],
        _: EnvelopeTag,
    ) -> OracleResult<MinMax<Vec<f64>>> {
        Ok(MinMax {
            min: vec![0.0; pois.len()],
            max: vec![0.0; pois.len()],
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
            .map(|poi| SectionValue::uniform(shear_at(poi.x)))
            .collect();
        Ok(MinMax {
            min: base.iter().map(|v| SectionValue::new(v.left * 0.9, v.right * 0.9)).collect(),
            max: base.iter().map(|v| SectionValue::new(v.left * 1.25, v.right * 1.25)).collect(),
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
            .map(|poi| sign * 6e3 * moment_at(poi.x) / 1e9)
            .collect();
        Ok(MinMax {
            min: base.iter().map(|v| v - 0.5).collect(),
            max: base.iter().map(|v| v + 0.5).collect(),
        })
    }
}

struct DemoLimits;

impl StressLimits for DemoLimits {
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

struct DemoArtifacts;

impl SegmentArtifacts for DemoArtifacts {
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
                // bonded rebar over the middle third unlocks the higher limit
                let with_rebar = (4..7).contains(&poi_id);
                Some(FlexuralStressArtifact {
                    capacity_top: 1.38,
                    capacity_bottom: 1.38,
                    with_rebar_top: with_rebar,
                    with_rebar_bottom: with_rebar,
                    alt_tension_top: 3.25,
                    alt_tension_bottom: 3.25,
                })
            }
            StressKind::Compression => Some(FlexuralStressArtifact {
                capacity_top: -12.4,
                capacity_bottom: -12.4,
                with_rebar_top: false,
                with_rebar_bottom: false,
                alt_tension_top: 0.0,
                alt_tension_bottom: 0.0,
            }),
        }
    }
}

fn print_graph(graph: &GraphData) {
    println!("{}", graph.title);
    println!("  x: {}", graph.x_axis_title);
    println!("  y: {}", graph.y_axis_title);
    for series in &graph.series {
        let label = if series.label.is_empty() {
            "(unlabeled)"
        } else {
            series.label.as_str()
        };
        let extremes = series
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });
        println!(
            "  series {} {:<32} {:>3} points, y in [{:.3}, {:.3}]",
            series.id,
            label,
            series.points.len(),
            extremes.0,
            extremes.1
        );
    }
    println!();
}

fn main() {
    env_logger::init();

    println!("=== Girder Graphs Example: 100m Segment ===\n");

    let timeline = DemoTimeline;
    let criteria = DemoCriteria;
    let geometry = DemoGeometry;
    let forces = DemoForces;
    let limits = DemoLimits;
    let artifacts = DemoArtifacts;
    let oracle = Oracle {
        intervals: &timeline,
        criteria: &criteria,
        geometry: &geometry,
        product: &forces,
        combined: &forces,
        limit_state: &forces,
        stress_limits: &limits,
        artifacts: &artifacts,
    };

    let segment = SegmentKey::new(0, 0, 0);
    let x_units = ScaleConverter::new(1.0, "m");

    // moments at storage, every applicable loading
    let moment_units = ScaleConverter::new(1e-3, "kN-m");
    let mut builder = AnalysisResultsGraphBuilder::new(oracle, &x_units, &moment_units);
    builder.update_registry(segment);
    let loadings: Vec<GraphId> = builder
        .registry()
        .loadings_for(3, Action::Moment)
        .into_iter()
        .map(|(_, id)| id)
        .collect();
    let graph = builder
        .build(&GraphRequest {
            segment,
            mode: GraphSelectionMode::ByInterval {
                interval: 3,
                loadings,
            },
            action: Action::Moment,
            results_kind: ResultsKind::Cumulative,
            stress_locations: vec![],
            include_unrecoverable: false,
        })
        .expect("moment graph failed");
    print_graph(&graph);

    // casting-yard allowable stress at release: the tension curve jumps
    // where the with-rebar limit takes over
    let stress_units = ScaleConverter::new(1.0, "MPa");
    let mut builder = AnalysisResultsGraphBuilder::new(oracle, &x_units, &stress_units);
    builder.update_registry(segment);
    let allowable: Vec<GraphId> = builder
        .registry()
        .iter()
        .filter(|d| d.source.graph_type() == GraphType::Allowable)
        .map(|d| d.id)
        .collect();
    let graph = builder
        .build(&GraphRequest {
            segment,
            mode: GraphSelectionMode::ByInterval {
                interval: 2,
                loadings: allowable,
            },
            action: Action::Stress,
            results_kind: ResultsKind::Cumulative,
            stress_locations: vec![StressLocation::BottomGirder, StressLocation::TopGirder],
            include_unrecoverable: false,
        })
        .expect("allowable graph failed");
    print_graph(&graph);

    // girder deflection history for one loading across intervals
    let deflection_units = ScaleConverter::new(1e3, "mm");
    let mut builder = AnalysisResultsGraphBuilder::new(oracle, &x_units, &deflection_units);
    builder.update_registry(segment);
    let girder = builder
        .registry()
        .iter()
        .find(|d| d.source == GraphSource::Product(ProductForceType::Girder))
        .map(|d| d.id)
        .expect("girder loading missing");
    let graph = builder
        .build(&GraphRequest {
            segment,
            mode: GraphSelectionMode::ByLoading {
                loading: girder,
                intervals: vec![2, 3, 4, 5, 6],
            },
            action: Action::Deflection,
            results_kind: ResultsKind::Cumulative,
            stress_locations: vec![],
            include_unrecoverable: true,
        })
        .expect("deflection graph failed");
    print_graph(&graph);

    let json = serde_json::to_string(&graph).expect("serialization failed");
    println!("deflection graph serializes to {} bytes of JSON", json.len());

    println!("\n=== Done ===");
}
