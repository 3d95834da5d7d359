//! Graph build orchestration.
//!
//! The builder turns a [`GraphRequest`] into plot-ready series. It owns no
//! analysis results of its own; every number comes from the injected oracle
//! traits. A rebuild is all-or-nothing: any oracle failure discards the
//! series built so far and surfaces the cause, leaving no partial state.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assembler::{dedup_labels, MismatchPolicy, Series, SeriesAssembler, UnitConverter};
use crate::capacity::cy_stress_capacity_series;
use crate::catalog::LoadingCatalog;
use crate::definitions::{GraphDefinitionRegistry, GraphSource};
use crate::error::{GraphError, GraphResult};
use crate::oracle::Oracle;
use crate::resolver::{resolve_series_plan, PlanEntry, SeriesRole};
use crate::types::{
    Action, CombinedLoadCase, GraphId, GraphType, IntervalIndex, LimitState, PenStyle, Poi,
    ProductForceType, ResultsKind, SegmentKey, StressKind, StressLocation,
};
use crate::unrecoverable::{UnrecoverableDecision, UnrecoverablePolicy};

/// What the user selected to plot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphSelectionMode {
    /// One interval, one series (or pair) per selected loading
    ByInterval {
        interval: IntervalIndex,
        loadings: Vec<GraphId>,
    },
    /// One loading, one series (or pair) per selected interval
    ByLoading {
        loading: GraphId,
        intervals: Vec<IntervalIndex>,
    },
}

/// A complete graph build request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphRequest {
    /// Segment whose results are plotted
    pub segment: SegmentKey,
    /// Interval/loading selection
    pub mode: GraphSelectionMode,
    /// Response quantity
    pub action: Action,
    /// Incremental or cumulative results
    pub results_kind: ResultsKind,
    /// Fiber locations to plot, stress action only
    pub stress_locations: Vec<StressLocation>,
    /// Display toggle for deflections locked in during handling
    pub include_unrecoverable: bool,
}

/// A finished graph: titles plus series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub series: Vec<Series>,
}

/// Logs the scope of one rebuild. Entered at the start of a build and
/// released on drop, so the closing message appears even on the error path.
struct BuildScope {
    what: &'static str,
}

impl BuildScope {
    fn enter(what: &'static str) -> Self {
        debug!("{what}: build started");
        Self { what }
    }
}

impl Drop for BuildScope {
    fn drop(&mut self) {
        debug!("{}: build finished", self.what);
    }
}

/// Borrowed per-build state shared by the dispatch helpers
struct BuildContext<'r> {
    segment: SegmentKey,
    interval: IntervalIndex,
    results: ResultsKind,
    include_unrecoverable: bool,
    pois: &'r [Poi],
    xs: &'r [f64],
    policy: UnrecoverablePolicy,
}

impl BuildContext<'_> {
    /// Rotations include the locked-in component only under the
    /// boundary-aware rotation rule, not the blanket deflection rule
    fn rotation_include(&self) -> bool {
        matches!(
            self.policy
                .rotation(self.interval, self.results, self.include_unrecoverable),
            UnrecoverableDecision::Include(_)
        )
    }
}

/// Builds analysis-results graphs for one segment at a time
pub struct AnalysisResultsGraphBuilder<'a> {
    oracle: Oracle<'a>,
    x_converter: &'a dyn UnitConverter,
    y_converter: &'a dyn UnitConverter,
    mismatch_policy: MismatchPolicy,
    registry: GraphDefinitionRegistry,
    registry_segment: Option<SegmentKey>,
}

impl<'a> AnalysisResultsGraphBuilder<'a> {
    /// Create a builder over the injected oracle and display converters.
    /// The y converter must match the action being plotted; callers that
    /// plot several actions construct one builder per action.
    pub fn new(
        oracle: Oracle<'a>,
        x_converter: &'a dyn UnitConverter,
        y_converter: &'a dyn UnitConverter,
    ) -> Self {
        Self {
            oracle,
            x_converter,
            y_converter,
            mismatch_policy: MismatchPolicy::default(),
            registry: GraphDefinitionRegistry::new(),
            registry_segment: None,
        }
    }

    /// Override the mismatched-length pairing policy
    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    /// The registry for the most recently selected segment
    pub fn registry(&self) -> &GraphDefinitionRegistry {
        &self.registry
    }

    /// Rebuild the loading registry for a segment. Called implicitly by
    /// [`Self::build`] when the segment changes.
    pub fn update_registry(&mut self, segment: SegmentKey) {
        let catalog = LoadingCatalog::new(self.oracle.intervals, self.oracle.criteria);
        self.registry = catalog.rebuild(segment);
        self.registry_segment = Some(segment);
    }

    /// Build the graph for a request
    pub fn build(&mut self, request: &GraphRequest) -> GraphResult<GraphData> {
        let _scope = BuildScope::enter("analysis results graph");

        if self.registry_segment != Some(request.segment) {
            self.update_registry(request.segment);
        }

        let segment = request.segment;
        let release = self.oracle.intervals.release_interval(segment);
        let policy = UnrecoverablePolicy::new(
            self.oracle.intervals.haul_interval(segment),
            self.oracle.intervals.erection_interval(segment),
        );

        let pois = self.oracle.geometry.points_of_interest(segment);
        let xs: Vec<f64> = pois.iter().map(|poi| poi.x).collect();

        let mut series = Vec::new();
        let mut labeled: Vec<(usize, String)> = Vec::new();

        for (pair_index, (interval, loading)) in self.selection_pairs(request).iter().enumerate() {
            let (interval, loading) = (*interval, *loading);

            // the segment does not exist before prestress release
            if interval < release {
                debug!("skipping interval {interval}: before release ({release})");
                continue;
            }

            let definition = self
                .registry
                .get(loading)
                .ok_or(GraphError::DefinitionNotFound(loading))?;
            if !definition.is_applicable_to(interval, request.action) {
                debug!(
                    "skipping loading {} at interval {interval}: not applicable to {:?}",
                    definition.name, request.action
                );
                continue;
            }
            let source = definition.source;
            let base_label = match &request.mode {
                GraphSelectionMode::ByInterval { .. } => definition.name.clone(),
                GraphSelectionMode::ByLoading { .. } => self.oracle.intervals.description(interval),
            };

            let ctx = BuildContext {
                segment,
                interval,
                results: request.results_kind,
                include_unrecoverable: request.include_unrecoverable,
                pois: &pois,
                xs: &xs,
                policy,
            };

            let first_id = series.len();
            let built = match source {
                GraphSource::Product(load) => {
                    self.product_series(&ctx, request, load, &base_label, first_id, pair_index)?
                }
                GraphSource::Combined(combo) => {
                    self.combined_series(&ctx, request, combo, &base_label, first_id, pair_index)?
                }
                GraphSource::LimitState(limit_state) => self.limit_state_series(
                    &ctx,
                    request,
                    limit_state,
                    false,
                    &base_label,
                    first_id,
                    pair_index,
                )?,
                GraphSource::Demand(limit_state) => self.limit_state_series(
                    &ctx,
                    request,
                    limit_state,
                    true,
                    &base_label,
                    first_id,
                    pair_index,
                )?,
                GraphSource::Allowable(limit_state) => self.allowable_series(
                    &ctx,
                    request,
                    limit_state,
                    release,
                    &base_label,
                    first_id,
                    pair_index,
                )?,
                other => {
                    debug!("no segment-graph dispatch for {:?}", other.graph_type());
                    Vec::new()
                }
            };

            for (subkey, built_series) in built {
                labeled.push((pair_index * 8 + subkey, built_series.label.clone()));
                series.push(built_series);
            }
        }

        let labels = dedup_labels(&labeled);
        for (built_series, label) in series.iter_mut().zip(labels) {
            built_series.label = label;
        }

        Ok(GraphData {
            title: self.graph_title(request),
            x_axis_title: self.x_axis_title(request),
            y_axis_title: self.y_axis_title(request),
            series,
        })
    }

    /// Flatten the selection mode into (interval, loading) pairs
    fn selection_pairs(&self, request: &GraphRequest) -> Vec<(IntervalIndex, GraphId)> {
        match &request.mode {
            GraphSelectionMode::ByInterval { interval, loadings } => loadings
                .iter()
                .map(|&loading| (*interval, loading))
                .collect(),
            GraphSelectionMode::ByLoading { loading, intervals } => intervals
                .iter()
                .map(|&interval| (interval, *loading))
                .collect(),
        }
    }

    fn assembler(&self, action: Action) -> SeriesAssembler<'_> {
        SeriesAssembler::new(self.x_converter, self.y_converter)
            .for_action(action)
            .with_policy(self.mismatch_policy)
    }

    fn entry_label(base_label: &str, entry: &PlanEntry) -> String {
        match entry.stress_location {
            Some(location) => format!("{base_label}{}", location.label()),
            None => base_label.to_string(),
        }
    }

    /// Label-dedup grouping key within one selection pair. Stress series for
    /// different fibers carry distinct labels and must not blank each other;
    /// min/max pairs share a key so the second half goes unlabeled.
    fn entry_subkey(entry: &PlanEntry) -> usize {
        match entry.stress_location {
            Some(location) => {
                1 + StressLocation::ALL
                    .iter()
                    .position(|&l| l == location)
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    fn stress_query_pair(location: StressLocation) -> (StressLocation, StressLocation) {
        if location.is_girder() {
            (StressLocation::TopGirder, StressLocation::BottomGirder)
        } else {
            (StressLocation::TopDeck, StressLocation::BottomDeck)
        }
    }

    /// Series for an individual product loading
    #[allow(clippy::too_many_arguments)]
    fn product_series(
        &self,
        ctx: &BuildContext<'_>,
        request: &GraphRequest,
        load: ProductForceType,
        base_label: &str,
        first_id: usize,
        pair_index: usize,
    ) -> GraphResult<Vec<(usize, Series)>> {
        if load == ProductForceType::UnrecoverableGirderDeadLoad {
            return self.unrecoverable_series(ctx, request, base_label, first_id, pair_index);
        }

        let method = self.oracle.criteria.analysis_method();
        let plan = resolve_series_plan(
            request.action,
            method,
            GraphType::Product,
            &request.stress_locations,
        );
        let assembler = self.assembler(request.action);

        let mut out = Vec::with_capacity(plan.len());
        for entry in &plan {
            let mut series = Series::new(
                first_id + out.len(),
                Self::entry_label(base_label, entry),
                entry.pen,
                pair_index,
            );
            match request.action {
                Action::Axial => {
                    let ys = self.oracle.product.axial(
                        ctx.interval,
                        load,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Shear => {
                    let ys = self.oracle.product.shear(
                        ctx.interval,
                        load,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_section_values(&mut series, ctx.xs, &ys)?;
                }
                Action::Moment => {
                    let ys = self.oracle.product.moment(
                        ctx.interval,
                        load,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Deflection => {
                    let include = ctx
                        .policy
                        .include_in_ordinary_results(ctx.interval, ctx.include_unrecoverable);
                    let ys = self.oracle.product.deflection(
                        ctx.interval,
                        load,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                        false,
                        include,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::XDeflection => {
                    let ys = self.oracle.product.x_deflection(
                        ctx.interval,
                        load,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Rotation => {
                    let include = ctx.rotation_include();
                    let ys = self.oracle.product.rotation(
                        ctx.interval,
                        load,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                        include,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Stress => {
                    let location = entry
                        .stress_location
                        .unwrap_or(StressLocation::BottomGirder);
                    let (top_loc, bottom_loc) = Self::stress_query_pair(location);
                    let (top, bottom) = self.oracle.product.stress(
                        ctx.interval,
                        load,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                        top_loc,
                        bottom_loc,
                    )?;
                    // route by the entry's own location, never positionally
                    let ys = if location.is_top() { top } else { bottom };
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Reaction => {
                    let (left, right) = self.oracle.product.segment_reactions(
                        ctx.segment,
                        ctx.interval,
                        load,
                        entry.tag,
                        ctx.results,
                    )?;
                    self.push_reaction_spikes(ctx, &assembler, &mut series, left, right);
                }
            }
            out.push((Self::entry_subkey(entry), series));
        }
        Ok(out)
    }

    /// Series for a load combination
    #[allow(clippy::too_many_arguments)]
    fn combined_series(
        &self,
        ctx: &BuildContext<'_>,
        request: &GraphRequest,
        combo: CombinedLoadCase,
        base_label: &str,
        first_id: usize,
        pair_index: usize,
    ) -> GraphResult<Vec<(usize, Series)>> {
        let method = self.oracle.criteria.analysis_method();
        let plan = resolve_series_plan(
            request.action,
            method,
            GraphType::Combined,
            &request.stress_locations,
        );
        let assembler = self.assembler(request.action);

        let mut out = Vec::with_capacity(plan.len());
        for entry in &plan {
            let mut series = Series::new(
                first_id + out.len(),
                Self::entry_label(base_label, entry),
                entry.pen,
                pair_index,
            );
            match request.action {
                Action::Axial => {
                    let ys = self.oracle.combined.axial(
                        ctx.interval,
                        combo,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Shear => {
                    let ys = self.oracle.combined.shear(
                        ctx.interval,
                        combo,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_section_values(&mut series, ctx.xs, &ys)?;
                }
                Action::Moment => {
                    let ys = self.oracle.combined.moment(
                        ctx.interval,
                        combo,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Deflection => {
                    let include = ctx
                        .policy
                        .include_in_ordinary_results(ctx.interval, ctx.include_unrecoverable);
                    let ys = self.oracle.combined.deflection(
                        ctx.interval,
                        combo,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                        false,
                        include,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::XDeflection => {
                    let ys = self.oracle.combined.x_deflection(
                        ctx.interval,
                        combo,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Rotation => {
                    let include = ctx.rotation_include();
                    let ys = self.oracle.combined.rotation(
                        ctx.interval,
                        combo,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                        include,
                    )?;
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Stress => {
                    let location = entry
                        .stress_location
                        .unwrap_or(StressLocation::BottomGirder);
                    let (top_loc, bottom_loc) = Self::stress_query_pair(location);
                    let (top, bottom) = self.oracle.combined.stress(
                        ctx.interval,
                        combo,
                        ctx.pois,
                        entry.tag,
                        ctx.results,
                        top_loc,
                        bottom_loc,
                    )?;
                    let ys = if location.is_top() { top } else { bottom };
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                }
                Action::Reaction => {
                    let (left, right) = self.oracle.combined.segment_reactions(
                        ctx.segment,
                        ctx.interval,
                        combo,
                        entry.tag,
                        ctx.results,
                    )?;
                    self.push_reaction_spikes(ctx, &assembler, &mut series, left, right);
                }
            }
            out.push((Self::entry_subkey(entry), series));
        }
        Ok(out)
    }

    /// Series for a factored limit state (or its demand variant). Limit
    /// state results are min/max pairs; a Primary plan entry emits both
    /// halves, an envelope entry emits its own half only.
    #[allow(clippy::too_many_arguments)]
    fn limit_state_series(
        &self,
        ctx: &BuildContext<'_>,
        request: &GraphRequest,
        limit_state: LimitState,
        include_prestress: bool,
        base_label: &str,
        first_id: usize,
        pair_index: usize,
    ) -> GraphResult<Vec<(usize, Series)>> {
        let method = self.oracle.criteria.analysis_method();
        let graph_type = if include_prestress {
            GraphType::Demand
        } else {
            GraphType::LimitState
        };
        let plan =
            resolve_series_plan(request.action, method, graph_type, &request.stress_locations);
        let assembler = self.assembler(request.action);
        let ls = self.oracle.limit_state;

        let mut out: Vec<(usize, Series)> = Vec::new();
        for entry in &plan {
            let subkey = Self::entry_subkey(entry);
            let label = Self::entry_label(base_label, entry);

            match request.action {
                Action::Axial => {
                    let result = ls.axial(ctx.interval, limit_state, ctx.pois, entry.tag)?;
                    for ys in Self::halves_for_role(entry.role, result.min, result.max) {
                        let mut series = Series::new(
                            first_id + out.len(),
                            label.clone(),
                            entry.pen,
                            pair_index,
                        );
                        assembler.push_points(&mut series, ctx.xs, &ys)?;
                        out.push((subkey, series));
                    }
                }
                Action::Moment => {
                    let result = ls.moment(ctx.interval, limit_state, ctx.pois, entry.tag)?;
                    for ys in Self::halves_for_role(entry.role, result.min, result.max) {
                        let mut series = Series::new(
                            first_id + out.len(),
                            label.clone(),
                            entry.pen,
                            pair_index,
                        );
                        assembler.push_points(&mut series, ctx.xs, &ys)?;
                        out.push((subkey, series));
                    }
                }
                Action::Shear => {
                    let result = ls.shear(ctx.interval, limit_state, ctx.pois, entry.tag)?;
                    for ys in Self::halves_for_role(entry.role, result.min, result.max) {
                        let mut series = Series::new(
                            first_id + out.len(),
                            label.clone(),
                            entry.pen,
                            pair_index,
                        );
                        assembler.push_section_values(&mut series, ctx.xs, &ys)?;
                        out.push((subkey, series));
                    }
                }
                Action::Deflection => {
                    let include = ctx
                        .policy
                        .include_in_ordinary_results(ctx.interval, ctx.include_unrecoverable);
                    let result = ls.deflection(
                        ctx.interval,
                        limit_state,
                        ctx.pois,
                        entry.tag,
                        include_prestress,
                        include,
                    )?;
                    for ys in Self::halves_for_role(entry.role, result.min, result.max) {
                        let mut series = Series::new(
                            first_id + out.len(),
                            label.clone(),
                            entry.pen,
                            pair_index,
                        );
                        assembler.push_points(&mut series, ctx.xs, &ys)?;
                        out.push((subkey, series));
                    }
                }
                Action::XDeflection => {
                    let result = ls.x_deflection(
                        ctx.interval,
                        limit_state,
                        ctx.pois,
                        entry.tag,
                        include_prestress,
                    )?;
                    for ys in Self::halves_for_role(entry.role, result.min, result.max) {
                        let mut series = Series::new(
                            first_id + out.len(),
                            label.clone(),
                            entry.pen,
                            pair_index,
                        );
                        assembler.push_points(&mut series, ctx.xs, &ys)?;
                        out.push((subkey, series));
                    }
                }
                Action::Rotation => {
                    let include = ctx.rotation_include();
                    let result = ls.rotation(
                        ctx.interval,
                        limit_state,
                        ctx.pois,
                        entry.tag,
                        include_prestress,
                        include,
                    )?;
                    for ys in Self::halves_for_role(entry.role, result.min, result.max) {
                        let mut series = Series::new(
                            first_id + out.len(),
                            label.clone(),
                            entry.pen,
                            pair_index,
                        );
                        assembler.push_points(&mut series, ctx.xs, &ys)?;
                        out.push((subkey, series));
                    }
                }
                Action::Stress => {
                    let location = entry
                        .stress_location
                        .unwrap_or(StressLocation::BottomGirder);
                    let result = ls.stress(
                        ctx.interval,
                        limit_state,
                        ctx.pois,
                        entry.tag,
                        include_prestress,
                        location,
                    )?;
                    // top fiber plots the max half, bottom fiber the min half
                    let ys = if location.is_top() {
                        result.max
                    } else {
                        result.min
                    };
                    let mut series =
                        Series::new(first_id + out.len(), label.clone(), entry.pen, pair_index);
                    assembler.push_points(&mut series, ctx.xs, &ys)?;
                    out.push((subkey, series));
                }
                Action::Reaction => {
                    debug!("limit state graphs carry no reaction series");
                }
            }
        }
        Ok(out)
    }

    fn halves_for_role<T>(role: SeriesRole, min: T, max: T) -> Vec<T> {
        match role {
            SeriesRole::MinEnvelope => vec![min],
            SeriesRole::MaxEnvelope => vec![max],
            _ => vec![min, max],
        }
    }

    /// Series for the allowable stress limit. At the prestress-release
    /// interval the stored casting-yard spec-check artifacts govern and the
    /// tension curve carries jump points; at later intervals the closed-form
    /// limits apply.
    #[allow(clippy::too_many_arguments)]
    fn allowable_series(
        &self,
        ctx: &BuildContext<'_>,
        request: &GraphRequest,
        limit_state: LimitState,
        release: IntervalIndex,
        base_label: &str,
        first_id: usize,
        pair_index: usize,
    ) -> GraphResult<Vec<(usize, Series)>> {
        if request.action != Action::Stress {
            debug!("allowable graphs only plot stress");
            return Ok(Vec::new());
        }
        let assembler = self.assembler(request.action);

        if ctx.interval == release {
            let series = cy_stress_capacity_series(
                self.oracle.artifacts,
                ctx.segment,
                ctx.interval,
                limit_state,
                ctx.pois,
                ctx.xs,
                &assembler,
                base_label,
                pair_index,
                first_id,
            )?;
            return Ok(series.into_iter().map(|s| (0, s)).collect());
        }

        let mut out: Vec<(usize, Series)> = Vec::new();
        for kind in [StressKind::Tension, StressKind::Compression] {
            if !self.oracle.stress_limits.is_limit_applicable(
                ctx.segment,
                ctx.interval,
                limit_state,
                kind,
            ) {
                continue;
            }
            let ys = match kind {
                StressKind::Tension => self.oracle.stress_limits.girder_tension_limit(
                    ctx.pois,
                    ctx.interval,
                    limit_state,
                )?,
                StressKind::Compression => self.oracle.stress_limits.girder_compression_limit(
                    ctx.pois,
                    ctx.interval,
                    limit_state,
                )?,
            };
            let mut series = Series::new(
                first_id + out.len(),
                base_label,
                PenStyle::Solid,
                pair_index,
            );
            assembler.push_points(&mut series, ctx.xs, &ys)?;
            out.push((0, series));
        }
        Ok(out)
    }

    /// Series for the unrecoverable girder dead load pseudo-loading. The
    /// value is a policy decision, not an analysis result: zero before
    /// hauling, the locked-in sag afterwards.
    fn unrecoverable_series(
        &self,
        ctx: &BuildContext<'_>,
        request: &GraphRequest,
        base_label: &str,
        first_id: usize,
        pair_index: usize,
    ) -> GraphResult<Vec<(usize, Series)>> {
        let method = self.oracle.criteria.analysis_method();
        let plan = resolve_series_plan(request.action, method, GraphType::Product, &[]);
        let assembler = self.assembler(request.action);

        let mut out = Vec::with_capacity(plan.len());
        for entry in &plan {
            let decision = match request.action {
                Action::Deflection => {
                    ctx.policy
                        .deflection(ctx.interval, ctx.results, ctx.include_unrecoverable)
                }
                Action::XDeflection => ctx.policy.x_deflection(ctx.interval, ctx.results),
                Action::Rotation => {
                    ctx.policy
                        .rotation(ctx.interval, ctx.results, ctx.include_unrecoverable)
                }
                _ => {
                    debug!("unrecoverable loading only plots deflections and rotations");
                    return Ok(Vec::new());
                }
            };

            let ys = match decision {
                UnrecoverableDecision::Zero => vec![0.0; ctx.pois.len()],
                UnrecoverableDecision::Include(sag) => match request.action {
                    Action::Deflection => self
                        .oracle
                        .product
                        .unrecoverable_deflection(sag, entry.tag, ctx.pois)?,
                    Action::XDeflection => self
                        .oracle
                        .product
                        .unrecoverable_x_deflection(sag, entry.tag, ctx.pois)?,
                    _ => self
                        .oracle
                        .product
                        .unrecoverable_rotation(sag, entry.tag, ctx.pois)?,
                },
            };

            let mut series = Series::new(first_id + out.len(), base_label, entry.pen, pair_index);
            assembler.push_points(&mut series, ctx.xs, &ys)?;
            out.push((Self::entry_subkey(entry), series));
        }
        Ok(out)
    }

    /// Reaction series render as spikes: zero along the member, then
    /// zero/reaction/zero at each support location.
    fn push_reaction_spikes(
        &self,
        ctx: &BuildContext<'_>,
        assembler: &SeriesAssembler<'_>,
        series: &mut Series,
        left_reaction: f64,
        right_reaction: f64,
    ) {
        let (left_face, right_face) = self.oracle.geometry.segment_face_xs(ctx.segment);
        let (left_support, right_support) = self
            .oracle
            .geometry
            .segment_support_xs(ctx.segment, ctx.interval);

        assembler.push_point(series, left_face, 0.0);
        for (support_x, reaction) in
            [(left_support, left_reaction), (right_support, right_reaction)]
        {
            assembler.push_point(series, support_x, 0.0);
            assembler.push_point(series, support_x, reaction);
            assembler.push_point(series, support_x, 0.0);
        }
        assembler.push_point(series, right_face, 0.0);
    }

    /// Graph title: selection context plus the results kind and action
    pub fn graph_title(&self, request: &GraphRequest) -> String {
        let suffix = format!("{} {}", request.results_kind.name(), request.action.name());
        match &request.mode {
            GraphSelectionMode::ByInterval { interval, .. } => {
                format!(
                    "Interval {}: {} - {}",
                    interval,
                    self.oracle.intervals.description(*interval),
                    suffix
                )
            }
            GraphSelectionMode::ByLoading { loading, .. } => {
                let name = self
                    .registry
                    .get(*loading)
                    .map(|d| d.name.clone())
                    .unwrap_or_default();
                format!("{name} - {suffix}")
            }
        }
    }

    /// X axis title. Before erection the segment is measured from its own
    /// left face; once erected, from the centerline of the left bearing.
    pub fn x_axis_title(&self, request: &GraphRequest) -> String {
        let erection = self.oracle.intervals.erection_interval(request.segment);
        let before_erection = match &request.mode {
            GraphSelectionMode::ByInterval { interval, .. } => *interval < erection,
            GraphSelectionMode::ByLoading { intervals, .. } => {
                intervals.iter().all(|&i| i < erection)
            }
        };
        let tag = self.x_converter.tag();
        if before_erection {
            format!("Distance From Left End of Segment ({tag})")
        } else {
            format!("Distance From CL Bearing at Left End of Segment ({tag})")
        }
    }

    /// Y axis title from the action name and the converter's unit tag
    pub fn y_axis_title(&self, request: &GraphRequest) -> String {
        format!("{} ({})", request.action.name(), self.y_converter.tag())
    }
}
