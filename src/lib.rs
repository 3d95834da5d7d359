//! Girder Graphs - analysis-results graph selection for precast girder segments
//!
//! This library decides which analysis queries to issue and how to assemble
//! the results into plot-ready series for a prestressed girder segment:
//! - Loading catalog: which loadings exist per segment, interval and action
//! - Action/envelope resolver: one query or a min/max pair, with the
//!   asymmetric top/bottom stress envelope rule
//! - Series assembly with unit conversion, zero snapping and explicit
//!   length-mismatch policy
//! - Casting-yard allowable tension curves with jump points where the
//!   with-rebar allowable takes over
//! - The unrecoverable girder dead load pseudo-loading policy
//!
//! The library computes no structural results itself; everything is pulled
//! through the oracle traits implemented by the analysis layer.
//!
//! ## Example
//! ```rust,no_run
//! use girder_graphs::prelude::*;
//! # fn oracle<'a>() -> Oracle<'a> { unimplemented!() }
//!
//! let x_units = ScaleConverter::new(1.0, "m");
//! let y_units = ScaleConverter::new(1e-3, "kN-m");
//! let mut builder = AnalysisResultsGraphBuilder::new(oracle(), &x_units, &y_units);
//!
//! let segment = SegmentKey::new(0, 0, 0);
//! builder.update_registry(segment);
//! let loadings: Vec<_> = builder
//!     .registry()
//!     .loadings_for(2, Action::Moment)
//!     .into_iter()
//!     .map(|(_, id)| id)
//!     .collect();
//!
//! let graph = builder.build(&GraphRequest {
//!     segment,
//!     mode: GraphSelectionMode::ByInterval { interval: 2, loadings },
//!     action: Action::Moment,
//!     results_kind: ResultsKind::Cumulative,
//!     stress_locations: vec![],
//!     include_unrecoverable: false,
//! }).unwrap();
//! println!("{} series", graph.series.len());
//! ```

pub mod assembler;
pub mod builder;
pub mod capacity;
pub mod catalog;
pub mod definitions;
pub mod error;
pub mod oracle;
pub mod resolver;
pub mod types;
pub mod unrecoverable;

// Re-export common types
pub mod prelude {
    pub use crate::assembler::{
        dedup_labels, IdentityConverter, MismatchPolicy, ScaleConverter, Series, SeriesAssembler,
        UnitConverter,
    };
    pub use crate::builder::{
        AnalysisResultsGraphBuilder, GraphData, GraphRequest, GraphSelectionMode,
    };
    pub use crate::capacity::{cy_stress_capacity_series, tension_jump_points};
    pub use crate::catalog::LoadingCatalog;
    pub use crate::definitions::{GraphDefinition, GraphDefinitionRegistry, GraphSource};
    pub use crate::error::{GraphError, GraphResult, OracleError};
    pub use crate::oracle::{
        BridgeGeometry, CombinedForces, FlexuralStressArtifact, Intervals, LimitStateForces,
        MinMax, Oracle, OracleResult, ProductForces, ProjectCriteria, SegmentArtifacts,
        StressLimits,
    };
    pub use crate::resolver::{resolve_series_plan, PlanEntry, SeriesRole};
    pub use crate::types::{
        Action, ActionSet, AnalysisMethod, CombinedLoadCase, EnvelopeTag, GirderKey, GraphId,
        GraphType, IntervalIndex, LimitState, Optimization, PenStyle, Poi, ProductForceType,
        ResultsKind, SagInterval, SectionValue, SegmentKey, StressKind, StressLocation,
        ALL_INTERVALS,
    };
    pub use crate::unrecoverable::{UnrecoverableDecision, UnrecoverablePolicy};
}
