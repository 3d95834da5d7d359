//! Core vocabulary for analysis-results graphing

use serde::{Deserialize, Serialize};

/// Index of a construction interval
pub type IntervalIndex = usize;

/// Sentinel meaning "no interval filter" in loading queries
pub const ALL_INTERVALS: IntervalIndex = usize::MAX;

/// Identifier of a graph definition within a registry
pub type GraphId = usize;

/// Identifies a precast segment within the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    /// Girder group (span group) index
    pub group: usize,
    /// Girder index within the group
    pub girder: usize,
    /// Segment index within the girder
    pub segment: usize,
}

impl SegmentKey {
    /// Create a new segment key
    pub fn new(group: usize, girder: usize, segment: usize) -> Self {
        Self {
            group,
            girder,
            segment,
        }
    }

    /// The girder this segment belongs to
    pub fn girder_key(&self) -> GirderKey {
        GirderKey {
            group: self.group,
            girder: self.girder,
        }
    }
}

/// Identifies a girder within the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GirderKey {
    /// Girder group (span group) index
    pub group: usize,
    /// Girder index within the group
    pub girder: usize,
}

/// A point of interest along the member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Stable id used to look up spec-check artifacts
    pub id: usize,
    /// Position along the member, girder coordinates
    pub x: f64,
}

impl Poi {
    /// Create a point of interest
    pub fn new(id: usize, x: f64) -> Self {
        Self { id, x }
    }
}

/// Structural response quantity being plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Axial force
    Axial,
    /// Vertical shear
    Shear,
    /// Bending moment
    Moment,
    /// Vertical deflection
    Deflection,
    /// Lateral (weak axis) deflection
    XDeflection,
    /// End rotation
    Rotation,
    /// Flexural stress
    Stress,
    /// Support reaction
    Reaction,
}

impl Action {
    /// Display name used in graph titles
    pub fn name(&self) -> &'static str {
        match self {
            Action::Axial => "Axial",
            Action::Shear => "Shear",
            Action::Moment => "Moment",
            Action::Deflection => "Deflection",
            Action::XDeflection => "Deflection X",
            Action::Rotation => "Rotation",
            Action::Stress => "Stress",
            Action::Reaction => "Reaction",
        }
    }
}

/// Bitmask of actions a graph definition applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const AXIAL: ActionSet = ActionSet(1 << 0);
    pub const SHEAR: ActionSet = ActionSet(1 << 1);
    pub const MOMENT: ActionSet = ActionSet(1 << 2);
    pub const STRESS: ActionSet = ActionSet(1 << 3);
    pub const DEFLECTION: ActionSet = ActionSet(1 << 4);
    pub const X_DEFLECTION: ActionSet = ActionSet(1 << 5);
    pub const ROTATION: ActionSet = ActionSet(1 << 6);
    pub const REACTION: ActionSet = ActionSet(1 << 7);
    pub const LOAD_RATING: ActionSet = ActionSet(1 << 8);
    pub const WEB_STRESS: ActionSet = ActionSet(1 << 9);

    /// Empty set
    pub const NONE: ActionSet = ActionSet(0);

    /// Everything except load rating and web stress
    pub const ALL: ActionSet = ActionSet(
        Self::AXIAL.0
            | Self::SHEAR.0
            | Self::MOMENT.0
            | Self::STRESS.0
            | Self::DEFLECTION.0
            | Self::ROTATION.0
            | Self::REACTION.0,
    );

    /// `ALL` without the reaction action
    pub const ALL_NO_REACTION: ActionSet = ActionSet(
        Self::AXIAL.0
            | Self::SHEAR.0
            | Self::MOMENT.0
            | Self::STRESS.0
            | Self::DEFLECTION.0
            | Self::ROTATION.0,
    );

    /// Combine two sets
    pub const fn union(self, other: ActionSet) -> ActionSet {
        ActionSet(self.0 | other.0)
    }

    /// Test whether the set covers an action
    pub fn contains(&self, action: Action) -> bool {
        let bit = match action {
            Action::Axial => Self::AXIAL,
            Action::Shear => Self::SHEAR,
            Action::Moment => Self::MOMENT,
            Action::Stress => Self::STRESS,
            Action::Deflection => Self::DEFLECTION,
            Action::XDeflection => Self::X_DEFLECTION,
            Action::Rotation => Self::ROTATION,
            Action::Reaction => Self::REACTION,
        };
        self.0 & bit.0 != 0
    }
}

impl std::ops::BitOr for ActionSet {
    type Output = ActionSet;

    fn bitor(self, rhs: ActionSet) -> ActionSet {
        self.union(rhs)
    }
}

/// Incremental vs cumulative results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultsKind {
    /// Change during the interval only
    Incremental,
    /// Total through the end of the interval
    Cumulative,
}

impl ResultsKind {
    /// Display name used in graph titles
    pub fn name(&self) -> &'static str {
        match self {
            ResultsKind::Incremental => "Incremental",
            ResultsKind::Cumulative => "Cumulative",
        }
    }
}

/// Project-wide structural analysis method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMethod {
    /// Simple-span models only
    Simple,
    /// Continuous models only
    Continuous,
    /// Envelope of simple and continuous
    Envelope,
}

/// Which extreme an envelope query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Optimization {
    Minimize,
    Maximize,
}

/// Concrete analysis-model tag passed to the results oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeTag {
    SimpleSpan,
    ContinuousSpan,
    MinSimpleContinuousEnvelope,
    MaxSimpleContinuousEnvelope,
}

impl EnvelopeTag {
    /// Map the project analysis method and an optimization to the oracle tag
    pub fn for_analysis(method: AnalysisMethod, optimization: Optimization) -> Self {
        match (method, optimization) {
            (AnalysisMethod::Simple, _) => EnvelopeTag::SimpleSpan,
            (AnalysisMethod::Continuous, _) => EnvelopeTag::ContinuousSpan,
            (AnalysisMethod::Envelope, Optimization::Minimize) => {
                EnvelopeTag::MinSimpleContinuousEnvelope
            }
            (AnalysisMethod::Envelope, Optimization::Maximize) => {
                EnvelopeTag::MaxSimpleContinuousEnvelope
            }
        }
    }
}

/// Fiber of the cross-section a stress series refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressLocation {
    BottomGirder,
    TopGirder,
    BottomDeck,
    TopDeck,
}

impl StressLocation {
    /// All locations, in selection-list order
    pub const ALL: [StressLocation; 4] = [
        StressLocation::BottomGirder,
        StressLocation::TopGirder,
        StressLocation::BottomDeck,
        StressLocation::TopDeck,
    ];

    /// Top of a flange (girder or deck)
    pub fn is_top(&self) -> bool {
        matches!(self, StressLocation::TopGirder | StressLocation::TopDeck)
    }

    /// Girder fiber, as opposed to deck fiber
    pub fn is_girder(&self) -> bool {
        matches!(
            self,
            StressLocation::TopGirder | StressLocation::BottomGirder
        )
    }

    /// Series label suffix
    pub fn label(&self) -> &'static str {
        match self {
            StressLocation::BottomGirder => " - Bottom Girder",
            StressLocation::TopGirder => " - Top Girder",
            StressLocation::BottomDeck => " - Bottom Deck",
            StressLocation::TopDeck => " - Top Deck",
        }
    }
}

/// Product (individual) load cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductForceType {
    Girder,
    Pretension,
    PostTensioning,
    SecondaryEffects,
    Creep,
    Shrinkage,
    Relaxation,
    Diaphragm,
    /// Synthetic loading for deflection locked in during handling.
    /// Not a real product load; resolved by the unrecoverable policy.
    UnrecoverableGirderDeadLoad,
}

/// Load combination classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinedLoadCase {
    Dc,
    Dw,
    Cr,
    Sh,
    Re,
    Ps,
}

/// Limit states the segment graphs plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitState {
    ServiceI,
    ServiceIII,
    StrengthI,
}

/// Tension or compression side of a stress check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressKind {
    Tension,
    Compression,
}

/// Which handling stage locked in the unrecoverable sag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SagInterval {
    Hauling,
    Erection,
}

/// Two-sided section result. Shear is discontinuous at concentrated loads
/// and supports, so a section carries a left and a right value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionValue {
    pub left: f64,
    pub right: f64,
}

impl SectionValue {
    /// Create a section value
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// A continuous (single-valued) section
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            right: value,
        }
    }
}

/// Pen style for a rendered series. Stress series distinguish fiber
/// locations by pen: solid top girder, dashed bottom girder, dotted top
/// deck, dash-dot bottom deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenStyle {
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl PenStyle {
    /// Conventional pen for a stress fiber location
    pub fn for_stress_location(location: StressLocation) -> Self {
        match location {
            StressLocation::TopGirder => PenStyle::Solid,
            StressLocation::BottomGirder => PenStyle::Dash,
            StressLocation::TopDeck => PenStyle::Dot,
            StressLocation::BottomDeck => PenStyle::DashDot,
        }
    }
}

/// Kind of graph a definition produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphType {
    Product,
    Combined,
    LiveLoad,
    VehicularLiveLoad,
    LimitState,
    Demand,
    Allowable,
    Capacity,
    MinCapacity,
    LoadRating,
    DeckShrinkageStress,
}

impl GraphType {
    /// Graph types whose envelope queries collapse to a single
    /// max-envelope call
    pub fn is_capacity_like(&self) -> bool {
        matches!(
            self,
            GraphType::Allowable
                | GraphType::Capacity
                | GraphType::MinCapacity
                | GraphType::LoadRating
        )
    }
}
