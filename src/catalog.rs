//! Loading catalog: enumerates which (loading, interval, action)
//! combinations are legal to plot for a segment.
//!
//! The catalog is rebuilt from scratch on every selection change. Which
//! definitions exist depends on bridge topology and project criteria:
//! post-tensioning loadings only exist for spliced girders, time-dependent
//! loadings only under time-step losses, and the unrecoverable dead load
//! pseudo-loading only from hauling through the last erection.

use log::debug;

use crate::definitions::{GraphDefinition, GraphDefinitionRegistry, GraphSource};
use crate::oracle::{Intervals, ProjectCriteria};
use crate::types::{
    ActionSet, CombinedLoadCase, GraphId, IntervalIndex, LimitState, ProductForceType, SegmentKey,
};

/// Builds graph definition registries from project criteria
pub struct LoadingCatalog<'a> {
    intervals: &'a dyn Intervals,
    criteria: &'a dyn ProjectCriteria,
}

impl<'a> LoadingCatalog<'a> {
    /// Create a catalog over the injected oracle references
    pub fn new(intervals: &'a dyn Intervals, criteria: &'a dyn ProjectCriteria) -> Self {
        Self {
            intervals,
            criteria,
        }
    }

    /// Whether the lateral deflection action should be offered at all.
    /// Lateral response only exists for asymmetric or tilted configurations.
    pub fn supports_x_deflection(&self) -> bool {
        self.criteria.has_asymmetric_girders()
            || self.criteria.has_asymmetric_prestress()
            || self.criteria.has_tilted_girders()
    }

    /// Rebuild the registry for a segment. The previous contents are
    /// discarded; ids restart at zero.
    pub fn rebuild(&self, segment: SegmentKey) -> GraphDefinitionRegistry {
        let mut registry = GraphDefinitionRegistry::new();
        let mut next_id: GraphId = 0;
        let mut id = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let girder = segment.girder_key();
        let release = self.intervals.release_interval(segment);
        let haul = self.intervals.haul_interval(segment);
        let last_erection = self.intervals.last_erection_interval(girder);

        // segment exists from prestress release through the last erection
        let all_intervals: Vec<IntervalIndex> = (release..=last_erection).collect();

        // unrecoverable deflections only exist once the girder is hauled
        let unrecoverable_intervals: Vec<IntervalIndex> = (haul..=last_erection).collect();

        let spec_check_intervals = self.criteria.stress_check_intervals(girder);

        let everything = ActionSet::ALL | ActionSet::X_DEFLECTION;

        // product load cases
        registry.add(GraphDefinition::new(
            id(),
            self.criteria.product_load_name(ProductForceType::Girder),
            GraphSource::Product(ProductForceType::Girder),
            all_intervals.clone(),
            everything,
        ));
        registry.add(GraphDefinition::new(
            id(),
            self.criteria.product_load_name(ProductForceType::Pretension),
            GraphSource::Product(ProductForceType::Pretension),
            all_intervals.clone(),
            everything,
        ));

        if self.criteria.is_spliced_girder() {
            registry.add(GraphDefinition::new(
                id(),
                self.criteria
                    .product_load_name(ProductForceType::PostTensioning),
                GraphSource::Product(ProductForceType::PostTensioning),
                all_intervals.clone(),
                everything,
            ));
            registry.add(GraphDefinition::new(
                id(),
                self.criteria
                    .product_load_name(ProductForceType::SecondaryEffects),
                GraphSource::Product(ProductForceType::SecondaryEffects),
                all_intervals.clone(),
                everything,
            ));
        }

        if self.criteria.is_time_step_losses() {
            for load in [
                ProductForceType::Creep,
                ProductForceType::Shrinkage,
                ProductForceType::Relaxation,
            ] {
                registry.add(GraphDefinition::new(
                    id(),
                    self.criteria.product_load_name(load),
                    GraphSource::Product(load),
                    all_intervals.clone(),
                    everything,
                ));
            }
        }

        // locked-in deflection and rotation from self weight once the
        // girder is hauled
        registry.add(GraphDefinition::new(
            id(),
            "Unrecoverable Girder Dead Load",
            GraphSource::Product(ProductForceType::UnrecoverableGirderDeadLoad),
            unrecoverable_intervals,
            ActionSet::DEFLECTION | ActionSet::X_DEFLECTION | ActionSet::ROTATION,
        ));

        // load combinations
        registry.add(GraphDefinition::new(
            id(),
            self.criteria.combination_name(CombinedLoadCase::Dc),
            GraphSource::Combined(CombinedLoadCase::Dc),
            all_intervals.clone(),
            everything,
        ));

        if self.criteria.is_time_step_losses() {
            for combo in [
                CombinedLoadCase::Cr,
                CombinedLoadCase::Sh,
                CombinedLoadCase::Re,
                CombinedLoadCase::Ps,
            ] {
                registry.add(GraphDefinition::new(
                    id(),
                    self.criteria.combination_name(combo),
                    GraphSource::Combined(combo),
                    all_intervals.clone(),
                    everything,
                ));
            }
        }

        // limit states, demand and allowable
        registry.add(GraphDefinition::new(
            id(),
            "Service I (Design)",
            GraphSource::LimitState(LimitState::ServiceI),
            all_intervals.clone(),
            ActionSet::ALL_NO_REACTION | ActionSet::X_DEFLECTION,
        ));
        registry.add(GraphDefinition::new(
            id(),
            "Service I Demand (Design)",
            GraphSource::Demand(LimitState::ServiceI),
            all_intervals,
            ActionSet::STRESS | ActionSet::DEFLECTION | ActionSet::X_DEFLECTION,
        ));
        registry.add(GraphDefinition::new(
            id(),
            "Service I Limit (Design)",
            GraphSource::Allowable(LimitState::ServiceI),
            spec_check_intervals,
            ActionSet::STRESS,
        ));

        debug!(
            "catalog rebuilt for segment {:?}: {} definitions, intervals {}..={}",
            segment,
            registry.len(),
            release,
            last_erection
        );

        registry
    }
}
