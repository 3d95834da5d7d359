//! Graph definitions and their registry.
//!
//! A graph definition describes one selectable series source: a loading (or
//! limit state, or capacity curve), the intervals it exists in, and the
//! actions it can be plotted for. The registry is rebuilt in bulk whenever
//! the selected segment changes; definitions are never mutated in place.

use serde::{Deserialize, Serialize};

use crate::types::{
    Action, ActionSet, CombinedLoadCase, GraphId, GraphType, IntervalIndex, LimitState,
    ProductForceType, ALL_INTERVALS,
};

/// What a graph definition plots. The variant both names the graph type and
/// carries the matching load selector, so a definition can never pair a
/// Combined graph with a limit-state selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphSource {
    /// An individual product loading
    Product(ProductForceType),
    /// A load combination
    Combined(CombinedLoadCase),
    /// Enveloped design live load
    LiveLoad(LimitState),
    /// A single live load vehicle
    VehicularLiveLoad(LimitState, usize),
    /// Factored limit state results
    LimitState(LimitState),
    /// Limit state demand (with prestress)
    Demand(LimitState),
    /// Allowable stress limit
    Allowable(LimitState),
    /// Moment/shear capacity
    Capacity(LimitState),
    /// Minimum required capacity
    MinCapacity(LimitState),
    /// Load rating factors
    LoadRating(LimitState),
    /// Stress due to deck shrinkage
    DeckShrinkageStress,
}

impl GraphSource {
    /// The graph type tag for this source
    pub fn graph_type(&self) -> GraphType {
        match self {
            GraphSource::Product(_) => GraphType::Product,
            GraphSource::Combined(_) => GraphType::Combined,
            GraphSource::LiveLoad(_) => GraphType::LiveLoad,
            GraphSource::VehicularLiveLoad(..) => GraphType::VehicularLiveLoad,
            GraphSource::LimitState(_) => GraphType::LimitState,
            GraphSource::Demand(_) => GraphType::Demand,
            GraphSource::Allowable(_) => GraphType::Allowable,
            GraphSource::Capacity(_) => GraphType::Capacity,
            GraphSource::MinCapacity(_) => GraphType::MinCapacity,
            GraphSource::LoadRating(_) => GraphType::LoadRating,
            GraphSource::DeckShrinkageStress => GraphType::DeckShrinkageStress,
        }
    }

    /// The limit state this source carries, if any
    pub fn limit_state(&self) -> Option<LimitState> {
        match self {
            GraphSource::LiveLoad(ls)
            | GraphSource::VehicularLiveLoad(ls, _)
            | GraphSource::LimitState(ls)
            | GraphSource::Demand(ls)
            | GraphSource::Allowable(ls)
            | GraphSource::Capacity(ls)
            | GraphSource::MinCapacity(ls)
            | GraphSource::LoadRating(ls) => Some(*ls),
            GraphSource::Product(_) | GraphSource::Combined(_) | GraphSource::DeckShrinkageStress => {
                None
            }
        }
    }
}

/// One selectable plot series source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDefinition {
    /// Identifier, unique within a registry instance
    pub id: GraphId,
    /// Display label
    pub name: String,
    /// Graph type and load selector
    pub source: GraphSource,
    /// Intervals for which the definition is valid (membership test only)
    pub intervals: Vec<IntervalIndex>,
    /// Actions the definition can be plotted for
    pub actions: ActionSet,
}

impl GraphDefinition {
    /// Create a definition
    pub fn new(
        id: GraphId,
        name: impl Into<String>,
        source: GraphSource,
        intervals: Vec<IntervalIndex>,
        actions: ActionSet,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            source,
            intervals,
            actions,
        }
    }

    /// Whether this definition can be plotted for (interval, action).
    /// `ALL_INTERVALS` skips the interval membership test.
    pub fn is_applicable_to(&self, interval: IntervalIndex, action: Action) -> bool {
        if !self.actions.contains(action) {
            return false;
        }
        interval == ALL_INTERVALS || self.intervals.contains(&interval)
    }
}

/// Ordered mapping from id to definition. Ids are assigned sequentially from
/// zero in insertion order, so iteration order is id order for a freshly
/// rebuilt registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDefinitionRegistry {
    definitions: Vec<GraphDefinition>,
}

impl GraphDefinitionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition
    pub fn add(&mut self, definition: GraphDefinition) {
        self.definitions.push(definition);
    }

    /// Remove every definition
    pub fn clear(&mut self) {
        self.definitions.clear();
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Look up a definition by id
    pub fn get(&self, id: GraphId) -> Option<&GraphDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Position of a definition within iteration order. Maps stable ids to
    /// array indices for selection state.
    pub fn index_of(&self, id: GraphId) -> Option<usize> {
        self.definitions.iter().position(|d| d.id == id)
    }

    /// Iterate definitions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GraphDefinition> {
        self.definitions.iter()
    }

    /// All (name, id) pairs plottable for (interval, action), in registry
    /// order. The registry is small (tens of entries) so a linear scan is
    /// fine.
    pub fn loadings_for(&self, interval: IntervalIndex, action: Action) -> Vec<(String, GraphId)> {
        self.definitions
            .iter()
            .filter(|d| d.is_applicable_to(interval, action))
            .map(|d| (d.name.clone(), d.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> GraphDefinitionRegistry {
        let mut registry = GraphDefinitionRegistry::new();
        registry.add(GraphDefinition::new(
            0,
            "Girder",
            GraphSource::Product(ProductForceType::Girder),
            vec![2, 3, 4],
            ActionSet::ALL | ActionSet::X_DEFLECTION,
        ));
        registry.add(GraphDefinition::new(
            1,
            "DC",
            GraphSource::Combined(CombinedLoadCase::Dc),
            vec![3, 4],
            ActionSet::ALL,
        ));
        registry.add(GraphDefinition::new(
            2,
            "Service I (Design)",
            GraphSource::LimitState(LimitState::ServiceI),
            vec![2, 3, 4],
            ActionSet::ALL_NO_REACTION,
        ));
        registry
    }

    #[test]
    fn test_loadings_for_filters_on_interval_and_action() {
        let registry = sample_registry();

        let loadings = registry.loadings_for(2, Action::Moment);
        let ids: Vec<_> = loadings.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![0, 2]); // DC doesn't exist at interval 2

        let loadings = registry.loadings_for(3, Action::Reaction);
        let ids: Vec<_> = loadings.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![0, 1]); // no reactions for limit states
    }

    #[test]
    fn test_loadings_for_all_intervals_sentinel() {
        let registry = sample_registry();
        let loadings = registry.loadings_for(ALL_INTERVALS, Action::Moment);
        assert_eq!(loadings.len(), 3);
    }

    #[test]
    fn test_loadings_consistent_with_applicability() {
        let registry = sample_registry();
        let actions = [
            Action::Axial,
            Action::Shear,
            Action::Moment,
            Action::Deflection,
            Action::XDeflection,
            Action::Rotation,
            Action::Stress,
            Action::Reaction,
        ];
        for interval in [0usize, 2, 3, 4, ALL_INTERVALS] {
            for action in actions {
                let ids: Vec<_> = registry
                    .loadings_for(interval, action)
                    .into_iter()
                    .map(|(_, id)| id)
                    .collect();
                for def in registry.iter() {
                    assert_eq!(
                        ids.contains(&def.id),
                        def.is_applicable_to(interval, action)
                    );
                }
            }
        }
    }

    #[test]
    fn test_index_of_round_trip() {
        let registry = sample_registry();
        for (idx, def) in registry.iter().enumerate() {
            assert_eq!(registry.index_of(def.id), Some(idx));
            assert_eq!(registry.get(def.id).unwrap().id, def.id);
        }
        assert_eq!(registry.index_of(99), None);
    }

    #[test]
    fn test_source_graph_type_pairing() {
        assert_eq!(
            GraphSource::Combined(CombinedLoadCase::Dc).graph_type(),
            GraphType::Combined
        );
        assert_eq!(
            GraphSource::Allowable(LimitState::ServiceI).graph_type(),
            GraphType::Allowable
        );
        assert_eq!(
            GraphSource::Allowable(LimitState::ServiceI).limit_state(),
            Some(LimitState::ServiceI)
        );
        assert_eq!(
            GraphSource::Product(ProductForceType::Girder).limit_state(),
            None
        );
    }
}
