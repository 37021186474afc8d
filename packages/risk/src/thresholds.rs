//! Ordered, first-match-wins threshold classification.
//!
//! The point evaluator and both route strategies classify a measurement
//! by walking a table of tiers from most to least severe. The tables live
//! next to their evaluators; this module only provides the walk.

/// One row of a threshold table: the level assigned when `when` matches.
pub struct Tier<L, M> {
    /// Level assigned when this tier matches.
    pub level: L,
    /// Predicate over the measurement.
    pub when: fn(&M) -> bool,
}

/// A threshold table plus the level used when no tier matches.
pub struct OrderedThresholds<L: 'static, M: 'static> {
    tiers: &'static [Tier<L, M>],
    otherwise: L,
}

impl<L: Copy, M> OrderedThresholds<L, M> {
    /// Creates a classifier. Tiers are tried in slice order.
    #[must_use]
    pub const fn new(tiers: &'static [Tier<L, M>], otherwise: L) -> Self {
        Self { tiers, otherwise }
    }

    /// Returns the level of the first matching tier, or the fallback.
    #[must_use]
    pub fn classify(&self, measurement: &M) -> L {
        self.tiers
            .iter()
            .find(|tier| (tier.when)(measurement))
            .map_or(self.otherwise, |tier| tier.level)
    }
}

/// Incident counts around a point or along a route.
///
/// High-severity incidents are counted in both fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncidentTally {
    /// All incidents in range.
    pub nearby: usize,
    /// High-severity incidents in range.
    pub high: usize,
}
