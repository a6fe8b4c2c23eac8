//! Strategy registry for lookup by name.
//!
//! The simulator and CLI refer to strategies by their stable names. Adding a
//! strategy means implementing [`Strategy`] and registering it here (or in a
//! caller-owned registry).

use rustc_hash::FxHashMap;

use super::heuristics;
use super::traits::{FnStrategy, Strategy};
use crate::core::GameError;

static BUILTIN: &[FnStrategy] = &[
    FnStrategy::new("closest", heuristics::closest),
    FnStrategy::new("closest-forward", heuristics::closest_forward),
    FnStrategy::new("playability", heuristics::playability),
    FnStrategy::new("ascending-first", heuristics::ascending_first),
    FnStrategy::new("playability-closest", heuristics::playability_closest),
    FnStrategy::new("wide-gaps", heuristics::wide_gaps),
    FnStrategy::new("weighted", heuristics::weighted),
    FnStrategy::new("panic", heuristics::panic),
    FnStrategy::new("blocking", heuristics::blocking),
    FnStrategy::new("cooperative", heuristics::cooperative),
];

/// Named strategies in registration order.
///
/// ## Example
///
/// ```
/// use thegame_sim::strategy::StrategyRegistry;
///
/// let registry = StrategyRegistry::builtin();
/// assert!(registry.get("closest").is_some());
/// assert_eq!(registry.names().next(), Some("closest"));
/// ```
#[derive(Default)]
pub struct StrategyRegistry {
    entries: Vec<Box<dyn Strategy>>,
    index: FxHashMap<String, usize>,
}

impl StrategyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in heuristic.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for strategy in BUILTIN {
            registry.register(Box::new(*strategy));
        }
        registry
    }

    /// Register a strategy.
    ///
    /// Panics if a strategy with the same name already exists.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        let name = strategy.name().to_string();
        if self.index.contains_key(&name) {
            panic!("Strategy {name:?} already registered");
        }
        self.index.insert(name, self.entries.len());
        self.entries.push(strategy);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Strategy> {
        self.index.get(name).map(|&i| self.entries[i].as_ref() as &dyn Strategy)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Strategy> {
        self.entries.iter().map(|s| s.as_ref() as &dyn Strategy)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name())
    }

    /// Resolve `names` in order. An empty list selects every strategy.
    pub fn select(&self, names: &[String]) -> Result<Vec<&dyn Strategy>, GameError> {
        if names.is_empty() {
            return Ok(self.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| GameError::UnknownStrategy(name.clone()))
            })
            .collect()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
