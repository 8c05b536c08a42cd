//! Static registry of slide-construction units.
//!
//! Units are registered per template identifier at startup, replacing the
//! dynamic module import a scripting runtime would use. Resolution happens
//! once at registration; introspection reads the registered specs.

use crate::basic_deck_units;
use slidesmith_interface::SlideUnit;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Maps template identifiers to their registered unit sets.
#[derive(Default, Clone)]
pub struct UnitRegistry {
    templates: BTreeMap<String, BTreeMap<String, Arc<dyn SlideUnit>>>,
}

impl UnitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in template unit sets registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for unit in basic_deck_units() {
            registry.register("basic_deck", unit);
        }
        registry
    }

    /// Register a unit under the given template identifier.
    pub fn register(&mut self, template_id: impl Into<String>, unit: Arc<dyn SlideUnit>) {
        let template_id = template_id.into();
        let name = unit.spec().name().clone();
        tracing::debug!(template = %template_id, unit = %name, "Registering slide unit");
        self.templates
            .entry(template_id)
            .or_default()
            .insert(name, unit);
    }

    /// All units registered for a template, if any.
    pub fn units_for(&self, template_id: &str) -> Option<&BTreeMap<String, Arc<dyn SlideUnit>>> {
        self.templates.get(template_id).filter(|units| !units.is_empty())
    }

    /// Look up a single unit by template and name.
    pub fn get(&self, template_id: &str, unit_name: &str) -> Option<&Arc<dyn SlideUnit>> {
        self.templates.get(template_id)?.get(unit_name)
    }
}

impl std::fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (template, units) in &self.templates {
            map.entry(template, &units.keys().collect::<Vec<_>>());
        }
        map.finish()
    }
}
