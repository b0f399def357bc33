//! Named ratio templates

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::core::{OptionError, OptionResult};

/// Built-in templates
pub const DEFAULT_TEMPLATES: [(&str, [i32; 2]); 3] = [
    ("spread", [1, -1]),
    ("strangle", [1, 1]),
    ("synthetic", [1, -1]),
];

/// Registry of named leg-ratio templates.
///
/// Entries are only ever added. Lookups take a shared lock, so one registry
/// can be read from many threads.
#[derive(Debug)]
pub struct RatioRegistry {
    templates: RwLock<BTreeMap<String, Vec<i32>>>,
}

impl RatioRegistry {
    /// Empty registry
    pub fn empty() -> Self {
        Self {
            templates: RwLock::new(BTreeMap::new()),
        }
    }

    /// Registry holding `spread`, `strangle` and `synthetic`
    pub fn with_defaults() -> Self {
        let templates = DEFAULT_TEMPLATES
            .iter()
            .map(|(name, ratios)| (name.to_string(), ratios.to_vec()))
            .collect();
        Self {
            templates: RwLock::new(templates),
        }
    }

    /// Register a template.
    ///
    /// Registering the same ratios under an existing name is a no-op;
    /// different ratios under an existing name are refused.
    pub fn register(&self, name: impl Into<String>, ratios: Vec<i32>) -> OptionResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OptionError::invalid_input("template name must not be empty"));
        }
        if ratios.len() < 2 {
            return Err(OptionError::invalid_input(format!(
                "template {name} needs at least two leg ratios, got {ratios:?}"
            )));
        }
        if ratios.iter().all(|&r| r == 0) {
            return Err(OptionError::invalid_input(format!(
                "template {name} has only zero ratios"
            )));
        }

        let mut templates = self.templates.write();
        if let Some(existing) = templates.get(&name) {
            if *existing == ratios {
                return Ok(());
            }
            return Err(OptionError::TemplateConflict {
                name,
                existing: existing.clone(),
                requested: ratios,
            });
        }

        tracing::info!("Registered strategy template {} = {:?}", name, ratios);
        templates.insert(name, ratios);
        Ok(())
    }

    /// Register a two-leg ratio template as `ratio_{first}:{second}`
    pub fn register_ratio(&self, first: i32, second: i32) -> OptionResult<String> {
        let name = format!("ratio_{first}:{second}");
        self.register(name.clone(), vec![first, second])?;
        Ok(name)
    }

    /// Ratios of a template
    pub fn get(&self, name: &str) -> OptionResult<Vec<i32>> {
        self.templates
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| OptionError::unknown_template(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.read().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.templates.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}

impl Default for RatioRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
