//! Compiled template registry
//!
//! Maps exact template text to its compiled [`Template`]. Entries are never
//! evicted: templates come from literal call sites, so the key set is small
//! and bounded.

use crate::template::Template;
use pocketlog_core_types::schema::EVENT_END;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Concurrency-safe get-or-create store of compiled templates
///
/// Construct one at startup and share it via `Arc`. Independent registries do
/// not share entries, which keeps tests isolated.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled template for `raw`, parsing it on first use.
    ///
    /// Racing first callers may each parse, but only the first insert wins
    /// and every caller receives that same instance.
    pub fn get_or_create(&self, raw: &str) -> Arc<Template> {
        if let Some(found) = self.lookup(raw) {
            return found;
        }

        let parsed = Arc::new(Template::parse(raw));

        let mut templates = match self.templates.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let entry = templates
            .entry(raw.to_string())
            .or_insert_with(|| {
                tracing::trace!(
                    component = module_path!(),
                    op = "compile_template",
                    event = EVENT_END,
                    token_count = parsed.tokens().len(),
                );
                Arc::clone(&parsed)
            });
        Arc::clone(entry)
    }

    /// Return the compiled template for `raw` if it has been compiled
    pub fn lookup(&self, raw: &str) -> Option<Arc<Template>> {
        let templates = match self.templates.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        templates.get(raw).cloned()
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.lookup(raw).is_some()
    }

    pub fn len(&self) -> usize {
        match self.templates.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
