//! Named lookup of form assemblers.
//!
//! Deprecated identifiers are plain aliases: they resolve to the very same assembler instance
//! as the identifier they stand for.

use crate::assembler::FormAssembler;
use crate::constants::{BLOCK_PREFIX, LEGACY_BLOCK_PREFIX};
use crate::{FormError, FormResult};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct FormTypeRegistry {
    types: HashMap<String, Arc<FormAssembler>>,
}

impl FormTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the default assembler under its current and deprecated identifiers.
    pub fn with_defaults() -> Self {
        let assembler = Arc::new(FormAssembler::with_default_configurators());
        let mut registry = Self::new();
        registry.register(BLOCK_PREFIX, Arc::clone(&assembler));
        registry.register(LEGACY_BLOCK_PREFIX, assembler);
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, assembler: Arc<FormAssembler>) {
        self.types.insert(id.into(), assembler);
    }

    /// Make `legacy_id` resolve to whatever `current_id` resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownFormType`] if `current_id` is not registered.
    pub fn alias(&mut self, legacy_id: impl Into<String>, current_id: &str) -> FormResult<()> {
        let assembler = self.get(current_id)?;
        self.types.insert(legacy_id.into(), assembler);
        Ok(())
    }

    pub fn get(&self, id: &str) -> FormResult<Arc<FormAssembler>> {
        self.types
            .get(id)
            .cloned()
            .ok_or_else(|| FormError::UnknownFormType(id.to_owned()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_and_legacy_ids_share_one_assembler() {
        let registry = FormTypeRegistry::with_defaults();
        let current = registry.get(BLOCK_PREFIX).expect("current id");
        let legacy = registry.get(LEGACY_BLOCK_PREFIX).expect("legacy id");

        assert!(Arc::ptr_eq(&current, &legacy));
        assert_eq!(current.configurators().len(), 2);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let registry = FormTypeRegistry::with_defaults();
        let err = registry.get("nope").expect_err("should be unknown");
        assert!(matches!(err, FormError::UnknownFormType(id) if id == "nope"));
    }

    #[test]
    fn alias_requires_a_registered_target() {
        let mut registry = FormTypeRegistry::new();
        let err = registry
            .alias("old", "missing")
            .expect_err("target is not registered");
        assert!(matches!(err, FormError::UnknownFormType(_)));
        assert!(!registry.contains("old"));
    }

    #[test]
    fn custom_assemblers_can_be_registered() {
        let mut registry = FormTypeRegistry::new();
        registry.register("bare", Arc::new(FormAssembler::default()));
        registry.alias("bare_v1", "bare").expect("alias");

        assert!(registry.get("bare").expect("bare").configurators().is_empty());
        assert!(registry.contains("bare_v1"));
    }
}
