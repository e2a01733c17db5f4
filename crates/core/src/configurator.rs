//! Configurators: pluggable units that rewrite a field's options before it is assembled.
//!
//! Configurators are not mutually exclusive. Every configurator in a [`ConfiguratorChain`] that
//! supports a field gets to rewrite its options, in registration order, each one seeing the
//! output of the previous one.

use crate::constants::CHECKBOX_TYPE;
use crate::descriptor::{FieldMetadata, FieldOptions};
use crate::FormResult;
use serde_json::Value;

/// What a configurator may know about the form being built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuilderContext<'a> {
    pub entity: &'a str,
    pub view: &'a str,
    pub data_class: &'a str,
}

pub trait Configurator: Send + Sync {
    /// Whether this configurator wants to touch a field declared as `field_type`.
    fn supports(&self, field_type: &str, options: &FieldOptions, metadata: &FieldMetadata) -> bool;

    /// Rewrite the options of field `name`.
    ///
    /// # Errors
    ///
    /// A configurator may reject metadata it cannot handle; the error aborts the form build.
    fn configure(
        &self,
        name: &str,
        options: FieldOptions,
        metadata: &FieldMetadata,
        context: &BuilderContext<'_>,
    ) -> FormResult<FieldOptions>;
}

/// Ordered list of configurators.
#[derive(Default)]
pub struct ConfiguratorChain {
    configurators: Vec<Box<dyn Configurator>>,
}

impl ConfiguratorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, configurator: impl Configurator + 'static) -> Self {
        self.push(configurator);
        self
    }

    pub fn push(&mut self, configurator: impl Configurator + 'static) {
        self.configurators.push(Box::new(configurator));
    }

    pub fn len(&self) -> usize {
        self.configurators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurators.is_empty()
    }

    /// Run `options` through every configurator that supports the field.
    pub fn apply(
        &self,
        name: &str,
        field_type: &str,
        mut options: FieldOptions,
        metadata: &FieldMetadata,
        context: &BuilderContext<'_>,
    ) -> FormResult<FieldOptions> {
        for configurator in &self.configurators {
            if configurator.supports(field_type, &options, metadata) {
                options = configurator.configure(name, options, metadata, context)?;
            }
        }
        Ok(options)
    }
}

impl std::fmt::Debug for ConfiguratorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguratorChain")
            .field("len", &self.configurators.len())
            .finish()
    }
}

/// Copies `label` and `help` from the field metadata into options the caller left unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertyConfigurator;

impl Configurator for PropertyConfigurator {
    fn supports(&self, _field_type: &str, _options: &FieldOptions, _metadata: &FieldMetadata) -> bool {
        true
    }

    fn configure(
        &self,
        _name: &str,
        mut options: FieldOptions,
        metadata: &FieldMetadata,
        _context: &BuilderContext<'_>,
    ) -> FormResult<FieldOptions> {
        for (key, value) in [("label", &metadata.label), ("help", &metadata.help)] {
            if let Some(value) = value {
                options
                    .entry(key.to_owned())
                    .or_insert_with(|| Value::String(value.clone()));
            }
        }
        Ok(options)
    }
}

/// Checkboxes are optional unless the caller says otherwise: an unchecked box must not block
/// submission.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckboxConfigurator;

impl Configurator for CheckboxConfigurator {
    fn supports(&self, field_type: &str, _options: &FieldOptions, _metadata: &FieldMetadata) -> bool {
        field_type == "checkbox" || field_type == CHECKBOX_TYPE
    }

    fn configure(
        &self,
        _name: &str,
        mut options: FieldOptions,
        _metadata: &FieldMetadata,
        _context: &BuilderContext<'_>,
    ) -> FormResult<FieldOptions> {
        options
            .entry("required".to_owned())
            .or_insert(Value::Bool(false));
        Ok(options)
    }
}
