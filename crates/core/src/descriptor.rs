//! Field descriptors: the declarative input to form assembly.
//!
//! A descriptor is one entry of an entity view's field list. Real inputs, tab markers and group
//! markers all arrive as descriptors; which of the three a descriptor is gets decided once, from
//! its resolved type, by [`crate::types::FieldKind::classify`].

use crate::constants::DESIGN_ELEMENT_PREFIX;
use indexmap::IndexMap;
use serde_json::Value;

/// Per-field options handed to the renderer (`mapped`, `required`, `label`, ...).
pub type FieldOptions = IndexMap<String, Value>;

/// Descriptive metadata that travels with a field but is not a rendering option.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldMetadata {
    /// Name of the field as declared in the view's field list.
    pub field_name: String,

    /// Property path on the bound data object.
    pub property: String,

    pub label: Option<String>,
    pub help: Option<String>,
    pub icon: Option<String>,
    pub css_class: Option<String>,

    /// Free-form flags that configurators may inspect.
    pub flags: IndexMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: String,
    pub options: FieldOptions,
    pub metadata: FieldMetadata,
}

impl FieldDescriptor {
    /// Create a descriptor whose property path and field name both default to `name`.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            metadata: FieldMetadata {
                field_name: name.clone(),
                property: name.clone(),
                ..FieldMetadata::default()
            },
            name,
            field_type: field_type.into(),
            options: FieldOptions::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.metadata.property = property.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.metadata.label = Some(label.into());
        self
    }

    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.flags.insert(key.into(), value.into());
        self
    }

    /// True for cosmetic-only fields that must never bind to the data object.
    pub fn is_design_element(&self) -> bool {
        self.metadata.property.starts_with(DESIGN_ELEMENT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_descriptor_uses_name_as_property_and_field_name() {
        let descriptor = FieldDescriptor::new("title", "text");
        assert_eq!(descriptor.metadata.field_name, "title");
        assert_eq!(descriptor.metadata.property, "title");
        assert!(descriptor.options.is_empty());
        assert!(!descriptor.is_design_element());
    }

    #[test]
    fn design_element_is_detected_from_property_prefix() {
        let descriptor = FieldDescriptor::new("divider_3", "divider")
            .with_property(format!("{DESIGN_ELEMENT_PREFIX}3"));
        assert!(descriptor.is_design_element());

        let not_prefix = FieldDescriptor::new("x", "text").with_property("design_element_x");
        assert!(!not_prefix.is_design_element());
    }

    #[test]
    fn builder_methods_populate_options_and_metadata() {
        let descriptor = FieldDescriptor::new("price", "number")
            .with_option("scale", 2)
            .with_label("Price")
            .with_flag("sortable", true);

        assert_eq!(descriptor.options.get("scale"), Some(&Value::from(2)));
        assert_eq!(descriptor.metadata.label.as_deref(), Some("Price"));
        assert_eq!(descriptor.metadata.flags.get("sortable"), Some(&Value::Bool(true)));
    }
}
