//! Entity configuration.
//!
//! Entity configuration is authored as YAML and loaded once into a [`ConfigManager`], which is
//! then shared (read-only) by every form build. Each entity names its data class and, per view
//! (`new`, `edit`, ...), an ordered list of fields:
//!
//! ```yaml
//! entities:
//!   Product:
//!     class: App\Entity\Product
//!     views:
//!       edit:
//!         fields:
//!           general: { type: tab, label: General }
//!           name: { type: text, type_options: { required: true } }
//! ```
//!
//! Loading is strict: unknown keys and repeated field names are rejected, and schema mismatches
//! report the path of the offending value.

use crate::constants::{DEFAULT_FIELD_TYPE, DESIGN_ELEMENT_PREFIX, DESIGN_ELEMENT_TYPES};
use crate::descriptor::{FieldDescriptor, FieldMetadata, FieldOptions};
use crate::{FormError, FormResult};
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Configuration of one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityConfig {
    name: String,
    class: String,
    views: IndexMap<String, Vec<FieldDescriptor>>,
}

impl EntityConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data class the entity's forms bind to.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Names of the views this entity declares, in declaration order.
    pub fn views(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// Normalised field descriptors of `view`.
    ///
    /// A view the entity does not declare has no fields.
    pub fn view_fields(&self, view: &str) -> &[FieldDescriptor] {
        self.views.get(view).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Read-only lookup of entity configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigManager {
    entities: IndexMap<String, EntityConfig>,
}

impl ConfigManager {
    /// Parse entity configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidConfig`] if the YAML does not match the configuration schema
    /// or an entity declares an empty class.
    pub fn from_yaml_str(yaml_text: &str) -> FormResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, ConfigWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FormError::InvalidConfig(format!(
                    "schema mismatch at {path}: {source}"
                )));
            }
        };

        let mut entities = IndexMap::with_capacity(wire.entities.len());
        for (name, entity) in wire.entities {
            let config = entity_from_wire(&name, entity)?;
            entities.insert(name, config);
        }

        tracing::debug!(entities = entities.len(), "loaded entity configuration");
        Ok(Self { entities })
    }

    /// Read and parse entity configuration from a YAML file.
    pub fn from_path(path: &Path) -> FormResult<Self> {
        let yaml_text = std::fs::read_to_string(path).map_err(FormError::ConfigRead)?;
        Self::from_yaml_str(&yaml_text)
    }

    /// Look up the configuration of `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EntityNotFound`] when the entity is not configured.
    pub fn entity_config(&self, entity: &str) -> FormResult<&EntityConfig> {
        self.entities
            .get(entity)
            .ok_or_else(|| FormError::EntityNotFound(entity.to_owned()))
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityConfig> {
        self.entities.values()
    }
}

fn entity_from_wire(name: &str, wire: EntityWire) -> FormResult<EntityConfig> {
    if wire.class.trim().is_empty() {
        return Err(FormError::InvalidConfig(format!(
            "entity '{name}' must declare a non-empty class"
        )));
    }

    let views: IndexMap<String, Vec<FieldDescriptor>> = wire
        .views
        .into_iter()
        .map(|(view, view_wire)| {
            let fields: Vec<FieldDescriptor> = view_wire
                .fields
                .into_iter()
                .enumerate()
                .map(|(index, (field_name, field))| field_from_wire(index, field_name, field))
                .collect();
            (view, fields)
        })
        .collect();

    Ok(EntityConfig {
        name: name.to_owned(),
        class: wire.class,
        views,
    })
}

/// Fill in the property path and field name the way the assembler expects them.
fn field_from_wire(index: usize, name: String, wire: FieldWire) -> FieldDescriptor {
    let property = match wire.property {
        Some(property) => property,
        None if DESIGN_ELEMENT_TYPES.contains(&wire.field_type.as_str()) => {
            format!("{DESIGN_ELEMENT_PREFIX}{index}")
        }
        None => name.clone(),
    };

    FieldDescriptor {
        metadata: FieldMetadata {
            field_name: name.clone(),
            property,
            label: wire.label,
            help: wire.help,
            icon: wire.icon,
            css_class: wire.css_class,
            flags: wire.flags,
        },
        name,
        field_type: wire.field_type,
        options: wire.type_options,
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigWire {
    #[serde(default)]
    entities: IndexMap<String, EntityWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityWire {
    class: String,
    #[serde(default)]
    views: IndexMap<String, ViewWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ViewWire {
    #[serde(default, deserialize_with = "unique_fields")]
    fields: IndexMap<String, FieldWire>,
}

/// Field list of a view. A repeated field name is an error instead of a silent overwrite.
fn unique_fields<'de, D>(deserializer: D) -> Result<IndexMap<String, FieldWire>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueFields;

    impl<'de> Visitor<'de> for UniqueFields {
        type Value = IndexMap<String, FieldWire>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of field names to field definitions")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(name) = map.next_key::<String>()? {
                if fields.contains_key(&name) {
                    return Err(de::Error::custom(format_args!(
                        "duplicate field '{name}'"
                    )));
                }
                let field = map.next_value::<FieldWire>()?;
                fields.insert(name, field);
            }
            Ok(fields)
        }
    }

    deserializer.deserialize_map(UniqueFields)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldWire {
    #[serde(rename = "type", default = "default_field_type")]
    field_type: String,
    #[serde(default)]
    type_options: FieldOptions,
    #[serde(default)]
    property: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    css_class: Option<String>,
    #[serde(default)]
    flags: IndexMap<String, Value>,
}

fn default_field_type() -> String {
    DEFAULT_FIELD_TYPE.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PRODUCT_YAML: &str = r#"entities:
  Product:
    class: App\Entity\Product
    views:
      edit:
        fields:
          general:
            type: tab
            label: General
          name:
            type_options:
              required: true
          divider_1:
            type: divider
          price:
            type: money
            property: pricing.amount
            flags:
              sortable: true
"#;

    #[test]
    fn parses_entities_views_and_ordered_fields() {
        let config = ConfigManager::from_yaml_str(PRODUCT_YAML).expect("parse config");
        let product = config.entity_config("Product").expect("product entity");

        assert_eq!(product.name(), "Product");
        assert_eq!(product.class(), "App\\Entity\\Product");
        assert_eq!(product.views().collect::<Vec<_>>(), vec!["edit"]);

        let names: Vec<&str> = product
            .view_fields("edit")
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["general", "name", "divider_1", "price"]);
    }

    #[test]
    fn normalises_types_and_property_paths() {
        let config = ConfigManager::from_yaml_str(PRODUCT_YAML).expect("parse config");
        let fields = config
            .entity_config("Product")
            .expect("product entity")
            .view_fields("edit");

        // Missing type falls back to the default and property falls back to the name.
        assert_eq!(fields[1].field_type, DEFAULT_FIELD_TYPE);
        assert_eq!(fields[1].metadata.property, "name");
        assert_eq!(fields[1].options.get("required"), Some(&Value::Bool(true)));

        // Layout-only types get a reserved property derived from their position.
        assert_eq!(fields[0].metadata.property, format!("{DESIGN_ELEMENT_PREFIX}0"));
        assert_eq!(fields[2].metadata.property, format!("{DESIGN_ELEMENT_PREFIX}2"));
        assert!(fields[2].is_design_element());

        assert_eq!(fields[3].metadata.property, "pricing.amount");
        assert_eq!(fields[3].metadata.field_name, "price");
        assert_eq!(
            fields[3].metadata.flags.get("sortable"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn undeclared_view_has_no_fields() {
        let config = ConfigManager::from_yaml_str(PRODUCT_YAML).expect("parse config");
        let product = config.entity_config("Product").expect("product entity");
        assert!(product.view_fields("new").is_empty());
    }

    #[test]
    fn unknown_entity_is_reported() {
        let config = ConfigManager::from_yaml_str(PRODUCT_YAML).expect("parse config");
        let err = config.entity_config("Invoice").expect_err("should not find entity");
        assert!(matches!(err, FormError::EntityNotFound(name) if name == "Invoice"));
    }

    #[test]
    fn strict_validation_rejects_unknown_keys_with_path() {
        let input = r#"entities:
  Product:
    class: App\Entity\Product
    views:
      edit:
        fields:
          name:
            typo_options: {}
"#;

        let err = ConfigManager::from_yaml_str(input).expect_err("should reject unknown key");
        match err {
            FormError::InvalidConfig(msg) => {
                assert!(msg.contains("typo_options"));
                assert!(msg.contains("entities.Product.views.edit.fields.name"));
            }
            other => panic!("expected InvalidConfig error, got {other:?}"),
        }
    }

    #[test]
    fn repeated_field_name_is_rejected() {
        let input = r#"entities:
  Product:
    class: App\Entity\Product
    views:
      edit:
        fields:
          name: { type: text }
          other: { type: text }
          name: { type: textarea }
"#;

        let err = ConfigManager::from_yaml_str(input).expect_err("should reject repeated field");
        match err {
            FormError::InvalidConfig(msg) => {
                assert!(msg.contains("duplicate field 'name'"));
                assert!(msg.contains("entities.Product.views.edit"));
            }
            other => panic!("expected InvalidConfig error, got {other:?}"),
        }
    }

    #[test]
    fn current_and_legacy_layout_type_names_get_design_element_properties() {
        let input = r#"entities:
  Product:
    class: App\Entity\Product
    views:
      edit:
        fields:
          sec: { type: AdminSectionType }
          sec2: { type: section }
          old_tab: { type: admin_tab }
          rule: { type: AdminDividerType }
          name: { type: text }
"#;

        let config = ConfigManager::from_yaml_str(input).expect("parse config");
        let fields = config
            .entity_config("Product")
            .expect("product entity")
            .view_fields("edit");

        for (index, field) in fields[..4].iter().enumerate() {
            assert_eq!(field.metadata.property, format!("{DESIGN_ELEMENT_PREFIX}{index}"));
            assert!(field.is_design_element());
        }
        assert_eq!(fields[4].metadata.property, "name");
        assert!(!fields[4].is_design_element());
    }

    #[test]
    fn rejects_empty_class() {
        let input = r#"entities:
  Product:
    class: "  "
"#;

        let err = ConfigManager::from_yaml_str(input).expect_err("should reject empty class");
        assert!(matches!(err, FormError::InvalidConfig(msg) if msg.contains("Product")));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(PRODUCT_YAML.as_bytes()).expect("write config");

        let config = ConfigManager::from_path(file.path()).expect("load config");
        assert_eq!(config.entities().count(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = ConfigManager::from_path(&dir.path().join("missing.yaml"))
            .expect_err("should fail to read");
        assert!(matches!(err, FormError::ConfigRead(_)));
    }
}
