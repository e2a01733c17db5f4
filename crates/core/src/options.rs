//! Form-level options and their resolution.
//!
//! Callers pass [`FormOptions`]; building a form first resolves them into
//! [`ResolvedFormOptions`]:
//! - `entity` and `view` are required
//! - `allow_extra_fields` defaults to `true`
//! - `data_class` defaults to the entity's configured class
//! - `attr` always carries an `id` of the form `{view}-{entity lowercased}-form` unless the
//!   caller supplied one

use crate::config::ConfigManager;
use crate::{FormError, FormResult};
use indexmap::IndexMap;
use serde::Serialize;

/// HTML attributes of the rendered `<form>` element.
pub type FormAttributes = IndexMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormOptions {
    pub entity: Option<String>,
    pub view: Option<String>,
    pub allow_extra_fields: Option<bool>,
    pub data_class: Option<String>,
    pub attr: FormAttributes,
}

impl FormOptions {
    pub fn new(entity: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            view: Some(view.into()),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attr.insert(key.into(), value.into());
        self
    }

    pub fn with_data_class(mut self, data_class: impl Into<String>) -> Self {
        self.data_class = Some(data_class.into());
        self
    }

    pub fn with_allow_extra_fields(mut self, allow: bool) -> Self {
        self.allow_extra_fields = Some(allow);
        self
    }

    /// Apply defaults and normalisation.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingOption`] if `entity` or `view` is absent.
    /// - [`FormError::EntityNotFound`] if `data_class` must be derived and the entity is not
    ///   configured.
    pub fn resolve(self, config: &ConfigManager) -> FormResult<ResolvedFormOptions> {
        let entity = self.entity.ok_or(FormError::MissingOption("entity"))?;
        let view = self.view.ok_or(FormError::MissingOption("view"))?;

        let data_class = match self.data_class {
            Some(data_class) => data_class,
            None => config.entity_config(&entity)?.class().to_owned(),
        };

        let mut resolved = ResolvedFormOptions::new(entity, view, data_class, self.attr);
        if let Some(allow) = self.allow_extra_fields {
            resolved.allow_extra_fields = allow;
        }
        Ok(resolved)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedFormOptions {
    pub entity: String,
    pub view: String,
    pub allow_extra_fields: bool,
    pub data_class: String,
    pub attr: FormAttributes,
}

impl ResolvedFormOptions {
    /// Build resolved options directly, applying the `attr` normaliser.
    pub fn new(
        entity: impl Into<String>,
        view: impl Into<String>,
        data_class: impl Into<String>,
        attr: FormAttributes,
    ) -> Self {
        let entity = entity.into();
        let view = view.into();
        let attr = normalize_attributes(&view, &entity, attr);
        Self {
            entity,
            view,
            allow_extra_fields: true,
            data_class: data_class.into(),
            attr,
        }
    }

    /// The HTML id of the form element.
    pub fn id(&self) -> Option<&str> {
        self.attr.get("id").map(String::as_str)
    }
}

pub fn default_form_id(view: &str, entity: &str) -> String {
    format!("{view}-{}-form", entity.to_lowercase())
}

/// Defaults first, caller values replace them key by key.
fn normalize_attributes(view: &str, entity: &str, attr: FormAttributes) -> FormAttributes {
    let mut normalized = FormAttributes::with_capacity(attr.len() + 1);
    normalized.insert("id".to_owned(), default_form_id(view, entity));
    normalized.extend(attr);
    normalized
}
