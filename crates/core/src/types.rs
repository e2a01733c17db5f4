//! Field type names: legacy-to-current resolution and marker classification.

use crate::constants::{
    CHECKBOX_TYPE, DIVIDER_TYPE, GROUP_TYPE, LEGACY_GROUP_TYPE, LEGACY_TAB_TYPE, SECTION_TYPE,
    TAB_TYPE,
};
use std::collections::HashMap;

/// What a descriptor turns into once its type has been resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A real input that is rendered and bound.
    Field,
    /// Opens a visual group for the fields that follow.
    Group,
    /// Opens a tab for the fields that follow.
    Tab,
}

impl FieldKind {
    /// Classify a resolved type name. Both the current and the legacy marker names are accepted.
    pub fn classify(resolved_type: &str) -> Self {
        match resolved_type {
            GROUP_TYPE | LEGACY_GROUP_TYPE => FieldKind::Group,
            TAB_TYPE | LEGACY_TAB_TYPE => FieldKind::Tab,
            _ => FieldKind::Field,
        }
    }
}

/// Maps short or deprecated type names to the renderer type they stand for.
///
/// Names without a mapping resolve to themselves.
#[derive(Clone, Debug)]
pub struct TypeResolver {
    aliases: HashMap<String, String>,
}

impl TypeResolver {
    /// A resolver with no mappings at all.
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    pub fn with_alias(mut self, declared: impl Into<String>, resolved: impl Into<String>) -> Self {
        self.aliases.insert(declared.into(), resolved.into());
        self
    }

    pub fn resolve<'a>(&'a self, declared_type: &'a str) -> &'a str {
        self.aliases
            .get(declared_type)
            .map(String::as_str)
            .unwrap_or(declared_type)
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        const BUILTIN: [(&str, &str); 16] = [
            ("text", "TextType"),
            ("textarea", "TextareaType"),
            ("email", "EmailType"),
            ("integer", "IntegerType"),
            ("number", "NumberType"),
            ("money", "MoneyType"),
            ("percent", "PercentType"),
            ("url", "UrlType"),
            ("date", "DateType"),
            ("datetime", "DateTimeType"),
            ("choice", "ChoiceType"),
            ("checkbox", CHECKBOX_TYPE),
            ("divider", DIVIDER_TYPE),
            ("section", SECTION_TYPE),
            ("group", GROUP_TYPE),
            ("tab", TAB_TYPE),
        ];

        BUILTIN
            .iter()
            .fold(Self::empty(), |resolver, (declared, resolved)| {
                resolver.with_alias(*declared, *resolved)
            })
    }
}
