//! Form assembly.
//!
//! [`FormAssembler::assemble`] walks the field descriptors of one entity view in a single forward
//! pass. Tab and group markers are not rendered; they open a tab or group that every following
//! real field is attached to. Opening a tab does not close the current group.

use crate::config::ConfigManager;
use crate::configurator::{
    BuilderContext, CheckboxConfigurator, ConfiguratorChain, PropertyConfigurator,
};
use crate::descriptor::{FieldDescriptor, FieldOptions};
use crate::layout::{GroupDescriptor, GroupMap, TabDescriptor, TabHandle};
use crate::options::{FormOptions, ResolvedFormOptions};
use crate::submission::{error_routing_listener, FormSubmission, PostSubmitEvent, PostSubmitListener};
use crate::types::{FieldKind, TypeResolver};
use crate::{FormError, FormResult};
use serde::Serialize;
use serde_json::Value;

/// A real input field, ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormField {
    pub name: String,
    /// Resolved renderer type.
    #[serde(rename = "type")]
    pub field_type: String,
    pub options: FieldOptions,
    pub tab: Option<String>,
    pub group: Option<String>,
}

impl FormField {
    /// Whether the field binds to the data object (`mapped` defaults to true).
    pub fn is_mapped(&self) -> bool {
        self.options
            .get("mapped")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn is_required(&self) -> bool {
        self.options
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Output of one form-build pass.
pub struct AssembledForm {
    options: ResolvedFormOptions,
    fields: Vec<FormField>,
    tabs: TabHandle,
    groups: GroupMap,
    post_submit: Vec<PostSubmitListener>,
    submitted: bool,
}

impl AssembledForm {
    pub fn options(&self) -> &ResolvedFormOptions {
        &self.options
    }

    /// Real fields in declaration order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn tabs(&self) -> &TabHandle {
        &self.tabs
    }

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    /// Number of registered post-submit listeners.
    pub fn post_submit_listeners(&self) -> usize {
        self.post_submit.len()
    }

    /// Register an additional listener, run after the ones added during assembly.
    pub fn add_post_submit_listener(&mut self, listener: PostSubmitListener) {
        self.post_submit.push(listener);
    }

    /// Hand the validation outcome to every post-submit listener, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidInput`] if the form was already submitted; listeners must
    /// run at most once per form instance.
    pub fn submit(&mut self, submission: &FormSubmission) -> FormResult<()> {
        if self.submitted {
            return Err(FormError::InvalidInput(
                "form has already been submitted".into(),
            ));
        }
        self.submitted = true;

        let event = PostSubmitEvent {
            fields: &self.fields,
            submission,
        };
        for listener in &self.post_submit {
            listener(&event);
        }

        tracing::debug!(
            entity = %self.options.entity,
            view = %self.options.view,
            errors = submission.error_count(),
            "form submitted"
        );
        Ok(())
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }
}

impl std::fmt::Debug for AssembledForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssembledForm")
            .field("options", &self.options)
            .field("fields", &self.fields)
            .field("tabs", &self.tabs)
            .field("groups", &self.groups)
            .field("post_submit", &self.post_submit.len())
            .field("submitted", &self.submitted)
            .finish()
    }
}

/// Builds forms from entity configuration.
#[derive(Debug, Default)]
pub struct FormAssembler {
    configurators: ConfiguratorChain,
    types: TypeResolver,
}

impl FormAssembler {
    pub fn new(configurators: ConfiguratorChain, types: TypeResolver) -> Self {
        Self {
            configurators,
            types,
        }
    }

    /// Assembler with the built-in configurators and type names.
    pub fn with_default_configurators() -> Self {
        let configurators = ConfiguratorChain::new()
            .with(PropertyConfigurator)
            .with(CheckboxConfigurator);
        Self::new(configurators, TypeResolver::default())
    }

    pub fn configurators(&self) -> &ConfiguratorChain {
        &self.configurators
    }

    pub fn types(&self) -> &TypeResolver {
        &self.types
    }

    /// Resolve `options`, look up the entity view and assemble its fields.
    ///
    /// # Errors
    ///
    /// Propagates option resolution and entity lookup failures, and configurator rejections.
    pub fn build_form(
        &self,
        config: &ConfigManager,
        options: FormOptions,
    ) -> FormResult<AssembledForm> {
        let options = options.resolve(config)?;
        let descriptors = config
            .entity_config(&options.entity)?
            .view_fields(&options.view)
            .to_vec();
        self.assemble(descriptors, options)
    }

    /// Assemble `descriptors` into a form.
    ///
    /// # Errors
    ///
    /// Only configurator rejections; assembly itself does not fail.
    pub fn assemble(
        &self,
        descriptors: impl IntoIterator<Item = FieldDescriptor>,
        options: ResolvedFormOptions,
    ) -> FormResult<AssembledForm> {
        let context = BuilderContext {
            entity: &options.entity,
            view: &options.view,
            data_class: &options.data_class,
        };

        let tabs = TabHandle::new();
        let mut groups = GroupMap::new();
        let mut fields = Vec::new();
        let mut current_tab: Option<String> = None;
        let mut current_group: Option<String> = None;

        for descriptor in descriptors {
            let is_design_element = descriptor.is_design_element();
            let FieldDescriptor {
                name,
                field_type,
                options: field_options,
                metadata,
            } = descriptor;

            let mut field_options =
                self.configurators
                    .apply(&name, &field_type, field_options, &metadata, &context)?;

            let resolved_type = self.types.resolve(&field_type);

            match FieldKind::classify(resolved_type) {
                FieldKind::Group => {
                    tracing::debug!(group = %metadata.field_name, tab = ?current_tab, "group opened");
                    current_group = Some(metadata.field_name.clone());
                    groups.insert(
                        metadata.field_name.clone(),
                        GroupDescriptor {
                            id: metadata.field_name,
                            label: metadata.label,
                            icon: metadata.icon,
                            help: metadata.help,
                            css_class: metadata.css_class,
                            tab: current_tab.clone(),
                        },
                    );
                }
                FieldKind::Tab => {
                    tracing::debug!(tab = %metadata.field_name, "tab opened");
                    current_tab = Some(metadata.field_name.clone());
                    tabs.insert(TabDescriptor {
                        active: tabs.is_empty(),
                        errors: 0,
                        id: metadata.field_name,
                        label: metadata.label,
                        icon: metadata.icon,
                        help: metadata.help,
                    });
                }
                FieldKind::Field => {
                    if is_design_element {
                        field_options.insert("mapped".into(), Value::Bool(false));
                        field_options.insert("required".into(), Value::Bool(false));
                    }

                    fields.push(FormField {
                        field_type: resolved_type.to_owned(),
                        name,
                        options: field_options,
                        tab: current_tab.clone(),
                        group: current_group.clone(),
                    });
                }
            }
        }

        let mut post_submit = Vec::new();
        if !tabs.is_empty() {
            post_submit.push(error_routing_listener(tabs.clone()));
        }

        tracing::debug!(
            entity = %options.entity,
            view = %options.view,
            fields = fields.len(),
            tabs = tabs.len(),
            groups = groups.len(),
            "form assembled"
        );

        Ok(AssembledForm {
            options,
            fields,
            tabs,
            groups,
            post_submit,
            submitted: false,
        })
    }
}
