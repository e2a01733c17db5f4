//! Render-time view of an assembled form.

use crate::assembler::{AssembledForm, FormField};
use crate::layout::{GroupMap, TabMap};
use crate::options::FormAttributes;
use serde::Serialize;

/// Variables exposed to the template layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormViewVars {
    pub tabs: TabMap,
    pub groups: GroupMap,
}

/// Expose the tab and group maps as render variables.
///
/// Tabs are read at call time, so error counts and active flags written by a submission are
/// included.
pub fn finish_view(form: &AssembledForm) -> FormViewVars {
    FormViewVars {
        tabs: form.tabs().snapshot(),
        groups: form.groups().clone(),
    }
}

/// Everything a client needs to render a form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormView {
    pub id: Option<String>,
    pub entity: String,
    pub view: String,
    pub data_class: String,
    pub allow_extra_fields: bool,
    pub attr: FormAttributes,
    pub submitted: bool,
    pub fields: Vec<FormField>,
    #[serde(flatten)]
    pub vars: FormViewVars,
}

impl FormView {
    pub fn from_form(form: &AssembledForm) -> Self {
        let options = form.options();
        Self {
            id: options.id().map(str::to_owned),
            entity: options.entity.clone(),
            view: options.view.clone(),
            data_class: options.data_class.clone(),
            allow_extra_fields: options.allow_extra_fields,
            attr: options.attr.clone(),
            submitted: form.is_submitted(),
            fields: form.fields().to_vec(),
            vars: finish_view(form),
        }
    }
}
