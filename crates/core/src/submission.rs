//! Post-submit handling: validation errors in, tab error counts and active tab out.
//!
//! The validation itself happens elsewhere. A [`FormSubmission`] only carries the per-field
//! error messages it produced; the error-routing hook uses them to count errors per tab and to
//! bring the tab holding the first erroneous field to the front.

use crate::assembler::FormField;
use crate::layout::TabHandle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Validation outcome of one submission, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub errors: IndexMap<String, Vec<String>>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }
}

/// What post-submit listeners get to see.
#[derive(Clone, Copy, Debug)]
pub struct PostSubmitEvent<'a> {
    pub fields: &'a [FormField],
    pub submission: &'a FormSubmission,
}

pub type PostSubmitListener = Box<dyn Fn(&PostSubmitEvent<'_>)>;

/// Count errors per tab and activate the tab holding the first erroneous field.
///
/// Fields are scanned in declaration order. If no field has errors the active flags are left as
/// they were.
pub fn route_errors(tabs: &TabHandle, event: &PostSubmitEvent<'_>) {
    let mut active_tab: Option<&str> = None;

    for field in event.fields {
        let count = event.submission.errors_for(&field.name).len();
        if count == 0 {
            continue;
        }

        let Some(tab) = field.tab.as_deref() else {
            tracing::warn!(field = %field.name, "field with errors is not inside any tab");
            continue;
        };

        if !tabs.add_errors(tab, count) {
            tracing::warn!(field = %field.name, tab, "field refers to an undeclared tab");
            continue;
        }

        if active_tab.is_none() {
            active_tab = Some(tab);
        }
    }

    let Some(active_tab) = active_tab else {
        return;
    };

    if let Some(first_tab) = tabs.first_id() {
        if first_tab != active_tab {
            tracing::debug!(from = %first_tab, to = active_tab, "activating tab with errors");
            tabs.set_active(&first_tab, false);
            tabs.set_active(active_tab, true);
        }
    }
}

/// The hook registered on forms that declare at least one tab.
pub(crate) fn error_routing_listener(tabs: TabHandle) -> PostSubmitListener {
    Box::new(move |event: &PostSubmitEvent<'_>| route_errors(&tabs, event))
}
