//! Tabs and groups: the layout bookkeeping produced by form assembly.

use indexmap::IndexMap;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TabDescriptor {
    pub id: String,
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub active: bool,
    /// Validation errors reported by fields in this tab after submission.
    pub errors: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupDescriptor {
    pub id: String,
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    /// Tab that was open when the group was declared.
    pub tab: Option<String>,
}

pub type TabMap = IndexMap<String, TabDescriptor>;
pub type GroupMap = IndexMap<String, GroupDescriptor>;

/// Shared, mutable tab map of one form instance.
///
/// The assembled form and its post-submit hook hold clones of the same handle, so error counts
/// and active flags written after submission are visible when the form is rendered. A handle
/// never outlives its form instance and is not shared across threads.
#[derive(Clone, Debug, Default)]
pub struct TabHandle(Rc<RefCell<TabMap>>);

impl TabHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, tab: TabDescriptor) {
        self.0.borrow_mut().insert(tab.id.clone(), tab);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.borrow().contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<TabDescriptor> {
        self.0.borrow().get(id).cloned()
    }

    /// Id of the first declared tab.
    pub fn first_id(&self) -> Option<String> {
        self.0.borrow().keys().next().cloned()
    }

    /// Ids of the tabs currently marked active.
    pub fn active_ids(&self) -> Vec<String> {
        self.0
            .borrow()
            .values()
            .filter(|tab| tab.active)
            .map(|tab| tab.id.clone())
            .collect()
    }

    /// Copy of the current state, in declaration order.
    pub fn snapshot(&self) -> TabMap {
        self.0.borrow().clone()
    }

    /// Add `count` to the error counter of tab `id`. Returns `false` if there is no such tab.
    pub(crate) fn add_errors(&self, id: &str, count: usize) -> bool {
        match self.0.borrow_mut().get_mut(id) {
            Some(tab) => {
                tab.errors = tab.errors.saturating_add(count);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_active(&self, id: &str, active: bool) {
        if let Some(tab) = self.0.borrow_mut().get_mut(id) {
            tab.active = active;
        }
    }
}
