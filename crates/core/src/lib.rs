//! # Admin Forms Core
//!
//! Builds admin-panel forms from declarative entity configuration.
//!
//! This crate contains the form-building logic only:
//! - Entity configuration loading (`config`)
//! - Field descriptors, type resolution and configurators
//! - Form assembly with tab/group bookkeeping (`assembler`)
//! - Post-submit error routing that brings the first tab with errors to the front (`submission`)
//! - Render variables for the view layer (`view`)
//!
//! **No API concerns**: HTTP servers and command-line handling belong in `api-rest` and `cli`.
//! Validation and templating are external; this crate consumes validation errors and produces
//! render variables.

pub mod assembler;
pub mod config;
pub mod configurator;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod options;
pub mod registry;
pub mod submission;
pub mod types;
pub mod view;

pub use assembler::{AssembledForm, FormAssembler, FormField};
pub use config::{ConfigManager, EntityConfig};
pub use configurator::{
    BuilderContext, CheckboxConfigurator, Configurator, ConfiguratorChain, PropertyConfigurator,
};
pub use descriptor::{FieldDescriptor, FieldMetadata, FieldOptions};
pub use error::{FormError, FormResult};
pub use layout::{GroupDescriptor, TabDescriptor, TabHandle};
pub use options::{FormOptions, ResolvedFormOptions};
pub use registry::FormTypeRegistry;
pub use submission::{FormSubmission, PostSubmitEvent, PostSubmitListener};
pub use types::{FieldKind, TypeResolver};
pub use view::{finish_view, FormView, FormViewVars};
