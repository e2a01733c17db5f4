//! Constants shared across form assembly.

/// Property-path prefix marking cosmetic fields (dividers, sections) that never bind to data.
pub const DESIGN_ELEMENT_PREFIX: &str = "_admin_form_design_element_";

/// Identifier the default assembler is registered under.
pub const BLOCK_PREFIX: &str = "admin_form";

/// Deprecated identifier kept as an alias of [`BLOCK_PREFIX`].
pub const LEGACY_BLOCK_PREFIX: &str = "legacy_admin_form";

pub const GROUP_TYPE: &str = "AdminGroupType";
pub const TAB_TYPE: &str = "AdminTabType";
pub const DIVIDER_TYPE: &str = "AdminDividerType";
pub const SECTION_TYPE: &str = "AdminSectionType";
pub const LEGACY_GROUP_TYPE: &str = "admin_group";
pub const LEGACY_TAB_TYPE: &str = "admin_tab";

pub const CHECKBOX_TYPE: &str = "CheckboxType";

/// Field type used when a configured field does not declare one.
pub const DEFAULT_FIELD_TYPE: &str = "text";

/// Declared types that are layout-only and get a design-element property when none is given.
/// Short, current and legacy names are all listed.
pub const DESIGN_ELEMENT_TYPES: [&str; 10] = [
    "divider",
    "section",
    "group",
    "tab",
    DIVIDER_TYPE,
    SECTION_TYPE,
    GROUP_TYPE,
    TAB_TYPE,
    LEGACY_GROUP_TYPE,
    LEGACY_TAB_TYPE,
];
