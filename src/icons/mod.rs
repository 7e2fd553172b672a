//! Labels and terminal escape sequences used in the report output.

// Status labels
pub const STATUS_DRAFT: &str = "Draft";
pub const STATUS_READY: &str = "Ready";

// Layout
pub const INDENT: &str = "  ";
pub const AUTHOR_SEPARATOR: &str = "\t- ";
pub const TITLE_SEPARATOR: &str = " => ";

// OSC 8 hyperlinks, terminated with BEL
pub const HYPERLINK_START: &str = "\x1b]8;;";
pub const HYPERLINK_END: &str = "\x07";
