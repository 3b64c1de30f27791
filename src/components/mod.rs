//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout and header
//! - `alert`: Alert messages
//! - `button`: Button and link-button components
//! - `chart`: Horizontal bar charts
//! - `form`: Form and input components
//! - `table`: Table components

pub mod alert;
pub mod button;
pub mod chart;
pub mod form;
pub mod layout;
pub mod table;

pub use alert::{Alert, AlertVariant};
pub use button::{Button, ButtonVariant};
pub use chart::{Bar, BarChart};
pub use form::{Form, Input};
pub use layout::BaseLayout;
pub use table::{simple_row, Table, TableVariant};

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
