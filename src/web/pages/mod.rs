//! Maud-based page templates for the web UI.
//!
//! Each page module exports a render function that produces the complete HTML.

pub mod auth;
pub mod dashboard;

pub use auth::{render_locked_page, render_login_page};
pub use dashboard::{render_connect_page, render_dashboard_page, render_error_page};
