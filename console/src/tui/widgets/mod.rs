//! Screen widgets for the console TUI.

pub mod auth_form;
pub mod dashboard;
pub mod notice;
pub mod platform_select;
pub mod url_entry;
pub mod verification;
