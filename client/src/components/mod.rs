//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and guarded content while reading the shared
//! `ClientSession` from Leptos context.

pub mod app_shell;
pub mod route_guard;
pub mod text_field;
