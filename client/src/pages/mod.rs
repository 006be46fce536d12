//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Guarding happens at the route table, not inside pages.

pub mod admin;
pub mod contact;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod signup;
