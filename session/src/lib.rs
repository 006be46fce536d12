//! Client-side session and authorization guard for the exam-prep app.
//!
//! This crate owns every rule about who may see which screen and which API
//! calls may leave the client. It is shared by the Leptos `client` and the
//! terminal `cli`; neither of them touches persisted session data directly.
//!
//! ARCHITECTURE
//! ============
//! Leaves first:
//! - `store`: the `SessionStore`, single writer of session state.
//! - `gate`: the `RequestGate` pre-flight/response guard pair.
//! - `forms` + `auth`: login/signup state machines and their submission flow.
//! - `guard`: route rendering decision.
//! - `shell`: navigation chrome model and `logout()`.
//!
//! Browser storage, HTTP and navigation are injected through the
//! `KeyValueStore`, `Transport` and `Navigator` traits so the whole subsystem
//! runs under plain `cargo test`.

pub mod auth;
pub mod config;
pub mod endpoints;
pub mod forms;
pub mod gate;
pub mod guard;
pub mod model;
pub mod navigation;
pub mod preferences;
pub mod shell;
pub mod storage;
pub mod store;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthError, Authenticator, Landing};
pub use config::{ApiConfig, ConfigError};
pub use gate::{GateError, RequestGate};
pub use guard::GuardDecision;
pub use model::{Role, Session, User};
pub use navigation::{Navigator, Screen};
pub use preferences::{Preferences, Theme};
pub use shell::{NavLink, ShellController, SignOut};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{SessionError, SessionEvent, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};
