//! Session Store: the single authority over the current session.
//!
//! DESIGN
//! ======
//! Memory state and its persisted copy change together under one mutex, so
//! writes apply in call order and readers never observe a value older than
//! the last completed write. Listeners run after the lock is released and
//! may freely read the store.
//!
//! Each sign-in opens a new `Generation`; each clear closes it. The Request
//! Gate expires sessions through `expire`, a compare-and-clear on the
//! generation a request was issued under. Only the first of many concurrent
//! unauthorized responses can win it.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::model::{Session, User};
use crate::storage::{KeyValueStore, keys};

/// Error returned by [`SessionStore::set_session`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session: {0}")]
    Invalid(&'static str),
}

/// Why a session was cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearReason {
    /// Explicit logout (or any direct `clear_session` call).
    SignedOut,
    /// The server rejected a credential the client believed valid.
    Expired,
}

/// Change notification broadcast to every subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    /// User fields changed (profile edit); token unchanged.
    UserUpdated(Session),
    Cleared(ClearReason),
}

/// Opaque id of one live session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Generation(u64);

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

struct Inner {
    session: Session,
    generation: u64,
}

pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    inner: Mutex<Inner>,
    listeners: Mutex<Vec<(Subscription, Listener)>>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock_inner();
        f.debug_struct("SessionStore")
            .field("authenticated", &inner.session.is_authenticated())
            .field("generation", &inner.generation)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build a store from durable storage.
    ///
    /// The persisted session is accepted only when both the token and a
    /// well-formed user record are present. Anything partial is discarded and
    /// its keys removed so the next reload starts clean.
    pub fn rehydrate(storage: Arc<dyn KeyValueStore>) -> Self {
        let token = storage.get(keys::TOKEN).filter(|t| !t.trim().is_empty());
        let user = storage
            .get(keys::USER)
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok())
            .filter(|u| validate_user(u).is_ok());

        let (session, generation) = match (token, user) {
            (Some(token), Some(user)) => {
                tracing::debug!(user_id = %user.id, role = user.role.as_str(), "rehydrated persisted session");
                (Session::authenticated(token, user), 1)
            }
            (token, user) => {
                let leftovers =
                    token.is_some() || user.is_some() || keys::SESSION.iter().any(|k| storage.get(k).is_some());
                if leftovers {
                    tracing::warn!(
                        has_token = token.is_some(),
                        has_user = user.is_some(),
                        "discarding incomplete persisted session"
                    );
                    scrub(storage.as_ref());
                }
                (Session::anonymous(), 0)
            }
        };

        Self {
            storage,
            inner: Mutex::new(Inner { session, generation }),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Current session value. No side effects.
    pub fn get_session(&self) -> Session {
        self.lock_inner().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_inner().session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.lock_inner().session.is_admin()
    }

    /// Generation of the live session, `None` when anonymous.
    pub fn generation(&self) -> Option<Generation> {
        let inner = self.lock_inner();
        inner.session.is_authenticated().then_some(Generation(inner.generation))
    }

    /// Bearer token and generation read atomically, for stamping a request.
    pub fn credential(&self) -> Option<(String, Generation)> {
        let inner = self.lock_inner();
        inner.session.token().map(|t| (t.to_owned(), Generation(inner.generation)))
    }

    /// Sign in: write token and user together, then notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Invalid`] if the token is blank or the user is
    /// missing its id or email. Nothing is written in that case.
    pub fn set_session(&self, token: &str, user: User) -> Result<Session, SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::Invalid("token is empty"));
        }
        validate_user(&user)?;

        let session = {
            let mut inner = self.lock_inner();
            inner.generation += 1;
            inner.session = Session::authenticated(token, user);
            persist(self.storage.as_ref(), &inner.session);
            inner.session.clone()
        };

        if let Some(user) = session.user() {
            tracing::info!(user_id = %user.id, role = user.role.as_str(), "session established");
        }
        self.emit(&SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    /// Refresh user fields after a profile edit.
    ///
    /// Blank fields in `user` keep their current values and the role is kept
    /// from sign-in. Returns `false` (and writes nothing) when no session is
    /// live.
    pub fn update_user(&self, mut user: User) -> bool {
        let session = {
            let mut inner = self.lock_inner();
            let Some(current) = inner.session.user() else {
                return false;
            };
            keep_if_blank(&mut user.id, &current.id);
            keep_if_blank(&mut user.display_name, &current.display_name);
            keep_if_blank(&mut user.email, &current.email);
            user.role = current.role;
            inner.session.replace_user(user);
            persist(self.storage.as_ref(), &inner.session);
            inner.session.clone()
        };
        tracing::debug!("session user refreshed");
        self.emit(&SessionEvent::UserUpdated(session));
        true
    }

    /// Clear the session. Idempotent; every call emits exactly one
    /// `Cleared(SignedOut)` notification.
    ///
    /// Returns the session that was removed, `None` if none was live.
    pub fn clear_session(&self) -> Option<Session> {
        let removed = {
            let mut inner = self.lock_inner();
            let removed = inner.session.is_authenticated().then(|| std::mem::take(&mut inner.session));
            if removed.is_some() {
                inner.generation += 1;
            }
            scrub(self.storage.as_ref());
            removed
        };
        if removed.is_some() {
            tracing::info!("session cleared");
        }
        self.emit(&SessionEvent::Cleared(ClearReason::SignedOut));
        removed
    }

    /// Clear the session only if `generation` is still the live one.
    ///
    /// Returns `true` for exactly one caller per live session; later callers
    /// holding the same generation get `false` and nothing is emitted.
    pub fn expire(&self, generation: Generation) -> bool {
        {
            let mut inner = self.lock_inner();
            if !inner.session.is_authenticated() || inner.generation != generation.0 {
                return false;
            }
            inner.generation += 1;
            inner.session = Session::anonymous();
            scrub(self.storage.as_ref());
        }
        tracing::warn!("session expired by server");
        self.emit(&SessionEvent::Cleared(ClearReason::Expired));
        true
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + Send + Sync + 'static) -> Subscription {
        let id = Subscription(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners().push((id, Arc::new(listener)));
        id
    }

    /// Returns whether the subscription was registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners: Vec<Listener> = self.lock_listeners().iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<(Subscription, Listener)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn keep_if_blank(field: &mut String, current: &str) {
    if field.trim().is_empty() {
        current.clone_into(field);
    }
}

fn validate_user(user: &User) -> Result<(), SessionError> {
    if user.id.trim().is_empty() {
        return Err(SessionError::Invalid("user id is empty"));
    }
    if user.email.trim().is_empty() {
        return Err(SessionError::Invalid("user email is empty"));
    }
    Ok(())
}

fn persist(storage: &dyn KeyValueStore, session: &Session) {
    let (Some(token), Some(user)) = (session.token(), session.user()) else {
        return;
    };
    let raw_user = match serde_json::to_string(user) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize session user");
            return;
        }
    };
    storage.set(keys::TOKEN, token);
    storage.set(keys::USER, &raw_user);
    storage.set(keys::AUTHENTICATED, "true");
    storage.set(keys::ADMIN, if user.role.is_admin() { "true" } else { "false" });
}

fn scrub(storage: &dyn KeyValueStore) {
    for key in keys::SESSION {
        storage.remove(key);
    }
}
