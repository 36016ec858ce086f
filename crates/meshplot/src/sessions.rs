//! Process-wide registry of open plotting sessions.
//!
//! Registration is explicit: creating a [`Plotter`] never registers it.
//! [`close_all`] closes and drops every registered session, which is what an
//! application does on shutdown.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use crate::plotter::Plotter;

static SESSIONS: OnceLock<Mutex<Sessions>> = OnceLock::new();

/// Identifies a registered session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[derive(Default)]
struct Sessions {
    next_id: u64,
    plotters: BTreeMap<SessionId, Plotter>,
}

fn with_sessions<F, R>(f: F) -> R
where
    F: FnOnce(&mut Sessions) -> R,
{
    let lock = SESSIONS.get_or_init(|| Mutex::new(Sessions::default()));
    let mut guard = lock.lock().expect("session registry lock poisoned");
    f(&mut guard)
}

/// Registers a session and returns its id.
pub fn register(plotter: Plotter) -> SessionId {
    with_sessions(|sessions| {
        let id = SessionId(sessions.next_id);
        sessions.next_id += 1;
        sessions.plotters.insert(id, plotter);
        log::debug!("registered {id}");
        id
    })
}

/// Removes a session from the registry and hands it back, still open.
pub fn unregister(id: SessionId) -> Option<Plotter> {
    with_sessions(|sessions| sessions.plotters.remove(&id))
}

/// Runs `f` on a registered session.
///
/// Returns `None` if `id` is not registered.
pub fn with_session<F, R>(id: SessionId, f: F) -> Option<R>
where
    F: FnOnce(&mut Plotter) -> R,
{
    with_sessions(|sessions| sessions.plotters.get_mut(&id).map(f))
}

/// Returns whether `id` is registered.
pub fn contains(id: SessionId) -> bool {
    with_sessions(|sessions| sessions.plotters.contains_key(&id))
}

/// Returns the number of registered sessions.
pub fn len() -> usize {
    with_sessions(|sessions| sessions.plotters.len())
}

/// Returns true if no session is registered.
pub fn is_empty() -> bool {
    len() == 0
}

/// Closes every registered session and empties the registry.
///
/// Returns the number of sessions closed.
pub fn close_all() -> usize {
    let plotters = with_sessions(|sessions| std::mem::take(&mut sessions.plotters));
    let count = plotters.len();
    for (_, mut plotter) in plotters {
        plotter.close();
    }
    if count > 0 {
        log::info!("closed {count} plotting sessions");
    }
    count
}
