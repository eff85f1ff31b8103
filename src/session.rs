//! Per-session analysis context.
//!
//! A session carries the two committed form selections, vehicle type and
//! purpose. State lives in memory for the lifetime of the process and is
//! keyed by the caller's session id; nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::messages::{DEFAULT_PURPOSE, DEFAULT_VEHICLE_TYPE};

/// Raw committed state. Fields stay unset until a commit supplies a
/// non-blank value.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub vehicle_type: Option<String>,
    pub purpose: Option<String>,
}

/// Context with the sentinels applied, ready for prompt interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedContext {
    pub vehicle_type: String,
    pub purpose: String,
}

impl SessionContext {
    pub fn resolve(&self) -> ResolvedContext {
        ResolvedContext {
            vehicle_type: self
                .vehicle_type
                .clone()
                .unwrap_or_else(|| DEFAULT_VEHICLE_TYPE.to_string()),
            purpose: self
                .purpose
                .clone()
                .unwrap_or_else(|| DEFAULT_PURPOSE.to_string()),
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionContext>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite both fields in one step. A read after this call returns
    /// exactly the committed pair, never a mix of old and new values.
    pub async fn commit(&self, session_id: &str, vehicle_type: String, purpose: String) {
        let context = SessionContext {
            vehicle_type: normalize(vehicle_type),
            purpose: normalize(purpose),
        };
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.to_string(), context);
        debug!(session_id, "session context committed");
    }

    /// Current context for the session, with sentinels in place of unset
    /// fields. Unknown sessions read as the default context.
    pub async fn read(&self, session_id: &str) -> ResolvedContext {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .cloned()
            .unwrap_or_default()
            .resolve()
    }
}

// A blank selection (the "Other" box left empty) counts as unset.
fn normalize(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
