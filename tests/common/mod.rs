//! Shared test doubles for the integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use shell_router::embed::host::{EmbedHost, HostError};
use shell_router::embed::session::{EmbedSession, SessionId};

/// One observed call at the container boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Instantiate { session: SessionId, source: String },
    SyncPath { session: SessionId, path: String },
    Teardown { session: SessionId },
}

/// Recording embed container double.
///
/// Clones share the same call log, so tests keep a handle after moving
/// the host into the router. Sources added via [`refuse`](Self::refuse)
/// are rejected at instantiation.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Rc<RefCell<Vec<HostCall>>>,
    refused: Rc<RefCell<Vec<String>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refuse(&self, source: &str) {
        self.refused.borrow_mut().push(source.to_string());
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn instantiations(&self) -> Vec<SessionId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Instantiate { session, .. } => Some(session),
                _ => None,
            })
            .collect()
    }

    pub fn teardowns(&self) -> Vec<SessionId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Teardown { session } => Some(session),
                _ => None,
            })
            .collect()
    }
}

impl EmbedHost for RecordingHost {
    fn instantiate(&self, session: &EmbedSession) -> Result<(), HostError> {
        let source = session.source().to_string();
        if self.refused.borrow().contains(&source) {
            return Err(HostError::new(format!("refused source {}", source)));
        }
        self.calls.borrow_mut().push(HostCall::Instantiate {
            session: session.id(),
            source,
        });
        Ok(())
    }

    fn sync_path(&self, session: &EmbedSession, path: &str) {
        self.calls.borrow_mut().push(HostCall::SyncPath {
            session: session.id(),
            path: path.to_string(),
        });
    }

    fn teardown(&self, session: &EmbedSession) {
        self.calls.borrow_mut().push(HostCall::Teardown {
            session: session.id(),
        });
    }
}
