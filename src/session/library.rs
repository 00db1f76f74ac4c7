// Session library - the ordered in-memory session list
// Every mutation is written through to the store; nothing is written on load.

use crate::session::store::{SessionStore, StoreError};
use crate::session::types::Session;

pub struct SessionLibrary {
    store: SessionStore,
    sessions: Vec<Session>,
}

impl SessionLibrary {
    /// Open the library, reading whatever the store holds
    pub fn open(store: SessionStore) -> Self {
        let sessions = store.load_all();
        Self { store, sessions }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Append a new session
    pub fn add(&mut self, session: Session) -> Result<(), StoreError> {
        self.sessions.push(session);
        self.persist()
    }

    /// Replace the session with the same id, keeping its position
    /// Returns false (and writes nothing) when no session has that id.
    pub fn replace(&mut self, session: Session) -> Result<bool, StoreError> {
        let Some(existing) = self.sessions.iter_mut().find(|s| s.id == session.id) else {
            return Ok(false);
        };
        *existing = session;
        self.persist()?;
        Ok(true)
    }

    /// Remove a session by id
    /// Returns the removed session; unknown ids leave the store untouched.
    pub fn delete(&mut self, id: &str) -> Result<Option<Session>, StoreError> {
        let Some(index) = self.sessions.iter().position(|s| s.id == id) else {
            return Ok(None);
        };
        let removed = self.sessions.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save_all(&self.sessions)
    }
}
