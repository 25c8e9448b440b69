//! Admin area gate.
//!
//! This is a visibility toggle, not access control: the password is a
//! configured plain-text constant compared locally and the "session" is a
//! flag in client-writable storage. Anyone who can edit the storage
//! directory can set the flag. There is no hashing and no expiry.

use crate::error::{AuthError, Result, StorageError};
use crate::storage::{keys, KeyValueStore};
use std::sync::Arc;
use tracing::{info, warn};

const FLAG_VALUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminState {
    LoggedOut,
    LoggedIn,
}

pub struct AdminGate {
    storage: Arc<dyn KeyValueStore>,
    password: String,
}

impl AdminGate {
    pub fn new(storage: Arc<dyn KeyValueStore>, password: impl Into<String>) -> Self {
        Self {
            storage,
            password: password.into(),
        }
    }

    pub fn state(&self) -> std::result::Result<AdminState, StorageError> {
        let flag = self.storage.get(keys::ADMIN_AUTHENTICATED)?;
        Ok(match flag.as_deref() {
            Some(FLAG_VALUE) => AdminState::LoggedIn,
            _ => AdminState::LoggedOut,
        })
    }

    /// Exact comparison against the configured password; sets the flag on success
    pub fn login(&self, password: &str) -> Result<AdminState> {
        if password != self.password {
            warn!("Admin login rejected");
            return Err(AuthError::WrongPassword.into());
        }
        self.storage.set(keys::ADMIN_AUTHENTICATED, FLAG_VALUE)?;
        info!("Admin logged in");
        Ok(AdminState::LoggedIn)
    }

    pub fn logout(&self) -> Result<AdminState> {
        self.storage.remove(keys::ADMIN_AUTHENTICATED)?;
        info!("Admin logged out");
        Ok(AdminState::LoggedOut)
    }

    /// Checked on every entry to the admin area
    pub fn require(&self) -> Result<()> {
        match self.state()? {
            AdminState::LoggedIn => Ok(()),
            AdminState::LoggedOut => Err(AuthError::LoginRequired.into()),
        }
    }
}
