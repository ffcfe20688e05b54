//! Explicit request context for privileged operations.
//!
//! The UI layer owns whatever session storage it likes; this crate only sees
//! the `Session` value produced by a successful login, passed into each
//! operation that needs role gating. There is no ambient current-user state.

use crate::libs::messages::Message;
use crate::libs::user::Role;
use crate::msg_bail_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The authenticated caller of an operation.
///
/// Carries the approval flag so that an account which authenticated before
/// being approved still cannot perform privileged actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
    pub approved: bool,
    pub full_name: String,
}

impl Session {
    /// Fails unless the session belongs to an approved admin.
    pub fn require_admin(&self) -> Result<()> {
        self.require_approved()?;
        if self.role != Role::Admin {
            msg_bail_anyhow!(Message::PermissionDenied("admin".to_string()));
        }
        Ok(())
    }

    /// Fails unless the session belongs to an approved admin or manager.
    pub fn require_manager(&self) -> Result<()> {
        self.require_approved()?;
        if !matches!(self.role, Role::Admin | Role::Manager) {
            msg_bail_anyhow!(Message::PermissionDenied("manager".to_string()));
        }
        Ok(())
    }

    fn require_approved(&self) -> Result<()> {
        if !self.approved {
            msg_bail_anyhow!(Message::AccountNotApproved);
        }
        Ok(())
    }
}
