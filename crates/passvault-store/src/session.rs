//! Authenticated session handles.
//!
//! `authenticate` hands the caller an owned [`Session`] value instead of
//! setting process-global "current user" state. The caller threads the
//! session explicitly to whatever needs it, which keeps concurrent
//! sessions independent and testable.

use crate::account_store::AccountRecord;
use crate::roles::Role;

/// An authenticated account session.
///
/// Holds a snapshot of the account record taken at authentication time.
/// Dropping the session (or calling [`logout`](Session::logout)) ends it;
/// there is nothing to clean up on the store side.
#[derive(Debug, Clone)]
pub struct Session {
    account: AccountRecord,
    role: Role,
}

impl Session {
    pub(crate) fn new(account: AccountRecord, role: Role) -> Self {
        tracing::debug!(username = %account.username, %role, "session established");
        Self { account, role }
    }

    /// The account this session was authenticated as.
    pub fn account(&self) -> &AccountRecord {
        &self.account
    }

    /// Login name of the authenticated account.
    pub fn username(&self) -> &str {
        &self.account.username
    }

    /// Role attached to this session.
    pub fn role(&self) -> Role {
        self.role
    }

    /// End the session explicitly.
    pub fn logout(self) {
        tracing::debug!(username = %self.account.username, "session ended");
    }
}
