//! Credential resolution
//!
//! Precedence, highest first:
//! 1. credentials entered with the current submission
//! 2. credentials retained by the session from an earlier resolution
//! 3. the persisted default block (`GOOGLE_API_KEY`)
//!
//! Whichever source wins becomes the session's retained list.

use tracing::debug;

use shared::CredentialList;
use crate::state::SessionContext;

/// Where a resolved credential list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Input,
    Session,
    Default,
    None,
}

/// Resolves the credential list for a submission
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    defaults: CredentialList,
}

impl CredentialStore {
    pub fn new(defaults: CredentialList) -> Self {
        Self { defaults }
    }

    /// Resolve credentials for a submission; an empty result means "unconfigured"
    pub fn resolve<S: AsRef<str>>(&self, session: &mut SessionContext, fresh_input: &[S]) -> CredentialList {
        self.resolve_with_source(session, fresh_input).0
    }

    /// Same as [`CredentialStore::resolve`], also reporting the winning source
    pub fn resolve_with_source<S: AsRef<str>>(
        &self,
        session: &mut SessionContext,
        fresh_input: &[S],
    ) -> (CredentialList, CredentialSource) {
        let fresh = CredentialList::from_input(fresh_input);

        let (resolved, source) = if !fresh.is_empty() {
            (fresh, CredentialSource::Input)
        } else if !session.retained_credentials().is_empty() {
            (session.retained_credentials().clone(), CredentialSource::Session)
        } else if !self.defaults.is_empty() {
            (self.defaults.clone(), CredentialSource::Default)
        } else {
            (CredentialList::empty(), CredentialSource::None)
        };

        debug!(count = resolved.len(), source = ?source, "Resolved credentials");

        if source != CredentialSource::None {
            session.retain_credentials(resolved.clone());
        }

        (resolved, source)
    }
}
