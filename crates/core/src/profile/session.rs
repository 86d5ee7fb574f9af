//! Explicit authentication context for the auto-save store

use kindred_domain::UserIdentity;
use tokio::sync::watch;

use super::ports::AuthProvider;

/// Subscription to the current user, handed to [`AutoSaveStore::attach`].
///
/// [`AutoSaveStore::attach`]: super::AutoSaveStore::attach
#[derive(Debug, Clone)]
pub struct SessionContext {
    receiver: watch::Receiver<Option<UserIdentity>>,
}

impl SessionContext {
    pub fn new(receiver: watch::Receiver<Option<UserIdentity>>) -> Self {
        Self { receiver }
    }

    pub fn from_provider(provider: &dyn AuthProvider) -> Self {
        Self::new(provider.subscribe())
    }

    /// User signed in right now.
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change and return the new user.
    ///
    /// `None` once the provider has gone away.
    pub async fn changed(&mut self) -> Option<Option<UserIdentity>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Current user, marking it as seen.
    pub(crate) fn take_current(&mut self) -> Option<UserIdentity> {
        self.receiver.borrow_and_update().clone()
    }
}
