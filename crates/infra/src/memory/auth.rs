use kindred_core::AuthProvider;
use kindred_domain::UserIdentity;
use tokio::sync::watch;
use tracing::info;

/// Auth provider driven by explicit sign-in/sign-out calls.
#[derive(Debug)]
pub struct ChannelAuthProvider {
    sender: watch::Sender<Option<UserIdentity>>,
}

impl ChannelAuthProvider {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    pub fn signed_in(user: UserIdentity) -> Self {
        let provider = Self::new();
        provider.sign_in(user);
        provider
    }

    pub fn sign_in(&self, user: UserIdentity) {
        info!(user_id = %user.uid, "user signed in");
        self.sender.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        if self.sender.send_replace(None).is_some() {
            info!("user signed out");
        }
    }

    pub fn current(&self) -> Option<UserIdentity> {
        self.sender.borrow().clone()
    }
}

impl Default for ChannelAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for ChannelAuthProvider {
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.sender.subscribe()
    }
}
