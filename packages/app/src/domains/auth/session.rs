use std::sync::Arc;

use crate::kernel::{AuthUser, BaseIdentityService, Subscription};

/// Explicit session context.
///
/// The one place components learn who is signed in. Screens receive this by
/// injection instead of reaching for ambient provider state, and observe
/// changes through [`SessionContext::subscribe`] — one subscription point,
/// explicit teardown.
#[derive(Clone)]
pub struct SessionContext {
    identity: Arc<dyn BaseIdentityService>,
}

impl SessionContext {
    pub fn new(identity: Arc<dyn BaseIdentityService>) -> Self {
        Self { identity }
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.identity.current_user()
    }

    /// Observe sign-in/sign-out transitions.
    pub fn subscribe(&self) -> Subscription<Option<AuthUser>> {
        Subscription::without_disposer(self.identity.watch_session())
    }
}
