use chrono::{DateTime, Utc};

use crate::capability::CapabilityProvider;

/// Request-scoped state handed to every workflow call.
///
/// `now` is captured once per request so every timestamp written by one
/// submission is identical.
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    pub user_id: i64,
    pub now: DateTime<Utc>,
    pub capabilities: &'a dyn CapabilityProvider,
}

impl<'a> RequestContext<'a> {
    pub fn new(user_id: i64, capabilities: &'a dyn CapabilityProvider) -> Self {
        Self {
            user_id,
            now: Utc::now(),
            capabilities,
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

impl std::fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("user_id", &self.user_id)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}
