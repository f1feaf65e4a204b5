//! Request-scoped caller identity.
//!
//! Passed explicitly to every use case that needs it; the availability
//! engine itself never sees it.

/// Who is calling a use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestContext {
    /// Anonymous site visitor; may only query availability.
    Guest,
    /// Authenticated operator; may manage bookings.
    Admin { user_id: String },
}

impl RequestContext {
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::Admin {
            user_id: user_id.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }
}
