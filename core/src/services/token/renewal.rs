//! Sliding-window renewal decision

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::RENEWAL_WINDOW_MINUTES;
use crate::domain::value_objects::RenewalHint;

/// Decides whether a credential should be replaced during the current request
///
/// Fires iff `expires_at - now < window`, compared at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalPolicy {
    window: Duration,
}

impl RenewalPolicy {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn evaluate(&self, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> RenewalHint {
        if expires_at - now < self.window {
            RenewalHint::AboutToExpire
        } else {
            RenewalHint::Fresh
        }
    }
}

impl Default for RenewalPolicy {
    fn default() -> Self {
        Self::new(Duration::minutes(RENEWAL_WINDOW_MINUTES))
    }
}
