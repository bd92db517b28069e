use api_types::{auth::TokenPair, user::UserView};
use chrono::{DateTime, Utc};

use crate::session;

use super::OpPhase;

/// Session state: token pair plus the authenticated-user snapshot.
///
/// Mutated only through the reducers below; the async actions on
/// [`crate::Store`] call them after each API round trip.
#[derive(Debug, Default)]
pub struct AuthSlice {
    pub user: Option<UserView>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub phase: OpPhase,
    pub error: Option<String>,
}

impl AuthSlice {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    /// True when there is no usable session: no token, or a token whose
    /// `exp` claim lies at or before `now`.
    #[must_use]
    pub fn session_expired(&self, now: DateTime<Utc>) -> bool {
        match &self.access_token {
            Some(token) => session::token_is_expired(token, now),
            None => true,
        }
    }

    pub fn pending(&mut self) {
        self.phase = OpPhase::Pending;
        self.error = None;
    }

    pub fn login_fulfilled(&mut self, user: UserView, tokens: TokenPair) {
        self.user = Some(user);
        self.access_token = Some(tokens.access_token);
        self.refresh_token = Some(tokens.refresh_token);
        self.phase = OpPhase::Fulfilled;
        self.error = None;
    }

    pub fn login_rejected(&mut self, message: String) {
        self.user = None;
        self.access_token = None;
        self.refresh_token = None;
        self.phase = OpPhase::Rejected;
        self.error = Some(message);
    }

    pub fn profile_fulfilled(&mut self, user: UserView) {
        self.user = Some(user);
        self.phase = OpPhase::Fulfilled;
        self.error = None;
    }

    pub fn rejected(&mut self, message: String) {
        self.phase = OpPhase::Rejected;
        self.error = Some(message);
    }

    /// Destroys the session. Used by explicit logout and by the expiry guard.
    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::make_token;
    use api_types::user::UserRole;

    fn user() -> UserView {
        UserView {
            id_: 1,
            username: "homiak".to_string(),
            email: "homiak@example.com".to_string(),
            default_currency: "USD".to_string(),
            timezone: None,
            capital: 60.0,
            role: UserRole::User,
        }
    }

    fn tokens(exp: i64) -> TokenPair {
        TokenPair {
            access_token: make_token(exp),
            refresh_token: "refresh".to_string(),
        }
    }

    #[test]
    fn login_round_trip() {
        let mut slice = AuthSlice::default();
        assert!(!slice.is_authenticated());

        slice.pending();
        assert_eq!(slice.phase, OpPhase::Pending);

        let now = Utc::now();
        slice.login_fulfilled(user(), tokens(now.timestamp() + 900));
        assert!(slice.is_authenticated());
        assert!(!slice.session_expired(now));

        slice.logout();
        assert!(!slice.is_authenticated());
        assert!(slice.session_expired(now));
    }

    #[test]
    fn rejected_login_clears_the_session() {
        let now = Utc::now();
        let mut slice = AuthSlice::default();
        slice.login_fulfilled(user(), tokens(now.timestamp() + 900));

        slice.login_rejected("Invalid credentials".to_string());
        assert!(!slice.is_authenticated());
        assert_eq!(slice.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(slice.phase, OpPhase::Rejected);
    }

    #[test]
    fn stale_token_expires_the_session() {
        let now = Utc::now();
        let mut slice = AuthSlice::default();
        slice.login_fulfilled(user(), tokens(now.timestamp() - 1));
        assert!(slice.session_expired(now));
    }
}
