use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The only claim the client reads; everything else stays opaque.
#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Extracts the expiry instant from a JWT access token without verifying the
/// signature (the server does that); returns `None` when the token does not
/// decode to a payload with an `exp` claim.
#[must_use]
pub fn token_expires_at(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}

/// Returns `true` when the token's `exp` claim lies at or before `now`.
///
/// An undecodable token counts as expired: the guard falls back to forcing a
/// re-login rather than sending requests the server will reject anyway.
#[must_use]
pub fn token_is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match token_expires_at(token) {
        Some(expires_at) => expires_at <= now,
        None => true,
    }
}

#[cfg(test)]
pub(crate) fn make_token(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{exp}}}"#));
    format!("{header}.{payload}.sig")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn past_exp_is_expired() {
        let now = Utc::now();
        let token = make_token(now.timestamp() - 60);
        assert!(token_is_expired(&token, now));
    }

    #[test]
    fn future_exp_is_not_expired() {
        let now = Utc::now();
        let token = make_token(now.timestamp() + 3600);
        assert!(!token_is_expired(&token, now));
    }

    #[test]
    fn garbage_counts_as_expired() {
        let now = Utc::now();
        assert!(token_is_expired("not-a-jwt", now));
        assert!(token_is_expired("a.b.c", now));
        assert!(token_is_expired("", now));
    }

    #[test]
    fn expiry_instant_round_trips() {
        let exp = 1_900_000_000;
        let token = make_token(exp);
        assert_eq!(
            token_expires_at(&token).map(|dt| dt.timestamp()),
            Some(exp)
        );
    }
}
