use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Access tokens authorize API calls; refresh tokens only mint new pairs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Payload carried by every token this service signs. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    pub kind: TokenKind,
}

impl Claims {
    /// Claims for `user_id` issued at `now`, valid for `ttl`.
    pub fn issue(
        user_id: Uuid,
        kind: TokenKind,
        issuer: &str,
        audience: &str,
        now: OffsetDateTime,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id,
            iat: now.unix_timestamp().max(0) as usize,
            exp: (now + ttl).unix_timestamp().max(0) as usize,
            iss: issuer.to_string(),
            aud: audience.to_string(),
            kind,
        }
    }
}
