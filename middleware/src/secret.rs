//! Shared-secret check for inbound webhook and admin requests.

use tracing::warn;

pub const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";
pub const ALT_SECRET_HEADER: &str = "X-Webhook-Secret";
pub const SECRET_QUERY_PARAM: &str = "secret";

/// Secret values a request presented, one per accepted location.
#[derive(Debug, Clone, Default)]
pub struct SecretCandidates {
    pub header: Option<String>,
    pub alt_header: Option<String>,
    pub query: Option<String>,
}

impl SecretCandidates {
    fn iter(&self) -> impl Iterator<Item = &str> {
        [&self.header, &self.alt_header, &self.query]
            .into_iter()
            .filter_map(|c| c.as_deref())
    }
}

/// Compares two byte strings in time that depends only on their lengths.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Accepts a request when any candidate equals the configured secret.
///
/// With no secret configured, requests are accepted only in development mode and rejected
/// everywhere else.
#[derive(Debug, Clone)]
pub struct SecretVerifier {
    secret: Option<String>,
    development: bool,
}

impl SecretVerifier {
    pub fn new(secret: Option<String>, development: bool) -> Self {
        let secret = secret.filter(|s| !s.is_empty());
        if secret.is_none() {
            if development {
                warn!("No webhook secret configured; accepting unauthenticated requests (development mode)");
            } else {
                warn!("No webhook secret configured; all webhook and admin requests will be rejected");
            }
        }
        Self {
            secret,
            development,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn verify(&self, candidates: &SecretCandidates) -> bool {
        match &self.secret {
            Some(secret) => candidates
                .iter()
                .any(|c| constant_time_eq(c.as_bytes(), secret.as_bytes())),
            None => self.development,
        }
    }
}
