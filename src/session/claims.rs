//! Compact token claims
//!
//! Tokens are `header.payload.signature` with base64url segments. The
//! client only ever reads the payload, and only as a display fallback for
//! the admin flag; the server stays the authority on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serialize};

const TOKEN_HEADER: &str = r#"{"alg":"none","typ":"JWT"}"#;

/// Payload of a session token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "isAdmin", alias = "is_admin", default)]
    pub is_admin: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// True when `exp` is set and not after `now` (unix seconds)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.map(|exp| exp <= now).unwrap_or(false)
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("unexpected subject {}", other))),
    }
}

/// Decode the claims of a compact token
///
/// Returns `None` for anything that is not a three-segment token with a
/// base64url JSON payload. Trailing `=` padding and the standard alphabet
/// are tolerated.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.trim().split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || payload.is_empty() {
        return None;
    }

    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD.decode(normalized).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Build a compact token around the given claims
pub fn encode_token(claims: &TokenClaims, signature: &str) -> String {
    // Serializing a struct of strings, bools and ints cannot fail
    let payload = serde_json::to_vec(claims).unwrap_or_default();
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(TOKEN_HEADER),
        URL_SAFE_NO_PAD.encode(payload),
        URL_SAFE_NO_PAD.encode(signature)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(TOKEN_HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_encode_then_decode() {
        let claims = TokenClaims {
            sub: Some("7".to_string()),
            email: Some("admin@rentdesk.local".to_string()),
            is_admin: true,
            exp: None,
        };
        let token = encode_token(&claims, "secret");
        assert_eq!(decode_claims(&token), Some(claims));
    }

    #[test]
    fn test_decode_accepts_snake_case_flag_and_numeric_sub() {
        let token = token_with_payload(r#"{"sub": 12, "is_admin": true}"#);
        let claims = decode_claims(&token).unwrap();
        assert!(claims.is_admin);
        assert_eq!(claims.sub.as_deref(), Some("12"));
    }

    #[test]
    fn test_decode_tolerates_padding() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"isAdmin":false}"#);
        let token = format!("h.{}.s", payload);
        assert_eq!(decode_claims(&token).map(|c| c.is_admin), Some(false));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(decode_claims("").is_none());
        assert!(decode_claims("not-a-token").is_none());
        assert!(decode_claims("a.b").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
        assert!(decode_claims(&token_with_payload("not json")).is_none());
        assert!(decode_claims("a.b.c.d").is_none());
    }

    #[test]
    fn test_expiry() {
        let claims = TokenClaims {
            exp: Some(100),
            ..Default::default()
        };
        assert!(claims.is_expired_at(100));
        assert!(!claims.is_expired_at(99));
        assert!(!TokenClaims::default().is_expired_at(i64::MAX));
    }
}
