use crate::error::ClientError;
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

/// Claims the front-end reads from a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(deserialize_with = "crate::models::string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decode token claims without validation.
///
/// Note: This does NOT verify the signature. The result is only good for
/// display and routing decisions; every backend call re-validates the token.
pub fn decode_token_claims(token: &str) -> Result<TokenClaims, ClientError> {
    let parts: Vec<&str> = token.split('.').collect();

    if parts.len() != 3 {
        return Err(ClientError::MalformedSession(
            "expected three dot-separated segments".to_string(),
        ));
    }

    // Tokens minted by older services use the standard alphabet with padding.
    let segment = parts[1]
        .trim_end_matches('=')
        .replace('+', "-")
        .replace('/', "_");

    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| ClientError::MalformedSession(format!("payload is not base64: {}", e)))?;

    serde_json::from_slice(&payload)
        .map_err(|e| ClientError::MalformedSession(format!("payload is not valid claims: {}", e)))
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use base64::{engine::general_purpose, Engine as _};

    /// Build an unsigned token around an arbitrary JSON payload.
    pub(crate) fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::token_with_payload;
    use super::*;

    #[test]
    fn decodes_url_safe_payload() {
        let token = token_with_payload(&serde_json::json!({
            "id": 12,
            "email": "viewer@example.com",
            "exp": 9_999_999_999i64
        }));

        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.id, "12");
        assert_eq!(claims.email, "viewer@example.com");
        assert_eq!(claims.exp, Some(9_999_999_999));
    }

    #[test]
    fn decodes_padded_standard_alphabet() {
        let payload = general_purpose::STANDARD.encode(r#"{"id":"u1","email":"a@b.co"}"#);
        let token = format!("h.{}.s", payload);

        let claims = decode_token_claims(&token).unwrap();
        assert_eq!(claims.id, "u1");
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            decode_token_claims("not-a-token"),
            Err(ClientError::MalformedSession(_))
        ));
        assert!(matches!(
            decode_token_claims("a.%%%.c"),
            Err(ClientError::MalformedSession(_))
        ));
        let no_email = token_with_payload(&serde_json::json!({ "id": 1 }));
        assert!(matches!(
            decode_token_claims(&no_email),
            Err(ClientError::MalformedSession(_))
        ));
    }
}
