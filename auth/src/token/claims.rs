use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried in a token payload.
///
/// `user_id`, `email` and `name` are opaque values supplied by the caller.
/// `iat` and `exp` are set by the codec when the token is issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject identifier, serialized as `userId`
    pub user_id: String,

    pub email: String,

    /// Display name
    pub name: String,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create identity claims without timestamps.
    pub fn new(user_id: impl ToString, email: impl ToString, name: impl ToString) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            iat: None,
            exp: None,
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token stops being valid at the exact second of `exp`.
    /// Claims without `exp` never expire.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| current_timestamp >= exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("user123", "alice@example.com", "Alice");
        assert_eq!(claims.user_id, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert!(claims.iat.is_none());
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_wire_field_names() {
        let claims = Claims::new("user123", "alice@example.com", "Alice")
            .with_issued_at(100)
            .with_expiration(200);

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": "user123",
                "email": "alice@example.com",
                "name": "Alice",
                "iat": 100,
                "exp": 200
            })
        );
    }

    #[test]
    fn test_timestamps_are_optional_on_the_wire() {
        let claims: Claims =
            serde_json::from_str(r#"{"userId":"u1","email":"a@b.c","name":"A"}"#).unwrap();
        assert_eq!(claims, Claims::new("u1", "a@b.c", "A"));

        let json = serde_json::to_string(&claims).unwrap();
        assert!(!json.contains("iat"));
        assert!(!json.contains("exp"));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("u1", "a@b.c", "A").with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let claims = Claims::new("u1", "a@b.c", "A");
        assert!(!claims.is_expired(9_999_999_999));
    }
}
