//! Share Tokens
//!
//! Public share links are addressed by a random alphanumeric token.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{LoFieldError, Result};

/// Length of generated tokens
pub const DEFAULT_TOKEN_LENGTH: usize = 12;

/// Shortest token accepted
pub const MIN_TOKEN_LENGTH: usize = 8;

/// Longest token accepted
pub const MAX_TOKEN_LENGTH: usize = 64;

/// Generate a share token of [`DEFAULT_TOKEN_LENGTH`] characters
pub fn generate_share_token() -> String {
    generate_share_token_with(&mut rand::thread_rng(), DEFAULT_TOKEN_LENGTH)
}

/// Generate a `len`-character `[A-Za-z0-9]` token from `rng`
pub fn generate_share_token_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Check token length and alphabet
pub fn is_valid_share_token(token: &str) -> bool {
    (MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&token.len())
        && token.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Public URL path for a share token
pub fn share_path(token: &str) -> Result<String> {
    if !is_valid_share_token(token) {
        return Err(LoFieldError::InvalidShareToken {
            token: token.to_string(),
        });
    }
    Ok(format!("/share/{token}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_token_shape() {
        let token = generate_share_token();
        assert_eq!(token.len(), DEFAULT_TOKEN_LENGTH);
        assert!(is_valid_share_token(&token));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_share_token_with(&mut StdRng::seed_from_u64(7), 16);
        let b = generate_share_token_with(&mut StdRng::seed_from_u64(7), 16);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_share_token(), generate_share_token());
    }

    #[test]
    fn test_validation() {
        assert!(is_valid_share_token("abcDEF123"));
        assert!(!is_valid_share_token("short"));
        assert!(!is_valid_share_token("has-dash-token"));
        assert!(!is_valid_share_token(&"a".repeat(65)));
    }

    #[test]
    fn test_share_path() {
        assert_eq!(share_path("abcDEF123").unwrap(), "/share/abcDEF123");
        let err = share_path("../etc/passwd").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SHARE_TOKEN");
    }
}
