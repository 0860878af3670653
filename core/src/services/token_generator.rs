//! Random token minting.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric token of `length` characters
///
/// Uses the thread-local CSPRNG. Callers minting developer tokens pass
/// [`MAX_TOKEN_LENGTH`](crate::domain::MAX_TOKEN_LENGTH) so the result is the
/// longest value still classified as a token.
pub fn generate_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TokenStatus, MAX_TOKEN_LENGTH};

    #[test]
    fn test_generated_token_shape() {
        let token = generate_token(MAX_TOKEN_LENGTH);
        assert_eq!(token.len(), MAX_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(TokenStatus::classify(&token), TokenStatus::Active);
    }

    #[test]
    fn test_generated_tokens_differ() {
        assert_ne!(generate_token(MAX_TOKEN_LENGTH), generate_token(MAX_TOKEN_LENGTH));
    }
}
