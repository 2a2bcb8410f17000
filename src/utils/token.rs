//! Session token generation.

use base64::Engine as _;

/// Random bytes per session token before encoding.
const TOKEN_LENGTH_BYTES: usize = 32;

/// Generates a random session token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 43-character cookie-safe string.
///
/// # Panics
///
/// Panics if the system random number generator fails.
pub fn generate_session_token() -> String {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
