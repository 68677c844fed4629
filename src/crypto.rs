//! Obscuring codec for stored passwords.
//!
//! Secrets are XORed with a 3-byte token, repeating the token over the
//! plaintext. This hides a password from a casual glance at a listing and
//! nothing more: anyone holding the ciphertext can recover the token.

use thiserror::Error;

/// Number of bytes in an obscuring token.
pub const TOKEN_LEN: usize = 3;

/// Returned when a secret is decoded with a token other than the one it was
/// encoded with.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Decode failed")]
pub struct DecodeFailed;

/// Obscure `plaintext` with `token`.
pub fn encode(plaintext: &[u8], token: &[u8; TOKEN_LEN]) -> Vec<u8> {
    plaintext
        .iter()
        .zip(token.iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect()
}

/// Reverse [`encode`]. The transform is its own inverse, so this only yields
/// the original bytes when `token` is the one used to encode.
pub fn decode(ciphertext: &[u8], token: &[u8; TOKEN_LEN]) -> Vec<u8> {
    encode(ciphertext, token)
}

/// Decode with a caller-supplied candidate token, failing unless it matches
/// the token stored alongside the ciphertext.
pub fn decode_checked(
    ciphertext: &[u8],
    stored: &[u8; TOKEN_LEN],
    candidate: &[u8],
) -> Result<Vec<u8>, DecodeFailed> {
    if candidate != stored.as_slice() {
        return Err(DecodeFailed);
    }
    Ok(decode(ciphertext, stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_repeats_token() {
        let token = *b"abc";
        let encoded = encode(b"aaaa", &token);

        assert_eq!(encoded, vec![0, b'a' ^ b'b', b'a' ^ b'c', 0]);
    }

    #[test]
    fn test_encode_preserves_length() {
        let token = *b"key";
        assert!(encode(b"", &token).is_empty());
        assert_eq!(encode(b"Secr3t!", &token).len(), 7);
    }

    #[test]
    fn test_decode_checked_rejects_wrong_token() {
        let stored = *b"abc";
        let ciphertext = encode(b"Secr3t!", &stored);

        assert_eq!(decode_checked(&ciphertext, &stored, b"xyz"), Err(DecodeFailed));
        assert_eq!(decode_checked(&ciphertext, &stored, b"ab"), Err(DecodeFailed));
        assert_eq!(
            decode_checked(&ciphertext, &stored, b"abc").unwrap(),
            b"Secr3t!".to_vec()
        );
    }

    proptest! {
        #[test]
        fn property_round_trip(plaintext in proptest::collection::vec(any::<u8>(), 0..64), token in any::<[u8; 3]>()) {
            let ciphertext = encode(&plaintext, &token);
            prop_assert_eq!(decode(&ciphertext, &token), plaintext);
        }

        #[test]
        fn property_wrong_token_never_decodes(plaintext in proptest::collection::vec(any::<u8>(), 0..64), stored in any::<[u8; 3]>(), candidate in any::<[u8; 3]>()) {
            prop_assume!(stored != candidate);
            let ciphertext = encode(&plaintext, &stored);
            prop_assert_eq!(decode_checked(&ciphertext, &stored, &candidate), Err(DecodeFailed));
        }
    }
}
