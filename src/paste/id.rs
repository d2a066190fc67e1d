//! Paste Identifier Generation and Validation
//!
//! Identifiers are 8 random bytes rendered as 16 lowercase hexadecimal
//! characters. The random bytes come from the operating system's CSPRNG, so
//! identifiers are unguessable - they double as the paste's only access
//! credential.
//!
//! ## Design Decisions
//!
//! 1. **No collision check**: the 2^64 identifier space is large enough that
//!    generation never consults existing storage. See DESIGN.md.
//! 2. **Identifier doubles as shard selector**: the first two hex characters
//!    pick one of 256 storage shard directories.
//! 3. **Validation happens at the boundary**: callers validate the shape of
//!    externally supplied identifiers with [`is_valid`] before handing them
//!    to the repository; the repository only checks existence.

use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes drawn per identifier.
const ID_BYTES: usize = 8;

/// Length of a rendered identifier in characters (two hex digits per byte).
pub const ID_LEN: usize = 2 * ID_BYTES;

/// Generates a fresh paste identifier.
///
/// Draws 8 bytes from the OS random source and hex-encodes them. The result
/// always matches `^[0-9a-f]{16}$`.
///
/// # Example
///
/// ```
/// let id = fadebin::paste::id::generate();
/// assert_eq!(id.len(), 16);
/// ```
pub fn generate() -> String {
    let mut buf = [0u8; ID_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Checks whether a string is a well-formed paste identifier.
///
/// Accepts exactly 16 characters from `0-9a-f`. Uppercase hex is rejected:
/// identifiers are rendered lowercase and treated as case-sensitive.
pub fn is_valid(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Returns the shard prefix of an identifier (its first two characters).
///
/// The caller must have validated the identifier shape first.
#[inline]
pub fn shard_prefix(id: &str) -> &str {
    &id[..2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        for _ in 0..100 {
            let id = generate();
            assert_eq!(id.len(), ID_LEN);
            assert!(id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
            assert!(is_valid(&id));
        }
    }

    #[test]
    fn test_generate_is_random() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_valid_accepts_lowercase_hex() {
        assert!(is_valid("a1b2c3d4e5f60718"));
        assert!(is_valid("0000000000000000"));
        assert!(is_valid("ffffffffffffffff"));
    }

    #[test]
    fn test_is_valid_rejects_bad_shapes() {
        assert!(!is_valid(""));
        assert!(!is_valid("a1b2c3d4e5f6071")); // too short
        assert!(!is_valid("a1b2c3d4e5f607181")); // too long
        assert!(!is_valid("A1B2C3D4E5F60718")); // uppercase
        assert!(!is_valid("a1b2c3d4e5f6071g")); // non-hex
        assert!(!is_valid("../2c3d4e5f60718")); // path traversal attempt
    }

    #[test]
    fn test_shard_prefix() {
        assert_eq!(shard_prefix("a1b2c3d4e5f60718"), "a1");
    }
}
