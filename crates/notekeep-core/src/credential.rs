//! Password credentials.
//!
//! Passwords are stretched with PBKDF2-HMAC-SHA256 under a per-user random
//! salt. The stored form is standard base64 of `hash || salt`: the first
//! [`HASH_LEN`] bytes are the digest, everything after is salt.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

use crate::error::CoreError;

/// Width of a derived hash (SHA-256 digest length).
pub const HASH_LEN: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count a production configuration may use.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Default salt length in bytes.
pub const DEFAULT_SALT_LEN: usize = 16;

/// Shortest salt a production configuration may use.
pub const MIN_SALT_LEN: usize = 16;

/// Fixed salt used for decoy derivations when a username is unknown.
const DECOY_SALT: &[u8; DEFAULT_SALT_LEN] = b"notekeep-decoy!!";

/// A decoded credential record.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: [u8; HASH_LEN],
    salt: Vec<u8>,
}

impl Credential {
    /// Build from parts.
    pub fn from_parts(hash: [u8; HASH_LEN], salt: Vec<u8>) -> Self {
        Self { hash, salt }
    }

    /// The derived hash.
    pub fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    /// The salt.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Encode for storage.
    pub fn encode(&self) -> String {
        let mut combined = Vec::with_capacity(HASH_LEN + self.salt.len());
        combined.extend_from_slice(&self.hash);
        combined.extend_from_slice(&self.salt);
        STANDARD.encode(combined)
    }

    /// Decode a stored credential by fixed-width slicing.
    pub fn decode(encoded: &str) -> Result<Self, CoreError> {
        let combined = STANDARD.decode(encoded)?;
        if combined.len() <= HASH_LEN {
            return Err(CoreError::CredentialTooShort(combined.len()));
        }
        let (hash, salt) = combined.split_at(HASH_LEN);
        let mut arr = [0u8; HASH_LEN];
        arr.copy_from_slice(hash);
        Ok(Self {
            hash: arr,
            salt: salt.to_vec(),
        })
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(salt_len={})", self.salt.len())
    }
}

/// Derives and checks password credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
    salt_len: usize,
}

impl PasswordHasher {
    /// Create a hasher with explicit parameters.
    pub const fn new(iterations: u32, salt_len: usize) -> Self {
        Self {
            iterations,
            salt_len,
        }
    }

    /// Iteration count.
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Salt length in bytes.
    pub const fn salt_len(&self) -> usize {
        self.salt_len
    }

    /// Stretch `password` under `salt`. Deterministic.
    pub fn derive(&self, password: &str, salt: &[u8]) -> [u8; HASH_LEN] {
        let mut out = [0u8; HASH_LEN];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, self.iterations, &mut out);
        out
    }

    /// Hash a new password under a fresh random salt.
    pub fn hash(&self, password: &str) -> Credential {
        let mut salt = vec![0u8; self.salt_len];
        rand::thread_rng().fill_bytes(&mut salt);
        let hash = self.derive(password, &salt);
        Credential { hash, salt }
    }

    /// Check `password` against a stored credential.
    ///
    /// The digests are compared in constant time; the work done before the
    /// comparison depends only on the iteration count.
    pub fn verify(&self, password: &str, credential: &Credential) -> bool {
        let candidate = self.derive(password, &credential.salt);
        candidate[..].ct_eq(&credential.hash[..]).into()
    }

    /// Spend the same work as a real verification without a stored record.
    pub fn decoy(&self, password: &str) {
        let _ = self.derive(password, DECOY_SALT);
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS, DEFAULT_SALT_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Low iteration count keeps property runs fast; derivation semantics
    // don't depend on it.
    fn quick() -> PasswordHasher {
        PasswordHasher::new(1_000, DEFAULT_SALT_LEN)
    }

    #[test]
    fn test_pbkdf2_known_vector() {
        // RFC 7914 section 11, PBKDF2-HMAC-SHA256 with c = 1.
        let hasher = PasswordHasher::new(1, DEFAULT_SALT_LEN);
        let out = hasher.derive("passwd", b"salt");
        assert_eq!(
            hex::encode(out),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::default();
        let cred = hasher.hash("pw1");
        assert_eq!(cred.salt().len(), DEFAULT_SALT_LEN);
        assert!(hasher.verify("pw1", &cred));
        assert!(!hasher.verify("pw2", &cred));
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let hasher = quick();
        let a = hasher.hash("same");
        let b = hasher.hash("same");
        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_encode_layout_is_hash_then_salt() {
        let cred = Credential::from_parts([0x11; HASH_LEN], vec![0x22; DEFAULT_SALT_LEN]);
        let raw = STANDARD.decode(cred.encode()).unwrap();
        assert_eq!(raw.len(), HASH_LEN + DEFAULT_SALT_LEN);
        assert!(raw[..HASH_LEN].iter().all(|b| *b == 0x11));
        assert!(raw[HASH_LEN..].iter().all(|b| *b == 0x22));
        assert_eq!(Credential::decode(&cred.encode()).unwrap(), cred);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            Credential::decode("not base64!"),
            Err(CoreError::CredentialEncoding(_))
        ));
        let short = STANDARD.encode([0u8; HASH_LEN]);
        assert!(matches!(
            Credential::decode(&short),
            Err(CoreError::CredentialTooShort(32))
        ));
    }

    #[test]
    fn test_debug_hides_material() {
        let cred = quick().hash("secret");
        let debug = format!("{:?}", cred);
        assert_eq!(debug, "Credential(salt_len=16)");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_derive_is_deterministic(password in ".{0,40}", salt in any::<[u8; 16]>()) {
            let hasher = quick();
            prop_assert_eq!(hasher.derive(&password, &salt), hasher.derive(&password, &salt));
            let cred = Credential::from_parts(hasher.derive(&password, &salt), salt.to_vec());
            prop_assert!(hasher.verify(&password, &cred));
        }

        #[test]
        fn test_distinct_passwords_distinct_hashes(
            p1 in ".{1,40}",
            p2 in ".{1,40}",
            salt in any::<[u8; 16]>(),
        ) {
            prop_assume!(p1 != p2);
            let hasher = quick();
            prop_assert_ne!(hasher.derive(&p1, &salt), hasher.derive(&p2, &salt));
        }
    }
}
