//! Sign-in message canonicalization and Ed25519 signature verification.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

/// The message a wallet signs to authenticate.
///
/// Only `statement` and `nonce` are part of the signed payload. The
/// domain is checked out-of-band against the server's own configured
/// domain, and the public key selects the verification key, so neither
/// untrusted field is embedded in the cryptographic payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninMessage {
    pub domain: String,
    #[serde(rename = "publicKey")]
    pub public_key: String, // base58 Ed25519 public key
    pub nonce: String,
    pub statement: String,
}

impl SigninMessage {
    /// The exact content the wallet must have signed: `statement`
    /// followed by `nonce`, no separator.
    pub fn prepare(&self) -> String {
        format!("{}{}", self.statement, self.nonce)
    }

    /// Verify a base58-encoded detached signature over `prepare()`.
    ///
    /// Returns true only if the signature verifies under the message's
    /// public key. Any decode or verification failure yields false;
    /// nothing escapes this boundary.
    pub fn validate(&self, signature_base58: &str) -> bool {
        let Ok(pubkey_bytes) = bs58::decode(&self.public_key).into_vec() else {
            return false;
        };
        let Ok(pubkey_array) = <[u8; 32]>::try_from(pubkey_bytes) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(&pubkey_array) else {
            return false;
        };

        let Ok(signature_bytes) = bs58::decode(signature_base58).into_vec() else {
            return false;
        };
        let Ok(signature_array) = <[u8; 64]>::try_from(signature_bytes) else {
            return false;
        };
        let signature = Signature::from_bytes(&signature_array);

        verifying_key
            .verify(self.prepare().as_bytes(), &signature)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn generate_test_signing_key() -> SigningKey {
        let mut seed = [0u8; 32];
        rand::fill(&mut seed);
        SigningKey::from_bytes(&seed)
    }

    fn test_message(public_key: &str, nonce: &str) -> SigninMessage {
        SigninMessage {
            domain: "rugwatch.app".to_string(),
            public_key: public_key.to_string(),
            nonce: nonce.to_string(),
            statement: "Sign this message to create your account.".to_string(),
        }
    }

    #[test]
    fn test_prepare_is_statement_then_nonce() {
        let message = test_message("11111111111111111111111111111111", "abc123");
        assert_eq!(
            message.prepare(),
            "Sign this message to create your account.abc123"
        );
    }

    #[test]
    fn test_validate_accepts_correct_signature() {
        let signing_key = generate_test_signing_key();
        let pubkey = bs58::encode(signing_key.verifying_key().as_bytes()).into_string();
        let message = test_message(&pubkey, "nonce-1");

        let signature = signing_key.sign(message.prepare().as_bytes());
        let signature_b58 = bs58::encode(signature.to_bytes()).into_string();

        assert!(message.validate(&signature_b58));
    }

    #[test]
    fn test_validate_is_deterministic() {
        let signing_key = generate_test_signing_key();
        let pubkey = bs58::encode(signing_key.verifying_key().as_bytes()).into_string();
        let message = test_message(&pubkey, "nonce-1");

        let signature = signing_key.sign(message.prepare().as_bytes());
        let signature_b58 = bs58::encode(signature.to_bytes()).into_string();

        assert_eq!(message.validate(&signature_b58), message.validate(&signature_b58));
    }

    #[test]
    fn test_validate_rejects_tampered_nonce() {
        let signing_key = generate_test_signing_key();
        let pubkey = bs58::encode(signing_key.verifying_key().as_bytes()).into_string();
        let message = test_message(&pubkey, "nonce-1");

        let signature = signing_key.sign(message.prepare().as_bytes());
        let signature_b58 = bs58::encode(signature.to_bytes()).into_string();

        // Same signature, different nonce: the signed bytes changed
        let tampered = test_message(&pubkey, "nonce-2");
        assert!(!tampered.validate(&signature_b58));
    }

    #[test]
    fn test_validate_rejects_wrong_key() {
        let signing_key = generate_test_signing_key();
        let other_key = generate_test_signing_key();
        let pubkey = bs58::encode(other_key.verifying_key().as_bytes()).into_string();
        let message = test_message(&pubkey, "nonce-1");

        let signature = signing_key.sign(message.prepare().as_bytes());
        let signature_b58 = bs58::encode(signature.to_bytes()).into_string();

        assert!(!message.validate(&signature_b58));
    }

    #[test]
    fn test_validate_rejects_garbage_without_panicking() {
        let message = test_message("not-base58-0OIl", "nonce");
        assert!(!message.validate("also not base58 0OIl"));

        // Valid base58 but wrong lengths
        let message = test_message(&bs58::encode(b"short").into_string(), "nonce");
        assert!(!message.validate(&bs58::encode([0u8; 16]).into_string()));
    }
}
