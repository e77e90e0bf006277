//! Local authentication-vector generation for the test card
//!
//! Physical and remote cards run the algorithm on-card; the test card
//! computes the vector here from its configured key.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use simsub_core::{SimError, SimResult};

type HmacSha256 = Hmac<Sha256>;

/// Placeholder signed response used when the stack must proceed without a
/// card. Not a cryptographic value.
pub const DUMMY_SRES: [u8; 4] = [0x12, 0x34, 0x56, 0x78];

/// A3/A8 output: signed response plus session key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthVector {
    pub sres: [u8; 4],
    pub kc: [u8; 8],
}

/// Simulated A3/A8 algorithm of the test card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthAlgorithm {
    /// XOR test algorithm of 3GPP TS 34.108
    #[default]
    XorTest,
    /// HMAC-SHA256 derivation, truncated to SRES and Kc
    HmacSha256,
}

/// Run the configured algorithm over a 16-byte challenge
pub fn generate_vector(
    algorithm: AuthAlgorithm,
    ki: &[u8; 16],
    rand: &[u8; 16],
) -> SimResult<AuthVector> {
    match algorithm {
        AuthAlgorithm::XorTest => {
            let mut res = [0u8; 16];
            for i in 0..16 {
                res[i] = ki[i] ^ rand[i];
            }
            let mut vector = AuthVector {
                sres: [0; 4],
                kc: [0; 8],
            };
            vector.sres.copy_from_slice(&res[0..4]);
            vector.kc.copy_from_slice(&res[4..12]);
            Ok(vector)
        }
        AuthAlgorithm::HmacSha256 => {
            let mut mac = HmacSha256::new_from_slice(ki)
                .map_err(|e| SimError::Unsupported(format!("cannot key HMAC: {}", e)))?;
            mac.update(rand);
            let digest = mac.finalize().into_bytes();
            let mut vector = AuthVector {
                sres: [0; 4],
                kc: [0; 8],
            };
            vector.sres.copy_from_slice(&digest[0..4]);
            vector.kc.copy_from_slice(&digest[4..12]);
            Ok(vector)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_vector() {
        let ki = [0x0fu8; 16];
        let rand = [0xf0u8; 16];
        let vector = generate_vector(AuthAlgorithm::XorTest, &ki, &rand).unwrap();
        assert_eq!(vector.sres, [0xff; 4]);
        assert_eq!(vector.kc, [0xff; 8]);
    }

    #[test]
    fn test_xor_is_deterministic() {
        let ki = [0x42u8; 16];
        let rand: [u8; 16] = core::array::from_fn(|i| i as u8);
        let a = generate_vector(AuthAlgorithm::XorTest, &ki, &rand).unwrap();
        let b = generate_vector(AuthAlgorithm::XorTest, &ki, &rand).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hmac_differs_from_xor() {
        let ki = [0x42u8; 16];
        let rand = [0x17u8; 16];
        let xor = generate_vector(AuthAlgorithm::XorTest, &ki, &rand).unwrap();
        let hmac = generate_vector(AuthAlgorithm::HmacSha256, &ki, &rand).unwrap();
        assert_ne!(xor, hmac);
    }
}
