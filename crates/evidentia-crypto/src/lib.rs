//! SHA3-256 hashing, the canonical artifact byte serializer, the Merkle
//! tree, and proof-of-work mining/verification, counting leading hex
//! *digits* rather than leading bits.

pub mod canonical;
pub mod merkle;
pub mod pow;

use sha3::{Digest, Sha3_256};

/// SHA3-256 over arbitrary bytes, returned as a 32-byte array.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

pub fn sha3_256_hex(data: &[u8]) -> String {
    hex::encode(sha3_256(data))
}
