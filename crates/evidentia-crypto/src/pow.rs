//! Proof-of-work mining and verification. Counts leading
//! hex *digits*, not leading bits, since the difficulty target is
//! phrased in hex-digit terms.

use crate::sha3_256_hex;
use evidentia_core::EvidentiaError;

/// Count the number of leading `'0'` hex characters in a lowercase hex
/// string.
pub fn leading_zero_hex_digits(hex: &str) -> u8 {
    hex.chars().take_while(|c| *c == '0').count() as u8
}

/// `true` iff `hash_hex` begins with at least `difficulty` zero hex
/// digits.
pub fn meets_difficulty(hash_hex: &str, difficulty: u8) -> bool {
    leading_zero_hex_digits(hash_hex) >= difficulty
}

/// Compute the block hash body for a given nonce:
/// `SHA3-256(index ‖ previous_hash ‖ timestamp ‖ merkle_root ‖ nonce ‖ miner)`.
pub fn block_hash_hex(
    index: u64,
    previous_hash: &str,
    timestamp: i64,
    merkle_root_hex: &str,
    nonce: u64,
    miner: &str,
) -> String {
    let mut buf = Vec::new();
    buf.extend_from_slice(&index.to_be_bytes());
    buf.extend_from_slice(previous_hash.as_bytes());
    buf.extend_from_slice(&timestamp.to_be_bytes());
    buf.extend_from_slice(merkle_root_hex.as_bytes());
    buf.extend_from_slice(&nonce.to_be_bytes());
    buf.extend_from_slice(miner.as_bytes());
    sha3_256_hex(&buf)
}

/// A cooperative cancellation check invoked once per nonce attempt.
/// Returns `true` to keep mining, `false` to stop.
pub trait MiningCancellation {
    fn keep_going(&self) -> bool;
}

/// A cancellation check that never cancels, for callers that do not need
/// the cancellation path (tests, one-shot tools).
pub struct NeverCancel;
impl MiningCancellation for NeverCancel {
    fn keep_going(&self) -> bool {
        true
    }
}

/// Iterate `nonce` from 0 upward, accepting the first nonce whose hex hash
/// begins with `difficulty` zero characters. Fails with
/// `MiningExceededBudget` past `max_iterations`, or `Cancelled` if
/// `cancellation` reports cancellation first.
pub fn mine(
    index: u64,
    previous_hash: &str,
    timestamp: i64,
    merkle_root_hex: &str,
    miner: &str,
    difficulty: u8,
    max_iterations: u64,
    cancellation: &dyn MiningCancellation,
) -> Result<(u64, String), EvidentiaError> {
    for nonce in 0..max_iterations {
        if !cancellation.keep_going() {
            return Err(EvidentiaError::Cancelled);
        }
        let hash = block_hash_hex(index, previous_hash, timestamp, merkle_root_hex, nonce, miner);
        if meets_difficulty(&hash, difficulty) {
            return Ok((nonce, hash));
        }
    }
    Err(EvidentiaError::MiningExceededBudget { max_iterations })
}

/// Recompute the block hash for a claimed `(nonce, hash)` pair and check
/// both that the hash matches and that it meets the difficulty target.
pub fn verify(
    index: u64,
    previous_hash: &str,
    timestamp: i64,
    merkle_root_hex: &str,
    nonce: u64,
    miner: &str,
    claimed_hash: &str,
    difficulty: u8,
) -> bool {
    let recomputed =
        block_hash_hex(index, previous_hash, timestamp, merkle_root_hex, nonce, miner);
    recomputed == claimed_hash && meets_difficulty(&recomputed, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zero_digits_counts_correctly() {
        assert_eq!(leading_zero_hex_digits("000abc"), 3);
        assert_eq!(leading_zero_hex_digits("0abc"), 1);
        assert_eq!(leading_zero_hex_digits("abc"), 0);
    }

    #[test]
    fn mine_then_verify_round_trips() {
        let (nonce, hash) = mine(1, "prev", 1000, "root", "miner-1", 2, 1_000_000, &NeverCancel)
            .expect("should find a nonce at difficulty 2");
        assert!(meets_difficulty(&hash, 2));
        assert!(verify(1, "prev", 1000, "root", nonce, "miner-1", &hash, 2));
    }

    #[test]
    fn verify_rejects_a_tampered_claimed_hash() {
        let (nonce, hash) = mine(1, "prev", 1000, "root", "miner-1", 1, 1_000_000, &NeverCancel)
            .unwrap();
        let mut tampered = hash.clone();
        tampered.replace_range(0..1, if tampered.starts_with('0') { "1" } else { "0" });
        assert!(!verify(1, "prev", 1000, "root", nonce, "miner-1", &tampered, 1));
    }

    #[test]
    fn mining_budget_exceeded_returns_an_error() {
        let err = mine(1, "prev", 1000, "root", "miner-1", 64, 10, &NeverCancel).unwrap_err();
        assert!(matches!(err, EvidentiaError::MiningExceededBudget { max_iterations: 10 }));
    }

    struct AlwaysCancel;
    impl MiningCancellation for AlwaysCancel {
        fn keep_going(&self) -> bool {
            false
        }
    }

    #[test]
    fn cancellation_is_observed_before_the_first_attempt() {
        let err = mine(1, "prev", 1000, "root", "miner-1", 1, 1_000_000, &AlwaysCancel)
            .unwrap_err();
        assert!(matches!(err, EvidentiaError::Cancelled));
    }
}
