//! Deterministic id schemes:
//! `ART-<base36-millis>-<base36-rand6>`, uppercase; `FACT-…`, `CONFLICT-…`
//! analogous.

use rand::Rng;

const BASE36_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(BASE36_ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 alphabet is ASCII")
}

fn random_base36_6() -> String {
    let mut rng = rand::thread_rng();
    let n: u64 = rng.gen_range(0..36u64.pow(6));
    let mut s = to_base36(n);
    while s.len() < 6 {
        s.insert(0, '0');
    }
    s
}

fn generate_id(prefix: &str, now_millis: i64) -> String {
    let millis = now_millis.max(0) as u64;
    format!("{prefix}-{}-{}", to_base36(millis), random_base36_6())
}

pub fn generate_artifact_id(now_millis: i64) -> String {
    generate_id("ART", now_millis)
}

pub fn generate_fact_id(now_millis: i64) -> String {
    generate_id("FACT", now_millis)
}

pub fn generate_conflict_id(now_millis: i64) -> String {
    generate_id("CONFLICT", now_millis)
}
