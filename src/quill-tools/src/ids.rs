//! Ordered identifier minting.
//!
//! Tool calls, turns, and conversation records need identifiers that sort
//! in creation order. An [`IdMinter`] packs a millisecond timestamp and a
//! per-process counter into one atomic word and renders both fixed-width
//! base-36, so the resulting strings are lexicographically ordered and
//! strictly increasing even within a single millisecond.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Low bits reserved for the within-millisecond counter.
const COUNTER_BITS: u32 = 20;
const COUNTER_MASK: u64 = (1 << COUNTER_BITS) - 1;

/// Rendered digits for the millisecond part (36^9 ms reaches past year 5000).
const MILLIS_DIGITS: usize = 9;
/// Rendered digits for the counter part.
const COUNTER_DIGITS: usize = 4;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mints lexicographically ordered, process-unique identifiers.
#[derive(Debug)]
pub struct IdMinter {
    prefix: String,
    state: AtomicU64,
}

impl IdMinter {
    /// Create a minter. The prefix is prepended verbatim to every id, so
    /// ids from one minter sort in creation order.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            state: AtomicU64::new(0),
        }
    }

    /// Mint the next identifier.
    pub fn mint(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let floor = now << COUNTER_BITS;

        let packed = loop {
            let prev = self.state.load(Ordering::Relaxed);
            let candidate = if floor > prev { floor } else { prev + 1 };
            if self
                .state
                .compare_exchange(prev, candidate, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                break candidate;
            }
        };

        let millis = packed >> COUNTER_BITS;
        let counter = packed & COUNTER_MASK;
        format!(
            "{}{}{}",
            self.prefix,
            to_base36(millis, MILLIS_DIGITS),
            to_base36(counter, COUNTER_DIGITS)
        )
    }
}

/// Render `value` as fixed-width base-36, zero-padded.
fn to_base36(mut value: u64, width: usize) -> String {
    let mut digits = vec![b'0'; width];
    let mut idx = width;
    while value > 0 && idx > 0 {
        idx -= 1;
        digits[idx] = BASE36[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ordered() {
        let minter = IdMinter::new("call_");
        let ids: Vec<String> = (0..1000).map(|_| minter.mint()).collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }

        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn ids_carry_the_prefix_and_fixed_width() {
        let minter = IdMinter::new("turn_");
        let id = minter.mint();
        assert!(id.starts_with("turn_"));
        assert_eq!(id.len(), "turn_".len() + MILLIS_DIGITS + COUNTER_DIGITS);
    }

    #[test]
    fn base36_is_zero_padded_and_ordered() {
        assert_eq!(to_base36(0, 4), "0000");
        assert_eq!(to_base36(35, 4), "000z");
        assert_eq!(to_base36(36, 4), "0010");
        assert!(to_base36(35, 4) < to_base36(36, 4));
    }

    #[test]
    fn minting_from_threads_never_collides() {
        use std::sync::Arc;

        let minter = Arc::new(IdMinter::new("x"));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let minter = minter.clone();
            handles.push(std::thread::spawn(move || {
                (0..250).map(|_| minter.mint()).collect::<Vec<_>>()
            }));
        }

        let mut all: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
    }
}
