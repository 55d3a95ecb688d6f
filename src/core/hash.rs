//! Slot hashing for directory tables
//!
//! Fibonacci-style hashing: the byte sum of a name is scaled by
//! `0.618033989 * TABLE_CAPACITY` and reduced modulo the table size.
//! The arithmetic is fixed-width 32-bit with wraparound so slot placement is
//! reproducible across builds and platforms.

/// Number of child slots in every directory table
pub const TABLE_CAPACITY: usize = 1024;

/// Golden-ratio multiplier scaled by the table capacity (truncated: 632)
pub const HASH_MULTIPLIER: u32 = (0.618_033_989_f64 * TABLE_CAPACITY as f64) as u32;

/// Preferred slot for `name` in a directory table
///
/// Bytes are summed as signed chars, so names outside ASCII land where the
/// reference hashing puts them.
///
/// # Examples
///
/// ```
/// use slotfs::core::hash::slot_hash;
///
/// assert_eq!(slot_hash("a"), 888);
/// assert_eq!(slot_hash("ab"), slot_hash("ba"));
/// ```
pub fn slot_hash(name: &str) -> usize {
    let sum = name
        .bytes()
        .fold(0i32, |acc, b| acc.wrapping_add(b as i8 as i32));

    ((sum as u32).wrapping_mul(HASH_MULTIPLIER) % TABLE_CAPACITY as u32) as usize
}

/// Slot indices in probe order for a scan starting at `start`
///
/// Visits `[start, TABLE_CAPACITY)` then wraps to `[0, start)`.
pub fn probe_sequence(start: usize) -> impl Iterator<Item = usize> {
    (start..TABLE_CAPACITY).chain(0..start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_matches_reference() {
        assert_eq!(HASH_MULTIPLIER, 632);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(slot_hash(""), 0);
        assert_eq!(slot_hash("a"), 888); // 97 * 632 = 61304
        assert_eq!(slot_hash("ab"), 360); // 195 * 632 = 123240
        assert_eq!(slot_hash("name"), (417 * 632) % 1024);
    }

    #[test]
    fn test_anagrams_collide() {
        assert_eq!(slot_hash("abc"), slot_hash("cba"));
        assert_eq!(slot_hash("listen"), slot_hash("silent"));
    }

    #[test]
    fn test_always_in_range() {
        for name in ["x", "a-very-long-name-with-many-bytes", "ÿÿÿÿ", "日本語"] {
            assert!(slot_hash(name) < TABLE_CAPACITY);
        }
    }

    #[test]
    fn test_high_bytes_summed_signed() {
        // 0xC3 0xA9 ("é") sums to -61 + -87 = -148 as signed chars
        let expected = ((-148i32) as u32).wrapping_mul(632) % 1024;
        assert_eq!(slot_hash("é"), expected as usize);
    }

    #[test]
    fn test_probe_sequence_wraps() {
        let order: Vec<usize> = probe_sequence(1022).take(4).collect();
        assert_eq!(order, vec![1022, 1023, 0, 1]);
        assert_eq!(probe_sequence(0).count(), TABLE_CAPACITY);
        assert_eq!(probe_sequence(517).count(), TABLE_CAPACITY);
    }
}
