//! Unsigned lexicographic ordering on byte sequences, used exclusively to
//! sort struct field sub-digests before composing a struct's hash.
//! Grounded on `_bytearray_comparator` in `ionhash/hasher.py`.

use std::cmp::Ordering;

/// Compares two byte strings lexicographically as sequences of unsigned
/// octets. If one is a strict prefix of the other, the shorter compares
/// less -- equivalent to comparing `(byte, byte, ..., len)` tuples, which
/// is exactly what `[u8]`'s own `Ord` impl already does; this function
/// exists as a named, documented entry point mirroring the original's
/// standalone comparator rather than relying on an implicit trait impl.
pub fn compare_digests(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Sorts `field_hashes` in place under [`compare_digests`].
pub fn sort_field_hashes(field_hashes: &mut [Vec<u8>]) {
    field_hashes.sort_by(|a, b| compare_digests(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn equal_sequences_compare_equal() {
        assert_eq!(compare_digests(&[1, 2, 3], &[1, 2, 3]), Ordering::Equal);
    }

    #[test]
    fn shorter_prefix_compares_less() {
        assert_eq!(compare_digests(&[1, 2], &[1, 2, 3]), Ordering::Less);
        assert_eq!(compare_digests(&[1, 2, 3], &[1, 2]), Ordering::Greater);
    }

    #[test]
    fn compares_as_unsigned_octets() {
        // 0x80 is "negative" as i8 but must compare greater than 0x7F.
        assert_eq!(compare_digests(&[0x7F], &[0x80]), Ordering::Less);
    }

    #[test]
    fn sort_is_stable_under_equal_keys() {
        let mut hashes = vec![vec![3u8], vec![1u8], vec![2u8]];
        sort_field_hashes(&mut hashes);
        assert_eq!(hashes, vec![vec![1u8], vec![2u8], vec![3u8]]);
    }
}
