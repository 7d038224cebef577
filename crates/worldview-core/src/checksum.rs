//! Fletcher-16 checksum used for per-cell change detection.
//!
//! Both running sums start at `0xff`. Bytes are accumulated in chunks of
//! at most 20 so the 16-bit sums cannot overflow; each chunk ends with a
//! fold `(s & 0xff) + (s >> 8)`, and both sums are folded once more at the
//! end. The digest is `sum2 << 8 | sum1`, truncated to 16 bits.
//!
//! This is a heuristic. Distinct buffers can collide, in which case a
//! change goes unreported until the cell changes again or the tracker is
//! reset.

/// Bytes accumulated between folds.
const CHUNK: usize = 20;

const fn fold(sum: u16) -> u16 {
    (sum & 0xff).wrapping_add(sum >> 8)
}

/// Fletcher-16 digest of a byte stream.
pub fn fletcher16(bytes: impl IntoIterator<Item = u8>) -> u16 {
    let mut sum1: u16 = 0xff;
    let mut sum2: u16 = 0xff;
    let mut in_chunk = 0_usize;

    for byte in bytes {
        sum1 = sum1.wrapping_add(u16::from(byte));
        sum2 = sum2.wrapping_add(sum1);
        in_chunk = in_chunk.saturating_add(1);
        if in_chunk == CHUNK {
            sum1 = fold(sum1);
            sum2 = fold(sum2);
            in_chunk = 0;
        }
    }
    if in_chunk > 0 {
        sum1 = fold(sum1);
        sum2 = fold(sum2);
    }
    sum1 = fold(sum1);
    sum2 = fold(sum2);

    let digest = (u32::from(sum2) << 8) | u32::from(sum1);
    u16::try_from(digest & 0xffff).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_vectors() {
        assert_eq!(fletcher16(*b"abcde"), 0xc8f0);
        assert_eq!(fletcher16(*b"abcdef"), 0x2057);
        assert_eq!(fletcher16(0..40_u8), 0xcd0f);
    }

    #[test]
    fn empty_and_zero_buffers() {
        assert_eq!(fletcher16(core::iter::empty()), 0xffff);
        assert_eq!(fletcher16(core::iter::repeat_n(0, 512)), 0xffff);
        assert_eq!(fletcher16(core::iter::repeat_n(1, 512)), 0x0302);
    }

    #[test]
    fn single_byte_flip_changes_digest() {
        let mut buf = vec![7_u8; 512];
        let before = fletcher16(buf.iter().copied());
        if let Some(b) = buf.get_mut(300) {
            *b = 8;
        }
        assert_ne!(before, fletcher16(buf.iter().copied()));
    }
}
