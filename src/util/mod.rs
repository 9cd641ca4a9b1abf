//! Internal utility functions and helpers.
//!
//! Fixed-width little-endian field access on byte slices, used to keep
//! descriptor records inside the managed buffer without `unsafe`.
//! It is an implementation detail and not part of the public API.

/// Reads a little-endian `u64` at `at`.
pub(crate) fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(raw)
}

/// Reads a little-endian `u32` at `at`.
pub(crate) fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(raw)
}

/// Writes `value` as a little-endian `u64` at `at`.
pub(crate) fn write_u64(bytes: &mut [u8], at: usize, value: u64) {
    bytes[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

/// Writes `value` as a little-endian `u32` at `at`.
pub(crate) fn write_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_do_not_overlap() {
        let mut buf = [0u8; 12];
        write_u64(&mut buf, 0, 0x0102_0304_0506_0708);
        write_u32(&mut buf, 8, 0xAABB_CCDD);

        assert_eq!(buf[0], 0x08);
        assert_eq!(read_u64(&buf, 0), 0x0102_0304_0506_0708);
        assert_eq!(read_u32(&buf, 8), 0xAABB_CCDD);
    }
}
