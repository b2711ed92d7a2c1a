//! Little-endian field access at fixed offsets.
//!
//! Every record in this protocol is a C struct laid out with natural
//! alignment, so fields live at known offsets. These helpers read and write
//! one field at a time; the caller guarantees the slice is long enough.

pub(crate) fn put_u8(buf: &mut [u8], at: usize, value: u8) {
    buf[at] = value;
}

pub(crate) fn put_u16(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_i32(buf: &mut [u8], at: usize, value: i32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_u16_array(buf: &mut [u8], at: usize, values: &[u16]) {
    for (i, value) in values.iter().enumerate() {
        put_u16(buf, at + i * 2, *value);
    }
}

pub(crate) fn get_u8(buf: &[u8], at: usize) -> u8 {
    buf[at]
}

pub(crate) fn get_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

pub(crate) fn get_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

pub(crate) fn get_i32(buf: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get_are_little_endian() {
        let mut buf = [0u8; 8];
        put_u16(&mut buf, 0, 0x1234);
        put_u32(&mut buf, 4, 0xAABB_CCDD);
        assert_eq!(buf, [0x34, 0x12, 0, 0, 0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(get_u16(&buf, 0), 0x1234);
        assert_eq!(get_u32(&buf, 4), 0xAABB_CCDD);
    }

    #[test]
    fn test_signed_round_trip() {
        let mut buf = [0u8; 4];
        put_i32(&mut buf, 0, -2);
        assert_eq!(get_i32(&buf, 0), -2);
    }
}
