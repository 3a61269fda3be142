//! Cursor discipline: a single mutable position threaded through every
//! decoder instead of the source's `(value, new_offset)` tuple-returning
//! helpers (`itamae._mpdu._unpack_from_`).

use byteorder::{ByteOrder, LittleEndian};

/// A read-only view over a byte slice with an advancing read position.
///
/// All multi-byte reads are little-endian, matching the wire format and
/// `itamae._mpdu._S2F_`'s `struct` formats (always prefixed `=`, native
/// byte count, little-endian per the source's host assumption carried
/// forward explicitly here).
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

/// Raised when a read would run past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedBuffer {
    pub offset: usize,
    pub need: usize,
    pub have: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], TruncatedBuffer> {
        if self.pos + n > self.buf.len() {
            return Err(TruncatedBuffer {
                offset: self.pos,
                need: n,
                have: self.buf.len().saturating_sub(self.pos),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, TruncatedBuffer> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, TruncatedBuffer> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, TruncatedBuffer> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, TruncatedBuffer> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    /// Reads a fixed-size byte array (e.g. a 6-byte hardware address).
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], TruncatedBuffer> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Reads `n` bytes and returns a zero-copy view into the input buffer.
    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8], TruncatedBuffer> {
        self.take(n)
    }

    /// The unread remainder of the buffer, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_fields() {
        let mut c = Cursor::new(&[0xD4, 0x00, 0x2A, 0x00]);
        assert_eq!(c.read_u8().unwrap(), 0xD4);
        assert_eq!(c.read_u8().unwrap(), 0x00);
        assert_eq!(c.read_u16().unwrap(), 0x002A);
        assert_eq!(c.position(), 4);
    }

    #[test]
    fn truncated_read_reports_need_and_have() {
        let mut c = Cursor::new(&[0x01]);
        let err = c.read_u16().unwrap_err();
        assert_eq!(err, TruncatedBuffer { offset: 0, need: 2, have: 1 });
    }

    #[test]
    fn read_array_advances_by_exact_width() {
        let mut c = Cursor::new(&[1, 2, 3, 4, 5, 6, 7]);
        let addr: [u8; 6] = c.read_array().unwrap();
        assert_eq!(addr, [1, 2, 3, 4, 5, 6]);
        assert_eq!(c.remaining(), 1);
    }
}
