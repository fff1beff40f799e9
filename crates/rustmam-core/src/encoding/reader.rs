use crate::encoding::primitives::{read_be16, read_be32, read_be64};
use crate::DecodeError;

#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .buf
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..start + len])
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_exact(len).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    pub fn read_be_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(read_be16(self.read_array()?))
    }

    pub fn read_be_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(read_be32(self.read_array()?))
    }

    pub fn read_be_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(read_be64(self.read_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::Reader;
    use crate::DecodeError;

    #[test]
    fn reader_reads_values() {
        let mut r = Reader::new(&[1, 2, 3, 4, 5, 0x01, 0x02]);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_exact(2).unwrap(), &[2, 3]);
        r.skip(2).unwrap();
        assert_eq!(r.read_be_u16().unwrap(), 0x0102);
        assert!(r.is_empty());
    }

    #[test]
    fn reader_bounds() {
        let mut r = Reader::new(&[1, 2, 3]);
        assert_eq!(r.read_be_u32().unwrap_err(), DecodeError::UnexpectedEof);
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_be_u16().unwrap(), 0x0102);
        assert_eq!(r.read_be_u16().unwrap_err(), DecodeError::UnexpectedEof);
    }
}
