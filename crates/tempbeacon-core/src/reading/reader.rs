use super::error::DecodeError;
use super::layout;

pub struct ReadingReader<'a> {
    payload: &'a [u8],
}

impl<'a> ReadingReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// Readings are fixed-size; anything else is a framing problem of the
    /// transport and is rejected before any field is touched.
    pub fn require_exact_len(&self) -> Result<(), DecodeError> {
        if self.payload.len() != layout::READING_SIZE {
            return Err(self.malformed());
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or_else(|| self.malformed())
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, DecodeError> {
        let bytes: [u8; 2] = self
            .read_slice(range)?
            .try_into()
            .map_err(|_| self.malformed())?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_i32_be(&self, range: std::ops::Range<usize>) -> Result<i32, DecodeError> {
        let bytes: [u8; 4] = self
            .read_slice(range)?
            .try_into()
            .map_err(|_| self.malformed())?;
        Ok(i32::from_be_bytes(bytes))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.payload.get(range).ok_or_else(|| self.malformed())
    }

    fn malformed(&self) -> DecodeError {
        DecodeError::MalformedLength {
            expected: layout::READING_SIZE,
            actual: self.payload.len(),
        }
    }
}
