use super::layout;

/// Big-endian writer over a fixed reading buffer.
///
/// Field positions come from `layout`; the writer never overlays a struct
/// onto memory.
pub struct ReadingWriter {
    buf: [u8; layout::READING_SIZE],
}

impl ReadingWriter {
    pub fn new() -> Self {
        Self {
            buf: [0u8; layout::READING_SIZE],
        }
    }

    pub fn write_i32_be(&mut self, range: std::ops::Range<usize>, value: i32) -> &mut Self {
        self.buf[range].copy_from_slice(&value.to_be_bytes());
        self
    }

    pub fn write_u16_be(&mut self, range: std::ops::Range<usize>, value: u16) -> &mut Self {
        self.buf[range].copy_from_slice(&value.to_be_bytes());
        self
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> &mut Self {
        self.buf[offset] = value;
        self
    }

    /// Bytes written so far, checksum slot included.
    pub fn as_bytes(&self) -> &[u8; layout::READING_SIZE] {
        &self.buf
    }

    pub fn finish(self) -> [u8; layout::READING_SIZE] {
        self.buf
    }
}

impl Default for ReadingWriter {
    fn default() -> Self {
        Self::new()
    }
}
