/// Position of the first stream bit inside each byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitOrder {
    /// First bit goes to the most significant position (`0001` packs to `0x10`).
    #[default]
    MsbFirst,
    /// First bit goes to the least significant position (`0001` packs to `0x08`).
    LsbFirst,
}

impl BitOrder {
    fn mask(self, offset: u32) -> u8 {
        match self {
            BitOrder::MsbFirst => 0x80 >> offset,
            BitOrder::LsbFirst => 1 << offset,
        }
    }
}

/// Packs a sequence of bits into bytes, zero-padding the last byte.
#[derive(Debug)]
pub struct BitWriter {
    bytes: Vec<u8>,
    buf: u8,
    bits_in_buf: u32,
    bit_count: usize,
    order: BitOrder,
}

impl BitWriter {
    pub fn new(order: BitOrder) -> Self {
        Self::with_capacity(order, 0)
    }

    pub fn with_capacity(order: BitOrder, bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            buf: 0,
            bits_in_buf: 0,
            bit_count: 0,
            order,
        }
    }

    pub fn write(&mut self, bit: bool) {
        if bit {
            self.buf |= self.order.mask(self.bits_in_buf);
        }
        self.bits_in_buf += 1;
        self.bit_count += 1;

        if self.bits_in_buf == 8 {
            self.bytes.push(self.buf);
            self.buf = 0;
            self.bits_in_buf = 0;
        }
    }

    pub fn write_all(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write(bit);
        }
    }

    /// Number of bits written so far, excluding padding.
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Flush the partial byte, padded with zero bits, and return the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_buf > 0 {
            self.bytes.push(self.buf);
        }
        self.bytes
    }
}

/// Reads bits one at a time from a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    byte_pos: usize,
    bit_pos: u32,
    order: BitOrder,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8], order: BitOrder) -> Self {
        Self {
            bytes,
            byte_pos: 0,
            bit_pos: 0,
            order,
        }
    }

    /// Next bit, or `None` once every bit of every byte has been consumed.
    pub fn read(&mut self) -> Option<bool> {
        let byte = *self.bytes.get(self.byte_pos)?;
        let bit = byte & self.order.mask(self.bit_pos) != 0;

        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }

        Some(bit)
    }

    pub fn remaining(&self) -> usize {
        (self.bytes.len() - self.byte_pos) * 8 - self.bit_pos as usize
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(text: &str) -> Vec<bool> {
        text.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn pads_to_whole_byte() {
        let mut writer = BitWriter::new(BitOrder::MsbFirst);
        writer.write_all(&bits("0001"));
        assert_eq!(writer.bit_count(), 4);
        assert_eq!(writer.finish(), vec![0x10]);

        let mut writer = BitWriter::new(BitOrder::LsbFirst);
        writer.write_all(&bits("0001"));
        assert_eq!(writer.finish(), vec![0x08]);
    }

    #[test]
    fn no_padding_byte_on_exact_boundary() {
        let mut writer = BitWriter::new(BitOrder::MsbFirst);
        writer.write_all(&bits("1010101111001101"));
        assert_eq!(writer.finish(), vec![0xab, 0xcd]);

        assert!(BitWriter::new(BitOrder::MsbFirst).finish().is_empty());
    }

    #[test]
    fn reader_yields_every_bit() {
        let mut reader = BitReader::new(&[0xab, 0x01], BitOrder::MsbFirst);
        assert_eq!(reader.remaining(), 16);
        let first: Vec<bool> = reader.by_ref().take(8).collect();
        assert_eq!(first, bits("10101011"));
        assert_eq!(reader.remaining(), 8);
        let rest: Vec<bool> = reader.collect();
        assert_eq!(rest, bits("00000001"));

        let lsb: Vec<bool> = BitReader::new(&[0x01], BitOrder::LsbFirst).collect();
        assert_eq!(lsb, bits("10000000"));
    }
}
