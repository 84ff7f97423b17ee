//! Bit-level packing for BUFR data sections
//!
//! Section 4 of a BUFR message is a continuous bit stream with no byte
//! alignment between values: each element occupies exactly the bit width its
//! Table B entry declares, most significant bit first. Missing values are
//! encoded as all ones. Character data is written as CCITT IA5 octets,
//! space-padded to the declared width.

use crate::{Error, Result};

/// The all-ones missing indicator for a field of the given width
pub fn missing_pattern(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// MSB-first bit stream writer
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    len_bits: usize,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written so far
    pub fn len_bits(&self) -> usize {
        self.len_bits
    }

    /// Write `width` bits of `value`, most significant bit first
    pub fn write_bits(&mut self, value: u64, width: u32) -> Result<()> {
        if width == 0 || width > 64 {
            return Err(Error::bufr_encoding(format!("invalid bit width {width}")));
        }
        if width < 64 && value >> width != 0 {
            return Err(Error::bufr_encoding(format!(
                "value {value} does not fit in {width} bits"
            )));
        }
        for i in (0..width).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Write the all-ones missing indicator for a field of the given width
    ///
    /// Character fields can be wider than 64 bits, so the pattern is written
    /// in chunks.
    pub fn write_missing(&mut self, width: u32) -> Result<()> {
        let mut left = width;
        while left > 32 {
            self.write_bits(missing_pattern(32), 32)?;
            left -= 32;
        }
        self.write_bits(missing_pattern(left), left)
    }

    /// Write character data space-padded (or truncated) to `width` bits,
    /// which must be a whole number of octets
    pub fn write_chars(&mut self, value: &str, width: u32) -> Result<()> {
        if width % 8 != 0 {
            return Err(Error::bufr_encoding(format!(
                "character width {width} is not a whole number of octets"
            )));
        }
        let len = (width / 8) as usize;
        let bytes = value.as_bytes();
        for i in 0..len {
            let ch = bytes.get(i).copied().unwrap_or(b' ');
            self.write_bits(ch as u64, 8)?;
        }
        Ok(())
    }

    /// Pad with zero bits up to the next octet boundary
    pub fn pad_to_octet(&mut self) {
        while self.len_bits % 8 != 0 {
            self.push_bit(false);
        }
    }

    /// Consume the writer, returning the packed octets
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.pad_to_octet();
        self.buf
    }

    fn push_bit(&mut self, bit: bool) {
        let byte_idx = self.len_bits / 8;
        if byte_idx == self.buf.len() {
            self.buf.push(0);
        }
        if bit {
            self.buf[byte_idx] |= 0x80 >> (self.len_bits % 8);
        }
        self.len_bits += 1;
    }
}

/// MSB-first bit stream reader over packed octets
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos_bits: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos_bits: 0 }
    }

    /// Bits left to read
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.pos_bits
    }

    /// Read `width` bits as an unsigned value, advancing the position
    pub fn read_bits(&mut self, width: u32) -> Result<u64> {
        if width == 0 || width > 64 {
            return Err(Error::bufr_encoding(format!("invalid bit width {width}")));
        }
        if (width as usize) > self.remaining_bits() {
            return Err(Error::bufr_encoding(format!(
                "bit stream exhausted reading {width} bits at offset {}",
                self.pos_bits
            )));
        }
        let mut value = 0u64;
        for _ in 0..width {
            let byte = self.data[self.pos_bits / 8];
            let bit = (byte >> (7 - self.pos_bits % 8)) & 1;
            value = (value << 1) | bit as u64;
            self.pos_bits += 1;
        }
        Ok(value)
    }

    /// Skip `width` bits
    pub fn skip_bits(&mut self, width: u32) -> Result<()> {
        self.read_bits(width).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_single_octet() {
        let mut w = BitWriter::new();
        w.write_bits(0b1011, 4).unwrap();
        w.write_bits(0b0010, 4).unwrap();
        assert_eq!(w.into_bytes(), vec![0b1011_0010]);
    }

    #[test]
    fn test_write_crosses_octet_boundary() {
        let mut w = BitWriter::new();
        w.write_bits(0x5, 3).unwrap();
        w.write_bits(0x1ff, 9).unwrap();
        // 101 111111111 0000 → 1011 1111 1111 0000
        assert_eq!(w.into_bytes(), vec![0xbf, 0xf0]);
    }

    #[test]
    fn test_value_too_wide_rejected() {
        let mut w = BitWriter::new();
        assert!(w.write_bits(0b100, 2).is_err());
        assert!(w.write_bits(0, 0).is_err());
    }

    #[test]
    fn test_missing_pattern_is_all_ones() {
        assert_eq!(missing_pattern(7), 0x7f);
        assert_eq!(missing_pattern(12), 0xfff);
        assert_eq!(missing_pattern(64), u64::MAX);

        let mut w = BitWriter::new();
        w.write_missing(12).unwrap();
        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert_eq!(r.read_bits(12).unwrap(), 0xfff);

        // character fields are wider than a single machine word
        let mut w = BitWriter::new();
        w.write_missing(160).unwrap();
        assert_eq!(w.into_bytes(), vec![0xff; 20]);
    }

    #[test]
    fn test_chars_padded_and_truncated() {
        let mut w = BitWriter::new();
        w.write_chars("AB", 32).unwrap();
        assert_eq!(w.into_bytes(), vec![b'A', b'B', b' ', b' ']);

        let mut w = BitWriter::new();
        w.write_chars("ABCDE", 16).unwrap();
        assert_eq!(w.into_bytes(), vec![b'A', b'B']);

        let mut w = BitWriter::new();
        assert!(w.write_chars("AB", 12).is_err());
    }

    #[test]
    fn test_round_trip_unaligned_sequence() {
        let widths = [7u32, 25, 3, 16, 1, 12];
        let values = [0x55u64, 0x00ff_ee11, 0x2, 0xbeef, 0x1, 0x0abc];

        let mut w = BitWriter::new();
        for (v, bits) in values.iter().zip(widths.iter()) {
            w.write_bits(*v, *bits).unwrap();
        }
        let bytes = w.into_bytes();

        let mut r = BitReader::new(&bytes);
        for (v, bits) in values.iter().zip(widths.iter()) {
            assert_eq!(r.read_bits(*bits).unwrap(), *v);
        }
    }

    #[test]
    fn test_reader_exhaustion() {
        let data = [0xffu8];
        let mut r = BitReader::new(&data);
        r.read_bits(6).unwrap();
        assert_eq!(r.remaining_bits(), 2);
        assert!(r.read_bits(3).is_err());
    }

    #[test]
    fn test_pad_to_octet() {
        let mut w = BitWriter::new();
        w.write_bits(1, 1).unwrap();
        w.pad_to_octet();
        assert_eq!(w.len_bits(), 8);
        assert_eq!(w.into_bytes(), vec![0x80]);
    }
}
