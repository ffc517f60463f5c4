/// Reads a big-endian number at `$start`, `None` when the slice is too short.
#[macro_export]
macro_rules! read_as {
    ($ty:ty, $buf:expr, $start:expr) => {{
        let start = $start;
        let end = start + std::mem::size_of::<$ty>();
        $buf.get(start..end)
            .and_then(|bytes| bytes.try_into().ok())
            .map(<$ty>::from_be_bytes)
    }};
}

/// Sign-regulated integer of 1 to 8 octets.
pub(crate) fn grib_int_from_bytes(bytes: &[u8]) -> Option<i64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    let raw = bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    let sign_mask = 1u64 << (bytes.len() * 8 - 1);
    let magnitude = (raw & !sign_mask) as i64;

    if raw & sign_mask != 0 {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

/// Unsigned big-endian integer of 1 to 8 octets.
pub(crate) fn uint_from_bytes(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    Some(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Bit cursor over a byte slice, reading MSB first.
#[derive(Debug, Clone)]
pub(crate) struct BitReader<'a> {
    slice: &'a [u8],
    pos: usize,
    offset: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(slice: &'a [u8]) -> Self {
        Self {
            slice,
            pos: 0,
            offset: 0,
        }
    }

    /// Current `(byte, bit)` position.
    pub(crate) fn position(&self) -> (usize, usize) {
        (self.pos, self.offset)
    }

    pub(crate) fn remaining_bits(&self) -> usize {
        (self.slice.len() * 8).saturating_sub(self.pos * 8 + self.offset)
    }

    /// Reads `width` bits (at most 64) as an unsigned integer. A zero width
    /// yields 0 without moving the cursor.
    pub(crate) fn read(&mut self, width: usize) -> Option<u64> {
        if width == 0 {
            return Some(0);
        }
        if width > 64 || width > self.remaining_bits() {
            return None;
        }

        let mut val = 0u64;
        let mut left = width;
        while left > 0 {
            let available = 8 - self.offset;
            let take = available.min(left);
            let shift = available - take;
            let bits = (self.slice[self.pos] >> shift) & ((1u16 << take) - 1) as u8;

            val = (val << take) | u64::from(bits);
            left -= take;
            self.offset += take;
            if self.offset == 8 {
                self.offset = 0;
                self.pos += 1;
            }
        }

        Some(val)
    }
}

/// Stream of fixed-width values; ends when the slice is exhausted. A zero
/// width never ends on its own, so callers bound it with `take`.
pub(crate) struct BitwiseIterator<'a> {
    reader: BitReader<'a>,
    size: usize,
}

impl<'a> BitwiseIterator<'a> {
    pub(crate) fn new(slice: &'a [u8], size: usize) -> Self {
        Self {
            reader: BitReader::new(slice),
            size,
        }
    }
}

impl<'a> Iterator for BitwiseIterator<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read(self.size)
    }
}

/// Octets needed to hold `count` values of `num_bits` bits.
pub(crate) fn octet_length(num_bits: usize, count: usize) -> usize {
    (num_bits * count + 7) / 8
}

/// Packs `values` MSB first at `width` bits each, zero padding the last octet.
#[cfg(test)]
pub(crate) fn pack_bits(values: &[u64], width: usize) -> Vec<u8> {
    let mut out = vec![0u8; octet_length(width, values.len())];
    for (i, value) in values.iter().enumerate() {
        for b in 0..width {
            if value >> (width - 1 - b) & 1 == 1 {
                let pos = i * width + b;
                out[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grib_int_from_various_widths() {
        assert_eq!(grib_int_from_bytes(&[0x85]), Some(-5));
        assert_eq!(grib_int_from_bytes(&[0x00, 0x0a]), Some(10));
        assert_eq!(grib_int_from_bytes(&[0x80, 0x00, 0x01]), Some(-1));
        assert_eq!(grib_int_from_bytes(&[0x80, 0x00, 0x00, 0x02]), Some(-2));
        assert_eq!(grib_int_from_bytes(&[]), None);
    }

    #[test]
    fn read_as_is_bounds_checked() {
        let buf = [0x00u8, 0x01, 0x02];
        assert_eq!(read_as!(u16, buf, 1), Some(0x0102));
        assert_eq!(read_as!(u16, buf, 2), None);
        assert_eq!(read_as!(u32, buf, 0), None);
    }

    #[test]
    fn bit_reader_crosses_byte_boundaries() {
        // 101 10101 | 1100 0011
        let data = [0b1011_0101, 0b1100_0011];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read(3), Some(0b101));
        assert_eq!(reader.read(7), Some(0b10101_11));
        assert_eq!(reader.position(), (1, 2));
        assert_eq!(reader.read(6), Some(0b00_0011));
        assert_eq!(reader.read(1), None);
    }

    #[test]
    fn bit_reader_zero_width() {
        let data = [0xff, 0x0f];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read(0), Some(0));
        assert_eq!(reader.position(), (0, 0));
        assert_eq!(reader.read(4), Some(0xf));
        assert_eq!(reader.remaining_bits(), 12);
    }

    #[test]
    fn bit_reader_reads_wide_values() {
        let data = 0x0123_4567_89ab_cdefu64.to_be_bytes();
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(64), Some(0x0123_4567_89ab_cdef));
    }

    #[test]
    fn bitwise_iterator_stops_at_the_end() {
        let data = [0b0001_0010, 0b0011_0100];
        let values: Vec<u64> = BitwiseIterator::new(&data, 4).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn pack_bits_matches_reader() {
        let values = [5, 0, 7, 1, 6];
        let packed = pack_bits(&values, 3);
        assert_eq!(packed.len(), 2);
        let read: Vec<u64> = BitwiseIterator::new(&packed, 3).take(5).collect();
        assert_eq!(read, values);
    }

    #[test]
    fn octet_length_rounds_up() {
        assert_eq!(octet_length(3, 3), 2);
        assert_eq!(octet_length(8, 2), 2);
        assert_eq!(octet_length(0, 10), 0);
    }
}
