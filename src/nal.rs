//! H.264 NAL unit classification and Annex-B framing helpers.
//!
//! The encoder hands the muxer Annex-B data: NAL units separated by a
//! 4-byte start code. The first byte of each unit carries a 5-bit type
//! field; only SPS (7) and PPS (8) get special treatment here.

/// Annex-B start code (4 bytes).
pub const START_CODE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// Length of the Annex-B start code.
pub const START_CODE_LEN: usize = START_CODE.len();

/// NAL unit kind, as far as the muxer cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NalType {
    /// Sequence parameter set (type 7).
    Sps,
    /// Picture parameter set (type 8).
    Pps,
    /// Anything else (coded slices, SEI, ...).
    Other(u8),
}

impl From<u8> for NalType {
    fn from(first_byte: u8) -> Self {
        match first_byte & 0x1F {
            7 => Self::Sps,
            8 => Self::Pps,
            other => Self::Other(other),
        }
    }
}

/// Classify a NAL unit by its first byte.
pub fn unit_type(unit: &[u8]) -> NalType {
    match unit.first() {
        Some(&b) => NalType::from(b),
        None => NalType::Other(0),
    }
}

/// Iterate the NAL units in a buffer of 4-byte-start-code delimited data.
///
/// Yields each unit without its start code. The caller is responsible for
/// checking that the buffer actually begins with a start code; leading
/// garbage before the first start code is skipped here.
pub fn units(buf: &[u8]) -> Units<'_> {
    Units { buf, pos: 0 }
}

/// Iterator over start-code delimited NAL units. See [`units`].
pub struct Units<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for Units<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let start = find_start_code(self.buf, self.pos)? + START_CODE_LEN;
        let end = find_start_code(self.buf, start).unwrap_or(self.buf.len());
        self.pos = end;
        if end > start {
            Some(&self.buf[start..end])
        } else {
            None
        }
    }
}

/// Find the byte offset of the next 4-byte start code at or after `from`.
fn find_start_code(buf: &[u8], from: usize) -> Option<usize> {
    if from >= buf.len() {
        return None;
    }
    buf[from..]
        .windows(START_CODE_LEN)
        .position(|w| w == START_CODE)
        .map(|p| from + p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_low_five_bits() {
        assert_eq!(NalType::from(0x67), NalType::Sps); // 0x67 & 0x1F = 7
        assert_eq!(NalType::from(0x68), NalType::Pps); // 0x68 & 0x1F = 8
        assert_eq!(NalType::from(0x65), NalType::Other(5)); // IDR slice
        assert_eq!(NalType::from(0x41), NalType::Other(1));
    }

    #[test]
    fn unit_type_empty() {
        assert_eq!(unit_type(&[]), NalType::Other(0));
    }

    #[test]
    fn split_single_unit() {
        let buf = [0x00, 0x00, 0x00, 0x01, 0x67, 0xAA, 0xBB];
        let units: Vec<&[u8]> = units(&buf).collect();
        assert_eq!(units, vec![&[0x67, 0xAA, 0xBB][..]]);
    }

    #[test]
    fn split_two_units() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&START_CODE);
        buf.extend_from_slice(&[0x67, 0x42, 0xC0, 0x1F]);
        buf.extend_from_slice(&START_CODE);
        buf.extend_from_slice(&[0x68, 0xCE, 0x38]);

        let units: Vec<&[u8]> = units(&buf).collect();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0], &[0x67, 0x42, 0xC0, 0x1F]);
        assert_eq!(units[1], &[0x68, 0xCE, 0x38]);
    }

    #[test]
    fn split_empty_buffer() {
        assert_eq!(units(&[]).count(), 0);
    }

    #[test]
    fn split_no_start_code() {
        // No start code at all: nothing to yield.
        assert_eq!(units(&[0x67, 0x42]).count(), 0);
    }

    #[test]
    fn unit_bytes_may_contain_zero_runs() {
        // 00 00 00 inside a unit must not be mistaken for a start code.
        let buf = [0x00, 0x00, 0x00, 0x01, 0x67, 0x00, 0x00, 0x00, 0x02];
        let units: Vec<&[u8]> = units(&buf).collect();
        assert_eq!(units, vec![&[0x67, 0x00, 0x00, 0x00, 0x02][..]]);
    }
}
