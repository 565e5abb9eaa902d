use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

use crate::common::error::{QRError, QRResult};
use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

impl Mode {
    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    // Shift JIS double byte char to its 13 bit value
    #[inline]
    fn kanji_value(chunk: &[u8]) -> u16 {
        let sjis = ((chunk[0] as u16) << 8) | chunk[1] as u16;
        debug_assert!(is_kanji(sjis), "Invalid kanji data: {sjis:#06x}");
        let off = if sjis <= 0x9FFC { sjis - 0x8140 } else { sjis - 0xC140 };
        (off >> 8) * 0xC0 + (off & 0xFF)
    }

    // Number of source bytes consumed per encoded chunk
    pub fn chunk_size(&self) -> usize {
        match self {
            Self::Numeric => 3,
            Self::Alphanumeric | Self::Kanji => 2,
            Self::Byte => 1,
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => {
                debug_assert!(len == 2, "Kanji chunk must be a double byte char: {len}");
                Self::kanji_value(data)
            }
        }
    }

    // Bit length of an encoded chunk of len source bytes
    pub fn chunk_bit_len(&self, len: usize) -> usize {
        match self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => 8,
            Self::Kanji => 13,
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
            Self::Kanji => false,
        }
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => (len / 2) * 13,
        }
    }
}

fn is_kanji(sjis: u16) -> bool {
    matches!(sjis, 0x8140..=0x9FFC | 0xE040..=0xEBBF)
}


// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub mode: Mode,
    pub mode_bits: usize,
    pub len_bits: usize,
    pub data: Cow<'a, [u8]>,
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, mode_bits: usize, len_bits: usize, data: &'a [u8]) -> Self {
        Self { mode, mode_bits, len_bits, data: Cow::Borrowed(data) }
    }

    // Single segment in the requested mode. Kanji input is UTF-8 text which is
    // converted to Shift JIS double byte chars.
    pub fn with_mode(mode: Mode, ver: Version, data: &'a [u8]) -> QRResult<Self> {
        let mode_bits = ver.mode_bits();
        let len_bits = ver.char_cnt_bits(mode);
        if mode != Mode::Kanji {
            if !data.iter().all(|b| mode.contains(*b)) {
                return Err(QRError::InvalidChar);
            }
            return Ok(Self::new(mode, mode_bits, len_bits, data));
        }

        let text = std::str::from_utf8(data).map_err(|_| QRError::InvalidChar)?;
        let (sjis, _, had_errors) = SHIFT_JIS.encode(text);
        if had_errors || sjis.len() != text.chars().count() * 2 {
            return Err(QRError::InvalidChar);
        }
        if !sjis.chunks_exact(2).all(|c| is_kanji(((c[0] as u16) << 8) | c[1] as u16)) {
            return Err(QRError::InvalidChar);
        }
        Ok(Self { mode, mode_bits, len_bits, data: Cow::Owned(sjis.into_owned()) })
    }

    pub fn char_count(&self) -> usize {
        match self.mode {
            Mode::Kanji => self.data.len() / 2,
            _ => self.data.len(),
        }
    }

    pub fn bit_len(&self) -> usize {
        self.mode_bits + self.len_bits + self.mode.encoded_len(self.data.len())
    }
}
