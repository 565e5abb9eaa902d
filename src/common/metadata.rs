use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::version_db::*;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    #[default]
    M = 1,
    Q = 2,
    H = 3,
}

impl TryFrom<u8> for ECLevel {
    type Error = QRError;
    fn try_from(value: u8) -> QRResult<Self> {
        match value {
            0 => Ok(Self::L),
            1 => Ok(Self::M),
            2 => Ok(Self::Q),
            3 => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

impl ECLevel {
    // Two bit indicator used by format info
    pub(crate) fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(pub(crate) usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    pub fn new(ver: usize) -> QRResult<Self> {
        match ver {
            1..=40 => Ok(Self(ver)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=40).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    // Center coordinates of alignment patterns along either axis
    pub fn alignment_pattern(self) -> Vec<i16> {
        let v = self.0 as i16;
        if v == 1 {
            return Vec::new();
        }
        let count = v / 7 + 2;
        let step = (v * 8 + count * 3 + 5) / (count * 4 - 4) * 2;
        let last = self.width() as i16 - 7;
        let mut res: Vec<i16> = (0..count - 1).map(|i| last - i * step).collect();
        res.push(6);
        res.reverse();
        res
    }

    // Modules left for data & ecc after function patterns, format & version info
    pub fn raw_data_modules(self) -> usize {
        let v = self.0;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let n = v / 7 + 2;
            res -= (25 * n - 10) * n - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.raw_data_modules() & 7
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_PER_BLOCK[ecl as usize][self.0]
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        BLOCK_COUNT[ecl as usize][self.0]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_per_block(ecl) * self.block_count(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    // Returns (block1_size, block1_count, block2_size, block2_count)
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let blocks = self.block_count(ecl);
        let total = self.total_codewords();
        let block2_count = total % blocks;
        let block1_count = blocks - block2_count;
        let block1_size = total / blocks - self.ecc_per_block(ecl);
        let block2_size = if block2_count > 0 { block1_size + 1 } else { 0 };
        (block1_size, block1_count, block2_size, block2_count)
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        match (mode, self.0) {
            (Mode::Numeric, 1..=9) => 10,
            (Mode::Numeric, 10..=26) => 12,
            (Mode::Numeric, _) => 14,
            (Mode::Alphanumeric, 1..=9) => 9,
            (Mode::Alphanumeric, 10..=26) => 11,
            (Mode::Alphanumeric, _) => 13,
            (Mode::Byte, 1..=9) => 8,
            (Mode::Byte, _) => 16,
            (Mode::Kanji, 1..=9) => 8,
            (Mode::Kanji, 10..=26) => 10,
            (Mode::Kanji, _) => 12,
        }
    }

    // 6 bit version protected by (18, 6) BCH code
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only drawn from version 7: {}", self.0);

        let v = self.0 as u32;
        let mut rem = v;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
        }
        (v << 12) | rem
    }
}

// Format information
//------------------------------------------------------------------------------

// 5 bit format data protected by (15, 5) BCH code and masked
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ecl.format_bits() << 3) | *mask as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_MASK
}

// Metadata
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Metadata {
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl Metadata {
    pub fn new(version: Version, ec_level: ECLevel, mask: Option<MaskPattern>) -> Self {
        Self { version, ec_level, mask }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.mask {
            Some(m) => write!(
                f,
                "{{ Version: {}, Ec level: {:?}, Mask: {} }}",
                self.version, self.ec_level, *m
            ),
            None => {
                write!(f, "{{ Version: {}, Ec level: {:?}, Mask: None }}", self.version, self.ec_level)
            }
        }
    }
}

#[cfg(test)]
mod metadata_tests {
    use test_case::test_case;

    use super::{format_info, ECLevel, Metadata, Version};
    use crate::common::codec::Mode;
    use crate::common::mask::MaskPattern;

    #[test]
    fn test_version_bounds() {
        assert_eq!(Version::new(1), Ok(Version::MIN));
        assert_eq!(Version::new(40), Ok(Version::MAX));
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert_eq!(Version::all().count(), 40);
    }

    #[test]
    fn test_ec_level_try_from() {
        assert_eq!(ECLevel::try_from(0), Ok(ECLevel::L));
        assert_eq!(ECLevel::try_from(3), Ok(ECLevel::H));
        assert!(ECLevel::try_from(4).is_err());
        assert_eq!(ECLevel::default(), ECLevel::M);
    }

    #[test_case(1, &[])]
    #[test_case(2, &[6, 18])]
    #[test_case(7, &[6, 22, 38])]
    #[test_case(22, &[6, 26, 50, 74, 98])]
    #[test_case(32, &[6, 34, 60, 86, 112, 138])]
    #[test_case(36, &[6, 24, 50, 76, 102, 128, 154])]
    #[test_case(40, &[6, 30, 58, 86, 114, 142, 170])]
    fn test_alignment_pattern(ver: usize, exp: &[i16]) {
        assert_eq!(Version(ver).alignment_pattern(), exp);
    }

    #[test_case(1, 26, 0)]
    #[test_case(2, 44, 7)]
    #[test_case(6, 172, 7)]
    #[test_case(7, 196, 0)]
    #[test_case(14, 581, 3)]
    #[test_case(21, 1156, 4)]
    #[test_case(40, 3706, 0)]
    fn test_total_codewords(ver: usize, exp_codewords: usize, exp_rem: usize) {
        let ver = Version(ver);
        assert_eq!(ver.total_codewords(), exp_codewords);
        assert_eq!(ver.remainder_bits(), exp_rem);
    }

    #[test]
    fn test_codeword_tables_balance() {
        for ver in Version::all() {
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let (b1_sz, b1_cnt, b2_sz, b2_cnt) = ver.data_codewords_per_block(ecl);
                let blocks = ver.block_count(ecl);
                let ecc = ver.ecc_per_block(ecl) * blocks;
                assert_eq!(b1_cnt + b2_cnt, blocks);
                assert_eq!(b1_sz * b1_cnt + b2_sz * b2_cnt, ver.data_codewords(ecl));
                assert_eq!(ver.data_codewords(ecl) + ecc, ver.total_codewords());
            }
        }
    }

    #[test_case(1, ECLevel::M, 16)]
    #[test_case(1, ECLevel::H, 9)]
    #[test_case(5, ECLevel::Q, 62)]
    #[test_case(10, ECLevel::L, 274)]
    #[test_case(40, ECLevel::L, 2956)]
    #[test_case(40, ECLevel::H, 1276)]
    fn test_data_codewords(ver: usize, ecl: ECLevel, exp: usize) {
        assert_eq!(Version(ver).data_codewords(ecl), exp);
    }

    #[test]
    fn test_data_codewords_per_block() {
        assert_eq!(Version(1).data_codewords_per_block(ECLevel::M), (16, 1, 0, 0));
        assert_eq!(Version(5).data_codewords_per_block(ECLevel::Q), (15, 2, 16, 2));
        assert_eq!(Version(40).data_codewords_per_block(ECLevel::H), (15, 20, 16, 61));
    }

    #[test]
    fn test_char_cnt_bits() {
        let modes = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji];
        let exp = [[10, 9, 8, 8], [12, 11, 16, 10], [14, 13, 16, 12]];
        for (ver, exp) in [Version(9), Version(26), Version(40)].iter().zip(exp.iter()) {
            for (m, e) in modes.iter().zip(exp.iter()) {
                assert_eq!(ver.char_cnt_bits(*m), *e);
            }
        }
    }

    #[test_case(7, 0x07C94)]
    #[test_case(8, 0x085BC)]
    #[test_case(21, 0x15683)]
    #[test_case(40, 0x28C69)]
    fn test_version_info(ver: usize, exp: u32) {
        assert_eq!(Version(ver).info(), exp);
    }

    #[test_case(ECLevel::L, 0, 0b111011111000100)]
    #[test_case(ECLevel::L, 2, 0b111110110101010)]
    #[test_case(ECLevel::L, 7, 0b110100101110110)]
    #[test_case(ECLevel::M, 0, 0b101010000010010)]
    #[test_case(ECLevel::Q, 0, 0b011010101011111)]
    #[test_case(ECLevel::H, 0, 0b001011010001001)]
    #[test_case(ECLevel::H, 7, 0b000100000111011)]
    fn test_format_info(ecl: ECLevel, mask: u8, exp: u32) {
        let mask = MaskPattern::new(mask).unwrap();
        assert_eq!(format_info(ecl, mask), exp);
    }

    #[test]
    fn test_metadata_display() {
        let meta = Metadata::new(Version(3), ECLevel::Q, Some(MaskPattern::new(5).unwrap()));
        assert_eq!(meta.to_string(), "{ Version: 3, Ec level: Q, Mask: 5 }");
        let meta = Metadata::new(Version(1), ECLevel::L, None);
        assert_eq!(meta.to_string(), "{ Version: 1, Ec level: L, Mask: None }");
    }
}
