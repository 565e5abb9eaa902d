mod block;
mod galois;

pub(crate) use block::Block;

use galois::{generator_polynomial, LOG_TABLE};

use super::metadata::{ECLevel, Version};

// Largest block is 153 codewords (version 40-L)
pub const MAX_BLOCK_SIZE: usize = 256;

// Splits data codewords into blocks and computes ecc for each
pub(crate) fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<Block> {
    let gen_log: Vec<u8> = generator_polynomial(version.ecc_per_block(ec_level))
        .iter()
        .map(|c| LOG_TABLE[*c as usize])
        .collect();
    blockify(data, version, ec_level).into_iter().map(|b| Block::new(b, &gen_log)).collect()
}

pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Number of codeword errors the symbol can correct. Small symbols reserve a few
// ec codewords for misdecode protection.
pub fn error_correction_capacity(version: Version, ec_level: ECLevel) -> usize {
    let p = match (*version, ec_level) {
        (1, ECLevel::L) => 3,
        (2, ECLevel::L) | (1, ECLevel::M) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };

    let ec_bytes = version.block_count(ec_level) * version.ecc_per_block(ec_level);
    (ec_bytes - p) / 2
}

#[cfg(test)]
mod ec_tests {
    use test_case::test_case;

    use super::{blockify, ecc, error_correction_capacity};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_ecc_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let blocks = ecc(msg, Version::new(1).unwrap(), ECLevel::M);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].data(), msg);
        assert_eq!(blocks[0].ecc(), b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17");
    }

    #[test]
    fn test_ecc_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let blocks = ecc(msg, Version::new(5).unwrap(), ECLevel::Q);
        assert_eq!(blocks.len(), 4);
        for (blk, exp) in blocks.iter().zip(expected_ec.iter()) {
            assert_eq!(blk.ecc(), *exp);
        }
        assert_eq!(blocks[0].data(), &msg[..15]);
        assert_eq!(blocks[3].data(), &msg[46..]);
    }

    #[test]
    fn test_blockify() {
        let data: Vec<u8> = (0..62).collect();
        let blocks = blockify(&data, Version::new(5).unwrap(), ECLevel::Q);
        let lens: Vec<usize> = blocks.iter().map(|b| b.len()).collect();
        assert_eq!(lens, [15, 15, 16, 16]);
        assert_eq!(blocks[2][0], 30);
    }

    #[test_case(1, ECLevel::L, 2)]
    #[test_case(1, ECLevel::M, 4)]
    #[test_case(1, ECLevel::H, 8)]
    #[test_case(3, ECLevel::L, 7)]
    #[test_case(40, ECLevel::H, 1215)]
    fn test_error_correction_capacity(ver: usize, ecl: ECLevel, exp: usize) {
        assert_eq!(error_correction_capacity(Version::new(ver).unwrap(), ecl), exp);
    }
}
