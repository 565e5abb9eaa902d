use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks column pairs from the right edge, upward then downward in turns, right
// module before left, skipping the vertical timing column. Yields every
// module outside the timing column; callers skip the occupied ones.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

const VERT_TIMING_COL: i16 = 6;

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let adjusted_col = if self.c <= VERT_TIMING_COL { self.c + 1 } else { self.c };
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}

#[cfg(test)]
mod iter_tests {
    use std::collections::HashSet;

    use super::EncRegionIter;
    use crate::builder::{Module, QR};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_enc_region_iter_start() {
        let coords: Vec<_> = EncRegionIter::new(Version::new(1).unwrap()).take(6).collect();
        assert_eq!(coords, [(20, 20), (20, 19), (19, 20), (19, 19), (18, 20), (18, 19)]);
    }

    #[test]
    fn test_enc_region_iter_turns() {
        let coords: Vec<_> = EncRegionIter::new(Version::new(1).unwrap()).collect();
        // Top of the first column pair turns down into the next pair
        let top = coords.iter().position(|&p| p == (0, 19)).unwrap();
        assert_eq!(coords[top + 1], (0, 18));
        assert_eq!(coords[top + 2], (0, 17));
        assert_eq!(coords[top + 3], (1, 18));
        // Column 7 jumps over the timing column
        let skip = coords.iter().position(|&p| p == (0, 7)).unwrap();
        assert_eq!(coords[skip + 1], (0, 5));
        assert_eq!(coords.last(), Some(&(20, 0)));
    }

    #[test]
    fn test_enc_region_iter_covers_all() {
        for ver in Version::all() {
            let w = ver.width() as i16;
            let coords: Vec<_> = EncRegionIter::new(ver).collect();
            let unique: HashSet<_> = coords.iter().copied().collect();
            assert_eq!(coords.len(), unique.len());
            assert_eq!(coords.len(), ((w - 1) * w) as usize);
            assert!(coords.iter().all(|&(_, c)| c != 6));
        }
    }

    #[test]
    fn test_enc_region_data_modules() {
        for ver in Version::all() {
            let mut qr = QR::new(ver, ECLevel::L);
            qr.draw_all_function_patterns();
            qr.draw_encoding_region(&vec![0; ver.total_codewords()]);
            let data_modules = EncRegionIter::new(ver)
                .filter(|(r, c)| matches!(qr.get(*r, *c), Module::Data(_)))
                .count();
            assert_eq!(data_modules, ver.total_codewords() * 8 + ver.remainder_bits());
            assert_eq!(data_modules, ver.raw_data_modules());
        }
    }
}
