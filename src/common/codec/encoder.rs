pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use std::mem::swap;

    use log::trace;

    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, Segment, MODES};
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};

    // Finds the smallest version from min_ver that fits the data and packs it
    pub fn encode(
        data: &[u8],
        ecl: ECLevel,
        min_ver: Version,
        mode: Option<Mode>,
    ) -> QRResult<(BitStream, Version)> {
        let (ver, segs) = find_optimal_version_and_segments(data, ecl, min_ver, mode)?;
        Ok((write_segments(&segs, ver.data_bit_capacity(ecl)), ver))
    }

    pub fn encode_with_version(
        data: &[u8],
        ver: Version,
        ecl: ECLevel,
        mode: Option<Mode>,
    ) -> QRResult<BitStream> {
        let bcap = ver.data_bit_capacity(ecl);
        let segs = compute_segments(data, ver, mode)?;
        if segments_bit_len(&segs) > bcap {
            return Err(QRError::DataTooLong);
        }
        Ok(write_segments(&segs, bcap))
    }

    fn write_segments(segs: &[Segment<'_>], bcap: usize) -> BitStream {
        let mut bs = BitStream::new(bcap);
        for seg in segs {
            push_segment(seg, &mut bs);
        }
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        bs
    }

    fn find_optimal_version_and_segments(
        data: &[u8],
        ecl: ECLevel,
        min_ver: Version,
        mode: Option<Mode>,
    ) -> QRResult<(Version, Vec<Segment<'_>>)> {
        let mut segs = vec![];
        let mut sz = 0;
        for ver in Version::all().filter(|v| *v >= min_ver) {
            // Char count widths only change at these versions
            if ver == min_ver || *ver == 10 || *ver == 27 {
                segs = compute_segments(data, ver, mode)?;
                sz = segments_bit_len(&segs);
                trace!("Version {ver}+: {} segments, {sz} bits", segs.len());
            }
            if sz <= ver.data_bit_capacity(ecl) {
                return Ok((ver, segs));
            }
        }
        Err(QRError::DataTooLong)
    }

    fn compute_segments(
        data: &[u8],
        ver: Version,
        mode: Option<Mode>,
    ) -> QRResult<Vec<Segment<'_>>> {
        match mode {
            Some(m) => Ok(vec![Segment::with_mode(m, ver, data)?]),
            None => Ok(compute_optimal_segments(data, ver)),
        }
    }

    // Total bit length, or usize::MAX if a char count overflows its field
    fn segments_bit_len(segs: &[Segment<'_>]) -> usize {
        if segs.iter().any(|s| s.char_count() >= 1 << s.len_bits) {
            return usize::MAX;
        }
        segs.iter().map(|s| s.bit_len()).sum()
    }

    // Dynamic programming to compute optimum mode segments. Costs are in
    // sixths of a bit so numeric & alphanumeric chars have integral costs.
    fn compute_optimal_segments(data: &[u8], ver: Version) -> Vec<Segment<'_>> {
        if data.is_empty() {
            return vec![];
        }

        let len = data.len();
        let mut prev_cost = [0usize; 3];
        MODES.iter().enumerate().for_each(|(i, &m)| prev_cost[i] = (4 + ver.char_cnt_bits(m)) * 6);
        let mut cur_cost = [usize::MAX; 3];
        let mut min_path = vec![[usize::MAX; 3]; len];
        for (i, b) in data.iter().enumerate() {
            for (j, to_mode) in MODES.iter().enumerate() {
                if !to_mode.contains(*b) {
                    continue;
                }
                let encoded_char_size = match to_mode {
                    Mode::Numeric => 20,
                    Mode::Alphanumeric => 33,
                    _ => 48,
                };
                for (k, from_mode) in MODES.iter().enumerate() {
                    if prev_cost[k] == usize::MAX {
                        continue;
                    }
                    let mut cost = 0;
                    if to_mode != from_mode {
                        cost += prev_cost[k].div_ceil(6) * 6;
                        cost += (4 + ver.char_cnt_bits(*to_mode)) * 6;
                    } else {
                        cost += prev_cost[k];
                    }
                    cost += encoded_char_size;
                    if cost < cur_cost[j] {
                        cur_cost[j] = cost;
                        min_path[i][j] = k;
                    }
                }
            }
            swap(&mut prev_cost, &mut cur_cost);
            cur_cost.fill(usize::MAX);
        }

        let char_modes = trace_optimal_modes(min_path, prev_cost);
        build_segments(ver, char_modes, data)
    }

    // Backtrack min_path and identify optimal char mode
    fn trace_optimal_modes(min_path: Vec<[usize; 3]>, prev_cost: [usize; 3]) -> Vec<Mode> {
        let len = min_path.len();
        let mut mode_index = 0;
        for i in 1..3 {
            if prev_cost[i] < prev_cost[mode_index] {
                mode_index = i;
            }
        }
        let mut modes: Vec<Mode> = (0..len)
            .rev()
            .scan(mode_index, |mi, i| {
                let old_mi = *mi;
                *mi = min_path[i][*mi];
                Some(MODES[old_mi])
            })
            .collect();
        modes.reverse();
        modes
    }

    // Group runs of equal char modes into segments
    fn build_segments(ver: Version, char_modes: Vec<Mode>, data: &[u8]) -> Vec<Segment<'_>> {
        let len = data.len();
        let mode_bits = ver.mode_bits();
        let mut segs: Vec<Segment> = vec![];
        let mut seg_start = 0;
        let mut seg_mode = char_modes[0];
        for (i, &m) in char_modes.iter().enumerate().skip(1) {
            if seg_mode != m {
                let len_bits = ver.char_cnt_bits(seg_mode);
                segs.push(Segment::new(seg_mode, mode_bits, len_bits, &data[seg_start..i]));
                seg_mode = m;
                seg_start = i;
            }
        }
        let len_bits = ver.char_cnt_bits(seg_mode);
        segs.push(Segment::new(seg_mode, mode_bits, len_bits, &data[seg_start..len]));

        segs
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Segment, PADDING_CODEWORDS};

    pub fn push_segment(seg: &Segment<'_>, out: &mut BitStream) {
        push_header(seg, out);
        push_data(seg, out);
    }

    fn push_data(seg: &Segment<'_>, out: &mut BitStream) {
        let mode = seg.mode;
        for chunk in seg.data.chunks(mode.chunk_size()) {
            out.push_bits(mode.encode_chunk(chunk), mode.chunk_bit_len(chunk.len()));
        }
    }

    fn push_header(seg: &Segment<'_>, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, seg.mode_bits);
        let char_cnt = seg.char_count();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    // Up to 4 zero bits, fewer when the symbol is nearly full
    pub fn push_terminator(out: &mut BitStream) {
        let term_len = out.remaining().min(4);
        out.push_bits(0_u8, term_len);
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.bit_offset();
        if offset > 0 {
            out.push_bits(0_u8, 8 - offset);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        debug_assert!(out.bit_offset() == 0, "Stream must be byte aligned before padding");

        let pad: Vec<u8> =
            PADDING_CODEWORDS.iter().copied().cycle().take(out.remaining() >> 3).collect();
        out.extend(&pad);
    }

}
