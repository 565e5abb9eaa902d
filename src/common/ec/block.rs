use super::galois::{EXP_TABLE, LOG_TABLE};
use super::MAX_BLOCK_SIZE;

// Data codewords of one block followed by their error correction codewords
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Block {
    data: [u8; MAX_BLOCK_SIZE],
    // Block length
    len: usize,
    // Data length
    dlen: usize,
}

impl Block {
    // gen_log holds the generator coefficients as logs, leading term omitted
    pub fn new(raw: &[u8], gen_log: &[u8]) -> Self {
        let dlen = raw.len();
        let len = dlen + gen_log.len();
        debug_assert!(len <= MAX_BLOCK_SIZE, "Block is too large: {len}");

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);
        let mut block = Self { data, len, dlen };
        block.compute_ecc(gen_log);
        block
    }

    // Polynomial long division of the data polynomial by the generator
    // polynomial. Coefficients of the remainder are the ecc.
    fn compute_ecc(&mut self, gen_log: &[u8]) {
        let (dlen, len) = (self.dlen, self.len);
        let mut rem = self.data;
        for i in 0..dlen {
            let lead_coeff = rem[i] as usize;
            if lead_coeff == 0 {
                continue;
            }

            let log_lead_coeff = LOG_TABLE[lead_coeff] as usize;
            for (u, v) in rem[i + 1..len].iter_mut().zip(gen_log.iter()) {
                let mut log_sum = *v as usize + log_lead_coeff;
                if log_sum >= 255 {
                    log_sum -= 255;
                }
                *u ^= EXP_TABLE[log_sum];
            }
        }
        self.data[dlen..len].copy_from_slice(&rem[dlen..len]);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn data_len(&self) -> usize {
        self.dlen
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }
}
