use std::fmt::Display;

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

/// Append-only MSB-first bit buffer with a fixed bit capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bits written
    len: usize,
    // Bits allowed
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity.div_ceil(8)), len: 0, capacity }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.len
    }

    // Bits written into the last partial byte
    pub fn bit_offset(&self) -> usize {
        self.len & 7
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

// Writing
//------------------------------------------------------------------------------

impl BitStream {
    /// Appends the low `size` bits of `bits`, most significant first.
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let used = (T::zero().count_zeros() - bits.leading_zeros()) as usize;
        debug_assert!(
            size <= 32 && used <= size,
            "Value doesn't fit in bit count: Value {bits}, Bit count {size}"
        );
        debug_assert!(
            size <= self.remaining(),
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        let value = bits.to_u32().unwrap_or(0);
        let mut left = size;
        while left > 0 {
            let offset = self.bit_offset();
            if offset == 0 {
                self.data.push(0);
            }
            let take = left.min(8 - offset);
            let chunk = (value >> (left - take)) & ((1 << take) - 1);
            if let Some(last) = self.data.last_mut() {
                *last |= (chunk << (8 - offset - take)) as u8;
            }
            self.len += take;
            left -= take;
        }
    }

    #[cfg(test)]
    pub fn push(&mut self, bit: bool) {
        self.push_bits(bit as u8, 1);
    }

    /// Appends whole bytes. The stream must be byte aligned.
    pub fn extend(&mut self, arr: &[u8]) {
        debug_assert!(
            self.bit_offset() == 0,
            "Stream must be byte aligned to extend: Bit offset {}",
            self.bit_offset()
        );
        let arr_bits = arr.len() << 3;
        debug_assert!(
            arr_bits <= self.remaining(),
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );
        self.data.extend_from_slice(arr);
        self.len += arr_bits;
    }
}
