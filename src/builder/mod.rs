mod qr;

pub use qr::QR;
#[cfg(test)]
pub(crate) use qr::Module;

use std::ops::Deref;

use log::debug;

use crate::common::{
    bit_utils::BitStream,
    codec::{encode, encode_with_version, Mode},
    ec::{ecc, error_correction_capacity},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Configures and builds a [`QR`] symbol.
///
/// Anything left unset is chosen automatically: the smallest version that
/// fits, EC level M, optimal mode segmentation and the lowest penalty mask.
#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    min_version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
    mode: Option<Mode>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            version: None,
            min_version: None,
            ec_level: ECLevel::M,
            mask: None,
            mode: None,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Fixes the version instead of searching for the smallest one that fits.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    /// Lower bound for the version search.
    pub fn min_version(&mut self, min_version: Version) -> &mut Self {
        self.min_version = Some(min_version);
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    /// Encodes the whole input as a single segment of `mode`. Kanji mode
    /// expects UTF-8 text made of Shift JIS double byte characters.
    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("None".to_string(), |v| v.to_string());
        let mut res = format!("{{ Version: {version}, ");
        if let Some(v) = self.min_version {
            res += &format!("Min version: {v}, ");
        }
        res += &format!("Ec level: {:?}", self.ec_level);
        if let Some(m) = self.mode {
            res += &format!(", Mode: {m:?}");
        }
        if let Some(m) = self.mask {
            res += &format!(", Mask: {}", *m);
        }
        res + " }"
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}...", self.metadata());

        if let (Some(v), Some(min)) = (self.version, self.min_version) {
            if v < min {
                return Err(QRError::InvalidVersion);
            }
        }

        // Encode data optimally
        debug!("Encoding data...");
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level, self.mode)?, v),
            None => {
                debug!("Finding best version...");
                let min_version = self.min_version.unwrap_or(Version::MIN);
                encode(self.data, self.ec_level, min_version, self.mode)?
            }
        };

        let total_codewords = version.total_codewords();
        let data_capacity = version.data_codewords(self.ec_level);
        let ec_capacity = error_correction_capacity(version, self.ec_level);

        debug!("Constructing payload with ecc & interleaving...");
        let blocks = ecc(encoded_data.data(), version, self.ec_level);
        debug_assert!(
            blocks.iter().all(|b| b.len() - b.data_len() == version.ecc_per_block(self.ec_level)),
            "Ecc length doesn't match version {version} and ec level {:?}",
            self.ec_level
        );
        let data_blocks = blocks.iter().map(|b| b.data()).collect::<Vec<_>>();
        let ecc_blocks = blocks.iter().map(|b| b.ecc()).collect::<Vec<_>>();
        let mut payload = BitStream::new(total_codewords << 3);
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));

        // Construct QR
        debug!("Constructing QR...");
        let mut qr = QR::new(version, self.ec_level);

        debug!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region...");
        qr.draw_encoding_region(payload.data());

        match self.mask {
            Some(m) => {
                debug!("Applying mask {}...", *m);
                qr.apply_mask(m);
            }
            None => {
                debug!("Finding & applying best mask...");
                apply_best_mask(&mut qr);
            }
        };

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        let light_modules = total_modules - dark_modules;

        debug!("QR generated: {}", qr.metadata());
        debug!(
            "Data size: {}, Data capacity: {data_capacity}, Error capacity: {ec_capacity}",
            self.data.len()
        );
        debug!(
            "Dark cells: {dark_modules}, Light cells: {light_modules}, Balance: {}",
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }

    pub(crate) fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
