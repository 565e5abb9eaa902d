//! # qrforge
//!
//! A Rust library for generating QR Code Model 2 symbols with Reed-Solomon error
//! correction.
//!
//! ## Features
//!
//! - **Optimal segmentation**: Input is split into numeric, alphanumeric and byte
//!   segments to minimise the encoded size, with an explicit kanji mode
//! - **Automatic version**: Picks the smallest version (1-40) that fits, with an
//!   optional lower bound
//! - **Reed-Solomon error correction**: All four levels (L, M, Q, H)
//! - **Mask selection**: Scores all eight masks with the standard penalty rules
//! - **Rendering**: Grayscale images through `image`, or plain text
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrforge::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = encode(b"HELLO", ECLevel::M, None)?;
//! assert_eq!(qr.size(), 21);
//!
//! let dark = (0..qr.size()).filter(|&c| qr.is_dark(0, c)).count();
//! println!("{dark} dark modules in the first row");
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust,no_run
//! use qrforge::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = "Hello, World!";
//! let qr = QRBuilder::new(data.as_bytes())
//!     .min_version(Version::new(2)?)   // Smallest version to consider - defaults to 1
//!     .ec_level(ECLevel::Q)            // Error correction level - defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)      // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! let img = qr.to_image(4);  // 4x scale factor
//! img.save("configured_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Errors
//! Every failure is a [`QRError`]. [`QRError::kind`] sorts them into invalid
//! characters for a mode, data exceeding capacity, and invalid configuration.

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{QRBuilder, QR};
pub use common::codec::Mode;
pub use common::ec::error_correction_capacity;
pub use common::error::{ErrorKind, QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Metadata, Version};
pub use render::{ImageRender, ModuleGrid, Render, TextRender};

/// Encodes `data` into the smallest symbol from `min_version` (version 1 when
/// `None`) that holds it at `ec_level`, choosing segmentation and mask
/// automatically.
pub fn encode(data: &[u8], ec_level: ECLevel, min_version: Option<Version>) -> QRResult<QR> {
    let mut builder = QRBuilder::new(data);
    builder.ec_level(ec_level);
    if let Some(v) = min_version {
        builder.min_version(v);
    }
    builder.build()
}
