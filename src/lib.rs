//! # pixqr
//!
//! A Rust library for building Pix (BR Code) payment payloads and rendering them as QR codes.
//!
//! ## Features
//!
//! - **Payload Generation**: Encode merchant and transaction data into the scheme's TLV payload
//! - **CRC-16 Checksum**: CRC-16/CCITT-FALSE appended exactly as scanning apps expect
//! - **Field Validation**: Scheme limits and the 2 digit length prefix are enforced, never truncated
//! - **Payload Reading**: Parse and verify an existing payload back into its fields
//! - **QR Rendering**: PNG files, base64 strings for JSON/HTML, or unicode for terminals
//!
//! ## Quick Start
//!
//! ### Building a Payload
//!
//! ```rust
//! use pixqr::build_payload;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = build_payload("John Doe", "12345678900", "1000.00", "Sample City", "STORE01")?;
//! assert!(payload.ends_with("63040EAB"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use pixqr::{Initiation, PayloadBuilder, QrRenderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = PayloadBuilder::new("John Doe", "john@example.com", "10,50", "Brasilia", "***")
//!     .initiation(Initiation::Static) // Point of initiation method - omitted if not provided
//!     .build()?;
//!
//! let b64 = payload.to_base64(QrRenderer::new().module_size(8))?;
//! println!("data:image/png;base64,{b64}");
//! # Ok(())
//! # }
//! ```
//!
//! ### Reading a Payload
//!
//! ```rust
//! use pixqr::PayloadReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = "00020126330014BR.GOV.BCB.PIX01111234567890052040000530398654071000.00\
//!                5802BR5908John Doe6011Sample City62110507STORE0163040EAB";
//! let fields = PayloadReader::read(payload)?;
//! assert_eq!(fields.amount(), "1000.00");
//! # Ok(())
//! # }
//! ```
//!
//! ## Payload Layout
//!
//! Every field is `TAG` (2 digits) + `LENGTH` (2 digits, byte length of value) + `VALUE`.
//! Fields are emitted in this order:
//!
//! - `00` Payload format indicator, always `01`
//! - `01` Point of initiation method, only if configured
//! - `26` Merchant account info: GUI `BR.GOV.BCB.PIX` and the pix key
//! - `52` Merchant category code `0000`, `53` currency `986` (BRL)
//! - `54` Amount with exactly 2 fractional digits
//! - `58` Country code `BR`, `59` merchant name, `60` merchant city
//! - `62` Additional data holding the transaction id, `***` for none
//! - `63` CRC-16 of everything before it, including its own `6304` header

pub mod builder;
pub mod crc;
pub mod error;
pub mod reader;
pub mod render;
pub mod template;
pub mod tlv;

pub use builder::{build_payload, Payload, PayloadBuilder, PayloadFields};
pub use error::{Field, PixError, PixResult, RenderError};
pub use reader::{verify_checksum, PayloadReader};
pub use render::{encode_qr_image_base64, encode_qr_image_file, QrRenderer};
pub use template::Initiation;

pub use qrcode::EcLevel;
