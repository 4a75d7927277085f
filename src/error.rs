use std::fmt::{Display, Error, Formatter};

use image::ImageError;
use qrcode::types::QrError;

// Field
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Field {
    MerchantName,
    PixKey,
    Amount,
    City,
    Txid,
    // Raw TLV field identified by its tag
    Tag(u8),
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::MerchantName => f.write_str("merchant name"),
            Self::PixKey => f.write_str("pix key"),
            Self::Amount => f.write_str("amount"),
            Self::City => f.write_str("merchant city"),
            Self::Txid => f.write_str("transaction id"),
            Self::Tag(t) => write!(f, "field {t:02}"),
        }
    }
}

// Render error
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum RenderError {
    Symbol(QrError),
    Raster(ImageError),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::Symbol(e) => write!(f, "QR symbol: {e}"),
            Self::Raster(e) => write!(f, "Raster image: {e}"),
        }
    }
}

// Error
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum PixError {
    // Payload builder
    EmptyField(Field),
    InvalidAmount(String),
    FieldTooLong { field: Field, len: usize, max: usize },
    InvalidTxid(String),

    // Payload reader
    ChecksumMismatch { expected: String, found: String },
    MalformedPayload(&'static str),

    // Renderer
    Render(RenderError),
    Io(std::io::Error),
}

impl Display for PixError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            // Payload builder
            Self::EmptyField(field) => write!(f, "Empty {field}"),
            Self::InvalidAmount(amt) => write!(f, "Invalid amount: {amt:?}"),
            Self::FieldTooLong { field, len, max } => {
                write!(f, "{field} too long: {len} exceeds maximum of {max}")
            }
            Self::InvalidTxid(txid) => write!(f, "Invalid transaction id: {txid:?}"),

            // Payload reader
            Self::ChecksumMismatch { expected, found } => {
                write!(f, "Checksum mismatch: expected {expected}, found {found}")
            }
            Self::MalformedPayload(reason) => write!(f, "Malformed payload: {reason}"),

            // Renderer
            Self::Render(e) => write!(f, "Render failed: {e}"),
            Self::Io(e) => write!(f, "Io error: {e}"),
        }
    }
}

impl std::error::Error for PixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(RenderError::Symbol(e)) => Some(e),
            Self::Render(RenderError::Raster(e)) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<QrError> for PixError {
    fn from(e: QrError) -> Self {
        Self::Render(RenderError::Symbol(e))
    }
}

impl From<ImageError> for PixError {
    fn from(e: ImageError) -> Self {
        Self::Render(RenderError::Raster(e))
    }
}

impl From<std::io::Error> for PixError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type PixResult<T> = Result<T, PixError>;

#[cfg(test)]
mod error_tests {
    use super::{Field, PixError};

    #[test]
    fn test_display() {
        let err = PixError::FieldTooLong { field: Field::Tag(26), len: 104, max: 99 };
        assert_eq!(err.to_string(), "field 26 too long: 104 exceeds maximum of 99");
        let err = PixError::InvalidAmount("12a".to_string());
        assert_eq!(err.to_string(), "Invalid amount: \"12a\"");
        let err = PixError::EmptyField(Field::City);
        assert_eq!(err.to_string(), "Empty merchant city");
    }
}
