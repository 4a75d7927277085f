use std::fmt::{Display, Error, Formatter};
use std::ops::Deref;
use std::path::PathBuf;

use crate::{
    crc::checksum,
    error::PixResult,
    render::QrRenderer,
    template::{CRC_HEADER, CRC_LEN},
};

/// Checksum terminated payload ready to be placed in a QR code
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Payload(String);

impl Payload {
    /// Appends the checksum of `body`, which must end with the checksum header
    pub(crate) fn seal(mut body: String) -> Self {
        debug_assert!(body.ends_with(CRC_HEADER), "Payload body must end with {CRC_HEADER}: {body}");

        let crc = checksum(&body);
        body.push_str(&crc);
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything checksummed, i.e. the payload without its trailing checksum
    pub fn body(&self) -> &str {
        &self.0[..self.0.len() - CRC_LEN]
    }

    pub fn checksum(&self) -> &str {
        &self.0[self.0.len() - CRC_LEN..]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Rendering
//------------------------------------------------------------------------------

impl Payload {
    pub fn to_png(&self, renderer: &QrRenderer) -> PixResult<Vec<u8>> {
        renderer.to_png(self)
    }

    pub fn to_base64(&self, renderer: &QrRenderer) -> PixResult<String> {
        renderer.to_base64(self)
    }

    pub fn save(&self, renderer: &QrRenderer) -> PixResult<PathBuf> {
        renderer.save(self)
    }
}

impl Deref for Payload {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Payload {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.write_str(&self.0)
    }
}

impl From<Payload> for String {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}
