//! Tags and fixed fields of the static Pix (BR Code) template.

use crate::tlv::{HEADER_LEN, MAX_VALUE_LEN};

// Top level tags
//------------------------------------------------------------------------------

pub const PAYLOAD_FORMAT_INDICATOR: u8 = 0;
pub const POINT_OF_INITIATION: u8 = 1;
pub const MERCHANT_ACCOUNT_INFO: u8 = 26;
pub const MERCHANT_CATEGORY_CODE: u8 = 52;
pub const TRANSACTION_CURRENCY: u8 = 53;
pub const TRANSACTION_AMOUNT: u8 = 54;
pub const COUNTRY_CODE: u8 = 58;
pub const MERCHANT_NAME: u8 = 59;
pub const MERCHANT_CITY: u8 = 60;
pub const ADDITIONAL_DATA: u8 = 62;
pub const CRC: u8 = 63;

// Nested tags
//------------------------------------------------------------------------------

/// Inside merchant account info
pub const ACCOUNT_GUI: u8 = 0;
pub const ACCOUNT_KEY: u8 = 1;

/// Inside additional data
pub const ADDITIONAL_TXID: u8 = 5;

// Fixed values
//------------------------------------------------------------------------------

pub const PAYLOAD_FORMAT: &str = "01";
pub const GUI: &str = "BR.GOV.BCB.PIX";
pub const CATEGORY_CODE: &str = "0000";
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_BR: &str = "BR";

// Serialized fixed fields
pub const PAYLOAD_FORMAT_FIELD: &str = "000201";
pub const CATEGORY_CODE_FIELD: &str = "52040000";
pub const CURRENCY_FIELD: &str = "5303986";
pub const COUNTRY_FIELD: &str = "5802BR";
pub const CRC_HEADER: &str = "6304";

/// Hex digits of the checksum that follow `CRC_HEADER`
pub const CRC_LEN: usize = 4;

// Limits
//------------------------------------------------------------------------------

pub const MAX_MERCHANT_NAME_LEN: usize = 25;
pub const MAX_CITY_LEN: usize = 15;
pub const MAX_TXID_LEN: usize = 25;

/// The key shares merchant account info with the serialized GUI field
pub const MAX_PIX_KEY_LEN: usize = MAX_VALUE_LEN - (HEADER_LEN + GUI.len()) - HEADER_LEN;

/// Transaction id meaning "no id"
pub const NO_TXID: &str = "***";

// Point of initiation method
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Initiation {
    /// Code may be paid more than once
    Static,
    /// Code is meant for a single payment
    Dynamic,
}

impl Initiation {
    pub fn code(self) -> &'static str {
        match self {
            Self::Static => "11",
            Self::Dynamic => "12",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "11" => Some(Self::Static),
            "12" => Some(Self::Dynamic),
            _ => None,
        }
    }
}

#[cfg(test)]
mod template_tests {
    use super::*;

    #[test]
    fn test_fixed_fields() {
        let field = |tag: u8, value: &str| format!("{tag:02}{:02}{value}", value.len());
        assert_eq!(field(PAYLOAD_FORMAT_INDICATOR, PAYLOAD_FORMAT), PAYLOAD_FORMAT_FIELD);
        assert_eq!(field(MERCHANT_CATEGORY_CODE, CATEGORY_CODE), CATEGORY_CODE_FIELD);
        assert_eq!(field(TRANSACTION_CURRENCY, CURRENCY_BRL), CURRENCY_FIELD);
        assert_eq!(field(COUNTRY_CODE, COUNTRY_BR), COUNTRY_FIELD);
        assert_eq!(format!("{CRC:02}{CRC_LEN:02}"), CRC_HEADER);
    }

    #[test]
    fn test_max_pix_key_len() {
        assert_eq!(MAX_PIX_KEY_LEN, 77);
    }

    #[test]
    fn test_initiation_code() {
        for init in [Initiation::Static, Initiation::Dynamic] {
            assert_eq!(Initiation::from_code(init.code()), Some(init));
        }
        assert_eq!(Initiation::from_code("13"), None);
    }
}
