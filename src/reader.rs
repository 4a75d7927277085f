use crate::{
    builder::{PayloadBuilder, PayloadFields},
    crc::checksum,
    error::{PixError, PixResult},
    template::*,
    tlv::TlvIter,
};

/// Verifies the trailing `6304XXXX` checksum of a payload
pub fn verify_checksum(payload: &str) -> PixResult<()> {
    let crc_start = payload
        .len()
        .checked_sub(CRC_LEN)
        .filter(|&i| payload.is_char_boundary(i))
        .ok_or(PixError::MalformedPayload("missing checksum"))?;
    let (body, found) = payload.split_at(crc_start);
    if !body.ends_with(CRC_HEADER) {
        return Err(PixError::MalformedPayload("missing checksum header"));
    }

    let expected = checksum(body);
    if !found.eq_ignore_ascii_case(&expected) {
        return Err(PixError::ChecksumMismatch { expected, found: found.to_string() });
    }
    Ok(())
}

// Payload reader
//------------------------------------------------------------------------------

/// Top level tags in the only order they may appear, and whether each is required
static FIELD_ORDER: [(u8, bool); 11] = [
    (PAYLOAD_FORMAT_INDICATOR, true),
    (POINT_OF_INITIATION, false),
    (MERCHANT_ACCOUNT_INFO, true),
    (MERCHANT_CATEGORY_CODE, true),
    (TRANSACTION_CURRENCY, true),
    (TRANSACTION_AMOUNT, true),
    (COUNTRY_CODE, true),
    (MERCHANT_NAME, true),
    (MERCHANT_CITY, true),
    (ADDITIONAL_DATA, true),
    (CRC, true),
];

#[derive(Default)]
struct RawFields<'a> {
    initiation: Option<&'a str>,
    pix_key: &'a str,
    amount: &'a str,
    merchant_name: &'a str,
    city: &'a str,
    txid: &'a str,
}

pub struct PayloadReader();

impl PayloadReader {
    /// Parses a static Pix payload back into its fields. Fields must appear in
    /// `FIELD_ORDER`, each at most once
    pub fn read(payload: &str) -> PixResult<PayloadFields> {
        verify_checksum(payload)?;

        let mut raw = RawFields::default();
        let fields = TlvIter::new(payload).collect::<PixResult<Vec<_>>>()?;
        let mut fields = fields.into_iter().peekable();

        for &(exp_tag, required) in FIELD_ORDER.iter() {
            let value = match fields.next_if(|&(tag, _)| tag == exp_tag) {
                Some((_, value)) => value,
                None if required => {
                    return Err(PixError::MalformedPayload("missing or out of order field"))
                }
                None => continue,
            };

            match exp_tag {
                PAYLOAD_FORMAT_INDICATOR => {
                    Self::expect_value(value, PAYLOAD_FORMAT, "unexpected payload format")?
                }
                POINT_OF_INITIATION => raw.initiation = Some(value),
                MERCHANT_ACCOUNT_INFO => raw.pix_key = Self::read_account(value)?,
                MERCHANT_CATEGORY_CODE => {
                    Self::expect_value(value, CATEGORY_CODE, "unexpected category code")?
                }
                TRANSACTION_CURRENCY => Self::expect_value(value, CURRENCY_BRL, "unexpected currency")?,
                TRANSACTION_AMOUNT => raw.amount = Self::read_amount(value)?,
                COUNTRY_CODE => Self::expect_value(value, COUNTRY_BR, "unexpected country code")?,
                MERCHANT_NAME => raw.merchant_name = value,
                MERCHANT_CITY => raw.city = value,
                ADDITIONAL_DATA => raw.txid = Self::read_additional(value)?,
                // Value already verified against the body
                CRC if value.len() == CRC_LEN => {}
                _ => return Err(PixError::MalformedPayload("invalid checksum field")),
            }
        }

        // Repeated, unknown or out of order fields end up here
        if fields.next().is_some() {
            return Err(PixError::MalformedPayload("unexpected field after checksum"));
        }

        Self::into_fields(raw)
    }

    fn expect_value(value: &str, exp: &str, reason: &'static str) -> PixResult<()> {
        if value == exp {
            Ok(())
        } else {
            Err(PixError::MalformedPayload(reason))
        }
    }

    /// Amounts on the wire always carry exactly 2 fractional digits after a `.`
    fn read_amount(value: &str) -> PixResult<&str> {
        let well_formed = value.split_once('.').is_some_and(|(int, frac)| {
            !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.len() == 2
                && frac.bytes().all(|b| b.is_ascii_digit())
        });
        if well_formed {
            Ok(value)
        } else {
            Err(PixError::MalformedPayload("invalid transaction amount"))
        }
    }

    fn read_account(value: &str) -> PixResult<&str> {
        let mut fields = TlvIter::new(value);
        match fields.next().transpose()? {
            Some((ACCOUNT_GUI, gui)) if gui.eq_ignore_ascii_case(GUI) => {}
            _ => return Err(PixError::MalformedPayload("not a pix merchant account")),
        }
        let key = match fields.next().transpose()? {
            Some((ACCOUNT_KEY, key)) => key,
            _ => return Err(PixError::MalformedPayload("missing pix key")),
        };
        if fields.next().is_some() {
            return Err(PixError::MalformedPayload("unsupported merchant account field"));
        }
        Ok(key)
    }

    fn read_additional(value: &str) -> PixResult<&str> {
        let mut txid = None;
        for field in TlvIter::new(value) {
            if let (ADDITIONAL_TXID, v) = field? {
                if txid.replace(v).is_some() {
                    return Err(PixError::MalformedPayload("repeated transaction id"));
                }
            }
        }
        txid.ok_or(PixError::MalformedPayload("missing transaction id"))
    }

    fn into_fields(raw: RawFields) -> PixResult<PayloadFields> {
        let mut builder =
            PayloadBuilder::new(raw.merchant_name, raw.pix_key, raw.amount, raw.city, raw.txid);
        if let Some(code) = raw.initiation {
            let init = Initiation::from_code(code)
                .ok_or(PixError::MalformedPayload("invalid point of initiation method"))?;
            builder.initiation(init);
        }
        builder.fields()
    }
}
