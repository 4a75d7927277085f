mod payload;

pub use payload::Payload;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Field, PixError, PixResult},
    render::QrRenderer,
    template::*,
    tlv::{TlvWriter, MAX_VALUE_LEN},
};

// Payload builder
//------------------------------------------------------------------------------

pub struct PayloadBuilder<'a> {
    merchant_name: &'a str,
    pix_key: &'a str,
    amount: &'a str,
    city: &'a str,
    txid: &'a str,
    initiation: Option<Initiation>,
    directory: Option<&'a Path>,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(
        merchant_name: &'a str,
        pix_key: &'a str,
        amount: &'a str,
        city: &'a str,
        txid: &'a str,
    ) -> Self {
        Self { merchant_name, pix_key, amount, city, txid, initiation: None, directory: None }
    }

    pub fn initiation(&mut self, initiation: Initiation) -> &mut Self {
        self.initiation = Some(initiation);
        self
    }

    pub fn unset_initiation(&mut self) -> &mut Self {
        self.initiation = None;
        self
    }

    pub fn directory(&mut self, directory: &'a Path) -> &mut Self {
        self.directory = Some(directory);
        self
    }

    /// Validates the inputs into an immutable set of payload fields
    pub fn fields(&self) -> PixResult<PayloadFields> {
        Ok(PayloadFields {
            merchant_name: check_text(Field::MerchantName, self.merchant_name, MAX_MERCHANT_NAME_LEN)?,
            pix_key: check_pix_key(self.pix_key)?,
            amount: format_amount(self.amount)?,
            city: check_text(Field::City, self.city, MAX_CITY_LEN)?,
            txid: check_txid(self.txid)?,
            initiation: self.initiation,
            directory: self.directory.map(Path::to_path_buf),
        })
    }

    pub fn build(&self) -> PixResult<Payload> {
        self.fields()?.encode()
    }
}

/// Builds the checksum terminated payload for a static Pix code
pub fn build_payload(
    merchant_name: &str,
    pix_key: &str,
    amount: &str,
    city: &str,
    txid: &str,
) -> PixResult<String> {
    let payload = PayloadBuilder::new(merchant_name, pix_key, amount, city, txid).build()?;
    Ok(payload.into_string())
}

// Validation
//------------------------------------------------------------------------------

fn check_text(field: Field, value: &str, max: usize) -> PixResult<String> {
    let len = value.chars().count();
    if len == 0 {
        return Err(PixError::EmptyField(field));
    }
    if len > max {
        return Err(PixError::FieldTooLong { field, len, max });
    }
    Ok(value.to_string())
}

fn check_pix_key(key: &str) -> PixResult<String> {
    if key.is_empty() {
        return Err(PixError::EmptyField(Field::PixKey));
    }
    if key.len() > MAX_PIX_KEY_LEN {
        return Err(PixError::FieldTooLong {
            field: Field::PixKey,
            len: key.len(),
            max: MAX_PIX_KEY_LEN,
        });
    }
    Ok(key.to_string())
}

fn check_txid(txid: &str) -> PixResult<String> {
    if txid == NO_TXID {
        return Ok(txid.to_string());
    }
    if txid.is_empty() {
        return Err(PixError::EmptyField(Field::Txid));
    }
    let len = txid.chars().count();
    if len > MAX_TXID_LEN {
        return Err(PixError::FieldTooLong { field: Field::Txid, len, max: MAX_TXID_LEN });
    }
    if !txid.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(PixError::InvalidTxid(txid.to_string()));
    }
    Ok(txid.to_string())
}

/// Accepts `,` or `.` as decimal separator and renders exactly 2 fractional digits
pub fn format_amount(amount: &str) -> PixResult<String> {
    let invalid = || PixError::InvalidAmount(amount.to_string());

    let normalized = amount.trim().replace(',', ".");
    let value = normalized.parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    // abs() folds -0.0 into 0.0
    let formatted = format!("{:.2}", value.abs());
    if formatted.len() > MAX_VALUE_LEN {
        return Err(PixError::FieldTooLong {
            field: Field::Amount,
            len: formatted.len(),
            max: MAX_VALUE_LEN,
        });
    }
    Ok(formatted)
}

// Payload fields
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PayloadFields {
    merchant_name: String,
    pix_key: String,
    amount: String,
    city: String,
    txid: String,
    initiation: Option<Initiation>,
    directory: Option<PathBuf>,
}

impl PayloadFields {
    pub fn merchant_name(&self) -> &str {
        &self.merchant_name
    }

    pub fn pix_key(&self) -> &str {
        &self.pix_key
    }

    /// Amount with exactly 2 fractional digits, e.g. `10.50`
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn txid(&self) -> &str {
        &self.txid
    }

    pub fn initiation(&self) -> Option<Initiation> {
        self.initiation
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn encode(&self) -> PixResult<Payload> {
        let mut account = TlvWriter::new();
        account.push(ACCOUNT_GUI, GUI)?.push(ACCOUNT_KEY, &self.pix_key)?;

        let mut additional = TlvWriter::new();
        additional.push(ADDITIONAL_TXID, &self.txid)?;

        let mut w = TlvWriter::new();
        w.push_raw(PAYLOAD_FORMAT_FIELD);
        if let Some(init) = self.initiation {
            w.push(POINT_OF_INITIATION, init.code())?;
        }
        w.push_nested(MERCHANT_ACCOUNT_INFO, &account)?
            .push_raw(CATEGORY_CODE_FIELD)
            .push_raw(CURRENCY_FIELD)
            .push(TRANSACTION_AMOUNT, &self.amount)?
            .push_raw(COUNTRY_FIELD)
            .push(MERCHANT_NAME, &self.merchant_name)?
            .push(MERCHANT_CITY, &self.city)?
            .push_nested(ADDITIONAL_DATA, &additional)?
            .push_raw(CRC_HEADER);

        let payload = Payload::seal(w.finish());
        debug!(len = payload.len(), checksum = payload.checksum(), "Built pix payload");
        Ok(payload)
    }

    /// Encodes the payload and saves its QR image under the fields' directory,
    /// falling back to the renderer's own directory
    pub fn save_qr_code(&self, renderer: &QrRenderer) -> PixResult<PathBuf> {
        let payload = self.encode()?;
        match self.directory() {
            Some(dir) => renderer.clone().directory(dir).save(&payload),
            None => renderer.save(&payload),
        }
    }
}
