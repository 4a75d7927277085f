// CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection, no final xor
//------------------------------------------------------------------------------

pub const POLY: u16 = 0x1021;

pub const INIT: u16 = 0xFFFF;

static TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 { (crc << 1) ^ POLY } else { crc << 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(INIT, |crc, &b| (crc << 8) ^ TABLE[((crc >> 8) as u8 ^ b) as usize])
}

/// Checksum as 4 uppercase, zero padded hex digits
pub fn checksum(data: &str) -> String {
    format!("{:04X}", crc16(data.as_bytes()))
}
