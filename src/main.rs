use std::error::Error;

use pixqr::{PayloadBuilder, QrRenderer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Tax id without dots or dashes. Phone keys take the form +55<area code><number>
    let payload =
        PayloadBuilder::new("John Doe", "12345678900", "1000.00", "Sample City", "STORE01").build()?;
    println!("Generated Payload:");
    println!("{payload}");

    let renderer = QrRenderer::new();
    println!("{}", renderer.to_str(&payload)?);

    println!("QR Code Image as Base64 String:");
    println!("{}", payload.to_base64(&renderer)?);

    Ok(())
}
