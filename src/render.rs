use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{render::unicode::Dense1x2, EcLevel, QrCode};
use tracing::{debug, info};

use crate::error::PixResult;

pub const DEFAULT_FILE_NAME: &str = "pix_qrcode.png";

pub const DEFAULT_MODULE_SIZE: u32 = 10;

// QR renderer
//------------------------------------------------------------------------------

/// Turns arbitrary text into a QR image. Symbol generation is delegated to the
/// `qrcode` crate, rasters to `image`.
#[derive(Debug, Clone)]
pub struct QrRenderer {
    ec_level: EcLevel,
    module_size: u32,
    quiet_zone: bool,
    directory: PathBuf,
    file_name: String,
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::M,
            module_size: DEFAULT_MODULE_SIZE,
            quiet_zone: true,
            directory: PathBuf::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl QrRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ec_level(&mut self, ec_level: EcLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Side of a single module in pixels
    pub fn module_size(&mut self, module_size: u32) -> &mut Self {
        self.module_size = module_size.max(1);
        self
    }

    pub fn quiet_zone(&mut self, quiet_zone: bool) -> &mut Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Directory used by [`QrRenderer::save`]. A leading `~` expands to the home directory.
    pub fn directory(&mut self, directory: impl AsRef<Path>) -> &mut Self {
        self.directory = directory.as_ref().to_path_buf();
        self
    }

    pub fn file_name(&mut self, file_name: &str) -> &mut Self {
        self.file_name = file_name.to_string();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        expand_home(&self.directory).join(&self.file_name)
    }

    pub fn symbol(&self, data: &str) -> PixResult<QrCode> {
        let qr = QrCode::with_error_correction_level(data.as_bytes(), self.ec_level)?;
        debug!(version = ?qr.version(), width = qr.width(), "Encoded QR symbol");
        Ok(qr)
    }

    pub fn render(&self, data: &str) -> PixResult<GrayImage> {
        let qr = self.symbol(data)?;
        let img = qr
            .render::<Luma<u8>>()
            .quiet_zone(self.quiet_zone)
            .module_dimensions(self.module_size, self.module_size)
            .build();
        Ok(img)
    }

    pub fn to_png(&self, data: &str) -> PixResult<Vec<u8>> {
        let img = self.render(data)?;
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    pub fn to_base64(&self, data: &str) -> PixResult<String> {
        Ok(STANDARD.encode(self.to_png(data)?))
    }

    /// Writes the PNG to [`QrRenderer::output_path`]. Missing directories are not created.
    pub fn save(&self, data: &str) -> PixResult<PathBuf> {
        let png = self.to_png(data)?;
        let path = self.output_path();
        fs::write(&path, png)?;
        info!(path = %path.display(), "Saved QR code image");
        Ok(path)
    }

    /// Dense unicode rendering for terminals, 2 modules per character row
    pub fn to_str(&self, data: &str) -> PixResult<String> {
        let qr = self.symbol(data)?;
        let s = qr
            .render::<Dense1x2>()
            .quiet_zone(self.quiet_zone)
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .build();
        Ok(s)
    }
}

/// Writes the QR image of `payload` as `pix_qrcode.png` under `directory`
pub fn encode_qr_image_file(payload: &str, directory: impl AsRef<Path>) -> PixResult<PathBuf> {
    QrRenderer::new().directory(directory).save(payload)
}

/// QR image of `payload` as base64 encoded PNG
pub fn encode_qr_image_base64(payload: &str) -> PixResult<String> {
    QrRenderer::new().to_base64(payload)
}

/// Expands a leading `~` to the home directory. Paths are returned untouched if
/// there is no home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod render_tests {
    use std::path::{Path, PathBuf};

    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use qrcode::{EcLevel, QrCode};
    use test_case::test_case;

    use super::{expand_home, QrRenderer, DEFAULT_FILE_NAME};
    use crate::error::PixError;

    #[test]
    fn test_render_dimensions() {
        let data = "Hello, world!";
        let qr = QrCode::with_error_correction_level(data, EcLevel::M).unwrap();
        let img = QrRenderer::new().module_size(3).render(data).unwrap();
        let exp = (qr.width() as u32 + 8) * 3;
        assert_eq!(img.dimensions(), (exp, exp));

        let img = QrRenderer::new().module_size(3).quiet_zone(false).render(data).unwrap();
        let exp = qr.width() as u32 * 3;
        assert_eq!(img.dimensions(), (exp, exp));
    }

    #[test]
    fn test_render_modules() {
        let data = "00020126330014BR.GOV.BCB.PIX";
        let qr = QrCode::with_error_correction_level(data, EcLevel::H).unwrap();
        let img = QrRenderer::new().ec_level(EcLevel::H).module_size(1).quiet_zone(false).render(data).unwrap();
        for y in 0..qr.width() {
            for x in 0..qr.width() {
                let px = img.get_pixel(x as u32, y as u32)[0];
                assert_eq!(px, qr[(x, y)].select(0u8, 255u8), "Module mismatch at {x} {y}");
            }
        }
    }

    #[test]
    fn test_png_signature() {
        let png = QrRenderer::new().to_png("PIX").unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_base64() {
        let renderer = QrRenderer::new();
        let b64 = renderer.to_base64("PIX").unwrap();
        assert_eq!(STANDARD.decode(b64).unwrap(), renderer.to_png("PIX").unwrap());
    }

    #[test]
    fn test_data_too_long() {
        let data = "9".repeat(8000);
        let res = QrRenderer::new().render(&data);
        assert!(matches!(res, Err(PixError::Render(_))));
    }

    #[test]
    fn test_to_str() {
        let s = QrRenderer::new().to_str("PIX").unwrap();
        let qr = QrCode::new("PIX").unwrap();
        // 4 module quiet zone on each side, 2 module rows per line
        assert_eq!(s.lines().count(), (qr.width() + 8).div_ceil(2));
        assert!(s.lines().all(|l| l.chars().count() == qr.width() + 8));
    }

    #[test]
    fn test_output_path() {
        let mut renderer = QrRenderer::new();
        assert_eq!(renderer.output_path(), PathBuf::from(DEFAULT_FILE_NAME));
        renderer.directory("/tmp/pix").file_name("code.png");
        assert_eq!(renderer.output_path(), PathBuf::from("/tmp/pix/code.png"));
    }

    #[test_case("/var/pix"; "absolute")]
    #[test_case("pix/codes"; "relative")]
    #[test_case("~user/pix"; "tilde prefixed name")]
    fn test_expand_home_untouched(path: &str) {
        assert_eq!(expand_home(Path::new(path)), PathBuf::from(path));
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~")), home);
            assert_eq!(expand_home(Path::new("~/pix")), home.join("pix"));
        }
    }
}
