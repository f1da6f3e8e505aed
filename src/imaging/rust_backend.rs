//! Pure Rust codec backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, GIF, BMP, TIFF, WebP) | `image::ImageReader` with format sniffing |
//! | Normalize → RGBA8 | [`normalize`](super::normalize::normalize) |
//! | Encode | `image::save_buffer` on the packed bytes, format from the extension |

use super::backend::{BackendError, ImageBackend};
use super::buffer::PixelBuffer;
use super::normalize::normalize;
use image::{ExtendedColorType, ImageError, ImageFormat, ImageReader};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions with a decoder compiled in.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Backend using the `image` crate for decode and encode.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(e) => BackendError::Io(e),
        ImageError::Unsupported(e) => {
            BackendError::UnsupportedFormat(format!("{}: {e}", path.display()))
        }
        other => BackendError::Decode(format!("{}: {other}", path.display())),
    }
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<PixelBuffer, BackendError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| decode_error(path, e))?;
        Ok(normalize(decoded))
    }

    fn save(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), BackendError> {
        image::save_buffer(
            path,
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| BackendError::Encode(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{write_corrupt, write_png};
    use image::{ImageEncoder, RgbImage};

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = supported_input_extensions();
        for expected in &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn load_png_round_trips_rgba() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("a.png");
        let buf = PixelBuffer::from_fn(5, 3, |x, y| [x as u8 * 40, y as u8 * 80, 7, 200]);
        write_png(&path, &buf);

        let loaded = RustBackend::new().load(&path).unwrap();
        assert_eq!(loaded, buf);
    }

    #[test]
    fn load_rgb_jpeg_is_normalized_to_four_channels() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        let img = RgbImage::from_fn(16, 8, |x, y| {
            image::Rgb([(x * 10) as u8, (y * 20) as u8, 128])
        });
        let file = std::fs::File::create(&path).unwrap();
        image::codecs::jpeg::JpegEncoder::new(std::io::BufWriter::new(file))
            .write_image(img.as_raw(), 16, 8, image::ExtendedColorType::Rgb8)
            .unwrap();

        let loaded = RustBackend::new().load(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (16, 8));
        assert_eq!(loaded.as_bytes().len(), 16 * 8 * 4);
        assert!(loaded.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn load_corrupt_file_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        write_corrupt(&path);
        let err = RustBackend::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            BackendError::Decode(_) | BackendError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn load_nonexistent_file_is_io_error() {
        let err = RustBackend::new()
            .load(Path::new("/nonexistent/image.png"))
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[test]
    fn save_writes_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out_Greyscale.png");
        RustBackend::new()
            .save(&PixelBuffer::new(4, 4), &path)
            .unwrap();
        assert!(path.exists());
        assert_eq!(image::image_dimensions(&path).unwrap(), (4, 4));
    }

    #[test]
    fn save_keeps_every_byte_including_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("alpha_Sobel.png");
        let buf = PixelBuffer::from_fn(3, 2, |x, y| [x as u8 * 90, y as u8 * 7, 5, 17 + x as u8]);
        let backend = RustBackend::new();
        backend.save(&buf, &path).unwrap();
        assert_eq!(backend.load(&path).unwrap(), buf);
    }

    #[test]
    fn save_unknown_extension_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.nope");
        let result = RustBackend::new().save(&PixelBuffer::new(2, 2), &path);
        assert!(matches!(result, Err(BackendError::Encode(_))));
    }
}
