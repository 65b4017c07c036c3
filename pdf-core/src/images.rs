use std::io;

use crate::error::{Error, Result};
use crate::objects::{ObjAllocator, ObjId, PdfObject};

/// Opaque handle to a loaded image within a PdfDocument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

impl ImageId {
    /// XObject resource name used in content streams.
    pub(crate) fn pdf_name(&self) -> String {
        format!("Im{}", self.0 + 1)
    }
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// PDF color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// Horizontal placement of flowed content inside the current bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Left,
    Center,
    Right,
}

impl Position {
    /// Offset from the left edge of a region `outer` wide for content
    /// `inner` wide.
    pub fn offset(&self, outer: f64, inner: f64) -> f64 {
        match self {
            Position::Left => 0.0,
            Position::Center => (outer - inner) / 2.0,
            Position::Right => outer - inner,
        }
    }
}

/// How an image is placed by `PdfDocument::image`.
///
/// With `at`, the image's top-left corner is pinned to that point in
/// bounds coordinates and the cursor does not move. Without it, the image
/// flows at the cursor, aligned by `position`, and the cursor moves below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageOptions {
    pub at: Option<(f64, f64)>,
    /// Scale down or up to fit inside `(width, height)`, keeping aspect.
    pub fit: Option<(f64, f64)>,
    pub position: Position,
}

/// Parsed image data ready for embedding into a PDF.
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub color_space: ColorSpace,
    pub bits_per_component: u8,
    /// Raw pixel data (RGB/Gray) or raw JPEG bytes.
    pub data: Vec<u8>,
    /// Separate alpha channel (grayscale), if present.
    pub smask_data: Option<Vec<u8>>,
}

impl ImageData {
    /// Display size in points at 72 dpi, optionally fitted into a box.
    pub fn display_size(&self, fit: Option<(f64, f64)>) -> (f64, f64) {
        let (w, h) = (self.width as f64, self.height as f64);
        match fit {
            Some((fw, fh)) if w > 0.0 && h > 0.0 => {
                let scale = (fw / w).min(fh / h);
                (w * scale, h * scale)
            }
            _ => (w, h),
        }
    }

    /// Build the image XObject (plus an SMask for alpha) and return the
    /// image's id with every object to write.
    pub(crate) fn embed(
        &self,
        alloc: &mut ObjAllocator,
        compress: bool,
    ) -> io::Result<(ObjId, Vec<(ObjId, PdfObject)>)> {
        let image_id = alloc.next_id();
        let mut objects = Vec::new();

        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(self.width as i64)),
            ("Height", PdfObject::Integer(self.height as i64)),
            ("ColorSpace", PdfObject::name(self.color_space.pdf_name())),
            ("BitsPerComponent", PdfObject::Integer(self.bits_per_component as i64)),
        ];

        if let Some(alpha) = &self.smask_data {
            let smask_id = alloc.next_id();
            let smask = PdfObject::stream_with(
                vec![
                    ("Type", PdfObject::name("XObject")),
                    ("Subtype", PdfObject::name("Image")),
                    ("Width", PdfObject::Integer(self.width as i64)),
                    ("Height", PdfObject::Integer(self.height as i64)),
                    ("ColorSpace", PdfObject::name("DeviceGray")),
                    ("BitsPerComponent", PdfObject::Integer(8)),
                ],
                alpha.clone(),
                compress,
            )?;
            dict.push(("SMask", smask_id.into()));
            objects.push((smask_id, smask));
        }

        let image = match self.format {
            ImageFormat::Jpeg => {
                dict.push(("Filter", PdfObject::name("DCTDecode")));
                PdfObject::stream(dict, self.data.clone())
            }
            ImageFormat::Png => PdfObject::stream_with(dict, self.data.clone(), compress)?,
        };
        objects.insert(0, (image_id, image));
        Ok((image_id, objects))
    }
}

/// Detect image format from magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.len() < 4 {
        return Err(Error::Image("image data too short to detect format".to_string()));
    }
    if data[0] == 0xFF && data[1] == 0xD8 {
        Ok(ImageFormat::Jpeg)
    } else if data[..4] == [0x89, 0x50, 0x4E, 0x47] {
        Ok(ImageFormat::Png)
    } else {
        Err(Error::Image("unsupported image format (expected JPEG or PNG)".to_string()))
    }
}

/// Load and parse image data from raw bytes.
pub fn load_image(data: Vec<u8>) -> Result<ImageData> {
    match detect_format(&data)? {
        ImageFormat::Jpeg => parse_jpeg(data),
        ImageFormat::Png => parse_png(data),
    }
}

/// JPEG data is embedded as-is (DCTDecode); only the SOF header is read.
fn parse_jpeg(data: Vec<u8>) -> Result<ImageData> {
    let (width, height, components) = jpeg_dimensions(&data)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => {
            return Err(Error::Image(format!(
                "unsupported JPEG component count: {} (expected 1 or 3)",
                n
            )))
        }
    };

    Ok(ImageData {
        width,
        height,
        format: ImageFormat::Jpeg,
        color_space,
        bits_per_component: 8,
        data,
        smask_data: None,
    })
}

/// Scan JPEG data for SOF0-SOF3 markers and extract width/height/components.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8)> {
    let len = data.len();
    let mut i = 0;
    while i + 1 < len {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= len {
                return Err(Error::Image("JPEG SOF marker truncated".to_string()));
            }
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            return Ok((width, height, data[i + 9]));
        }
        if marker == 0xFF || marker == 0x00 {
            i += 1;
            continue;
        }
        // Standalone markers carry no length.
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        if i + 3 >= len {
            break;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    Err(Error::Image("no SOF marker found in JPEG data".to_string()))
}

/// Decode PNG to 8-bit samples, splitting any alpha channel into an SMask.
fn parse_png(data: Vec<u8>) -> Result<ImageData> {
    let mut decoder = png::Decoder::new(data.as_slice());
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| Error::Image(format!("PNG decode error: {}", e)))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| Error::Image(format!("PNG frame error: {}", e)))?;
    buf.truncate(info.buffer_size());

    let (color_space, samples, alpha) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, buf, None),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, buf, None),
        png::ColorType::Rgba => {
            let (rgb, alpha) = split_alpha(&buf, 4);
            (ColorSpace::DeviceRGB, rgb, Some(alpha))
        }
        png::ColorType::GrayscaleAlpha => {
            let (gray, alpha) = split_alpha(&buf, 2);
            (ColorSpace::DeviceGray, gray, Some(alpha))
        }
        other => return Err(Error::Image(format!("unsupported PNG color type: {:?}", other))),
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        format: ImageFormat::Png,
        color_space,
        bits_per_component: 8,
        data: samples,
        smask_data: alpha,
    })
}

/// Split interleaved samples whose last channel is alpha.
fn split_alpha(buf: &[u8], channels: usize) -> (Vec<u8>, Vec<u8>) {
    let pixels = buf.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for chunk in buf.chunks_exact(channels) {
        color.extend_from_slice(&chunk[..channels - 1]);
        alpha.push(chunk[channels - 1]);
    }
    (color, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats_by_magic() {
        assert_eq!(detect_format(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(), ImageFormat::Jpeg);
        assert_eq!(detect_format(&[0x89, b'P', b'N', b'G']).unwrap(), ImageFormat::Png);
        assert!(detect_format(b"GIF8").is_err());
        assert!(detect_format(&[0xFF]).is_err());
    }

    #[test]
    fn reads_jpeg_dimensions_from_sof() {
        // SOI, APP0 (length 4), SOF0 with 50x20 and 3 components, EOI.
        let jpeg = vec![
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00,
            0x14, 0x00, 0x32, 0x03, 0x01, 0x11, 0x00, 0xFF, 0xD9,
        ];
        let image = load_image(jpeg).unwrap();
        assert_eq!((image.width, image.height), (50, 20));
        assert_eq!(image.color_space, ColorSpace::DeviceRGB);
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let image = ImageData {
            width: 400,
            height: 100,
            format: ImageFormat::Png,
            color_space: ColorSpace::DeviceRGB,
            bits_per_component: 8,
            data: Vec::new(),
            smask_data: None,
        };
        assert_eq!(image.display_size(Some((200.0, 50.0))), (200.0, 50.0));
        assert_eq!(image.display_size(Some((100.0, 100.0))), (100.0, 25.0));
        assert_eq!(image.display_size(None), (400.0, 100.0));
    }

    #[test]
    fn position_offsets() {
        assert_eq!(Position::Left.offset(540.0, 100.0), 0.0);
        assert_eq!(Position::Center.offset(540.0, 100.0), 220.0);
        assert_eq!(Position::Right.offset(540.0, 100.0), 440.0);
    }

    #[test]
    fn split_alpha_separates_channels() {
        let (rgb, alpha) = split_alpha(&[1, 2, 3, 255, 4, 5, 6, 0], 4);
        assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(alpha, vec![255, 0]);
    }
}
