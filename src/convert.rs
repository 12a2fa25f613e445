//! Image to single-page PDF conversion.
//!
//! Each image becomes a document with exactly one page whose MediaBox matches
//! the image's pixel dimensions (one pixel per user space unit). The image is
//! drawn from the origin and stretched over the whole page, so nothing is
//! cropped or letterboxed.
//!
//! JPEG files are embedded byte-for-byte behind a `DCTDecode` filter. PNG files
//! are decoded to 8-bit samples; an alpha channel becomes a soft mask.

use image::codecs::jpeg::JpegDecoder;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageResult};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

use crate::classify::ImageEncoding;
use crate::document::DocumentHandle;
use crate::error::{BundleError, Result};

/// Resource name the page content uses to reference the image.
const IMAGE_RESOURCE: &[u8] = b"Im0";

/// Colour space of the embedded samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// One grey component.
    DeviceGray,
    /// Red, green and blue components.
    DeviceRgb,
    /// Cyan, magenta, yellow and black components.
    DeviceCmyk,
}

impl ColorSpace {
    /// PDF name of the colour space.
    pub fn pdf_name(self) -> &'static str {
        match self {
            Self::DeviceGray => "DeviceGray",
            Self::DeviceRgb => "DeviceRGB",
            Self::DeviceCmyk => "DeviceCMYK",
        }
    }
}

/// A decoded image ready to be embedded as an image XObject.
#[derive(Debug)]
pub struct PageImage {
    width: u32,
    height: u32,
    encoding: ImageEncoding,
    color_space: ColorSpace,
    /// DCT bytes for JPEG, raw 8-bit samples for PNG.
    data: Vec<u8>,
    /// 8-bit alpha samples, PNG only.
    alpha: Option<Vec<u8>>,
}

impl PageImage {
    /// Decode `bytes` as the given encoding.
    ///
    /// The extension decides the decoder; the bytes are never sniffed.
    pub fn decode(bytes: Vec<u8>, encoding: ImageEncoding) -> ImageResult<Self> {
        match encoding {
            ImageEncoding::Jpeg => Self::decode_jpeg(bytes),
            ImageEncoding::Png => Self::decode_png(&bytes),
        }
    }

    fn decode_jpeg(bytes: Vec<u8>) -> ImageResult<Self> {
        let decoder = JpegDecoder::new(Cursor::new(bytes.as_slice()))?;
        let (width, height) = decoder.dimensions();

        // Headers alone accept truncated scans; decode fully to reject them.
        DynamicImage::from_decoder(decoder)?;

        // The decoder converts CMYK to RGB, so read the stored component count.
        let color_space = match jpeg_components(&bytes) {
            Some(1) => ColorSpace::DeviceGray,
            Some(4) => ColorSpace::DeviceCmyk,
            _ => ColorSpace::DeviceRgb,
        };

        Ok(Self {
            width,
            height,
            encoding: ImageEncoding::Jpeg,
            color_space,
            data: bytes,
            alpha: None,
        })
    }

    fn decode_png(bytes: &[u8]) -> ImageResult<Self> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        let color = image.color();

        let (color_space, data) = if color.has_color() {
            (ColorSpace::DeviceRgb, image.to_rgb8().into_raw())
        } else {
            (ColorSpace::DeviceGray, image.to_luma8().into_raw())
        };

        let alpha = color
            .has_alpha()
            .then(|| image.to_luma_alpha8().pixels().map(|p| p.0[1]).collect());

        Ok(Self {
            width: image.width(),
            height: image.height(),
            encoding: ImageEncoding::Png,
            color_space,
            data,
            alpha,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Colour space of the embedded samples.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Whether a soft mask will be embedded alongside the image.
    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Build a one-page document that shows this image at its native size.
    pub fn into_document(self) -> Result<Document> {
        let width = i64::from(self.width);
        let height = i64::from(self.height);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut image_dict = self.xobject_dict(self.color_space);
        let mask_dict = self.xobject_dict(ColorSpace::DeviceGray);
        match self.encoding {
            ImageEncoding::Jpeg => {
                image_dict.set("Filter", "DCTDecode");
                // Adobe writes CMYK JPEGs inverted.
                if self.color_space == ColorSpace::DeviceCmyk {
                    let decode = [1, 0, 1, 0, 1, 0, 1, 0]
                        .into_iter()
                        .map(Object::Integer)
                        .collect::<Vec<_>>();
                    image_dict.set("Decode", decode);
                }
            }
            ImageEncoding::Png => {
                if let Some(alpha) = self.alpha {
                    let mask = Stream::new(mask_dict, alpha);
                    let mask_id = doc.add_object(mask);
                    image_dict.set("SMask", mask_id);
                }
            }
        }
        let image_id = doc.add_object(Stream::new(image_dict, self.data));

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        width.into(),
                        0.into(),
                        0.into(),
                        height.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_RESOURCE.to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    IMAGE_RESOURCE => image_id,
                },
            },
        });

        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }
            .into(),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    fn xobject_dict(&self, color_space: ColorSpace) -> Dictionary {
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(self.width),
            "Height" => i64::from(self.height),
            "ColorSpace" => color_space.pdf_name(),
            "BitsPerComponent" => 8,
        }
    }
}

/// Number of colour components declared by the first start-of-frame segment.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    while pos < bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        // Markers may be padded with any number of 0xFF fill bytes.
        while bytes.get(pos) == Some(&0xFF) {
            pos += 1;
        }
        let marker = *bytes.get(pos)?;
        pos += 1;

        match marker {
            // Standalone markers carry no length.
            0x01 | 0xD0..=0xD8 => continue,
            // Scan data or end of image before any frame header.
            0xD9 | 0xDA => return None,
            // SOF0..SOF15, minus DHT, JPG and DAC.
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                // Length (2), precision (1), height (2), width (2), components.
                return bytes.get(pos + 7).copied();
            }
            _ => {
                let len = u16::from_be_bytes([*bytes.get(pos)?, *bytes.get(pos + 1)?]);
                pos += usize::from(len);
            }
        }
    }
    None
}

/// Read the image at `path` and wrap it in a one-page document.
///
/// # Errors
///
/// - [`BundleError::Io`] if the file cannot be read.
/// - [`BundleError::UnsupportedImageFormat`] if the bytes do not decode as
///   `encoding`, including a PNG saved with a `.jpg` extension.
pub async fn convert_image(path: &Path, encoding: ImageEncoding) -> Result<DocumentHandle> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| BundleError::io(path, err))?;

    let image = PageImage::decode(bytes, encoding)
        .map_err(|err| BundleError::unsupported_image(path, err.to_string()))?;

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        color_space = image.color_space().pdf_name(),
        "converted image to page"
    );

    let document = image.into_document()?;
    Ok(DocumentHandle::new(path, document))
}
