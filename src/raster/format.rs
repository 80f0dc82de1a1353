use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

const PBM_THRESHOLD: u8 = 128;

/// Output formats the renderer can hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    Bmp,
    Gif,
    Jpeg,
    Pbm,
    #[default]
    Png,
    Tga,
    Tiff,
    Webp,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 8] = [
        ImageFormat::Bmp,
        ImageFormat::Gif,
        ImageFormat::Jpeg,
        ImageFormat::Pbm,
        ImageFormat::Png,
        ImageFormat::Tga,
        ImageFormat::Tiff,
        ImageFormat::Webp,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Pbm => "pbm",
            ImageFormat::Png => "png",
            ImageFormat::Tga => "tga",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Webp => "webp",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "bmp" => Some(ImageFormat::Bmp),
            "gif" => Some(ImageFormat::Gif),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "pbm" => Some(ImageFormat::Pbm),
            "png" => Some(ImageFormat::Png),
            "tga" => Some(ImageFormat::Tga),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    fn codec(self) -> image::ImageFormat {
        match self {
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Pbm => image::ImageFormat::Pnm,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Tga => image::ImageFormat::Tga,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode `image` into an in-memory file of the given format.
pub fn encode_image(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut out, format.codec())
            .context("failed to encode jpeg")?,
        // PBM samples are 0 (black) or 1 (white).
        ImageFormat::Pbm => {
            let mut luma = image.to_luma8();
            for pixel in luma.pixels_mut() {
                pixel.0[0] = u8::from(pixel.0[0] >= PBM_THRESHOLD);
            }
            PnmEncoder::new(&mut out)
                .with_subtype(PnmSubtype::Bitmap(SampleEncoding::Binary))
                .write_image(luma.as_raw(), luma.width(), luma.height(), ExtendedColorType::L8)
                .context("failed to encode pbm")?
        }
        other => image
            .write_to(&mut out, other.codec())
            .with_context(|| format!("failed to encode {}", other))?,
    }
    Ok(out.into_inner())
}

/// Encode and write `image` to `path`.
pub fn save_image(image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    let bytes = encode_image(image, format)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::{Ean13Encoder, SymbolInput};
    use crate::layout::{Color, RenderConfig};
    use crate::raster::render_image;
    use image::RgbaImage;

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.PNG")), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path(Path::new("x.jpeg")), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path(Path::new("x.tif")), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::from_path(Path::new("x.svg")), None);
        assert_eq!(ImageFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn extension_round_trips_through_from_path() {
        for format in ImageFormat::ALL {
            let name = format!("out.{}", format.extension());
            assert_eq!(ImageFormat::from_path(Path::new(&name)), Some(format));
        }
    }

    #[test]
    fn png_and_jpeg_carry_their_signatures() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255])));
        let png = encode_image(&image, ImageFormat::Png).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
        let jpeg = encode_image(&image, ImageFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[..2], &[0xff, 0xd8]);
        let bmp = encode_image(&image, ImageFormat::Bmp).unwrap();
        assert_eq!(&bmp[..2], b"BM");
        let pbm = encode_image(&image, ImageFormat::Pbm).unwrap();
        assert_eq!(&pbm[..2], b"P4");
    }

    #[test]
    fn every_format_decodes_back() {
        let input: SymbolInput = "978600569175".parse().unwrap();
        let symbol = Ean13Encoder::new().encode(&input);
        let config = RenderConfig {
            width: 380,
            height: 60,
            foreground: Color::rgb(0x10, 0x30, 0xa0),
            show_label: true,
            ..RenderConfig::default()
        };
        let image = render_image(&symbol, &config).unwrap();

        for format in ImageFormat::ALL {
            let bytes = encode_image(&image, format)
                .unwrap_or_else(|err| panic!("{} failed to encode: {:#}", format, err));
            let decoded = image::load_from_memory_with_format(&bytes, format.codec())
                .unwrap_or_else(|err| panic!("{} failed to decode: {}", format, err));
            assert_eq!((decoded.width(), decoded.height()), (380, 80), "{}", format);

            // 380 / 95 = 4px modules, no shift: module 0 is the first start-guard bar
            let luma = decoded.to_luma8();
            assert!(luma.get_pixel(1, 40).0[0] < 128, "{} lost the start guard", format);
            assert!(luma.get_pixel(6, 40).0[0] >= 128, "{} lost the gap", format);
        }
    }

    #[test]
    fn pbm_is_strictly_two_tone() {
        let mut image = RgbaImage::from_pixel(8, 1, image::Rgba([255, 255, 255, 255]));
        image.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, image::Rgba([0x10, 0x30, 0xa0, 255]));
        image.put_pixel(2, 0, image::Rgba([200, 200, 200, 255]));
        let bytes = encode_image(&DynamicImage::ImageRgba8(image), ImageFormat::Pbm).unwrap();

        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Pnm)
            .unwrap()
            .to_luma8();
        let row: Vec<u8> = decoded.pixels().map(|p| p.0[0]).collect();
        assert_eq!(row, vec![0, 0, 255, 255, 255, 255, 255, 255]);
    }
}
