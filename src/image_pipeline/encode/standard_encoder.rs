use std::io::Write;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::pixel::types::PixelBuffer;
use crate::image_pipeline::encode::types::{OutputConfig, OutputFormat, TiffCompression};
use crate::image_pipeline::encode::encoder::ImageEncoder;

/// Encodes to JPEG with the `image` crate and to TIFF with the `tiff` crate.
/// Both outputs are 8-bit RGB; alpha is dropped since composites are opaque.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardImageEncoder;

impl StandardImageEncoder {
    fn encode_jpeg(&self, image: &PixelBuffer, output: &mut dyn Write, quality: u8) -> Result<()> {
        let rgb = image.to_rgb8();
        JpegEncoder::new_with_quality(output, quality)
            .encode(&rgb, image.width() as u32, image.height() as u32, ExtendedColorType::Rgb8)
            .map_err(|e| PipelineError::EncodeError(e.to_string()))
    }

    fn encode_tiff(&self, image: &PixelBuffer, output: &mut dyn Write, compression: TiffCompression) -> Result<()> {
        let mut buffer = Vec::new();

        let compression = match compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        // TIFF needs Seek, so encode in memory first
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression);

        encoder.write_image::<tiff::encoder::colortype::RGB8>(
            image.width() as u32,
            image.height() as u32,
            &image.to_rgb8(),
        ).map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}

impl ImageEncoder for StandardImageEncoder {
    fn encode(&self, image: &PixelBuffer, output: &mut dyn Write, config: &OutputConfig) -> Result<()> {
        debug!("Encoding image: {}x{} as {:?}", image.width(), image.height(), config.format);

        match config.format {
            OutputFormat::Jpeg { quality } => self.encode_jpeg(image, output, quality)?,
            OutputFormat::Tiff(compression) => self.encode_tiff(image, output, compression)?,
        }

        debug!("Encoding complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::pixel::types::Rgba;
    use image::GenericImageView;

    fn sample() -> PixelBuffer {
        PixelBuffer::filled(8, 4, Rgba::opaque(200, 40, 10)).unwrap()
    }

    #[test]
    fn test_jpeg_output_decodes_to_same_size() {
        let mut bytes = Vec::new();
        StandardImageEncoder
            .encode(&sample(), &mut bytes, &OutputConfig::default())
            .unwrap();

        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn test_tiff_output_is_lossless() {
        let config = OutputConfig::builder().tiff(TiffCompression::DeflateFast).build();
        let mut bytes = Vec::new();
        StandardImageEncoder.encode(&sample(), &mut bytes, &config).unwrap();

        let mut decoder = tiff::decoder::Decoder::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (8, 4));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U8(data) => assert_eq!(data, sample().to_rgb8()),
            other => panic!("unexpected sample type: {:?}", std::mem::discriminant(&other)),
        }
    }
}
