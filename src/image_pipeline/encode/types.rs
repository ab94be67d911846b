//! Output encoding configuration types

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// File name prefix for stored composites.
pub const DEFAULT_FILE_PREFIX: &str = "trichroma-picture";

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Container format for stored composites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy JPEG at the given quality (1-100)
    Jpeg { quality: u8 },
    /// Lossless 8-bit RGB TIFF
    Tiff(TiffCompression),
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "jpg",
            OutputFormat::Tiff(_) => "tiff",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg { quality: DEFAULT_JPEG_QUALITY }
    }
}

/// Configuration for encoding and naming stored composites
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Encoding to use
    pub format: OutputFormat,
    /// Prefix of generated file names, followed by the capture time in epoch millis
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn builder() -> OutputConfigBuilder {
        OutputConfigBuilder::default()
    }

    /// File name for a composite captured at `taken_at_millis`.
    pub fn file_name(&self, taken_at_millis: i64) -> String {
        format!("{}-{}.{}", self.file_prefix, taken_at_millis, self.format.extension())
    }
}

/// Builder for OutputConfig
#[derive(Default)]
pub struct OutputConfigBuilder {
    format: Option<OutputFormat>,
    file_prefix: Option<String>,
}

impl OutputConfigBuilder {
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Shorthand for JPEG output; quality is clamped to 1..=100.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.format = Some(OutputFormat::Jpeg { quality: quality.clamp(1, 100) });
        self
    }

    pub fn tiff(mut self, compression: TiffCompression) -> Self {
        self.format = Some(OutputFormat::Tiff(compression));
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = Some(prefix.into());
        self
    }

    pub fn build(self) -> OutputConfig {
        let default = OutputConfig::default();
        OutputConfig {
            format: self.format.unwrap_or(default.format),
            file_prefix: self.file_prefix.unwrap_or(default.file_prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_jpeg_quality_90() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Jpeg { quality: 90 });
        assert_eq!(config.file_name(1700000000000), "trichroma-picture-1700000000000.jpg");
    }

    #[test]
    fn test_config_builder() {
        let config = OutputConfig::builder()
            .tiff(TiffCompression::Lzw)
            .file_prefix("shot")
            .build();

        assert_eq!(config.format, OutputFormat::Tiff(TiffCompression::Lzw));
        assert_eq!(config.file_name(5), "shot-5.tiff");
    }

    #[test]
    fn test_jpeg_quality_is_clamped() {
        let config = OutputConfig::builder().jpeg_quality(0).build();
        assert_eq!(config.format, OutputFormat::Jpeg { quality: 1 });
    }
}
