//! Durable storage for composites.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::encode::{ImageEncoder, OutputConfig, StandardImageEncoder};
use crate::image_pipeline::pixel::types::PixelBuffer;

/// Encodes a composite and writes it somewhere durable.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores `image` and returns the path it was written to.
    async fn persist(&self, image: PixelBuffer, taken_at_millis: i64) -> Result<PathBuf>;
}

/// Writes composites into a directory, named after their capture time.
pub struct FileImageStore<E: ImageEncoder = StandardImageEncoder> {
    output_dir: PathBuf,
    encoder: Arc<E>,
    config: OutputConfig,
}

impl FileImageStore<StandardImageEncoder> {
    pub fn new(output_dir: impl Into<PathBuf>, config: OutputConfig) -> Self {
        Self::with_encoder(output_dir, StandardImageEncoder, config)
    }
}

impl<E: ImageEncoder + 'static> FileImageStore<E> {
    pub fn with_encoder(output_dir: impl Into<PathBuf>, encoder: E, config: OutputConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            encoder: Arc::new(encoder),
            config,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }
}

#[async_trait]
impl<E: ImageEncoder + 'static> ImageStore for FileImageStore<E> {
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    async fn persist(&self, image: PixelBuffer, taken_at_millis: i64) -> Result<PathBuf> {
        let path = self.output_dir.join(self.config.file_name(taken_at_millis));
        let encoder = self.encoder.clone();
        let config = self.config.clone();
        let target = path.clone();

        // encoding and file IO are blocking
        tokio::task::spawn_blocking(move || write_image(encoder.as_ref(), &image, &target, &config))
            .await
            .map_err(|e| PipelineError::PersistFailure(format!("encode task failed: {}", e)))??;

        info!(path = %path.display(), "Image saved");
        Ok(path)
    }
}

fn write_image<E: ImageEncoder + ?Sized>(
    encoder: &E,
    image: &PixelBuffer,
    path: &Path,
    config: &OutputConfig,
) -> Result<()> {
    let result = (|| -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut output = BufWriter::new(File::create(path)?);
        encoder.encode(image, &mut output, config)?;
        output.flush()?;
        Ok(())
    })();

    result.map_err(|e| {
        // leave nothing half-written behind
        if path.exists() {
            if let Err(remove_err) = std::fs::remove_file(path) {
                warn!(path = %path.display(), "Failed to remove partial image: {}", remove_err);
            }
        }
        PipelineError::PersistFailure(format!("{}: {}", path.display(), e))
    })
}
