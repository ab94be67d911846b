//! Frame sources the sequencer can trigger.

use std::collections::VecDeque;
use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use image::{ImageFormat, ImageReader};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::types::RawFrame;

/// A capture trigger. Each call asks the device for one exposure and resolves
/// when the device delivers it.
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn request_frame(&self) -> Result<RawFrame>;
}

/// Serves JPEG exposures already on disk, one file per request, in order.
///
/// Useful for recombining three filtered shots taken with a camera that is not
/// driven directly.
#[derive(Debug)]
pub struct FileFrameSource {
    pending: Mutex<VecDeque<PathBuf>>,
}

impl FileFrameSource {
    pub fn new<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            pending: Mutex::new(paths.into_iter().collect()),
        }
    }
}

#[async_trait]
impl FrameSource for FileFrameSource {
    async fn request_frame(&self) -> Result<RawFrame> {
        let path = self
            .pending
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| PipelineError::CaptureFailure("no exposures left to read".to_string()))?;

        info!(path = %path.display(), "Reading exposure");

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            PipelineError::CaptureFailure(format!("{}: {}", path.display(), e))
        })?;

        let (width, height) = ImageReader::with_format(Cursor::new(&bytes), ImageFormat::Jpeg)
            .into_dimensions()
            .map_err(|e| PipelineError::CaptureFailure(format!("{}: {}", path.display(), e)))?;

        debug!(width, height, bytes = bytes.len(), "exposure loaded");
        Ok(RawFrame::jpeg(bytes, width as usize, height as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::frame::types::PixelLayout;
    use image::ExtendedColorType;
    use image::codecs::jpeg::JpegEncoder;

    fn write_jpeg(path: &std::path::Path, width: u32, height: u32) {
        let rgb = vec![77u8; (width * height * 3) as usize];
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, 90)
            .encode(&rgb, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[tokio::test]
    async fn test_serves_files_in_order_then_fails() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("red.jpg");
        let second = dir.path().join("green.jpg");
        write_jpeg(&first, 6, 4);
        write_jpeg(&second, 2, 2);

        let source = FileFrameSource::new(vec![first, second]);

        let frame = source.request_frame().await.unwrap();
        assert_eq!(frame.layout(), PixelLayout::EncodedJpeg);
        assert_eq!((frame.crop().width, frame.crop().height), (6, 4));

        let frame = source.request_frame().await.unwrap();
        assert_eq!((frame.crop().width, frame.crop().height), (2, 2));

        let result = source.request_frame().await;
        assert!(matches!(result, Err(PipelineError::CaptureFailure(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_capture_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileFrameSource::new(vec![dir.path().join("absent.jpg")]);

        let result = source.request_frame().await;

        assert!(matches!(result, Err(PipelineError::CaptureFailure(_))));
    }
}
