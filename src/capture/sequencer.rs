use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::capture::catalogue::{CapturedImageRecord, ImageCatalogue};
use crate::capture::config::SequencerConfig;
use crate::capture::source::FrameSource;
use crate::capture::state::CaptureState;
use crate::capture::store::ImageStore;
use crate::capture::timing::{SessionTimings, Stage};
use crate::image_pipeline::{
    channel::{Channel, isolate},
    common::error::{PipelineError, Result},
    composite::composite,
    decode::{FrameDecoder, StandardFrameDecoder},
    pixel::types::PixelBuffer,
};

/// Drives a three-exposure capture: red, green, then blue, with a pause
/// between exposures for the filter change, followed by recombination and
/// storage.
///
/// The sequencer is the only writer of its [`CaptureState`]. A new session can
/// only start from `Ready`; after `Done` or `Error` the state returns to
/// `Ready` on its own once the settle delay has passed.
pub struct CaptureSequencer<D: FrameDecoder = StandardFrameDecoder> {
    decoder: D,
    store: Arc<dyn ImageStore>,
    catalogue: Arc<dyn ImageCatalogue>,
    config: SequencerConfig,
    state: watch::Sender<CaptureState>,
}

impl CaptureSequencer<StandardFrameDecoder> {
    pub fn new(
        store: Arc<dyn ImageStore>,
        catalogue: Arc<dyn ImageCatalogue>,
        config: SequencerConfig,
    ) -> Self {
        Self::with_decoder(StandardFrameDecoder, store, catalogue, config)
    }
}

impl<D: FrameDecoder> CaptureSequencer<D> {
    pub fn with_decoder(
        decoder: D,
        store: Arc<dyn ImageStore>,
        catalogue: Arc<dyn ImageCatalogue>,
        config: SequencerConfig,
    ) -> Self {
        let (state, _) = watch::channel(CaptureState::Ready);
        Self {
            decoder,
            store,
            catalogue,
            config,
            state,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> CaptureState {
        self.state.borrow().clone()
    }

    /// Stream of state changes.
    pub fn subscribe(&self) -> watch::Receiver<CaptureState> {
        self.state.subscribe()
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Runs one capture session with `delay` between consecutive exposures.
    ///
    /// Returns the catalogue record of the stored composite, or the error that
    /// ended the session. Either way the sequencer is back in `Ready` when this
    /// returns. Fails with [`PipelineError::AlreadyCapturing`], without
    /// touching the running session, if one is already in progress.
    #[instrument(skip(self, source), fields(delay_ms = delay.as_millis() as u64))]
    pub async fn run_capture(&self, source: &dyn FrameSource, delay: Duration) -> Result<CapturedImageRecord> {
        let started = self.state.send_if_modified(|state| {
            if state.is_ready() {
                *state = CaptureState::Capturing;
                true
            } else {
                false
            }
        });
        if !started {
            warn!("Capture requested while {}", *self.state.borrow());
            return Err(PipelineError::AlreadyCapturing);
        }

        info!("Starting capture session");
        let mut session = CaptureSession::new(&self.state, delay);
        let mut timings = SessionTimings::new();

        let outcome = self.capture_and_combine(&mut session, source, &mut timings).await;
        timings.log_summary();

        let terminal = match &outcome {
            Ok(record) => {
                info!(id = record.id, path = %record.path.display(), "Capture session complete");
                CaptureState::Done
            }
            Err(e) => {
                error!("Capture session failed: {}", e);
                CaptureState::Error(e.to_string())
            }
        };

        // drops any intermediate buffers still held
        session.finish(terminal);
        tokio::time::sleep(self.config.settle_delay).await;
        // back to Ready, also if this future is dropped during the settle delay
        drop(session);

        outcome
    }

    async fn capture_and_combine(
        &self,
        session: &mut CaptureSession<'_>,
        source: &dyn FrameSource,
        timings: &mut SessionTimings,
    ) -> Result<CapturedImageRecord> {
        for (step, channel) in Channel::CAPTURE_ORDER.into_iter().enumerate() {
            if step > 0 {
                debug!("Waiting {:?} for filter change before {} exposure", session.delay, channel);
                tokio::time::sleep(session.delay).await;
            }
            let buffer = self.capture_channel(source, channel, timings).await?;
            session.store(channel, buffer);
        }

        let [red, green, blue] = session.take_all()?;

        let timer = timings.start(Stage::Composite, None);
        let combined = {
            let _span = tracing::info_span!("composite").entered();
            composite(&red, &green, &blue)?
        };
        timings.record(timer);
        drop((red, green, blue));

        let taken_at_millis = chrono::Utc::now().timestamp_millis();

        let timer = timings.start(Stage::Persist, None);
        let path = self
            .store
            .persist(combined, taken_at_millis)
            .await
            .map_err(as_persist_failure)?;
        let record = self
            .catalogue
            .insert(path, taken_at_millis)
            .await
            .map_err(as_persist_failure)?;
        timings.record(timer);

        Ok(record)
    }

    async fn capture_channel(
        &self,
        source: &dyn FrameSource,
        channel: Channel,
        timings: &mut SessionTimings,
    ) -> Result<PixelBuffer> {
        info!("Capturing {} exposure", channel);

        let timer = timings.start(Stage::Capture, Some(channel));
        let frame = source.request_frame().await.map_err(|e| match e {
            PipelineError::CaptureFailure(_) => e,
            other => PipelineError::CaptureFailure(format!("{} exposure: {}", channel, other)),
        })?;
        timings.record(timer);

        let timer = timings.start(Stage::Decode, Some(channel));
        let decoded = {
            let _span = tracing::info_span!("decode", %channel).entered();
            self.decoder.decode(frame)?
        };
        timings.record(timer);

        let timer = timings.start(Stage::Isolate, Some(channel));
        let isolated = isolate(&decoded, channel);
        timings.record(timer);

        Ok(isolated)
    }
}

fn as_persist_failure(e: PipelineError) -> PipelineError {
    match e {
        PipelineError::PersistFailure(_) => e,
        other => PipelineError::PersistFailure(other.to_string()),
    }
}

/// State of one run: the requested delay and the per-channel slots.
///
/// The session lives until the settle delay is over. Dropping it always puts
/// the sequencer back in `Ready`, whether the run completed or the caller
/// abandoned the `run_capture` future part way.
struct CaptureSession<'a> {
    delay: Duration,
    slots: [Option<PixelBuffer>; 3],
    state: &'a watch::Sender<CaptureState>,
    finished: bool,
}

impl<'a> CaptureSession<'a> {
    fn new(state: &'a watch::Sender<CaptureState>, delay: Duration) -> Self {
        Self {
            delay,
            slots: [None, None, None],
            state,
            finished: false,
        }
    }

    fn store(&mut self, channel: Channel, buffer: PixelBuffer) {
        debug!(%channel, width = buffer.width(), height = buffer.height(), "exposure stored");
        self.slots[channel.index()] = Some(buffer);
    }

    fn take_all(&mut self) -> Result<[PixelBuffer; 3]> {
        match [self.slots[0].take(), self.slots[1].take(), self.slots[2].take()] {
            [Some(red), Some(green), Some(blue)] => Ok([red, green, blue]),
            _ => Err(PipelineError::CaptureFailure(
                "session ended without all three exposures".to_string(),
            )),
        }
    }

    fn captured(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Publishes the outcome and discards any exposures still held.
    fn finish(&mut self, terminal: CaptureState) {
        self.slots = [None, None, None];
        self.finished = true;
        self.state.send_replace(terminal);
    }
}

impl Drop for CaptureSession<'_> {
    fn drop(&mut self) {
        let held = self.captured();
        if held > 0 {
            debug!(held, "discarding captured exposures");
        }
        if !self.finished {
            warn!("Capture session abandoned, resetting to ready");
        }
        self.state.send_replace(CaptureState::Ready);
    }
}
