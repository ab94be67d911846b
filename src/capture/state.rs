use std::fmt;

/// Lifecycle of the capture sequencer as seen by observers.
///
/// `Ready -> Capturing -> Done | Error -> Ready`. Only the sequencer moves
/// between states; observers get snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Ready,
    Capturing,
    Done,
    Error(String),
}

impl CaptureState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CaptureState::Ready)
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Ready => f.write_str("ready"),
            CaptureState::Capturing => f.write_str("capturing"),
            CaptureState::Done => f.write_str("done"),
            CaptureState::Error(message) => write!(f, "error: {}", message),
        }
    }
}
