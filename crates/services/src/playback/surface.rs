use quiz_core::model::SurfaceCapabilities;

use crate::error::SurfaceDecodeError;

/// Player state codes reported by the YouTube iframe API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Unknown(i64),
}

impl PlayerState {
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => Self::Unstarted,
            0 => Self::Ended,
            1 => Self::Playing,
            2 => Self::Paused,
            3 => Self::Buffering,
            5 => Self::Cued,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
            Self::Cued => 5,
            Self::Unknown(code) => code,
        }
    }
}

/// Something a surface told us about playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    Time {
        current_time: f64,
        player_state: Option<PlayerState>,
    },
    StateChange(PlayerState),
}

/// An embedded third-party player.
///
/// Commands are fire-and-forget. A surface without `accepts_commands`
/// ignores them.
pub trait VideoSurface {
    fn capabilities(&self) -> SurfaceCapabilities;

    fn play(&mut self);

    fn pause(&mut self);

    fn seek_to(&mut self, secs: f64);

    /// Ask the player to report its state. Called once per tick.
    fn poll(&mut self);

    /// Decode a raw inbound message.
    ///
    /// Returns `Ok(None)` for messages that carry nothing useful.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceDecodeError` if the message is not in the expected format.
    fn decode_event(&self, _raw: &str) -> Result<Option<SurfaceEvent>, SurfaceDecodeError> {
        Ok(None)
    }
}

/// Google Drive preview iframe. Opaque: no time feed, no commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveSurface;

impl VideoSurface for DriveSurface {
    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities::default()
    }

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn seek_to(&mut self, _secs: f64) {}

    fn poll(&mut self) {}
}
