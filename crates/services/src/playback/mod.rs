mod controller;
mod skip_guard;
mod surface;
mod synthetic_clock;
mod youtube;

use quiz_core::model::VideoKind;

pub use controller::{PlaybackController, PlaybackWarning, TimeUpdate};
pub use skip_guard::{SKIP_TOLERANCE_SECS, SeekVerdict, SkipGuard};
pub use surface::{DriveSurface, PlayerState, SurfaceEvent, VideoSurface};
pub use synthetic_clock::SyntheticClock;
pub use youtube::{
    MessagePort, PlayerCommand, RecordingPort, YouTubeSurface, decode_message, listening_message,
};

/// Build the surface for `kind`. `port` is only used by surfaces that accept commands.
pub fn surface_for<P>(kind: VideoKind, port: P) -> Box<dyn VideoSurface>
where
    P: MessagePort + 'static,
{
    match kind {
        VideoKind::YouTube => Box::new(YouTubeSurface::new(port)),
        VideoKind::GDrive => Box::new(DriveSurface),
    }
}
