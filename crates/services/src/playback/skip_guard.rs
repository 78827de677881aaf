use quiz_core::model::SurfaceCapabilities;

/// Forward drift past the furthest watched point that still counts as normal playback.
pub const SKIP_TOLERANCE_SECS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekVerdict {
    Allowed,
    Rejected { restore_to: f64 },
}

/// Rejects forward jumps past the watched range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkipGuard {
    enforced: bool,
    tolerance_secs: f64,
}

impl SkipGuard {
    /// Enforced only when the surface can both report time and seek back.
    #[must_use]
    pub fn for_capabilities(capabilities: SurfaceCapabilities) -> Self {
        Self {
            enforced: capabilities.can_enforce_sequential(),
            tolerance_secs: SKIP_TOLERANCE_SECS,
        }
    }

    #[must_use]
    pub fn is_enforced(&self) -> bool {
        self.enforced
    }

    #[must_use]
    pub fn check(&self, reported: f64, max_watched: f64) -> SeekVerdict {
        if self.enforced && reported > max_watched + self.tolerance_secs {
            SeekVerdict::Rejected {
                restore_to: max_watched,
            }
        } else {
            SeekVerdict::Allowed
        }
    }
}
