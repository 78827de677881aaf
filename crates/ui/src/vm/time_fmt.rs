/// `m:ss` for a playback offset. Fractions are dropped.
#[must_use]
pub fn format_clock(secs: f64) -> String {
    let whole = whole_seconds(secs);
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Whole seconds with an `s` suffix, as used in timing diagnostics.
#[must_use]
pub fn format_seconds(secs: f64) -> String {
    format!("{}s", whole_seconds(secs))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    }
}
