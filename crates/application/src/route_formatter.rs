//! Human-readable distance and duration text
//!
//! Renders raw provider measurements in the Russian units used by the
//! dispatcher UI.

/// Format a distance in meters as kilometers with one decimal, e.g. `18.5 км`
#[must_use]
pub fn format_distance(meters: Option<f64>) -> Option<String> {
    let meters = meters?;
    Some(format!("{:.1} км", meters / 1000.0))
}

/// Format a duration in seconds as `"<h> ч <m> мин"` or `"<m> мин"`
///
/// Seconds are rounded to whole minutes once, before splitting into hours,
/// so 3599 s renders as `1 ч 0 мин`. Ties round to even.
#[must_use]
pub fn format_duration(seconds: Option<f64>) -> Option<String> {
    let seconds = seconds?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (seconds.max(0.0) / 60.0).round_ties_even() as u64;
    let (hours, mins) = (minutes / 60, minutes % 60);

    if hours > 0 {
        Some(format!("{hours} ч {mins} мин"))
    } else {
        Some(format!("{mins} мин"))
    }
}
