use crate::foundation::error::{VideodbError, VideodbResult};

/// Longest audio fade the service applies; longer values are sent but only warned about.
pub const MAX_FADE_DURATION_SEC: f64 = 5.0;

/// A validated `[start, end)` selection of source media, in seconds.
///
/// `end == None` selects everything from `start` to the end of the media.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SourceRange {
    start: f64,
    end: Option<f64>, // exclusive
}

impl SourceRange {
    /// Validate and build a range: `start >= 0`, and `end > start` when set.
    pub fn new(start: f64, end: Option<f64>) -> VideodbResult<Self> {
        if !start.is_finite() || start < 0.0 {
            return Err(VideodbError::invalid_argument(format!(
                "start must be finite and >= 0 (got {start})"
            )));
        }
        if let Some(end) = end
            && (!end.is_finite() || end <= start)
        {
            return Err(VideodbError::invalid_argument(format!(
                "end must be finite and > start (got start={start}, end={end})"
            )));
        }
        Ok(Self {
            start: canonical_zero(start),
            end,
        })
    }

    /// The whole media: `start = 0`, open end.
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: None,
        }
    }

    /// Range start in seconds.
    pub fn start(self) -> f64 {
        self.start
    }

    /// Range end in seconds, if bounded.
    pub fn end(self) -> Option<f64> {
        self.end
    }

    /// Selected length in seconds; unknown for open-ended ranges.
    pub fn duration_sec(self) -> Option<f64> {
        self.end.map(|end| end - self.start)
    }
}

impl Default for SourceRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Fold `-0.0` into `0.0` so equal values share one bit pattern.
pub(crate) fn canonical_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

pub(crate) fn ensure_non_empty(value: &str, field: &str) -> VideodbResult<()> {
    if value.trim().is_empty() {
        return Err(VideodbError::invalid_argument(format!(
            "{field} must be non-empty"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(value: f64, field: &str) -> VideodbResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(VideodbError::invalid_argument(format!(
            "{field} must be finite and >= 0 (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_positive(value: f64, field: &str) -> VideodbResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VideodbError::invalid_argument(format!(
            "{field} must be finite and > 0 (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_in_range(value: f64, lo: f64, hi: f64, field: &str) -> VideodbResult<()> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(VideodbError::invalid_argument(format!(
            "{field} must be between {lo} and {hi} (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
