//! Effective-date windows for configuration rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The `[effective_from, effective_to]` date range during which a
/// configuration row applies, plus its active flag.
///
/// A `None` end date means the row is open-ended. A row is *currently
/// effective* on a date iff it is active and the date falls inside the
/// range (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveWindow {
    /// First date the row applies.
    pub effective_from: NaiveDate,
    /// Last date the row applies, `None` for open-ended.
    pub effective_to: Option<NaiveDate>,
    /// Whether the row participates at all.
    pub is_active: bool,
}

impl EffectiveWindow {
    /// Create an open-ended, active window starting at `from`.
    #[must_use]
    pub const fn starting(from: NaiveDate) -> Self {
        Self {
            effective_from: from,
            effective_to: None,
            is_active: true,
        }
    }

    /// Close the window at `to` (inclusive).
    #[must_use]
    pub const fn until(mut self, to: NaiveDate) -> Self {
        self.effective_to = Some(to);
        self
    }

    /// Deactivate the row.
    #[must_use]
    pub const fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether `as_of` falls inside the date range, ignoring the active flag.
    #[must_use]
    pub fn contains(&self, as_of: NaiveDate) -> bool {
        as_of >= self.effective_from && self.effective_to.map_or(true, |to| as_of <= to)
    }

    /// Whether the row is currently effective on `as_of`.
    #[must_use]
    pub fn is_effective(&self, as_of: NaiveDate) -> bool {
        self.is_active && self.contains(as_of)
    }
}

/// Configuration rows that carry an effective window.
pub trait Windowed {
    /// The row's effective window.
    fn window(&self) -> &EffectiveWindow;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_ended_window_contains_far_future() {
        let w = EffectiveWindow::starting(date(2024, 1, 1));
        assert!(w.contains(date(2024, 1, 1)));
        assert!(w.contains(date(2099, 12, 31)));
        assert!(!w.contains(date(2023, 12, 31)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let w = EffectiveWindow::starting(date(2024, 1, 1)).until(date(2024, 6, 30));
        assert!(w.contains(date(2024, 6, 30)));
        assert!(!w.contains(date(2024, 7, 1)));
    }

    #[test]
    fn inactive_window_is_never_effective() {
        let w = EffectiveWindow::starting(date(2024, 1, 1)).inactive();
        assert!(w.contains(date(2024, 3, 1)));
        assert!(!w.is_effective(date(2024, 3, 1)));
    }
}
