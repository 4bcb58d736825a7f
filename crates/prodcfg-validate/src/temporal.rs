//! Temporal validity of configuration rows.
//!
//! Every dated row carries an effective window. This module decides which
//! rows apply on a given date, counts open configurations for the overview
//! tab, and flags overlapping windows within one kind. Overlaps are
//! warnings: the back office accepts them, and where display needs a
//! single row the latest `effective_from` wins.

use chrono::NaiveDate;
use prodcfg_core::{EffectiveWindow, Windowed};

use crate::{ErrorCode, ValidationError};

/// Whether `row` is currently effective on `as_of`: active, started, and
/// not yet ended.
#[must_use]
pub fn is_currently_effective<R: Windowed>(row: &R, as_of: NaiveDate) -> bool {
    row.window().is_effective(as_of)
}

/// Whether two windows intersect, treating an open end as +infinity.
/// The active flags are not consulted.
#[must_use]
pub fn overlaps(a: &EffectiveWindow, b: &EffectiveWindow) -> bool {
    let a_starts_before_b_ends = b.effective_to.map_or(true, |to| a.effective_from <= to);
    let b_starts_before_a_ends = a.effective_to.map_or(true, |to| b.effective_from <= to);
    a_starts_before_b_ends && b_starts_before_a_ends
}

/// The rows of `rows` that are currently effective on `as_of`.
pub fn currently_effective<R: Windowed>(
    rows: &[R],
    as_of: NaiveDate,
) -> impl Iterator<Item = &R> {
    rows.iter().filter(move |r| is_currently_effective(*r, as_of))
}

/// Number of currently effective rows, shown as the "open configuration
/// count" on the product overview.
#[must_use]
pub fn open_count<R: Windowed>(rows: &[R], as_of: NaiveDate) -> usize {
    currently_effective(rows, as_of).count()
}

/// Pick the single row to display when several are effective at once:
/// the one whose window started last.
#[must_use]
pub fn pick_effective<R: Windowed>(rows: &[R], as_of: NaiveDate) -> Option<&R> {
    currently_effective(rows, as_of).max_by_key(|r| r.window().effective_from)
}

/// Check a window for well-formedness (T4001).
#[must_use]
pub fn check_window(window: &EffectiveWindow) -> Option<ValidationError> {
    window.effective_to.and_then(|to| {
        (to < window.effective_from).then(|| {
            ValidationError::new(
                ErrorCode::WindowInverted,
                format!(
                    "effective window ends {} before it starts {}",
                    to, window.effective_from
                ),
            )
            .on_field("effectiveTo")
        })
    })
}

pub(crate) fn collect_window_findings(
    window: &EffectiveWindow,
    kind: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(mut error) = check_window(window) {
        error.message = format!("{kind}: {}", error.message);
        errors.push(error);
    }
}

/// Flag every pair of active rows of one kind whose windows intersect
/// (T4002, warning).
#[must_use]
pub fn check_overlaps<R: Windowed>(rows: &[R], kind: &str) -> Vec<ValidationError> {
    let active: Vec<&EffectiveWindow> = rows
        .iter()
        .map(Windowed::window)
        .filter(|w| w.is_active)
        .collect();

    let mut errors = Vec::new();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if overlaps(a, b) {
                errors.push(ValidationError::new(
                    ErrorCode::WindowOverlap,
                    format!(
                        "two {kind} rows are both effective from {} and from {}",
                        a.effective_from, b.effective_from
                    ),
                ));
            }
        }
    }
    errors
}
