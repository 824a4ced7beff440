//! Scroll-synchronized heading tracking for the viewer's table of contents.
//!
//! The client measures each rendered heading and reports the geometry plus
//! the viewport's scroll position; [`resolve_active`] decides which heading
//! the TOC should highlight. The computation is linear in the heading count
//! and allocation-free, since scroll events arrive at high frequency.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Bounding-box top (viewport coordinates) must be at or above this for a
/// heading to be eligible.
pub const ANCHOR_BAND_TOP: f64 = -50.0;

/// Bounding-box top must be at or below this to remain eligible.
pub const ANCHOR_BAND_BOTTOM: f64 = 200.0;

/// Measured geometry of one rendered heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingGeometry {
    /// Anchor id (`heading-<index>`).
    pub id: String,
    /// Element top offset relative to the scroll container's own frame
    /// (`elementOffsetTop - containerOffsetTop`).
    pub offset_top: f64,
    /// Bounding-box top in viewport coordinates, used for the anchor band.
    pub rect_top: f64,
}

impl HeadingGeometry {
    fn in_anchor_band(&self) -> bool {
        self.rect_top >= ANCHOR_BAND_TOP && self.rect_top <= ANCHOR_BAND_BOTTOM
    }
}

/// Resolve the active heading for the current scroll position.
///
/// Only headings whose bounding-box top falls within the anchor band
/// `[-50, +200]` are eligible; among those, the one with the smallest
/// `|offset_top - scroll_top|` wins. Strict comparison keeps ties on the
/// first heading in document order. Returns `None` when nothing is eligible,
/// which clears the TOC highlight.
pub fn resolve_active(headings: &[HeadingGeometry], scroll_top: f64) -> Option<&str> {
    let mut closest: Option<&str> = None;
    let mut min_distance = f64::INFINITY;
    for h in headings {
        if !h.in_anchor_band() {
            continue;
        }
        let distance = (h.offset_top - scroll_top).abs();
        if distance < min_distance {
            min_distance = distance;
            closest = Some(&h.id);
        }
    }
    closest
}

/// Tracks the active heading across the lifetime of one viewer instance.
///
/// States: no headings, headings present with no eligible anchor, headings
/// present with an active anchor. The tracker recomputes from scratch on
/// every input instead of updating incrementally, so interleaved scroll
/// events and heading-set changes cannot produce a stale highlight. It is a
/// plain value; dropping the viewer drops the tracker with it.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    active: Option<String>,
    /// Minimum interval between scroll-driven recomputes. Off by default.
    min_interval: Option<Duration>,
    last_scroll: Option<Instant>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throttle scroll-driven updates to at most one per `interval`.
    /// Mount and heading-set updates bypass the throttle.
    pub fn with_throttle(interval: Duration) -> Self {
        Self {
            min_interval: Some(interval),
            ..Self::default()
        }
    }

    /// Currently highlighted heading, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recompute unconditionally: called once on mount and whenever the
    /// heading set changes.
    pub fn sync(&mut self, headings: &[HeadingGeometry], scroll_top: f64) -> Option<&str> {
        self.active = resolve_active(headings, scroll_top).map(String::from);
        self.active()
    }

    /// Recompute for a scroll event, subject to the configured throttle.
    /// A suppressed event leaves the previous highlight in place.
    pub fn on_scroll(&mut self, headings: &[HeadingGeometry], scroll_top: f64) -> Option<&str> {
        if let (Some(interval), Some(last)) = (self.min_interval, self.last_scroll) {
            if last.elapsed() < interval {
                return self.active();
            }
        }
        self.last_scroll = Some(Instant::now());
        self.sync(headings, scroll_top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(id: &str, offset_top: f64, rect_top: f64) -> HeadingGeometry {
        HeadingGeometry {
            id: id.to_string(),
            offset_top,
            rect_top,
        }
    }

    #[test]
    fn test_scenario_d_band_excludes_far_heading() {
        // heading-0 sits 250px below the anchor, heading-1 30px above it.
        let headings = vec![
            geometry("heading-0", 950.0, 250.0),
            geometry("heading-1", 670.0, -30.0),
        ];
        assert_eq!(resolve_active(&headings, 700.0), Some("heading-1"));
    }

    #[test]
    fn test_no_eligible_heading_clears_highlight() {
        let headings = vec![
            geometry("heading-0", 0.0, -120.0),
            geometry("heading-1", 900.0, 620.0),
        ];
        assert_eq!(resolve_active(&headings, 300.0), None);
    }

    #[test]
    fn test_band_bounds_are_inclusive() {
        let top_edge = vec![geometry("heading-0", 0.0, ANCHOR_BAND_TOP)];
        let bottom_edge = vec![geometry("heading-0", 0.0, ANCHOR_BAND_BOTTOM)];
        assert_eq!(resolve_active(&top_edge, 0.0), Some("heading-0"));
        assert_eq!(resolve_active(&bottom_edge, 0.0), Some("heading-0"));

        let past_top = vec![geometry("heading-0", 0.0, ANCHOR_BAND_TOP - 0.5)];
        assert_eq!(resolve_active(&past_top, 0.0), None);
    }

    #[test]
    fn test_minimum_distance_wins() {
        let headings = vec![
            geometry("heading-0", 100.0, 40.0),
            geometry("heading-1", 180.0, 120.0),
        ];
        // scroll_top 170: heading-1 is 10 away, heading-0 is 70 away.
        assert_eq!(resolve_active(&headings, 170.0), Some("heading-1"));
    }

    #[test]
    fn test_ties_resolve_to_first_in_document_order() {
        let headings = vec![
            geometry("heading-0", 90.0, 10.0),
            geometry("heading-1", 110.0, 30.0),
        ];
        // Both are exactly 10 away from scroll_top 100.
        assert_eq!(resolve_active(&headings, 100.0), Some("heading-0"));
    }

    #[test]
    fn test_empty_heading_set_is_a_no_op() {
        assert_eq!(resolve_active(&[], 0.0), None);

        let mut tracker = ScrollTracker::new();
        assert_eq!(tracker.on_scroll(&[], 0.0), None);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn test_tracker_transitions() {
        let mut tracker = ScrollTracker::new();
        let headings = vec![geometry("heading-0", 100.0, 50.0)];

        // Mount.
        assert_eq!(tracker.sync(&headings, 100.0), Some("heading-0"));
        assert_eq!(tracker.active(), Some("heading-0"));

        // Scroll far enough that the heading leaves the band.
        let scrolled = vec![geometry("heading-0", 100.0, -400.0)];
        assert_eq!(tracker.on_scroll(&scrolled, 500.0), None);
        assert_eq!(tracker.active(), None);

        // Heading-set change recomputes from scratch.
        let replaced = vec![geometry("heading-2", 520.0, 20.0)];
        assert_eq!(tracker.sync(&replaced, 500.0), Some("heading-2"));
    }

    #[test]
    fn test_throttle_suppresses_rapid_scroll_updates() {
        let mut tracker = ScrollTracker::with_throttle(Duration::from_secs(60));
        let first = vec![geometry("heading-0", 100.0, 50.0)];
        assert_eq!(tracker.on_scroll(&first, 100.0), Some("heading-0"));

        // Immediately after, a new position is ignored; stale highlight kept.
        let second = vec![geometry("heading-1", 900.0, 60.0)];
        assert_eq!(tracker.on_scroll(&second, 900.0), Some("heading-0"));

        // But an explicit sync (heading-set change) bypasses the throttle.
        assert_eq!(tracker.sync(&second, 900.0), Some("heading-1"));
    }
}
