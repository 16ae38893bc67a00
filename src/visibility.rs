//! Viewport intersection tracking for registered document regions.
//!
//! Each decorative element owns a region of document rows. On every scroll or
//! resize the observer recomputes which regions intersect the viewport and
//! emits `Enter`/`Leave` exactly on threshold crossings. Consecutive identical
//! states never re-emit, so rapid scrolling cannot flood the state machines
//! with duplicate transitions.

use std::collections::BTreeMap;

use crate::anim::ElementId;

/// A rectangle of document rows tracked for intersection.
///
/// The observer holds geometry by value but the element itself is owned by
/// the page; dropping a region here never tears down the element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub id: ElementId,
    /// First document row covered by the region.
    pub top: usize,
    /// Height in rows. Zero-height regions are never visible.
    pub height: usize,
    /// Fraction of the region that must intersect the viewport to count as
    /// visible. Clamped to [0, 1] on registration.
    pub threshold: f32,
}

impl Region {
    pub fn new(id: ElementId, top: usize, height: usize, threshold: f32) -> Self {
        Self {
            id,
            top,
            height,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }
}

/// Threshold crossing for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    Enter(ElementId),
    Leave(ElementId),
}

#[derive(Debug, Clone)]
struct Tracked {
    region: Region,
    visible: bool,
}

/// Tracks intersection of registered regions with the scrolled viewport.
#[derive(Debug, Default)]
pub struct VisibilityObserver {
    regions: BTreeMap<ElementId, Tracked>,
}

impl VisibilityObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking a region. Re-observing an id replaces its geometry but
    /// keeps the current visibility state, so a relayout alone does not
    /// replay enter events.
    pub fn observe(&mut self, region: Region) {
        match self.regions.get_mut(&region.id) {
            Some(tracked) => tracked.region = region,
            None => {
                self.regions.insert(
                    region.id,
                    Tracked {
                        region,
                        visible: false,
                    },
                );
            }
        }
    }

    /// Stop tracking a region. Unknown ids are silently ignored; late
    /// intersection updates for them are simply dropped.
    pub fn unobserve(&mut self, id: ElementId) {
        self.regions.remove(&id);
    }

    pub fn is_observed(&self, id: ElementId) -> bool {
        self.regions.contains_key(&id)
    }

    /// Intersection ratio of one region for the given viewport, in [0, 1].
    fn ratio(region: &Region, viewport_top: usize, viewport_rows: usize) -> f32 {
        if region.height == 0 || viewport_rows == 0 {
            return 0.0;
        }
        let region_end = region.top + region.height;
        let viewport_end = viewport_top + viewport_rows;
        let overlap = region_end.min(viewport_end).saturating_sub(region.top.max(viewport_top));
        overlap as f32 / region.height as f32
    }

    /// Recompute intersections and collect threshold crossings, in region id
    /// order. Call after every scroll offset or geometry change.
    pub fn update(&mut self, viewport_top: usize, viewport_rows: usize) -> Vec<VisibilityEvent> {
        let mut events = Vec::new();
        for tracked in self.regions.values_mut() {
            let ratio = Self::ratio(&tracked.region, viewport_top, viewport_rows);
            // A zero threshold means "any overlap", not "always".
            let now_visible = if tracked.region.threshold == 0.0 {
                ratio > 0.0
            } else {
                ratio >= tracked.region.threshold
            };
            if now_visible && !tracked.visible {
                tracked.visible = true;
                events.push(VisibilityEvent::Enter(tracked.region.id));
            } else if !now_visible && tracked.visible {
                tracked.visible = false;
                events.push(VisibilityEvent::Leave(tracked.region.id));
            }
        }
        events
    }
}
