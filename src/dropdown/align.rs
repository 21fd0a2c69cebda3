//! Alignment of one rectangle relative to another
//!
//! Eight placements around a target, numbered clockwise from the top:
//!
//! ```text
//!        TopLeft(7)  TopCenter(0)  TopRight(1)
//!                   ┌────────────┐
//!   LeftCenter(6)   │   target   │   RightCenter(2)
//!                   └────────────┘
//!     BottomLeft(5) BottomCenter(4) BottomRight(3)
//! ```
//!
//! With best-region search enabled, the suggested placement is tried first
//! and the remaining ones clockwise after it; the first region that fits the
//! viewport wins, otherwise the one with the largest visible area.

use ratatui::layout::Rect;

/// Placement of the subject relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    TopCenter,
    TopRight,
    RightCenter,
    BottomRight,
    BottomCenter,
    BottomLeft,
    LeftCenter,
    TopLeft,
}

impl Placement {
    /// All placements in clockwise order
    pub const ALL: [Placement; 8] = [
        Placement::TopCenter,
        Placement::TopRight,
        Placement::RightCenter,
        Placement::BottomRight,
        Placement::BottomCenter,
        Placement::BottomLeft,
        Placement::LeftCenter,
        Placement::TopLeft,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn next_clockwise(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Result of an alignment: the placement actually used and the subject's new area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPosition {
    pub placement: Placement,
    pub area: Rect,
}

/// Computes where a subject goes relative to a target
pub trait Aligner {
    /// Align `subject` (only its size is used) to `target` inside `viewport`
    fn align(
        &self,
        subject: Rect,
        target: Rect,
        viewport: Rect,
        placement: Placement,
    ) -> AlignedPosition;
}

/// Signed rectangle; candidate regions may start off-screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    fn right(&self) -> i32 {
        self.x + self.width
    }

    fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Area of the overlap with `viewport`
    fn visible_area(&self, viewport: &Region) -> i64 {
        let w = self.right().min(viewport.right()) - self.x.max(viewport.x);
        let h = self.bottom().min(viewport.bottom()) - self.y.max(viewport.y);
        if w <= 0 || h <= 0 {
            0
        } else {
            i64::from(w) * i64::from(h)
        }
    }

    fn inside(&self, viewport: &Region) -> bool {
        self.x >= viewport.x
            && self.y >= viewport.y
            && self.right() <= viewport.right()
            && self.bottom() <= viewport.bottom()
    }

    /// Clamp into `viewport`, shifting first and shrinking only if still too large
    fn to_rect(self, viewport: Rect) -> Rect {
        let width = self.width.clamp(0, i32::from(viewport.width));
        let height = self.height.clamp(0, i32::from(viewport.height));
        let max_x = i32::from(viewport.x) + i32::from(viewport.width) - width;
        let max_y = i32::from(viewport.y) + i32::from(viewport.height) - height;
        let x = self.x.clamp(i32::from(viewport.x), max_x);
        let y = self.y.clamp(i32::from(viewport.y), max_y);
        // All values are within u16 range after clamping against the viewport
        Rect::new(x as u16, y as u16, width as u16, height as u16)
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self {
            x: i32::from(rect.x),
            y: i32::from(rect.y),
            width: i32::from(rect.width),
            height: i32::from(rect.height),
        }
    }
}

/// Move `area` inside `viewport`, shrinking it only when it is larger than the viewport
pub fn fit_to_viewport(area: Rect, viewport: Rect) -> Rect {
    Region::from(area).to_rect(viewport)
}

/// Default aligner
#[derive(Debug, Clone, Copy)]
pub struct Align {
    /// Search other placements when the suggested one doesn't fit
    pub auto_best_align: bool,
}

impl Default for Align {
    fn default() -> Self {
        Self {
            auto_best_align: true,
        }
    }
}

impl Align {
    /// Region the subject would occupy at `placement`
    pub fn region(subject: Rect, target: Rect, placement: Placement) -> Region {
        let (w, h) = (i32::from(subject.width), i32::from(subject.height));
        let t = Region::from(target);
        let center_x = t.x + t.width / 2 - w / 2;
        let center_y = t.y + t.height / 2 - h / 2;

        let (x, y) = match placement {
            Placement::TopCenter => (center_x, t.y - h),
            Placement::TopRight => (t.right() - w, t.y - h),
            Placement::RightCenter => (t.right(), center_y),
            Placement::BottomRight => (t.right() - w, t.bottom()),
            Placement::BottomCenter => (center_x, t.bottom()),
            Placement::BottomLeft => (t.x, t.bottom()),
            Placement::LeftCenter => (t.x - w, center_y),
            Placement::TopLeft => (t.x, t.y - h),
        };

        Region {
            x,
            y,
            width: w,
            height: h,
        }
    }

    /// Best placement starting from `suggested`, with its region
    pub fn best_region(
        subject: Rect,
        target: Rect,
        viewport: Rect,
        suggested: Placement,
    ) -> (Placement, Region) {
        let viewport = Region::from(viewport);
        let mut best = (suggested, Self::region(subject, target, suggested));
        let mut best_area = 0;
        let mut candidate = suggested;

        for attempt in 0..Placement::ALL.len() {
            if attempt > 0 {
                candidate = candidate.next_clockwise();
            }
            let region = Self::region(subject, target, candidate);
            let area = region.visible_area(&viewport);
            if area > best_area {
                best_area = area;
                best = (candidate, region);
            }
            if area > 0 && region.inside(&viewport) {
                break;
            }
        }

        best
    }
}

impl Aligner for Align {
    fn align(
        &self,
        subject: Rect,
        target: Rect,
        viewport: Rect,
        placement: Placement,
    ) -> AlignedPosition {
        let (placement, region) = if self.auto_best_align {
            Self::best_region(subject, target, viewport, placement)
        } else {
            (placement, Self::region(subject, target, placement))
        };

        AlignedPosition {
            placement,
            area: region.to_rect(viewport),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0, 0, 80, 24);

    #[test]
    fn placements_cycle_clockwise() {
        assert_eq!(Placement::BottomLeft.index(), 5);
        assert_eq!(Placement::BottomLeft.next_clockwise(), Placement::LeftCenter);
        assert_eq!(Placement::TopLeft.next_clockwise(), Placement::TopCenter);
    }

    #[test]
    fn bottom_left_anchors_below_target_left_edge() {
        let target = Rect::new(10, 2, 12, 1);
        let subject = Rect::new(0, 0, 20, 6);
        let aligned = Align::default().align(subject, target, VIEWPORT, Placement::BottomLeft);
        assert_eq!(aligned.placement, Placement::BottomLeft);
        assert_eq!(aligned.area, Rect::new(10, 3, 20, 6));
    }

    #[test]
    fn flips_when_suggested_placement_overflows() {
        // Target near the bottom edge: the menu can't open downward
        let target = Rect::new(10, 20, 12, 1);
        let subject = Rect::new(0, 0, 20, 6);
        let aligned = Align::default().align(subject, target, VIEWPORT, Placement::BottomLeft);
        // LeftCenter is tried next but hangs off the left edge; TopLeft fits
        assert_eq!(aligned.placement, Placement::TopLeft);
        assert_eq!(aligned.area, Rect::new(10, 14, 20, 6));
    }

    #[test]
    fn largest_visible_area_wins_when_nothing_fits() {
        let viewport = Rect::new(0, 0, 30, 10);
        let target = Rect::new(0, 0, 30, 10);
        let subject = Rect::new(0, 0, 40, 40);
        let (placement, _) = Align::best_region(subject, target, viewport, Placement::BottomLeft);
        // Every region is partially visible at most; the first largest is kept
        let area = Align::region(subject, target, placement).visible_area(&Region::from(viewport));
        for other in Placement::ALL {
            let other_area =
                Align::region(subject, target, other).visible_area(&Region::from(viewport));
            assert!(area >= other_area);
        }
    }

    #[test]
    fn without_auto_align_the_suggestion_is_kept_and_clamped() {
        let target = Rect::new(70, 20, 10, 1);
        let subject = Rect::new(0, 0, 20, 6);
        let aligned = Align {
            auto_best_align: false,
        }
        .align(subject, target, VIEWPORT, Placement::BottomLeft);
        assert_eq!(aligned.placement, Placement::BottomLeft);
        assert_eq!(aligned.area, Rect::new(60, 18, 20, 6));
    }
}
