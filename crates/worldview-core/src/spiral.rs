//! Budget-bounded spiral enumeration of cells in a query window.
//!
//! Cells near the middle of the window matter most to an observer, so each
//! level is walked as a square spiral outward from the window center. Levels
//! run top-down from `max_z - 1` to `min_z`. Points outside the window or
//! whose content test fails are skipped without cost. Enumeration stops
//! when the budget runs out.
//!
//! Used as an [`Iterator`], every yielded cell charges one unit of budget.
//! A caller that only pays for some cells walks with
//! [`SpiralEnumerator::next_candidate`] and calls
//! [`SpiralEnumerator::charge`] for the ones it keeps.
//!
//! The spiral on one level starts heading east with a segment length of
//! one. After each segment the heading turns `(dx, dy) -> (-dy, dx)`, and
//! the segment length grows every second turn (when the new `dy` is zero).
//! A level walks `side * side` points with `side = 2 * (half_extent + 1)`,
//! which covers the whole window rectangle even when it is not square.

use worldview_types::{CellCoord, RegionQueryWindow};

/// Position and heading of the spiral walk on one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralCursor {
    /// Current column.
    pub x: i32,
    /// Current row.
    pub y: i32,
    /// Heading, x component.
    pub dx: i32,
    /// Heading, y component.
    pub dy: i32,
    /// Length of the current segment.
    pub segment_len: u32,
    /// Steps taken along the current segment.
    pub segment_passed: u32,
}

impl SpiralCursor {
    /// Cursor at a center heading east.
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            dx: 1,
            dy: 0,
            segment_len: 1,
            segment_passed: 0,
        }
    }

    /// Step to the next point of the spiral.
    pub const fn advance(&mut self) {
        self.x = self.x.saturating_add(self.dx);
        self.y = self.y.saturating_add(self.dy);
        self.segment_passed = self.segment_passed.saturating_add(1);
        if self.segment_passed == self.segment_len {
            self.segment_passed = 0;
            let (dx, dy) = (self.dy.saturating_neg(), self.dx);
            self.dx = dx;
            self.dy = dy;
            if self.dy == 0 {
                self.segment_len = self.segment_len.saturating_add(1);
            }
        }
    }
}

/// Midpoint of two coordinates, truncating toward zero.
fn midpoint(a: i32, b: i32) -> i32 {
    i64::from(a)
        .checked_add(i64::from(b))
        .and_then(|sum| sum.checked_div(2))
        .and_then(|mid| i32::try_from(mid).ok())
        .unwrap_or(a)
}

/// Center of the window on a plane.
pub fn window_center(window: &RegionQueryWindow) -> (i32, i32) {
    (
        midpoint(window.min_x, window.max_x),
        midpoint(window.min_y, window.max_y),
    )
}

/// Points walked per level for a window.
pub fn points_per_level(window: &RegionQueryWindow) -> u64 {
    let (cx, cy) = window_center(window);
    let half = [
        cx.abs_diff(window.min_x),
        window.max_x.abs_diff(cx),
        cy.abs_diff(window.min_y),
        window.max_y.abs_diff(cy),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);
    let side = u64::from(half).saturating_add(1).saturating_mul(2);
    side.saturating_mul(side)
}

/// Budget used when the request names none: `(2 * width) * (2 * height) * depth`.
pub fn default_budget(window: &RegionQueryWindow) -> u64 {
    let width = u64::from(window.width()).saturating_mul(2);
    let height = u64::from(window.height()).saturating_mul(2);
    width
        .saturating_mul(height)
        .saturating_mul(u64::from(window.depth()))
}

/// Lazy, prioritized iterator of non-trivial cells in a window.
#[derive(Debug)]
pub struct SpiralEnumerator<F> {
    window: RegionQueryWindow,
    content: F,
    budget: u64,
    z: i32,
    center: (i32, i32),
    cursor: SpiralCursor,
    points_per_level: u64,
    points_left: u64,
    done: bool,
}

impl<F: FnMut(CellCoord) -> bool> SpiralEnumerator<F> {
    /// Enumerate `window`, yielding cells for which `content` holds.
    pub fn new(window: RegionQueryWindow, content: F) -> Self {
        let budget = window
            .blocks_needed
            .map_or_else(|| default_budget(&window), u64::from);
        let center = window_center(&window);
        let points = points_per_level(&window);
        Self {
            window,
            content,
            budget,
            z: window.max_z.saturating_sub(1),
            center,
            cursor: SpiralCursor::at(center.0, center.1),
            points_per_level: points,
            points_left: points,
            done: window.is_empty() || window.is_inverted(),
        }
    }

    /// Budget not yet spent.
    pub const fn remaining_budget(&self) -> u64 {
        self.budget
    }

    /// Charge one unit of budget.
    pub const fn charge(&mut self) {
        self.budget = self.budget.saturating_sub(1);
    }

    /// Next cell that passes the content test, without charging budget.
    /// Returns `None` once the walk is over or the budget is spent.
    pub fn next_candidate(&mut self) -> Option<CellCoord> {
        loop {
            if self.done || self.budget == 0 {
                self.done = true;
                return None;
            }
            if self.points_left == 0 && !self.next_level() {
                self.done = true;
                return None;
            }
            let (x, y) = (self.cursor.x, self.cursor.y);
            self.cursor.advance();
            self.points_left = self.points_left.saturating_sub(1);

            if !self.window.contains_xy(x, y) {
                continue;
            }
            let coord = CellCoord::new(x, y, self.z);
            if (self.content)(coord) {
                return Some(coord);
            }
        }
    }

    fn next_level(&mut self) -> bool {
        self.z = self.z.saturating_sub(1);
        if self.z < self.window.min_z {
            return false;
        }
        self.cursor = SpiralCursor::at(self.center.0, self.center.1);
        self.points_left = self.points_per_level;
        true
    }
}

impl<F: FnMut(CellCoord) -> bool> Iterator for SpiralEnumerator<F> {
    type Item = CellCoord;

    fn next(&mut self) -> Option<CellCoord> {
        let coord = self.next_candidate()?;
        self.charge();
        Some(coord)
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn window(max: (i32, i32, i32)) -> RegionQueryWindow {
        RegionQueryWindow::new(CellCoord::new(0, 0, 0), CellCoord::new(max.0, max.1, max.2))
    }

    #[test]
    fn spiral_covers_small_window_once() {
        let win = window((4, 4, 1));
        let cells: Vec<CellCoord> = SpiralEnumerator::new(win, |_| true).collect();
        assert_eq!(cells.len(), 16);
        let unique: BTreeSet<CellCoord> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 16);
        assert_eq!(cells.first(), Some(&CellCoord::new(2, 2, 0)));

        let center = CellCoord::new(2, 2, 0);
        let rings: Vec<u32> = cells.iter().map(|c| c.ring_distance(center)).collect();
        assert!(rings.windows(2).all(|w| w.first() <= w.last()));
    }

    #[test]
    fn first_steps_head_east_then_south() {
        let win = window((5, 5, 1));
        let cells: Vec<CellCoord> = SpiralEnumerator::new(win, |_| true).take(4).collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(2, 2, 0),
                CellCoord::new(3, 2, 0),
                CellCoord::new(3, 3, 0),
                CellCoord::new(2, 3, 0),
            ]
        );
    }

    #[test]
    fn rectangular_window_is_covered() {
        let win = RegionQueryWindow::new(CellCoord::new(-3, 10, 0), CellCoord::new(9, 12, 1));
        let count = SpiralEnumerator::new(win, |_| true).count();
        assert_eq!(count, 12 * 2);
    }

    #[test]
    fn levels_run_top_down() {
        let win = window((1, 1, 3));
        let zs: Vec<i32> = SpiralEnumerator::new(win, |_| true).map(|c| c.z).collect();
        assert_eq!(zs, vec![2, 1, 0]);
    }

    #[test]
    fn explicit_budget_bounds_output() {
        let win = window((4, 4, 2)).with_budget(5);
        assert_eq!(SpiralEnumerator::new(win, |_| true).count(), 5);
    }

    #[test]
    fn trivial_cells_are_free() {
        let win = window((4, 4, 1)).with_budget(3);
        let cells: Vec<CellCoord> = SpiralEnumerator::new(win, |c| c.x == 0).collect();
        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|c| c.x == 0));
    }

    #[test]
    fn uncharged_candidates_walk_past_the_budget() {
        let win = window((4, 4, 1)).with_budget(2);
        let mut cells = SpiralEnumerator::new(win, |_| true);
        let mut seen = 0;
        let mut kept = 0;
        while let Some(c) = cells.next_candidate() {
            seen += 1;
            if c.x == 0 {
                cells.charge();
                kept += 1;
            }
        }
        assert_eq!(kept, 2);
        assert!(seen > 2);
        assert_eq!(cells.remaining_budget(), 0);
    }

    #[test]
    fn default_budget_formula() {
        assert_eq!(default_budget(&window((16, 16, 1))), 1024);
        assert_eq!(default_budget(&window((2, 3, 4))), 4 * 6 * 4);
    }

    #[test]
    fn empty_and_inverted_windows_yield_nothing() {
        let empty = window((0, 4, 1));
        assert_eq!(SpiralEnumerator::new(empty, |_| true).count(), 0);
        let inverted = RegionQueryWindow::new(CellCoord::new(4, 0, 0), CellCoord::new(0, 4, 1));
        assert_eq!(SpiralEnumerator::new(inverted, |_| true).count(), 0);
    }

    #[test]
    fn cursor_turns_and_grows() {
        let mut c = SpiralCursor::at(0, 0);
        let mut seen = Vec::new();
        for _ in 0..9 {
            seen.push((c.x, c.y));
            c.advance();
        }
        assert_eq!(
            seen,
            vec![
                (0, 0),
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
                (0, -1),
                (1, -1),
            ]
        );
    }
}
