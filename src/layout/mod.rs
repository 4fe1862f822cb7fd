pub mod grid;

pub use grid::*;

use ratatui::prelude::{Direction, Rect};
use std::collections::BTreeMap;

/// Split `total` cells into `count` near-equal sizes. The first
/// `total % count` slots get one extra cell, so sizes differ by at most one
/// and always sum to `total`.
pub fn even_sizes(total: u16, count: usize) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }
    let base = (total as usize / count) as u16;
    let extra = total as usize % count;
    (0..count)
        .map(|slot| if slot < extra { base + 1 } else { base })
        .collect()
}

/// Lay out consecutive rectangles of the given sizes along `direction`.
pub fn build_rects_from_sizes(direction: Direction, area: Rect, sizes: &[u16]) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(sizes.len());
    let mut cursor_x = area.x;
    let mut cursor_y = area.y;
    for size in sizes {
        let rect = match direction {
            Direction::Horizontal => {
                let rect = Rect {
                    x: cursor_x,
                    y: area.y,
                    width: *size,
                    height: area.height,
                };
                cursor_x = cursor_x.saturating_add(*size);
                rect
            }
            Direction::Vertical => {
                let rect = Rect {
                    x: area.x,
                    y: cursor_y,
                    width: area.width,
                    height: *size,
                };
                cursor_y = cursor_y.saturating_add(*size);
                rect
            }
        };
        rects.push(rect);
    }
    rects
}

/// Split `area` into `count` near-equal slices along `direction`.
pub fn split_even(direction: Direction, area: Rect, count: usize) -> Vec<Rect> {
    let total = match direction {
        Direction::Horizontal => area.width,
        Direction::Vertical => area.height,
    };
    build_rects_from_sizes(direction, area, &even_sizes(total, count))
}

/// Rectangles handed out during the last layout pass, keyed by owner.
#[derive(Debug, Clone)]
pub struct RegionMap<T: Copy + Eq + Ord> {
    regions: BTreeMap<T, Rect>,
}

impl<T: Copy + Eq + Ord> Default for RegionMap<T> {
    fn default() -> Self {
        Self {
            regions: BTreeMap::new(),
        }
    }
}

impl<T: Copy + Eq + Ord> RegionMap<T> {
    pub fn ids(&self) -> Vec<T> {
        self.regions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn set(&mut self, id: T, rect: Rect) {
        self.regions.insert(id, rect);
    }

    pub fn get(&self, id: T) -> Option<Rect> {
        self.regions.get(&id).copied()
    }

    pub fn remove(&mut self, id: T) {
        self.regions.remove(&id);
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<T> {
        self.regions
            .iter()
            .find(|(_, rect)| rect_contains(**rect, column, row))
            .map(|(id, _)| *id)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

pub fn rect_is_empty(rect: Rect) -> bool {
    rect.width == 0 || rect.height == 0
}
