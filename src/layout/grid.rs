//! Near-square grid partitioning of the main area.
//!
//! Top-level entries are tiled row-major into `columns = ceil(sqrt(n))`
//! columns and `rows = ceil(n / columns)` rows. When the last row holds fewer
//! entries than there are columns, its cells stretch across the whole row so
//! the cells always cover the area exactly.
use ratatui::prelude::{Direction, Rect};

use super::split_even;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

impl GridShape {
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            return Self::default();
        }
        let mut columns = 1usize;
        while columns * columns < count {
            columns += 1;
        }
        let rows = count.div_ceil(columns);
        Self { columns, rows }
    }

    /// Number of entries placed in `row` when tiling `count` entries.
    pub fn entries_in_row(&self, row: usize, count: usize) -> usize {
        if row >= self.rows {
            return 0;
        }
        let start = row * self.columns;
        count.saturating_sub(start).min(self.columns)
    }
}

/// Partition `area` into `count` cells, returned in row-major order.
pub fn grid_cells(area: Rect, count: usize) -> Vec<Rect> {
    let shape = GridShape::for_count(count);
    let mut cells = Vec::with_capacity(count);
    for (row, row_rect) in split_even(Direction::Vertical, area, shape.rows)
        .into_iter()
        .enumerate()
    {
        let in_row = shape.entries_in_row(row, count);
        cells.extend(split_even(Direction::Horizontal, row_rect, in_row));
    }
    cells
}

/// Subdivide a group's cell among its members, stacked top to bottom.
pub fn stack_cells(area: Rect, count: usize) -> Vec<Rect> {
    split_even(Direction::Vertical, area, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(rect: Rect) -> u32 {
        rect.width as u32 * rect.height as u32
    }

    fn overlaps(a: Rect, b: Rect) -> bool {
        let i = a.intersection(b);
        i.width > 0 && i.height > 0
    }

    #[test]
    fn grid_shape_uses_ceil_sqrt_columns() {
        assert_eq!(GridShape::for_count(0), GridShape { columns: 0, rows: 0 });
        assert_eq!(GridShape::for_count(1), GridShape { columns: 1, rows: 1 });
        assert_eq!(GridShape::for_count(2), GridShape { columns: 2, rows: 1 });
        assert_eq!(GridShape::for_count(3), GridShape { columns: 2, rows: 2 });
        assert_eq!(GridShape::for_count(4), GridShape { columns: 2, rows: 2 });
        assert_eq!(GridShape::for_count(5), GridShape { columns: 3, rows: 2 });
        assert_eq!(GridShape::for_count(7), GridShape { columns: 3, rows: 3 });
        assert_eq!(GridShape::for_count(10), GridShape { columns: 4, rows: 3 });
    }

    #[test]
    fn entries_in_row_fills_rows_in_order() {
        let shape = GridShape::for_count(7);
        assert_eq!(shape.entries_in_row(0, 7), 3);
        assert_eq!(shape.entries_in_row(1, 7), 3);
        assert_eq!(shape.entries_in_row(2, 7), 1);
        assert_eq!(shape.entries_in_row(3, 7), 0);
    }

    #[test]
    fn grid_cells_tile_area_exactly() {
        let area = Rect {
            x: 3,
            y: 1,
            width: 97,
            height: 41,
        };
        for count in 0..=20usize {
            let cells = grid_cells(area, count);
            assert_eq!(cells.len(), count, "count {count}");
            let total: u32 = cells.iter().map(|c| area_of(*c)).sum();
            if count > 0 {
                assert_eq!(total, area_of(area), "count {count}");
            }
            for (i, a) in cells.iter().enumerate() {
                assert_eq!(a.intersection(area), *a, "cell outside area");
                for b in cells.iter().skip(i + 1) {
                    assert!(!overlaps(*a, *b), "cells overlap for count {count}");
                }
            }
        }
    }

    fn spread(sizes: impl IntoIterator<Item = u16>) -> u16 {
        let sizes: Vec<u16> = sizes.into_iter().collect();
        let max = sizes.iter().copied().max().unwrap_or(0);
        let min = sizes.iter().copied().min().unwrap_or(0);
        max - min
    }

    #[test]
    fn grid_rows_and_columns_differ_by_at_most_one_cell() {
        let area = Rect {
            x: 0,
            y: 1,
            width: 79,
            height: 23,
        };
        for count in 1..=20usize {
            let cells = grid_cells(area, count);
            let shape = GridShape::for_count(count);
            let mut start = 0;
            let mut heights = Vec::new();
            for row in 0..shape.rows {
                let in_row = shape.entries_in_row(row, count);
                let row_cells = &cells[start..start + in_row];
                assert!(
                    spread(row_cells.iter().map(|c| c.width)) <= 1,
                    "widths in row {row} for count {count}: {row_cells:?}"
                );
                heights.push(row_cells[0].height);
                start += in_row;
            }
            assert!(spread(heights.clone()) <= 1, "row heights for count {count}: {heights:?}");
        }

        let sixteen = grid_cells(area, 16);
        let widths: Vec<u16> = sixteen[..4].iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![20, 20, 20, 19]);
    }

    #[test]
    fn stacked_members_differ_by_at_most_one_row() {
        let cell = Rect {
            x: 0,
            y: 0,
            width: 30,
            height: 11,
        };
        for count in 1..=11usize {
            let rects = stack_cells(cell, count);
            assert_eq!(rects.iter().map(|r| r.height).sum::<u16>(), 11);
            assert!(spread(rects.iter().map(|r| r.height)) <= 1, "count {count}: {rects:?}");
        }
        let six: Vec<u16> = stack_cells(cell, 6).iter().map(|r| r.height).collect();
        assert_eq!(six, vec![2, 2, 2, 2, 2, 1]);
    }

    #[test]
    fn grid_cells_are_row_major() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 20,
        };
        let cells = grid_cells(area, 3);
        assert_eq!(
            cells[0],
            Rect {
                x: 0,
                y: 0,
                width: 40,
                height: 10
            }
        );
        assert_eq!(
            cells[1],
            Rect {
                x: 40,
                y: 0,
                width: 40,
                height: 10
            }
        );
        // last row stretches to the full width
        assert_eq!(
            cells[2],
            Rect {
                x: 0,
                y: 10,
                width: 80,
                height: 10
            }
        );
    }

    #[test]
    fn stack_cells_split_vertically_in_order() {
        let cell = Rect {
            x: 10,
            y: 4,
            width: 30,
            height: 12,
        };
        let rects = stack_cells(cell, 2);
        assert_eq!(
            rects,
            vec![
                Rect {
                    x: 10,
                    y: 4,
                    width: 30,
                    height: 6
                },
                Rect {
                    x: 10,
                    y: 10,
                    width: 30,
                    height: 6
                },
            ]
        );
    }
}
