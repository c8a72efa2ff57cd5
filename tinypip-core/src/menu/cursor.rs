//! Menu cursor
//!
//! Selection index plus the first visible row. Moves wrap around the
//! catalog; the window follows the selection with the least scrolling.

use core::ops::Range;

/// Selection and scroll state of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuCursor {
    selected: usize,
    offset: usize,
}

impl MenuCursor {
    /// Cursor on the first entry
    pub const fn new() -> Self {
        Self {
            selected: 0,
            offset: 0,
        }
    }

    /// Cursor on `index`, or on the first entry if `index` is out of range
    pub fn at(index: usize, len: usize) -> Self {
        let mut cursor = Self::new();
        if index < len {
            cursor.selected = index;
        }
        cursor
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move to the previous entry, wrapping to the last
    pub fn move_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + len - 1) % len;
    }

    /// Move to the next entry, wrapping to the first
    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Scroll so the selection is inside a window of `visible_rows`
    pub fn recompute_viewport(&mut self, visible_rows: usize) {
        let rows = visible_rows.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
    }

    /// Catalog indices inside the window
    pub fn visible_range(&self, len: usize, visible_rows: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = (self.offset + visible_rows).min(len);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_both_ways() {
        let mut cursor = MenuCursor::new();
        cursor.move_up(9);
        assert_eq!(cursor.selected(), 8);
        cursor.move_down(9);
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn test_empty_catalog_is_inert() {
        let mut cursor = MenuCursor::new();
        cursor.move_down(0);
        cursor.move_up(0);
        cursor.recompute_viewport(6);
        assert_eq!(cursor.selected(), 0);
        assert_eq!(cursor.visible_range(0, 6), 0..0);
    }

    #[test]
    fn test_viewport_follows_selection() {
        let mut cursor = MenuCursor::new();
        for _ in 0..6 {
            cursor.move_down(9);
            cursor.recompute_viewport(6);
        }
        assert_eq!(cursor.selected(), 6);
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.visible_range(9, 6), 1..7);

        // Wrapping to the top scrolls back
        cursor.move_down(9);
        cursor.move_down(9);
        cursor.move_down(9);
        cursor.recompute_viewport(6);
        assert_eq!(cursor.selected(), 0);
        assert_eq!(cursor.offset(), 0);

        // Wrapping to the bottom shows the last window
        cursor.move_up(9);
        cursor.recompute_viewport(6);
        assert_eq!(cursor.selected(), 8);
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_short_catalog_range() {
        let cursor = MenuCursor::at(2, 3);
        assert_eq!(cursor.visible_range(3, 6), 0..3);
        assert_eq!(MenuCursor::at(7, 3).selected(), 0);
    }

    proptest! {
        #[test]
        fn prop_n_moves_down_return_home(len in 1usize..40, start in 0usize..40) {
            let start = start % len;
            let mut cursor = MenuCursor::at(start, len);
            for _ in 0..len {
                cursor.move_down(len);
            }
            prop_assert_eq!(cursor.selected(), start);
        }

        #[test]
        fn prop_viewport_contains_selection(
            len in 1usize..40,
            rows in 1usize..10,
            moves in proptest::collection::vec(any::<bool>(), 0..80),
        ) {
            let mut cursor = MenuCursor::new();
            for down in moves {
                if down {
                    cursor.move_down(len);
                } else {
                    cursor.move_up(len);
                }
                cursor.recompute_viewport(rows);
                prop_assert!(cursor.offset() <= cursor.selected());
                prop_assert!(cursor.selected() < cursor.offset() + rows);
                prop_assert!(cursor.visible_range(len, rows).contains(&cursor.selected()));
            }
        }
    }
}
