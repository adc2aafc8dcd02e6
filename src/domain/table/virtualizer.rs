//! Windowed rendering for long row lists.
//!
//! Row offsets are prefix sums over row sizes. Measured sizes replace the
//! estimate per index; rows never measured keep the estimate.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem {
    pub index: usize,
    pub start: f64,
    pub size: f64,
}

impl VirtualItem {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

#[derive(Debug, Clone)]
pub struct Virtualizer {
    estimate_size: f64,
    overscan: usize,
    scroll_top: f64,
    viewport_height: f64,
    measured: Vec<Option<f64>>,
    /// `offsets[i]` is the start of row `i`; `offsets[count]` is the total size.
    offsets: Vec<f64>,
}

impl Virtualizer {
    pub fn new(count: usize, estimate_size: f64, overscan: usize) -> Self {
        let mut virtualizer = Self {
            estimate_size,
            overscan,
            scroll_top: 0.0,
            viewport_height: 0.0,
            measured: vec![None; count],
            offsets: Vec::new(),
        };
        virtualizer.rebuild_offsets();
        virtualizer
    }

    pub fn count(&self) -> usize {
        self.measured.len()
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_count(&mut self, count: usize) {
        if count == self.measured.len() {
            return;
        }
        self.measured.resize(count, None);
        self.rebuild_offsets();
    }

    pub fn measure(&mut self, index: usize, size: f64) -> bool {
        if !size.is_finite() || size <= 0.0 {
            return false;
        }
        let Some(slot) = self.measured.get_mut(index) else {
            return false;
        };
        if *slot == Some(size) {
            return false;
        }
        *slot = Some(size);
        self.rebuild_offsets();
        true
    }

    pub fn reset_measurements(&mut self) {
        self.measured.iter_mut().for_each(|slot| *slot = None);
        self.rebuild_offsets();
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
    }

    pub fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.max(0.0);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0.0;
    }

    pub fn item_size(&self, index: usize) -> f64 {
        self.measured
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.estimate_size)
    }

    pub fn item_start(&self, index: usize) -> f64 {
        self.offsets
            .get(index)
            .copied()
            .unwrap_or_else(|| self.total_size())
    }

    pub fn total_size(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    /// Rows intersecting `[scroll_top, scroll_top + viewport_height]`, without
    /// overscan. `None` when there is nothing to show or no viewport yet.
    pub fn visible_range(&self) -> Option<Range<usize>> {
        let count = self.count();
        if count == 0 || self.viewport_height <= 0.0 {
            return None;
        }

        let top = self.scroll_top;
        let bottom = top + self.viewport_height;

        // Rows ending before the viewport top are above the window.
        let first = self.offsets[1..].partition_point(|end| *end < top);
        // Rows starting at or before the viewport bottom may be visible.
        let past_last = self.offsets[..count].partition_point(|start| *start <= bottom);

        let first = first.min(count - 1);
        let past_last = past_last.max(first + 1).min(count);
        Some(first..past_last)
    }

    pub fn virtual_items(&self) -> Vec<VirtualItem> {
        let Some(visible) = self.visible_range() else {
            return Vec::new();
        };

        let start = visible.start.saturating_sub(self.overscan);
        let end = visible
            .end
            .saturating_add(self.overscan)
            .min(self.count());

        (start..end)
            .map(|index| VirtualItem {
                index,
                start: self.offsets[index],
                size: self.item_size(index),
            })
            .collect()
    }

    fn rebuild_offsets(&mut self) {
        self.offsets.clear();
        self.offsets.reserve(self.measured.len() + 1);
        let mut running = 0.0;
        self.offsets.push(running);
        for slot in &self.measured {
            running += slot.unwrap_or(self.estimate_size);
            self.offsets.push(running);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(count: usize, scroll_top: f64, height: f64, overscan: usize) -> Virtualizer {
        let mut v = Virtualizer::new(count, 50.0, overscan);
        v.set_viewport_height(height);
        v.set_scroll_top(scroll_top);
        v
    }

    #[test]
    fn total_size_uses_estimate_until_measured() {
        let mut v = Virtualizer::new(4, 50.0, 0);
        assert_eq!(v.total_size(), 200.0);

        assert!(v.measure(1, 80.0));
        assert!(!v.measure(1, 80.0));
        assert_eq!(v.total_size(), 230.0);
        assert_eq!(v.item_start(2), 130.0);
    }

    #[test]
    fn no_viewport_yields_no_items() {
        let v = Virtualizer::new(100, 50.0, 5);

        assert!(v.virtual_items().is_empty());
    }

    #[test]
    fn window_is_bounded_by_viewport_and_overscan() {
        let v = viewport(1000, 0.0, 500.0, 10);
        let items = v.virtual_items();

        assert_eq!(items.first().map(|i| i.index), Some(0));
        // 11 rows touch [0, 500] plus 10 overscan rows below.
        assert_eq!(items.len(), 21);
    }

    #[test]
    fn overscan_extends_above_and_below() {
        let v = viewport(1000, 5000.0, 500.0, 3);
        let items = v.virtual_items();

        assert_eq!(items.first().map(|i| i.index), Some(96));
        assert_eq!(items.last().map(|i| i.index), Some(113));
        assert_eq!(items[0].start, 96.0 * 50.0);
    }

    #[test]
    fn window_covers_every_intersecting_row() {
        let mut v = Virtualizer::new(200, 40.0, 0);
        v.set_viewport_height(333.0);
        for idx in (0..200).step_by(7) {
            v.measure(idx, 40.0 + (idx % 5) as f64 * 13.0);
        }

        let max_scroll = v.total_size() - v.viewport_height();
        let mut scroll_top = 0.0;
        while scroll_top <= max_scroll {
            v.set_scroll_top(scroll_top);
            let range = v.visible_range().expect("viewport is set");
            let bottom = scroll_top + 333.0;
            for idx in 0..v.count() {
                let start = v.item_start(idx);
                let end = start + v.item_size(idx);
                if end >= scroll_top && start <= bottom {
                    assert!(
                        range.contains(&idx),
                        "row {idx} [{start}, {end}] missing at scroll {scroll_top}: {range:?}"
                    );
                }
            }
            scroll_top += 17.5;
        }
    }

    #[test]
    fn shrinking_count_keeps_window_in_bounds() {
        let mut v = viewport(1000, 40_000.0, 500.0, 2);
        v.set_count(20);

        let items = v.virtual_items();

        assert!(items.iter().all(|item| item.index < 20));
        assert!(!items.is_empty());
    }
}
