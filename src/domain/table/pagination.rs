pub const DEFAULT_FETCH_THRESHOLD_PX: f64 = 500.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn remaining(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

pub fn should_fetch_more(metrics: ScrollMetrics, threshold_px: f64) -> bool {
    metrics.remaining() < threshold_px
}

#[derive(Debug, Clone)]
pub struct BottomTrigger {
    threshold_px: f64,
    armed: bool,
    was_loading: bool,
}

impl BottomTrigger {
    pub fn new(threshold_px: f64) -> Self {
        Self {
            threshold_px,
            armed: true,
            was_loading: false,
        }
    }

    pub fn threshold_px(&self) -> f64 {
        self.threshold_px
    }

    pub fn rearm(&mut self) {
        self.armed = true;
    }

    pub fn check(&mut self, metrics: ScrollMetrics, is_loading: bool) -> bool {
        if self.was_loading && !is_loading {
            self.armed = true;
        }
        self.was_loading = is_loading;

        if !should_fetch_more(metrics, self.threshold_px) {
            self.armed = true;
            return false;
        }
        if is_loading || !self.armed {
            return false;
        }
        self.armed = false;
        true
    }
}
