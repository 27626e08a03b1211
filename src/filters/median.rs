use super::AngleFilter;
use std::collections::VecDeque;

/// Median filter
pub struct MedianFilter {
    window_size: usize,
    yaw_buffer: VecDeque<f32>,
    roll_buffer: VecDeque<f32>,
}

impl MedianFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        assert!(window_size % 2 == 1, "Median filter window size must be odd");
        Self {
            window_size,
            yaw_buffer: VecDeque::with_capacity(window_size),
            roll_buffer: VecDeque::with_capacity(window_size),
        }
    }

    fn calculate_median(values: &VecDeque<f32>) -> f32 {
        let mut sorted: Vec<f32> = values.iter().copied().collect();
        sorted.sort_by(f32::total_cmp);

        let len = sorted.len();
        if len == 0 {
            0.0
        } else if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        } else {
            sorted[len / 2]
        }
    }
}

impl AngleFilter for MedianFilter {
    fn apply(&mut self, yaw: f32, roll: f32) -> (f32, f32) {
        if self.yaw_buffer.len() >= self.window_size {
            self.yaw_buffer.pop_front();
        }
        if self.roll_buffer.len() >= self.window_size {
            self.roll_buffer.pop_front();
        }

        self.yaw_buffer.push_back(yaw);
        self.roll_buffer.push_back(roll);

        let yaw_median = Self::calculate_median(&self.yaw_buffer);
        let roll_median = Self::calculate_median(&self.roll_buffer);

        (yaw_median, roll_median)
    }

    fn reset(&mut self) {
        self.yaw_buffer.clear();
        self.roll_buffer.clear();
    }

    fn name(&self) -> &str {
        "MedianFilter"
    }
}
