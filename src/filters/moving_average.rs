use super::AngleFilter;
use std::collections::VecDeque;

/// Moving average filter
pub struct MovingAverageFilter {
    window_size: usize,
    yaw_buffer: VecDeque<f32>,
    roll_buffer: VecDeque<f32>,
}

impl MovingAverageFilter {
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            yaw_buffer: VecDeque::with_capacity(window_size),
            roll_buffer: VecDeque::with_capacity(window_size),
        }
    }
}

impl AngleFilter for MovingAverageFilter {
    fn apply(&mut self, yaw: f32, roll: f32) -> (f32, f32) {
        if self.yaw_buffer.len() >= self.window_size {
            self.yaw_buffer.pop_front();
        }
        if self.roll_buffer.len() >= self.window_size {
            self.roll_buffer.pop_front();
        }

        self.yaw_buffer.push_back(yaw);
        self.roll_buffer.push_back(roll);

        let yaw_avg = self.yaw_buffer.iter().sum::<f32>() / self.yaw_buffer.len() as f32;
        let roll_avg = self.roll_buffer.iter().sum::<f32>() / self.roll_buffer.len() as f32;

        (yaw_avg, roll_avg)
    }

    fn reset(&mut self) {
        self.yaw_buffer.clear();
        self.roll_buffer.clear();
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}
