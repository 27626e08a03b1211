use super::AngleFilter;

/// Exponential smoothing filter
pub struct ExponentialFilter {
    alpha: f32,
    last_yaw: Option<f32>,
    last_roll: Option<f32>,
}

impl ExponentialFilter {
    pub fn new(alpha: f32) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self {
            alpha,
            last_yaw: None,
            last_roll: None,
        }
    }
}

impl AngleFilter for ExponentialFilter {
    fn apply(&mut self, yaw: f32, roll: f32) -> (f32, f32) {
        let filtered_yaw = match self.last_yaw {
            Some(last) => self.alpha * yaw + (1.0 - self.alpha) * last,
            None => yaw,
        };

        let filtered_roll = match self.last_roll {
            Some(last) => self.alpha * roll + (1.0 - self.alpha) * last,
            None => roll,
        };

        self.last_yaw = Some(filtered_yaw);
        self.last_roll = Some(filtered_roll);

        (filtered_yaw, filtered_roll)
    }

    fn reset(&mut self) {
        self.last_yaw = None;
        self.last_roll = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}
