//! Solver configuration

use crate::error::{OdeError, OdeResult};

/// Slack added before flooring the interval count, so spans that are an exact
/// multiple of the step up to rounding keep their final key.
const GRID_EPSILON: f64 = 1e-9;

/// Time span and step control for [`AdaptiveRk4`](crate::AdaptiveRk4)
///
/// # Examples
///
/// ```
/// use tensode_ode::Rk4Config;
///
/// let config = Rk4Config::new()
///     .with_span(0.0, 2.0)
///     .with_nominal_step(0.5)
///     .with_min_step(1e-3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.steps(), 4);
/// assert_eq!(config.time_at(3), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4Config {
    /// First trajectory key
    pub t_start: f64,
    /// Upper bound for the last trajectory key
    pub t_end: f64,
    /// Spacing of trajectory keys
    pub nominal_step: f64,
    /// Sub-step below which refinement stops
    pub min_step: f64,
}

impl Default for Rk4Config {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_end: 1.0,
            nominal_step: 0.1,
            min_step: 1e-6,
        }
    }
}

impl Rk4Config {
    /// Create a configuration with defaults (`[0, 1]`, step 0.1, floor 1e-6)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start time
    pub fn with_t_start(mut self, t_start: f64) -> Self {
        self.t_start = t_start;
        self
    }

    /// Set the end time
    pub fn with_t_end(mut self, t_end: f64) -> Self {
        self.t_end = t_end;
        self
    }

    /// Set start and end time together
    pub fn with_span(self, t_start: f64, t_end: f64) -> Self {
        self.with_t_start(t_start).with_t_end(t_end)
    }

    /// Set the nominal step
    pub fn with_nominal_step(mut self, nominal_step: f64) -> Self {
        self.nominal_step = nominal_step;
        self
    }

    /// Set the minimum sub-step
    pub fn with_min_step(mut self, min_step: f64) -> Self {
        self.min_step = min_step;
        self
    }

    /// Check that the configuration describes a usable grid.
    ///
    /// # Errors
    ///
    /// [`OdeError::InvalidConfig`] if a value is not finite, a step is not
    /// positive, `t_end < t_start`, or the span overflows when counted in
    /// nominal steps.
    pub fn validate(&self) -> OdeResult<()> {
        let fields = [
            ("t_start", self.t_start),
            ("t_end", self.t_end),
            ("nominal_step", self.nominal_step),
            ("min_step", self.min_step),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OdeError::invalid_config(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.nominal_step <= 0.0 {
            return Err(OdeError::invalid_config(format!(
                "nominal_step must be positive, got {}",
                self.nominal_step
            )));
        }
        if self.min_step <= 0.0 {
            return Err(OdeError::invalid_config(format!(
                "min_step must be positive, got {}",
                self.min_step
            )));
        }
        if self.t_end < self.t_start {
            return Err(OdeError::invalid_config(format!(
                "t_end ({}) precedes t_start ({})",
                self.t_end, self.t_start
            )));
        }
        let ratio = (self.t_end - self.t_start) / self.nominal_step;
        if !ratio.is_finite() {
            return Err(OdeError::invalid_config(format!(
                "span [{}, {}] is not representable in steps of {}",
                self.t_start, self.t_end, self.nominal_step
            )));
        }
        Ok(())
    }

    /// Number of macro-steps, `floor((t_end - t_start) / nominal_step)`.
    ///
    /// The trajectory holds `steps() + 1` states.
    pub fn steps(&self) -> usize {
        let ratio = (self.t_end - self.t_start) / self.nominal_step + GRID_EPSILON;
        if ratio.is_finite() && ratio > 0.0 {
            ratio.floor() as usize
        } else {
            0
        }
    }

    /// Trajectory key of macro-step `k`, clamped to `t_end`
    pub fn time_at(&self, k: usize) -> f64 {
        (self.t_start + k as f64 * self.nominal_step).min(self.t_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Rk4Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.steps(), 10);
    }

    #[test]
    fn test_builder() {
        let config = Rk4Config::new()
            .with_t_start(1.0)
            .with_t_end(3.0)
            .with_nominal_step(0.25)
            .with_min_step(0.01);
        assert_eq!(config.t_start, 1.0);
        assert_eq!(config.t_end, 3.0);
        assert_eq!(config.nominal_step, 0.25);
        assert_eq!(config.min_step, 0.01);
    }

    #[test]
    fn test_rejects_non_positive_steps() {
        assert!(Rk4Config::new().with_nominal_step(0.0).validate().is_err());
        assert!(Rk4Config::new().with_nominal_step(-0.1).validate().is_err());
        assert!(Rk4Config::new().with_min_step(0.0).validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = Rk4Config::new().with_t_end(f64::NAN).validate().unwrap_err();
        assert!(err.to_string().contains("t_end must be finite"));
        assert!(Rk4Config::new()
            .with_min_step(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_reversed_span() {
        assert!(Rk4Config::new().with_span(1.0, 0.0).validate().is_err());
        assert!(Rk4Config::new().with_span(1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_overflowing_span() {
        let config = Rk4Config::new()
            .with_span(-1e308, 1e308)
            .with_nominal_step(1e300);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, OdeError::InvalidConfig(_)));
        assert!(err.to_string().contains("not representable"));

        // Huge but finite step counts are still accepted
        assert!(Rk4Config::new()
            .with_span(0.0, 1e300)
            .with_nominal_step(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_grid_counts() {
        // 0.3 / 0.1 falls just short of 3 in binary; the slack keeps the last key
        assert_eq!(Rk4Config::new().with_span(0.0, 1.0).steps(), 10);
        assert_eq!(Rk4Config::new().with_span(0.0, 0.95).steps(), 9);
        assert_eq!(Rk4Config::new().with_span(2.0, 2.0).steps(), 0);
        assert_eq!(Rk4Config::new().with_span(0.0, 0.3).steps(), 3);
    }

    #[test]
    fn test_time_at_does_not_drift() {
        let config = Rk4Config::new().with_span(0.0, 1.0);
        assert_eq!(config.time_at(0), 0.0);
        assert_eq!(config.time_at(10), 1.0);

        // 3 * 0.1 rounds above 0.3
        let config = Rk4Config::new().with_span(0.0, 0.3);
        assert_eq!(config.time_at(3), 0.3);
    }
}
