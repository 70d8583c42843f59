//! Time-ordered solver output

use std::cmp::Ordering;

use crate::error::{OdeError, OdeResult};

/// How one macro-step was accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepStats {
    /// Trajectory key the step was committed at
    pub time: f64,
    /// Final sub-step width
    pub sub_step: f64,
    /// Number of times the sub-step was halved (at least 1)
    pub halvings: u32,
    /// Refinement stopped at the minimum sub-step rather than on the error predicate
    pub floor_reached: bool,
}

impl StepStats {
    /// Number of RK4 sub-steps used for the committed estimate
    pub fn sub_steps(&self) -> u64 {
        1u64.checked_shl(self.halvings).unwrap_or(u64::MAX)
    }
}

/// States keyed by strictly increasing time
///
/// The first entry is the initial state; every later entry is one accepted
/// macro-step with its [`StepStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<T> {
    times: Vec<f64>,
    states: Vec<T>,
    stats: Vec<StepStats>,
    derivative_evaluations: u64,
}

impl<T> Trajectory<T> {
    /// Start a trajectory at `time` with `initial_state`
    pub fn new(time: f64, initial_state: T) -> Self {
        Self {
            times: vec![time],
            states: vec![initial_state],
            stats: Vec::new(),
            derivative_evaluations: 0,
        }
    }

    /// Append an accepted state.
    ///
    /// # Errors
    ///
    /// [`OdeError::NonMonotonicTime`] unless `stats.time` is greater than the last key.
    pub fn push(&mut self, state: T, stats: StepStats) -> OdeResult<()> {
        let previous = self.end_time();
        if stats.time.partial_cmp(&previous) != Some(Ordering::Greater) {
            return Err(OdeError::NonMonotonicTime {
                previous,
                time: stats.time,
            });
        }
        self.times.push(stats.time);
        self.states.push(state);
        self.stats.push(stats);
        Ok(())
    }

    pub(crate) fn record_evaluations(&mut self, count: u64) {
        self.derivative_evaluations = self.derivative_evaluations.saturating_add(count);
    }

    /// Number of states, including the initial one
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: a trajectory holds at least its initial state
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Keys in increasing order
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// States in key order
    pub fn states(&self) -> &[T] {
        &self.states
    }

    /// Per-step diagnostics, one per state after the initial one
    pub fn stats(&self) -> &[StepStats] {
        &self.stats
    }

    /// `(time, state)` pairs in increasing time
    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// State recorded at exactly `time`
    pub fn get(&self, time: f64) -> Option<&T> {
        let pos = self.times.partition_point(|&t| t < time);
        match self.times.get(pos) {
            Some(&t) if t == time => self.states.get(pos),
            _ => None,
        }
    }

    /// The entry whose key is closest to `time`
    pub fn nearest(&self, time: f64) -> Option<(f64, &T)> {
        let pos = self.times.partition_point(|&t| t < time);
        let candidate = match (pos.checked_sub(1), self.times.get(pos)) {
            (Some(before), Some(&after)) => {
                if time - self.times[before] <= after - time {
                    before
                } else {
                    pos
                }
            }
            (Some(before), None) => before,
            (None, Some(_)) => pos,
            (None, None) => return None,
        };
        Some((self.times[candidate], &self.states[candidate]))
    }

    /// Initial key
    pub fn start_time(&self) -> f64 {
        self.times.first().copied().unwrap_or(f64::NAN)
    }

    /// Last key
    pub fn end_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(f64::NAN)
    }

    /// Last recorded state
    pub fn final_state(&self) -> Option<&T> {
        self.states.last()
    }

    /// Number of steps whose refinement stopped at the minimum sub-step.
    ///
    /// Those states carry no accuracy guarantee from the error predicate.
    pub fn floor_hits(&self) -> usize {
        self.stats.iter().filter(|s| s.floor_reached).count()
    }

    /// Total calls made to the derivative function
    pub fn derivative_evaluations(&self) -> u64 {
        self.derivative_evaluations
    }

    /// Consume the trajectory into `(time, state)` pairs
    pub fn into_pairs(self) -> Vec<(f64, T)> {
        self.times.into_iter().zip(self.states).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(time: f64) -> StepStats {
        StepStats {
            time,
            sub_step: 0.05,
            halvings: 1,
            floor_reached: false,
        }
    }

    #[test]
    fn test_push_and_lookup() {
        let mut trajectory = Trajectory::new(0.0, "a");
        trajectory.push("b", stats(0.5)).unwrap();
        trajectory.push("c", stats(1.0)).unwrap();

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.get(0.5), Some(&"b"));
        assert_eq!(trajectory.get(0.25), None);
        assert_eq!(trajectory.start_time(), 0.0);
        assert_eq!(trajectory.end_time(), 1.0);
        assert_eq!(trajectory.final_state(), Some(&"c"));
    }

    #[test]
    fn test_rejects_non_increasing_time() {
        let mut trajectory = Trajectory::new(1.0, 0);
        assert_eq!(
            trajectory.push(1, stats(1.0)),
            Err(OdeError::NonMonotonicTime {
                previous: 1.0,
                time: 1.0
            })
        );
        assert!(trajectory.push(1, stats(f64::NAN)).is_err());
        assert_eq!(trajectory.len(), 1);
    }

    #[test]
    fn test_nearest() {
        let mut trajectory = Trajectory::new(0.0, 0);
        trajectory.push(1, stats(1.0)).unwrap();
        trajectory.push(2, stats(2.0)).unwrap();

        assert_eq!(trajectory.nearest(-5.0), Some((0.0, &0)));
        assert_eq!(trajectory.nearest(0.4), Some((0.0, &0)));
        assert_eq!(trajectory.nearest(1.6), Some((2.0, &2)));
        assert_eq!(trajectory.nearest(9.0), Some((2.0, &2)));
    }

    #[test]
    fn test_iter_and_into_pairs() {
        let mut trajectory = Trajectory::new(0.0, 'x');
        trajectory.push('y', stats(0.1)).unwrap();

        let pairs: Vec<(f64, char)> = trajectory.iter().map(|(t, &s)| (t, s)).collect();
        assert_eq!(pairs, vec![(0.0, 'x'), (0.1, 'y')]);
        assert_eq!(trajectory.into_pairs(), pairs);
    }

    #[test]
    fn test_floor_hits_and_sub_steps() {
        let mut trajectory = Trajectory::new(0.0, ());
        trajectory.push((), stats(1.0)).unwrap();
        trajectory
            .push(
                (),
                StepStats {
                    time: 2.0,
                    sub_step: 0.125,
                    halvings: 3,
                    floor_reached: true,
                },
            )
            .unwrap();

        assert_eq!(trajectory.floor_hits(), 1);
        assert_eq!(trajectory.stats()[1].sub_steps(), 8);
    }
}
