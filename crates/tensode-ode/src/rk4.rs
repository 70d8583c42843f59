//! Step-doubling adaptive Runge-Kutta 4 integration
//!
//! # Method
//!
//! The classical fourth-order scheme advances `dy/dt = f(t, y)` by `h`:
//!
//! ```text
//! k1 = h * f(t, y)
//! k2 = h * f(t + h/2, y + k1/2)
//! k3 = h * f(t + h/2, y + k2/2)
//! k4 = h * f(t + h, y + k3)
//!
//! y' = y + (k1 + k4)/6 + (k2 + k3)/3
//! ```
//!
//! Every addition and scaling goes through a [`TensorField`], so the state may
//! be a tensor of any order over any element structure.
//!
//! # Error control
//!
//! Each macro-step of width `nominal_step` is first integrated in one RK4
//! step. The sub-step is then halved and the interval re-integrated with twice
//! as many sub-steps, until the caller's predicate accepts the discrepancy
//! between two successive estimates or the sub-step falls below `min_step`.
//! The discrepancy is the full self-contraction of their difference, i.e. the
//! squared norm as an element. The finer estimate is committed.
//!
//! Reaching `min_step` does not fail the integration: the step is committed,
//! flagged in its [`StepStats`] and logged at `warn` level.

use tensode_core::{LinearField, Ring, TensorResult, TensorStorage};
use tensode_kernels::TensorField;

use crate::config::Rk4Config;
use crate::error::OdeResult;
use crate::trajectory::{StepStats, Trajectory};

/// Halvings past this no longer shrink an `f64` sub-step meaningfully
const MAX_HALVINGS: u32 = 52;

/// Derivative evaluations per RK4 step
const STAGES: u64 = 4;

/// Advance `y` by one classical RK4 step of width `h` starting at `t`.
///
/// # Errors
///
/// Propagates errors from `derivative` and any shape mismatch between the
/// derivative's output and `y`.
///
/// # Examples
///
/// ```
/// use tensode_core::{RealField, Tensor};
/// use tensode_kernels::TensorField;
/// use tensode_ode::rk4_step;
///
/// let field = TensorField::<f64, _>::new(RealField);
/// let y = Tensor::scalar(1.0);
///
/// // dy/dt = 1 is integrated exactly for any step
/// let mut constant_rate = |_t: f64, y: &Tensor<f64>| {
///     field.zero_like(y).map(|mut rate| {
///         rate.components_mut()[0] = 1.0;
///         rate
///     })
/// };
/// let next = rk4_step(0.0, 0.5, &y, &mut constant_rate, &field).unwrap();
/// assert_eq!(*next.first_component(), 1.5);
/// ```
pub fn rk4_step<E, F, T, D>(
    t: f64,
    h: f64,
    y: &T,
    derivative: &mut D,
    field: &TensorField<E, F, T>,
) -> TensorResult<T>
where
    E: Clone,
    F: LinearField<E>,
    T: TensorStorage<E>,
    D: FnMut(f64, &T) -> TensorResult<T>,
{
    let half = h / 2.0;

    let mut k1 = derivative(t, y)?;
    field.scale_assign(&mut k1, h);

    let mut probe = field.scale(&k1, 0.5)?;
    field.add_assign(&mut probe, y)?;
    let mut k2 = derivative(t + half, &probe)?;
    field.scale_assign(&mut k2, h);

    let mut probe = field.scale(&k2, 0.5)?;
    field.add_assign(&mut probe, y)?;
    let mut k3 = derivative(t + half, &probe)?;
    field.scale_assign(&mut k3, h);

    let probe = field.add(y, &k3)?;
    let mut k4 = derivative(t + h, &probe)?;
    field.scale_assign(&mut k4, h);

    // (k1 + k4)/6 + (k2 + k3)/3, accumulated in k1 and k2
    field.add_assign(&mut k1, &k4)?;
    field.scale_assign(&mut k1, 1.0 / 6.0);
    field.add_assign(&mut k2, &k3)?;
    field.scale_assign(&mut k2, 1.0 / 3.0);

    let mut next = field.add(y, &k1)?;
    field.add_assign(&mut next, &k2)?;
    Ok(next)
}

/// Step-doubling RK4 integrator over a fixed output grid
///
/// # Examples
///
/// ```
/// use tensode_core::{RealField, Tensor};
/// use tensode_kernels::TensorField;
/// use tensode_ode::{AdaptiveRk4, Rk4Config};
///
/// let field = TensorField::<f64, _>::new(RealField);
/// let solver = AdaptiveRk4::new(Rk4Config::new().with_span(0.0, 1.0)).unwrap();
///
/// // dy/dt = y, y(0) = 1
/// let trajectory = solver
///     .integrate(
///         &Tensor::scalar(1.0),
///         |_err: &f64| false,
///         |_t, y: &Tensor<f64>| field.copy(y),
///         &field,
///     )
///     .unwrap();
///
/// let y1 = *trajectory.final_state().unwrap().first_component();
/// assert!((y1 - std::f64::consts::E).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveRk4 {
    config: Rk4Config,
}

impl AdaptiveRk4 {
    /// Create a solver from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`OdeError::InvalidConfig`](crate::OdeError::InvalidConfig) if
    /// [`Rk4Config::validate`] fails.
    pub fn new(config: Rk4Config) -> OdeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this solver runs with
    pub fn config(&self) -> &Rk4Config {
        &self.config
    }

    /// Integrate from `initial_state` over the configured grid.
    ///
    /// `is_error_too_large` receives the squared-norm discrepancy between two
    /// successive refinements of a macro-step and returns `true` to keep
    /// refining. `derivative` maps `(t, y)` to `dy/dt` with the shape of `y`.
    ///
    /// The trajectory starts with a copy of `initial_state` at `t_start`, then
    /// holds one state per macro-step at `t_start + k * nominal_step`.
    pub fn integrate<E, F, T, P, D>(
        &self,
        initial_state: &T,
        mut is_error_too_large: P,
        mut derivative: D,
        field: &TensorField<E, F, T>,
    ) -> OdeResult<Trajectory<T>>
    where
        E: Clone,
        F: Ring<E>,
        T: TensorStorage<E>,
        P: FnMut(&E) -> bool,
        D: FnMut(f64, &T) -> TensorResult<T>,
    {
        let config = &self.config;
        let steps = config.steps();
        let mut evaluations: u64 = 0;
        let mut counted = |t: f64, y: &T| {
            evaluations += 1;
            derivative(t, y)
        };

        log::debug!(
            "integrate: {} macro-steps of {} from {} to {}, min_step {}",
            steps,
            config.nominal_step,
            config.t_start,
            config.t_end,
            config.min_step
        );

        let mut trajectory = Trajectory::new(config.t_start, field.copy(initial_state)?);
        let mut state = field.copy(initial_state)?;

        for k in 0..steps {
            let t = config.time_at(k);
            let (next, stats) = self.refine_interval(
                t,
                config.time_at(k + 1),
                &state,
                &mut is_error_too_large,
                &mut counted,
                field,
            )?;

            log::debug!(
                "integrate: committed t = {} after {} halving(s), sub-step {}",
                stats.time,
                stats.halvings,
                stats.sub_step
            );

            trajectory.push(field.copy(&next)?, stats)?;
            state = next;
        }

        trajectory.record_evaluations(evaluations);
        Ok(trajectory)
    }

    /// Refine one macro-step from `t` until the predicate or the floor stops it.
    fn refine_interval<E, F, T, P, D>(
        &self,
        t: f64,
        key: f64,
        state: &T,
        is_error_too_large: &mut P,
        derivative: &mut D,
        field: &TensorField<E, F, T>,
    ) -> OdeResult<(T, StepStats)>
    where
        E: Clone,
        F: Ring<E>,
        T: TensorStorage<E>,
        P: FnMut(&E) -> bool,
        D: FnMut(f64, &T) -> TensorResult<T>,
    {
        let nominal = self.config.nominal_step;
        let mut sub_step = nominal;
        let mut halvings: u32 = 0;
        let mut correct = rk4_step(t, sub_step, state, derivative, field)?;

        loop {
            let predict = correct;
            halvings += 1;
            sub_step = nominal * 0.5f64.powi(halvings as i32);
            correct = integrate_span(t, sub_step, 1u64 << halvings, state, derivative, field)?;

            let difference = field.sub(&predict, &correct)?;
            let discrepancy = field.norm_sqr(&difference)?;

            let floor_reached = sub_step < self.config.min_step || halvings >= MAX_HALVINGS;
            if floor_reached {
                if is_error_too_large(&discrepancy) {
                    log::warn!(
                        "integrate: sub-step {} at t = {} is below min_step {}; \
                         committing without the requested accuracy",
                        sub_step,
                        t,
                        self.config.min_step
                    );
                }
            } else if is_error_too_large(&discrepancy) {
                log::debug!(
                    "integrate: t = {}, halving {} rejected, refining to sub-step {}",
                    t,
                    halvings,
                    sub_step / 2.0
                );
                continue;
            }

            let stats = StepStats {
                time: key,
                sub_step,
                halvings,
                floor_reached,
            };
            return Ok((correct, stats));
        }
    }
}

/// Integrate `count` RK4 sub-steps of width `sub_step` from `t`.
fn integrate_span<E, F, T, D>(
    t: f64,
    sub_step: f64,
    count: u64,
    state: &T,
    derivative: &mut D,
    field: &TensorField<E, F, T>,
) -> TensorResult<T>
where
    E: Clone,
    F: LinearField<E>,
    T: TensorStorage<E>,
    D: FnMut(f64, &T) -> TensorResult<T>,
{
    let mut current = field.copy(state)?;
    for i in 0..count {
        current = rk4_step(t + i as f64 * sub_step, sub_step, &current, derivative, field)?;
    }
    Ok(current)
}

/// Integrate `dy/dt = derivative(t, y)` from `t_start` to `t_end`.
///
/// Shorthand for building an [`Rk4Config`] and calling
/// [`AdaptiveRk4::integrate`].
#[allow(clippy::too_many_arguments)]
pub fn integrate<E, F, T, P, D>(
    t_start: f64,
    t_end: f64,
    nominal_step: f64,
    min_step: f64,
    is_error_too_large: P,
    initial_state: &T,
    derivative: D,
    field: &TensorField<E, F, T>,
) -> OdeResult<Trajectory<T>>
where
    E: Clone,
    F: Ring<E>,
    T: TensorStorage<E>,
    P: FnMut(&E) -> bool,
    D: FnMut(f64, &T) -> TensorResult<T>,
{
    let config = Rk4Config {
        t_start,
        t_end,
        nominal_step,
        min_step,
    };
    AdaptiveRk4::new(config)?.integrate(initial_state, is_error_too_large, derivative, field)
}

/// Number of derivative evaluations one macro-step with `halvings` refinements costs
pub fn evaluations_per_step(halvings: u32) -> u64 {
    // 1 + 2 + 4 + ... + 2^halvings RK4 steps
    let steps = 1u64
        .checked_shl(halvings.saturating_add(1))
        .map(|n| n - 1)
        .unwrap_or(u64::MAX);
    steps.saturating_mul(STAGES)
}
