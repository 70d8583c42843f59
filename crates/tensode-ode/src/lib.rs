//! # tensode-ode
//!
//! Adaptive Runge-Kutta 4 integration of tensor-valued ODEs.
//!
//! The solver never touches components directly: stages, probes and error
//! estimates are all built from [`TensorField`](tensode_kernels::TensorField)
//! operations. Any element structure and any tensor shape the derivative
//! agrees with can be integrated.
//!
//! ## Quick Start
//!
//! ```
//! use tensode_core::{RealField, Tensor};
//! use tensode_kernels::TensorField;
//! use tensode_ode::integrate;
//!
//! let field = TensorField::<f64, _>::new(RealField);
//!
//! // Harmonic oscillator: [x, v]' = [v, -x]
//! let y0 = Tensor::new(1, 2, vec![1.0, 0.0]).unwrap();
//! let trajectory = integrate(
//!     0.0,
//!     std::f64::consts::PI,
//!     std::f64::consts::PI / 8.0,
//!     1e-4,
//!     |err: &f64| *err > 1e-16,
//!     &y0,
//!     |_t, y: &Tensor<f64>| Tensor::new(1, 2, vec![y[&[1]], -y[&[0]]]),
//!     &field,
//! )
//! .unwrap();
//!
//! assert_eq!(trajectory.len(), 9);
//! let end = trajectory.final_state().unwrap();
//! assert!((end[&[0]] + 1.0).abs() < 1e-6);
//! ```
//!
//! ## Output
//!
//! A [`Trajectory`] holds the initial state at `t_start` and one state per
//! macro-step at `t_start + k * nominal_step`, with [`StepStats`] recording
//! how many halvings each step took and whether it stopped at `min_step`.
//!
//! ## Logging
//!
//! Progress goes through the `log` facade: `debug` for each committed step and
//! each rejected refinement, `warn` when a step is committed at the minimum
//! sub-step while the error predicate still objects. Install any logger to see
//! it.

pub mod config;
pub mod error;
pub mod rk4;
pub mod trajectory;


pub use config::Rk4Config;
pub use error::{OdeError, OdeResult};
pub use rk4::{evaluations_per_step, integrate, rk4_step, AdaptiveRk4};
pub use trajectory::{StepStats, Trajectory};
