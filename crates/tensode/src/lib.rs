//! # tensode - Tensor ODE Stack
//!
//! Generic tensor algebra over pluggable element structures, and an adaptive
//! Runge-Kutta 4 solver for ODEs whose state is such a tensor.
//!
//! This is the **meta crate** that re-exports all tensode components for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tensode::prelude::*;
//!
//! let field = TensorField::<f64, _>::new(RealField);
//!
//! // dy/dt = -y on [0, 1]
//! let trajectory = integrate(
//!     0.0,
//!     1.0,
//!     0.1,
//!     1e-6,
//!     |err: &f64| *err > 1e-18,
//!     &Tensor::scalar(1.0),
//!     |_t, y: &Tensor<f64>| field.neg(y),
//!     &field,
//! )?;
//!
//! let y1 = *trajectory.final_state().unwrap().first_component();
//! assert!((y1 - (-1.0_f64).exp()).abs() < 1e-8);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core ([`core`])
//!
//! Algebraic structures, fixed-shape tensors, multi-index enumeration.
//!
//! ```
//! use tensode::core::{IndexIterator, Tensor};
//!
//! let t = Tensor::from_fn(2, 2, |i| i[0] * 2 + i[1]).unwrap();
//! assert_eq!(t[&[1, 0]], 2);
//! assert_eq!(IndexIterator::new(2, 2).count(), 4);
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! Elementwise tensor algebra and generalized contraction.
//!
//! ```
//! use tensode::core::{RealField, Tensor};
//! use tensode::kernels::TensorField;
//!
//! let field = TensorField::<f64, _>::new(RealField);
//! let a = Tensor::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
//! let b = Tensor::new(1, 3, vec![4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(field.dot(&a, &b).unwrap(), 32.0);
//! ```
//!
//! ### ODE ([`ode`])
//!
//! Step-doubling adaptive RK4 with a fixed output grid.

// Re-export all components
pub use tensode_core as core;
pub use tensode_kernels as kernels;
pub use tensode_ode as ode;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tensode::prelude::*;
    //!
    //! let t = Tensor::new(2, 2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
    //! let field = TensorField::<f64, _>::new(RealField);
    //! assert_eq!(field.trace(&t).unwrap(), 2.0);
    //! ```

    // Algebra
    pub use crate::core::{ComplexField, Field, LinearField, MatrixRing, RealField, Ring};

    // Tensors
    pub use crate::core::{IndexIterator, MultiIndex, Tensor, TensorError, TensorResult, TensorStorage};

    // Tensor field
    pub use crate::kernels::TensorField;

    // Solver
    pub use crate::ode::{
        integrate, rk4_step, AdaptiveRk4, OdeError, OdeResult, Rk4Config, StepStats, Trajectory,
    };
}
