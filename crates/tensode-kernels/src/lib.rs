//! # tensode-kernels
//!
//! Tensor field operations for tensode.
//!
//! ## Overview
//!
//! A [`TensorField`] binds one algebraic structure over an element type and
//! lifts it to whole tensors:
//!
//! - **Elementwise algebra** - `add`, `sub`, `neg`, `scale`, each in a pure form
//!   and an `_assign` form that overwrites exactly one operand
//! - **Construction** - `zero`, `zero_like`, `copy`, `identity`
//! - **Generalized contraction** - [`TensorField::fold`] over paired axes, with
//!   `self_sym_fold`, `dot`, `matmul`, `trace` and `norm_sqr` built on it
//! - **Traversal** - `component_transform` and `for_each_component` in
//!   multi-index order
//!
//! ## Quick Start
//!
//! ```rust
//! use tensode_core::{RealField, Tensor};
//! use tensode_kernels::TensorField;
//!
//! let field = TensorField::<f64, _>::new(RealField);
//! let v = Tensor::new(1, 2, vec![3.0, 4.0]).unwrap();
//!
//! assert_eq!(field.norm_sqr(&v).unwrap(), 25.0);
//!
//! let doubled = field.scale(&v, 2.0).unwrap();
//! let diff = field.sub(&doubled, &v).unwrap();
//! assert_eq!(diff, v);
//! ```
//!
//! ## Custom tensor types
//!
//! The third type parameter of [`TensorField`] is any
//! [`TensorStorage`](tensode_core::TensorStorage) implementation. Results are
//! built through `TensorStorage::from_components`, so a wrapper type passes
//! through every operation unchanged.

pub mod contractions;
pub mod field;


pub use field::TensorField;
