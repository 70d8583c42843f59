//! # tensode-core
//!
//! Algebraic structures, fixed-shape tensors and multi-index enumeration for tensode.
//!
//! This crate provides the data layer the rest of the stack builds on:
//!
//! - **Algebraic structures** ([`LinearField`], [`Ring`], [`Field`]) that supply
//!   arithmetic for an element type without the element knowing about it
//! - **Tensors** ([`Tensor`]) of uniform axis length, stored flat
//! - **Multi-index enumeration** ([`IndexIterator`]) in storage order
//! - **A storage trait** ([`TensorStorage`]) for plugging other tensor types in
//!
//! ## Quick Start
//!
//! ```
//! use tensode_core::{Field, IndexIterator, RealField, Tensor};
//!
//! let t = Tensor::from_fn(2, 2, |i| (i[0] + i[1]) as f64).unwrap();
//! assert_eq!(t.components(), &[0.0, 1.0, 1.0, 2.0]);
//!
//! let f = RealField;
//! assert_eq!(f.div(&3.0_f64, &2.0), 1.5);
//!
//! assert_eq!(IndexIterator::new(3, 2).count(), 8);
//! ```
//!
//! ## Storage Layout
//!
//! A tensor of order `o` and size `s` owns `s^o` components. The last axis
//! varies fastest, so `[0, 1]` follows `[0, 0]` and precedes `[1, 0]`. An
//! order-0 tensor holds exactly one component.
//!
//! ## Element Types
//!
//! Elements need nothing beyond `Clone` to be stored. The structure passed to
//! the tensor field decides what addition, negation and scaling mean, so the
//! same [`Tensor`] type holds reals, complex numbers or whole matrices:
//!
//! ```
//! use tensode_core::{MatrixRing, Ring};
//! use scirs2_core::ndarray_ext::array;
//!
//! let ring = MatrixRing::new(2);
//! let a = array![[0.0, 1.0], [0.0, 0.0]];
//! let b = array![[0.0, 0.0], [1.0, 0.0]];
//! assert_ne!(ring.mul(&a, &b), ring.mul(&b, &a));
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`TensorResult`]. Shape problems are reported
//! before any component is written.

pub mod algebra;
pub mod error;
pub mod index;
pub mod tensor;

#[cfg(test)]
mod property_tests;

pub use algebra::{product, sum, ComplexField, Field, LinearField, MatrixRing, RealField, Ring};
pub use error::{component_count, TensorError, TensorResult};
pub use index::{flat_offset, unflatten, IndexIterator, MultiIndex};
pub use tensor::{Tensor, TensorStorage};
