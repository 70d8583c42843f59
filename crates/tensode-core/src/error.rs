//! Error types for tensor construction, access and algebra
//!
//! Every failure in this stack is a shape problem: a component buffer that does
//! not match `size^order`, a multi-index of the wrong arity, or two tensors
//! that cannot be combined. All of them are detected before any data is
//! touched, so an `Err` never leaves a partially written result behind.

use thiserror::Error;

/// Error type for tensor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// Flat component count does not equal `size^order`
    #[error("invalid shape: order {order} and size {size} require {expected} components, got {actual}")]
    InvalidShape {
        order: usize,
        size: usize,
        expected: usize,
        actual: usize,
    },

    /// `size^order` does not fit in `usize`
    #[error("shape overflow: {size}^{order} components cannot be addressed")]
    ShapeOverflow { order: usize, size: usize },

    /// Multi-index length differs from the tensor order
    #[error("index arity mismatch: tensor of order {order} addressed with {arity} indices")]
    IndexArity { order: usize, arity: usize },

    /// A digit of a multi-index is not below the tensor size
    #[error("index {index} out of range on axis {axis} (size {size})")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        size: usize,
    },

    /// Binary operation on tensors of incompatible order or size
    #[error(
        "{operation}: rank mismatch - lhs has order {lhs_order} and size {lhs_size}, \
         rhs has order {rhs_order} and size {rhs_size}"
    )]
    RankMismatch {
        operation: &'static str,
        lhs_order: usize,
        lhs_size: usize,
        rhs_order: usize,
        rhs_size: usize,
    },

    /// Axis number not below the tensor order
    #[error("{operation}: invalid axis {axis} for tensor of order {order}")]
    InvalidAxis {
        operation: &'static str,
        axis: usize,
        order: usize,
    },

    /// Malformed contraction request
    #[error("{operation}: {reason}")]
    InvalidContraction {
        operation: &'static str,
        reason: String,
    },
}

/// Result type for tensor operations
pub type TensorResult<T> = Result<T, TensorError>;

impl TensorError {
    /// Create an invalid shape error
    pub fn invalid_shape(order: usize, size: usize, expected: usize, actual: usize) -> Self {
        TensorError::InvalidShape {
            order,
            size,
            expected,
            actual,
        }
    }

    /// Create a rank mismatch error from the `(order, size)` pairs of both operands
    pub fn rank_mismatch(
        operation: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    ) -> Self {
        TensorError::RankMismatch {
            operation,
            lhs_order: lhs.0,
            lhs_size: lhs.1,
            rhs_order: rhs.0,
            rhs_size: rhs.1,
        }
    }

    /// Create an invalid axis error
    pub fn invalid_axis(operation: &'static str, axis: usize, order: usize) -> Self {
        TensorError::InvalidAxis {
            operation,
            axis,
            order,
        }
    }

    /// Create an invalid contraction error
    pub fn invalid_contraction(operation: &'static str, reason: impl Into<String>) -> Self {
        TensorError::InvalidContraction {
            operation,
            reason: reason.into(),
        }
    }
}

/// Number of components of a tensor with the given shape, `size^order`.
///
/// # Errors
///
/// [`TensorError::ShapeOverflow`] if the count does not fit in `usize`.
pub fn component_count(order: usize, size: usize) -> TensorResult<usize> {
    let exp = u32::try_from(order).map_err(|_| TensorError::ShapeOverflow { order, size })?;
    size.checked_pow(exp)
        .ok_or(TensorError::ShapeOverflow { order, size })
}
