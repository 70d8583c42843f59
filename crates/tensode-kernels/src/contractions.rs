//! Generalized tensor contraction
//!
//! [`TensorField::fold`] sums products of components over paired axes of two
//! tensors. Dot products, matrix products, traces and squared norms are all
//! special cases and are provided as thin wrappers.
//!
//! # Axis pairing
//!
//! The pair list holds `2k` axis numbers: the first `k` name axes of the left
//! tensor, the last `k` the axes of the right tensor they pair with, matched
//! by position. The remaining (free) axes of each operand keep their ascending
//! order, left operand first, to form the result.
//!
//! # Complexity
//!
//! Time: O(size^(result order + k)) element multiplications.
//! Space: O(size^(result order)).
//!
//! This is meant for the low-order tensors of state vectors and small
//! matrices; it makes no attempt at blocking or reordering.

use tensode_core::{
    component_count, flat_offset, IndexIterator, MultiIndex, Ring, TensorError, TensorResult,
    TensorStorage,
};

use crate::field::TensorField;

/// Check that `axes` are in range for a tensor of the given order and pairwise distinct.
fn validate_axes(operation: &'static str, axes: &[usize], order: usize) -> TensorResult<()> {
    for (i, &axis) in axes.iter().enumerate() {
        if axis >= order {
            return Err(TensorError::invalid_axis(operation, axis, order));
        }
        if axes[..i].contains(&axis) {
            return Err(TensorError::invalid_contraction(
                operation,
                format!("axis {} listed twice for the same operand", axis),
            ));
        }
    }
    Ok(())
}

fn require_order<E, T: TensorStorage<E>>(
    operation: &'static str,
    t: &T,
    order: usize,
) -> TensorResult<()> {
    if t.order() != order {
        return Err(TensorError::invalid_contraction(
            operation,
            format!("expected a tensor of order {}, got order {}", order, t.order()),
        ));
    }
    Ok(())
}

/// Component of an order-0 tensor
fn scalar_value<E: Clone, T: TensorStorage<E>>(
    operation: &'static str,
    t: &T,
) -> TensorResult<E> {
    t.components()
        .first()
        .cloned()
        .ok_or_else(|| TensorError::invalid_contraction(operation, "contraction produced no component"))
}

impl<E, F, T> TensorField<E, F, T>
where
    E: Clone,
    F: Ring<E>,
    T: TensorStorage<E>,
{
    /// Contract `t1` and `t2` over the axis pairs in `index_pairs`.
    ///
    /// Axis `index_pairs[i]` of `t1` is summed against axis `index_pairs[k + i]`
    /// of `t2`, where `k = index_pairs.len() / 2`. Each product is
    /// `t1_component * t2_component` in that order, which matters for
    /// non-commutative rings.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidContraction`] if the pair list has odd length
    ///   or names an axis twice for the same operand
    /// - [`TensorError::InvalidAxis`] if an axis is not below its tensor's order
    /// - [`TensorError::RankMismatch`] if both tensors have axes and their sizes differ
    ///
    /// # Examples
    ///
    /// ```
    /// use tensode_core::{RealField, Tensor};
    /// use tensode_kernels::TensorField;
    ///
    /// let field = TensorField::<f64, _>::new(RealField);
    /// let a = Tensor::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
    /// let b = Tensor::new(1, 3, vec![4.0, 5.0, 6.0]).unwrap();
    ///
    /// let dot = field.fold(&a, &b, &[0, 0]).unwrap();
    /// assert_eq!(dot.order(), 0);
    /// assert_eq!(*dot.first_component(), 32.0);
    ///
    /// // No pairs: outer product
    /// let outer = field.fold(&a, &b, &[]).unwrap();
    /// assert_eq!(outer[&[2, 0]], 12.0);
    /// ```
    pub fn fold(&self, t1: &T, t2: &T, index_pairs: &[usize]) -> TensorResult<T> {
        const OP: &str = "fold";

        if index_pairs.len() % 2 != 0 {
            return Err(TensorError::invalid_contraction(
                OP,
                format!(
                    "axis pair list must have even length, got {}",
                    index_pairs.len()
                ),
            ));
        }
        let k = index_pairs.len() / 2;
        let (axes1, axes2) = index_pairs.split_at(k);
        validate_axes(OP, axes1, t1.order())?;
        validate_axes(OP, axes2, t2.order())?;
        // An order-0 operand is a scalar factor and imposes no size
        let size = match (t1.order(), t2.order()) {
            (0, 0) => 1,
            (0, _) => t2.size(),
            (_, 0) => t1.size(),
            _ if t1.size() == t2.size() => t1.size(),
            _ => return Err(TensorError::rank_mismatch(OP, t1.shape(), t2.shape())),
        };
        let free1: Vec<usize> = (0..t1.order()).filter(|a| !axes1.contains(a)).collect();
        let free2: Vec<usize> = (0..t2.order()).filter(|a| !axes2.contains(a)).collect();
        let result_order = free1.len() + free2.len();

        log::debug!(
            "{}: contracting {} axis pair(s), orders {} x {} -> {}, size {}",
            OP,
            k,
            t1.order(),
            t2.order(),
            result_order,
            size
        );

        let mut coords1: MultiIndex = MultiIndex::from_elem(0, t1.order());
        let mut coords2: MultiIndex = MultiIndex::from_elem(0, t2.order());
        let mut components = Vec::with_capacity(component_count(result_order, size)?);
        let mut free_indices = IndexIterator::new(result_order, size);
        let mut bound_indices = IndexIterator::new(k, size);

        while let Some(free) = free_indices.advance() {
            let (digits1, digits2) = free.split_at(free1.len());
            for (&axis, &digit) in free1.iter().zip(digits1) {
                coords1[axis] = digit;
            }
            for (&axis, &digit) in free2.iter().zip(digits2) {
                coords2[axis] = digit;
            }

            let mut acc = self.elements().zero();
            bound_indices.reset();
            while let Some(bound) = bound_indices.advance() {
                for ((&a1, &a2), &digit) in axes1.iter().zip(axes2).zip(bound) {
                    coords1[a1] = digit;
                    coords2[a2] = digit;
                }
                let lhs = &t1.components()[flat_offset(&coords1, t1.size())];
                let rhs = &t2.components()[flat_offset(&coords2, t2.size())];
                let product = self.elements().mul(lhs, rhs);
                self.elements().add_assign(&mut acc, &product);
            }
            components.push(acc);
        }

        T::from_components(result_order, size, components)
    }

    /// Contract `t` with itself over `axes`, pairing each axis with itself.
    ///
    /// With every axis listed this is the sum of squared components.
    pub fn self_sym_fold(&self, t: &T, axes: &[usize]) -> TensorResult<T> {
        let pairs: Vec<usize> = axes.iter().chain(axes).copied().collect();
        self.fold(t, t, &pairs)
    }

    /// Sum of squared components, as an element
    pub fn norm_sqr(&self, t: &T) -> TensorResult<E> {
        let axes: Vec<usize> = (0..t.order()).collect();
        let folded = self.self_sym_fold(t, &axes)?;
        scalar_value("norm_sqr", &folded)
    }

    /// Inner product of two order-1 tensors
    pub fn dot(&self, t1: &T, t2: &T) -> TensorResult<E> {
        require_order("dot", t1, 1)?;
        require_order("dot", t2, 1)?;
        let folded = self.fold(t1, t2, &[0, 0])?;
        scalar_value("dot", &folded)
    }

    /// Product of two order-2 tensors read as row-major matrices
    pub fn matmul(&self, t1: &T, t2: &T) -> TensorResult<T> {
        require_order("matmul", t1, 2)?;
        require_order("matmul", t2, 2)?;
        self.fold(t1, t2, &[1, 0])
    }

    /// Order-2 Kronecker delta: the ring's one on the diagonal, zero elsewhere
    pub fn identity(&self, size: usize) -> TensorResult<T> {
        let count = component_count(2, size)?;
        let components = (0..count)
            .map(|offset| {
                if offset % (size + 1) == 0 {
                    self.elements().one()
                } else {
                    self.elements().zero()
                }
            })
            .collect();
        T::from_components(2, size, components)
    }

    /// Sum of the diagonal of an order-2 tensor
    pub fn trace(&self, t: &T) -> TensorResult<E> {
        require_order("trace", t, 2)?;
        let identity = self.identity(t.size())?;
        let folded = self.fold(t, &identity, &[0, 1, 0, 1])?;
        scalar_value("trace", &folded)
    }
}
