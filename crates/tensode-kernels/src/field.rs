//! Elementwise algebra lifted from elements to whole tensors
//!
//! A [`TensorField`] wraps one algebraic structure over the element type and
//! applies it component by component. It owns no tensor data: every tensor it
//! returns is a fresh value, and the `_assign` forms overwrite only the operand
//! passed as `&mut`.
//!
//! Binary operations require both operands to have the same order and the same
//! size. The check runs before anything is written, so a failed `add_assign`
//! leaves its target untouched.
//!
//! # Examples
//!
//! ```
//! use tensode_core::{RealField, Tensor};
//! use tensode_kernels::TensorField;
//!
//! let field = TensorField::<f64, _>::new(RealField);
//! let a = Tensor::new(1, 2, vec![1.0, 2.0]).unwrap();
//! let b = Tensor::new(1, 2, vec![10.0, 20.0]).unwrap();
//!
//! let sum = field.add(&a, &b).unwrap();
//! assert_eq!(sum.components(), &[11.0, 22.0]);
//!
//! let mut c = field.copy(&a).unwrap();
//! field.scale_assign(&mut c, 3.0);
//! assert_eq!(c.components(), &[3.0, 6.0]);
//! assert_eq!(a.components(), &[1.0, 2.0]);
//! ```

use std::fmt;
use std::marker::PhantomData;

use tensode_core::{
    component_count, IndexIterator, LinearField, Tensor, TensorError, TensorResult,
    TensorStorage,
};

/// Algebra over tensors of element type `E`, driven by the element structure `F`.
///
/// `T` is the tensor type produced and consumed; it defaults to [`Tensor`].
pub struct TensorField<E, F, T = Tensor<E>> {
    elements: F,
    _marker: PhantomData<fn() -> (E, T)>,
}

impl<E, F: Clone, T> Clone for TensorField<E, F, T> {
    fn clone(&self) -> Self {
        Self::new(self.elements.clone())
    }
}

impl<E, F: fmt::Debug, T> fmt::Debug for TensorField<E, F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorField")
            .field("elements", &self.elements)
            .finish()
    }
}

impl<E, F, T> TensorField<E, F, T> {
    /// Bind an element structure
    pub fn new(elements: F) -> Self {
        Self {
            elements,
            _marker: PhantomData,
        }
    }

    /// The element structure
    pub fn elements(&self) -> &F {
        &self.elements
    }
}

/// Reject operands whose order or size differ. Any two order-0 tensors match.
pub(crate) fn check_same_shape<E, T: TensorStorage<E>>(
    operation: &'static str,
    lhs: &T,
    rhs: &T,
) -> TensorResult<()> {
    let scalars = lhs.order() == 0 && rhs.order() == 0;
    if !scalars && (lhs.order() != rhs.order() || lhs.size() != rhs.size()) {
        return Err(TensorError::rank_mismatch(
            operation,
            lhs.shape(),
            rhs.shape(),
        ));
    }
    Ok(())
}

impl<E, F, T> TensorField<E, F, T>
where
    E: Clone,
    F: LinearField<E>,
    T: TensorStorage<E>,
{
    /// Tensor of the given shape with every component equal to the element zero
    pub fn zero(&self, order: usize, size: usize) -> TensorResult<T> {
        let count = component_count(order, size)?;
        let components = (0..count).map(|_| self.elements.zero()).collect();
        T::from_components(order, size, components)
    }

    /// Zero tensor with the same shape as `t`
    pub fn zero_like(&self, t: &T) -> TensorResult<T> {
        self.zero(t.order(), t.size())
    }

    /// Independent deep copy of `t`
    pub fn copy(&self, t: &T) -> TensorResult<T> {
        T::from_components(t.order(), t.size(), t.components().to_vec())
    }

    fn zip_with(
        &self,
        operation: &'static str,
        t1: &T,
        t2: &T,
        op: impl Fn(&F, &E, &E) -> E,
    ) -> TensorResult<T> {
        check_same_shape(operation, t1, t2)?;
        let components = t1
            .components()
            .iter()
            .zip(t2.components())
            .map(|(a, b)| op(&self.elements, a, b))
            .collect();
        T::from_components(t1.order(), t1.size(), components)
    }

    /// `t1 + t2`
    pub fn add(&self, t1: &T, t2: &T) -> TensorResult<T> {
        self.zip_with("add", t1, t2, |f, a, b| f.add(a, b))
    }

    /// `t1 - t2`
    pub fn sub(&self, t1: &T, t2: &T) -> TensorResult<T> {
        self.zip_with("sub", t1, t2, |f, a, b| f.sub(a, b))
    }

    /// `t1 += t2`
    pub fn add_assign(&self, t1: &mut T, t2: &T) -> TensorResult<()> {
        check_same_shape("add_assign", t1, t2)?;
        for (a, b) in t1.components_mut().iter_mut().zip(t2.components()) {
            self.elements.add_assign(a, b);
        }
        Ok(())
    }

    /// `t1 -= t2`
    pub fn sub_assign(&self, t1: &mut T, t2: &T) -> TensorResult<()> {
        check_same_shape("sub_assign", t1, t2)?;
        for (a, b) in t1.components_mut().iter_mut().zip(t2.components()) {
            self.elements.sub_assign(a, b);
        }
        Ok(())
    }

    /// `t2 = t1 - t2`, overwriting the right operand.
    pub fn sub_assign_rhs(&self, t1: &T, t2: &mut T) -> TensorResult<()> {
        check_same_shape("sub_assign_rhs", t1, t2)?;
        for (a, b) in t1.components().iter().zip(t2.components_mut().iter_mut()) {
            self.elements.neg_assign(b);
            self.elements.add_assign(b, a);
        }
        Ok(())
    }

    /// `-t`
    pub fn neg(&self, t: &T) -> TensorResult<T> {
        let components = t.components().iter().map(|a| self.elements.neg(a)).collect();
        T::from_components(t.order(), t.size(), components)
    }

    /// Negate every component of `t` in place
    pub fn neg_assign(&self, t: &mut T) {
        for a in t.components_mut() {
            self.elements.neg_assign(a);
        }
    }

    /// `scalar * t`
    pub fn scale(&self, t: &T, scalar: f64) -> TensorResult<T> {
        let components = t
            .components()
            .iter()
            .map(|a| self.elements.scale(a, scalar))
            .collect();
        T::from_components(t.order(), t.size(), components)
    }

    /// Multiply every component of `t` by `scalar` in place
    pub fn scale_assign(&self, t: &mut T, scalar: f64) {
        for a in t.components_mut() {
            self.elements.scale_assign(a, scalar);
        }
    }
}

impl<E, F, T> TensorField<E, F, T>
where
    T: TensorStorage<E>,
{
    /// Visit every component of `t` mutably, with its multi-index, in enumeration order.
    ///
    /// Returns `t` so calls can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensode_core::{RealField, Tensor};
    /// use tensode_kernels::TensorField;
    ///
    /// let field = TensorField::<f64, _>::new(RealField);
    /// let mut t = Tensor::new(2, 2, vec![0.0; 4]).unwrap();
    /// field.component_transform(&mut t, |i, x| {
    ///     if i[0] == i[1] {
    ///         *x = 1.0;
    ///     }
    /// });
    /// assert_eq!(t.components(), &[1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn component_transform<'t, V>(&self, t: &'t mut T, mut visitor: V) -> &'t mut T
    where
        V: FnMut(&[usize], &mut E),
    {
        let mut indices = IndexIterator::new(t.order(), t.size());
        for component in t.components_mut() {
            match indices.advance() {
                Some(index) => visitor(index, component),
                None => break,
            }
        }
        t
    }

    /// Visit every component of `t`, with its multi-index, in enumeration order.
    pub fn for_each_component<V>(&self, t: &T, mut visitor: V)
    where
        V: FnMut(&[usize], &E),
    {
        let mut indices = IndexIterator::new(t.order(), t.size());
        for component in t.components() {
            match indices.advance() {
                Some(index) => visitor(index, component),
                None => break,
            }
        }
    }
}
