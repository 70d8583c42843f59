//! Fixed-shape tensors stored as flat component buffers
//!
//! A [`Tensor`] has an `order` (number of axes) and a `size` (the common length
//! of every axis), and owns exactly `size^order` components laid out with the
//! last axis varying fastest. It carries no algebra of its own: arithmetic is
//! supplied by a structure from [`crate::algebra`] through the tensor field in
//! `tensode-kernels`.
//!
//! Types that want to flow through the tensor field and the solver in place of
//! [`Tensor`] implement [`TensorStorage`].
//!
//! # Examples
//!
//! ```
//! use tensode_core::Tensor;
//!
//! let t = Tensor::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert_eq!(t.get(&[1, 0]).unwrap(), &3.0);
//!
//! // Three components cannot fill a 2x2 tensor
//! assert!(Tensor::new(2, 2, vec![1.0, 2.0, 3.0]).is_err());
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use scirs2_core::ndarray_ext::{ArrayD, IxDyn};

use crate::error::{component_count, TensorError, TensorResult};
use crate::index::{flat_offset, IndexIterator};

/// Storage contract for anything the tensor field can operate on.
///
/// `from_components` plays the role of a factory: operations that produce a new
/// tensor build it through this method, so a wrapper type comes back out as
/// itself.
pub trait TensorStorage<E>: Sized {
    /// Number of axes
    fn order(&self) -> usize;

    /// Length of every axis
    fn size(&self) -> usize;

    /// Flat components in mixed-radix order
    fn components(&self) -> &[E];

    /// Mutable flat components. Implementors must not let callers change the length.
    fn components_mut(&mut self) -> &mut [E];

    /// Build a tensor of the given shape from its flat components.
    fn from_components(order: usize, size: usize, components: Vec<E>) -> TensorResult<Self>;

    /// `(order, size)`
    fn shape(&self) -> (usize, usize) {
        (self.order(), self.size())
    }
}

/// Dense tensor with uniform axis length
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<E> {
    order: usize,
    size: usize,
    components: Vec<E>,
}

impl<E> Tensor<E> {
    /// Create a tensor taking ownership of `components`.
    ///
    /// An order-0 tensor is a scalar whatever `size` it is given; its size is
    /// stored as 1 so that every scalar has the same shape.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidShape`] unless `components.len() == size^order`.
    pub fn new(order: usize, size: usize, components: Vec<E>) -> TensorResult<Self> {
        let expected = component_count(order, size)?;
        if components.len() != expected {
            return Err(TensorError::invalid_shape(
                order,
                size,
                expected,
                components.len(),
            ));
        }
        Ok(Self {
            order,
            size: if order == 0 { 1 } else { size },
            components,
        })
    }

    /// Create a tensor from a deep copy of `components`.
    pub fn from_slice(order: usize, size: usize, components: &[E]) -> TensorResult<Self>
    where
        E: Clone,
    {
        Self::new(order, size, components.to_vec())
    }

    /// Create a tensor by calling `generator` once per multi-index, in enumeration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tensode_core::Tensor;
    ///
    /// let identity = Tensor::from_fn(2, 3, |i| if i[0] == i[1] { 1.0 } else { 0.0 }).unwrap();
    /// assert_eq!(identity[&[1, 1]], 1.0);
    /// assert_eq!(identity[&[0, 2]], 0.0);
    /// ```
    pub fn from_fn<F>(order: usize, size: usize, mut generator: F) -> TensorResult<Self>
    where
        F: FnMut(&[usize]) -> E,
    {
        let mut components = Vec::with_capacity(component_count(order, size)?);
        let mut iter = IndexIterator::new(order, size);
        while let Some(index) = iter.advance() {
            components.push(generator(index));
        }
        Self::new(order, size, components)
    }

    /// Order-0 tensor holding a single value
    pub fn scalar(value: E) -> Self {
        Self {
            order: 0,
            size: 1,
            components: vec![value],
        }
    }

    /// Number of axes
    pub fn order(&self) -> usize {
        self.order
    }

    /// Length of every axis
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of components, `size^order`
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the tensor has no components (size 0, positive order)
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Flat components in mixed-radix order
    pub fn components(&self) -> &[E] {
        &self.components
    }

    /// Mutable flat components
    pub fn components_mut(&mut self) -> &mut [E] {
        &mut self.components
    }

    /// Consume the tensor and return its flat components
    pub fn into_components(self) -> Vec<E> {
        self.components
    }

    /// The component at flat offset 0; the value of an order-0 tensor.
    ///
    /// # Panics
    ///
    /// Panics on an empty tensor.
    pub fn first_component(&self) -> &E {
        &self.components[0]
    }

    fn offset_of(&self, index: &[usize]) -> TensorResult<usize> {
        if index.len() != self.order {
            return Err(TensorError::IndexArity {
                order: self.order,
                arity: index.len(),
            });
        }
        if let Some((axis, &digit)) = index.iter().enumerate().find(|(_, &d)| d >= self.size) {
            return Err(TensorError::IndexOutOfRange {
                axis,
                index: digit,
                size: self.size,
            });
        }
        Ok(flat_offset(index, self.size))
    }

    /// Component at `index`
    ///
    /// # Errors
    ///
    /// [`TensorError::IndexArity`] if `index.len() != order`,
    /// [`TensorError::IndexOutOfRange`] if a digit is not below `size`.
    pub fn get(&self, index: &[usize]) -> TensorResult<&E> {
        let offset = self.offset_of(index)?;
        Ok(&self.components[offset])
    }

    /// Mutable component at `index`
    pub fn get_mut(&mut self, index: &[usize]) -> TensorResult<&mut E> {
        let offset = self.offset_of(index)?;
        Ok(&mut self.components[offset])
    }

    /// Replace the component at `index` with `value`
    pub fn set(&mut self, value: E, index: &[usize]) -> TensorResult<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Iterate over `(multi-index, component)` pairs in enumeration order
    pub fn indexed_iter(&self) -> impl Iterator<Item = (crate::MultiIndex, &E)> + '_ {
        IndexIterator::new(self.order, self.size).zip(self.components.iter())
    }

    /// Convert into an ndarray with `order` axes of length `size`
    pub fn into_array(self) -> TensorResult<ArrayD<E>> {
        let Self {
            order,
            size,
            components,
        } = self;
        let count = components.len();
        ArrayD::from_shape_vec(IxDyn(&vec![size; order]), components)
            .map_err(|_| TensorError::invalid_shape(order, size, count, count))
    }

    /// Build a tensor from an ndarray whose axes all have the same length.
    ///
    /// The array is read in logical (row-major) order regardless of its memory layout.
    pub fn from_array(array: ArrayD<E>) -> TensorResult<Self>
    where
        E: Clone,
    {
        let order = array.ndim();
        let size = array.shape().first().copied().unwrap_or(1);
        if array.shape().iter().any(|&len| len != size) {
            return Err(TensorError::invalid_contraction(
                "from_array",
                format!("axes must share one length, got shape {:?}", array.shape()),
            ));
        }
        Self::new(order, size, array.iter().cloned().collect())
    }
}

impl<E> TensorStorage<E> for Tensor<E> {
    fn order(&self) -> usize {
        self.order
    }

    fn size(&self) -> usize {
        self.size
    }

    fn components(&self) -> &[E] {
        &self.components
    }

    fn components_mut(&mut self) -> &mut [E] {
        &mut self.components
    }

    fn from_components(order: usize, size: usize, components: Vec<E>) -> TensorResult<Self> {
        Tensor::new(order, size, components)
    }
}

impl<E> Index<&[usize]> for Tensor<E> {
    type Output = E;

    fn index(&self, index: &[usize]) -> &E {
        match self.get(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<E> IndexMut<&[usize]> for Tensor<E> {
    fn index_mut(&mut self, index: &[usize]) -> &mut E {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<E, const N: usize> Index<&[usize; N]> for Tensor<E> {
    type Output = E;

    fn index(&self, index: &[usize; N]) -> &E {
        &self[&index[..]]
    }
}

impl<E, const N: usize> IndexMut<&[usize; N]> for Tensor<E> {
    fn index_mut(&mut self, index: &[usize; N]) -> &mut E {
        &mut self[&index[..]]
    }
}

impl<E: fmt::Display> fmt::Display for Tensor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", component)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(Tensor::new(2, 2, vec![0.0; 4]).is_ok());
        let err = Tensor::new(2, 2, vec![0.0; 3]).unwrap_err();
        assert_eq!(err, TensorError::invalid_shape(2, 2, 4, 3));
    }

    #[test]
    fn test_scalar() {
        let t = Tensor::scalar(5.0);
        assert_eq!(t.order(), 0);
        assert_eq!(t.len(), 1);
        assert_eq!(*t.first_component(), 5.0);
        assert_eq!(t.get(&[]).unwrap(), &5.0);
    }

    #[test]
    fn test_order_zero_from_new() {
        let t = Tensor::new(0, 9, vec![1]).unwrap();
        assert_eq!(t.components(), &[1]);
        assert_eq!(t.size(), 1);
        assert_eq!(t, Tensor::scalar(1));
    }

    #[test]
    fn test_last_axis_fastest() {
        let t = Tensor::new(2, 3, (0..9).collect()).unwrap();
        assert_eq!(t[&[0, 2]], 2);
        assert_eq!(t[&[2, 0]], 6);
        assert_eq!(t[&[1, 1]], 4);
    }

    #[test]
    fn test_from_fn_visits_in_enumeration_order() {
        let mut calls = Vec::new();
        let t = Tensor::from_fn(2, 2, |i| {
            calls.push(i.to_vec());
            i[0] * 10 + i[1]
        })
        .unwrap();
        assert_eq!(calls, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
        assert_eq!(t.components(), &[0, 1, 10, 11]);
    }

    #[test]
    fn test_get_rejects_bad_arity() {
        let t = Tensor::new(2, 2, vec![0; 4]).unwrap();
        assert_eq!(
            t.get(&[0]).unwrap_err(),
            TensorError::IndexArity { order: 2, arity: 1 }
        );
        assert_eq!(
            t.get(&[0, 0, 0]).unwrap_err(),
            TensorError::IndexArity { order: 2, arity: 3 }
        );
    }

    #[test]
    fn test_get_rejects_out_of_range_digit() {
        let t = Tensor::new(2, 2, vec![0; 4]).unwrap();
        assert_eq!(
            t.get(&[0, 2]).unwrap_err(),
            TensorError::IndexOutOfRange {
                axis: 1,
                index: 2,
                size: 2
            }
        );
    }

    #[test]
    fn test_set_and_get_mut() {
        let mut t = Tensor::new(1, 3, vec![0; 3]).unwrap();
        t.set(7, &[2]).unwrap();
        *t.get_mut(&[0]).unwrap() += 1;
        t[&[1]] = 4;
        assert_eq!(t.components(), &[1, 4, 7]);
        assert!(t.set(1, &[3]).is_err());
    }

    #[test]
    #[should_panic(expected = "index arity mismatch")]
    fn test_index_operator_panics_on_bad_arity() {
        let t = Tensor::new(1, 2, vec![0; 2]).unwrap();
        let _value = t[&[0, 0]];
    }

    #[test]
    fn test_from_slice_copies() {
        let source = vec![String::from("a"), String::from("b")];
        let mut t = Tensor::from_slice(1, 2, &source).unwrap();
        t[&[0]].push('!');
        assert_eq!(source[0], "a");
        assert_eq!(t[&[0]], "a!");
    }

    #[test]
    fn test_display() {
        let t = Tensor::new(1, 3, vec![1, 2, 3]).unwrap();
        assert_eq!(t.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_array_roundtrip() {
        let t = Tensor::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let array = t.clone().into_array().unwrap();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array[[1, 0]], 3.0);
        assert_eq!(Tensor::from_array(array).unwrap(), t);
    }

    #[test]
    fn test_from_array_rejects_ragged_shape() {
        let array = ArrayD::<f64>::zeros(IxDyn(&[2, 3]));
        assert!(Tensor::from_array(array).is_err());
    }

    #[test]
    fn test_indexed_iter() {
        let t = Tensor::new(2, 2, vec!['a', 'b', 'c', 'd']).unwrap();
        let pairs: Vec<(Vec<usize>, char)> =
            t.indexed_iter().map(|(i, &c)| (i.to_vec(), c)).collect();
        assert_eq!(pairs[2], (vec![1, 0], 'c'));
    }
}
