//! Algebraic structures over opaque element types
//!
//! A structure is an operation table, not a number type: the same element type
//! can be driven by different structures, and a structure value is passed by
//! reference into every tensor operation that needs it. This is what lets the
//! tensor and solver layers stay generic over reals, complex numbers and
//! square matrices alike.
//!
//! # Hierarchy
//!
//! - [`LinearField`] - zero, addition, negation, real scaling (a vector space)
//! - [`Ring`] - adds one and multiplication
//! - [`Field`] - adds multiplicative inverse and division
//!
//! # Operation families
//!
//! Every operation comes in two flavours:
//!
//! - a pure form (`add`, `neg`, ...) that borrows its operands and returns a
//!   fresh element;
//! - an in-place form (`add_assign`, `neg_assign`, ...) that overwrites exactly
//!   one operand through `&mut` and allocates nothing.
//!
//! Implementors only have to provide the in-place forms plus the identities;
//! the pure forms default to "clone, then assign".
//!
//! # Examples
//!
//! ```
//! use tensode_core::algebra::{Field, LinearField, RealField, Ring};
//!
//! let reals = RealField;
//! assert_eq!(reals.add(&5.0_f64, &3.0), 8.0);
//! assert_eq!(reals.sub(&5.0_f64, &3.0), 2.0);
//! assert_eq!(reals.div(&1.0_f64, &4.0), 0.25);
//!
//! let mut x = 2.0_f64;
//! reals.mul_assign(&mut x, &reals.one());
//! assert_eq!(x, 2.0);
//! ```

use scirs2_core::ndarray_ext::Array2;
use scirs2_core::num_complex::Complex;
use scirs2_core::numeric::{Float, NumCast};

/// Zero, addition, negation and real scaling over `T`.
pub trait LinearField<T: Clone> {
    /// Additive identity: `add(zero, a) == add(a, zero) == a`.
    fn zero(&self) -> T;

    /// `a <- a + b`
    fn add_assign(&self, a: &mut T, b: &T);

    /// `a <- -a`
    fn neg_assign(&self, a: &mut T);

    /// `a <- scalar * a`
    fn scale_assign(&self, a: &mut T, scalar: f64);

    /// `a <- a - b`. Defaults to adding the negation of `b`.
    fn sub_assign(&self, a: &mut T, b: &T) {
        let negated = self.neg(b);
        self.add_assign(a, &negated);
    }

    /// `a + b`
    fn add(&self, a: &T, b: &T) -> T {
        let mut res = a.clone();
        self.add_assign(&mut res, b);
        res
    }

    /// `-a`
    fn neg(&self, a: &T) -> T {
        let mut res = a.clone();
        self.neg_assign(&mut res);
        res
    }

    /// `scalar * a`
    fn scale(&self, a: &T, scalar: f64) -> T {
        let mut res = a.clone();
        self.scale_assign(&mut res, scalar);
        res
    }

    /// `a - b`
    fn sub(&self, a: &T, b: &T) -> T {
        let mut res = a.clone();
        self.sub_assign(&mut res, b);
        res
    }
}

/// A [`LinearField`] with a multiplicative identity and multiplication.
pub trait Ring<T: Clone>: LinearField<T> {
    /// Multiplicative identity: `mul(one, a) == mul(a, one) == a`.
    fn one(&self) -> T;

    /// `a <- a * b`. Operand order matters for non-commutative rings.
    fn mul_assign(&self, a: &mut T, b: &T);

    /// `a * b`
    fn mul(&self, a: &T, b: &T) -> T {
        let mut res = a.clone();
        self.mul_assign(&mut res, b);
        res
    }
}

/// A [`Ring`] in which every non-zero element has an inverse.
pub trait Field<T: Clone>: Ring<T> {
    /// `a <- 1 / a`
    fn inv_assign(&self, a: &mut T);

    /// `1 / a`
    fn inv(&self, a: &T) -> T {
        let mut res = a.clone();
        self.inv_assign(&mut res);
        res
    }

    /// `a <- a / b`. Defaults to multiplying by the inverse of `b`.
    fn div_assign(&self, a: &mut T, b: &T) {
        let inverted = self.inv(b);
        self.mul_assign(a, &inverted);
    }

    /// `a / b`
    fn div(&self, a: &T, b: &T) -> T {
        let mut res = a.clone();
        self.div_assign(&mut res, b);
        res
    }
}

/// Sum of `items` under `field`, starting from `field.zero()`.
pub fn sum<'a, T, F>(field: &F, items: impl IntoIterator<Item = &'a T>) -> T
where
    T: Clone + 'a,
    F: LinearField<T> + ?Sized,
{
    let mut acc = field.zero();
    for item in items {
        field.add_assign(&mut acc, item);
    }
    acc
}

/// Left-to-right product of `items` under `field`, starting from `field.one()`.
pub fn product<'a, T, F>(field: &F, items: impl IntoIterator<Item = &'a T>) -> T
where
    T: Clone + 'a,
    F: Ring<T> + ?Sized,
{
    let mut acc = field.one();
    for item in items {
        field.mul_assign(&mut acc, item);
    }
    acc
}

fn cast_scalar<T: Float>(scalar: f64) -> T {
    <T as NumCast>::from(scalar).unwrap_or_else(T::nan)
}

/// The field of real numbers, for every [`Float`] type (`f32`, `f64`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealField;

impl<T: Float> LinearField<T> for RealField {
    fn zero(&self) -> T {
        T::zero()
    }

    fn add_assign(&self, a: &mut T, b: &T) {
        *a = *a + *b;
    }

    fn neg_assign(&self, a: &mut T) {
        *a = -*a;
    }

    fn scale_assign(&self, a: &mut T, scalar: f64) {
        *a = *a * cast_scalar::<T>(scalar);
    }

    fn sub_assign(&self, a: &mut T, b: &T) {
        *a = *a - *b;
    }
}

impl<T: Float> Ring<T> for RealField {
    fn one(&self) -> T {
        T::one()
    }

    fn mul_assign(&self, a: &mut T, b: &T) {
        *a = *a * *b;
    }
}

impl<T: Float> Field<T> for RealField {
    fn inv_assign(&self, a: &mut T) {
        *a = a.recip();
    }

    fn div_assign(&self, a: &mut T, b: &T) {
        *a = *a / *b;
    }
}

/// The field of complex numbers over a [`Float`] component type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplexField;

impl<T: Float> LinearField<Complex<T>> for ComplexField {
    fn zero(&self) -> Complex<T> {
        Complex::new(T::zero(), T::zero())
    }

    fn add_assign(&self, a: &mut Complex<T>, b: &Complex<T>) {
        *a = *a + *b;
    }

    fn neg_assign(&self, a: &mut Complex<T>) {
        *a = -*a;
    }

    fn scale_assign(&self, a: &mut Complex<T>, scalar: f64) {
        *a = *a * cast_scalar::<T>(scalar);
    }

    fn sub_assign(&self, a: &mut Complex<T>, b: &Complex<T>) {
        *a = *a - *b;
    }
}

impl<T: Float> Ring<Complex<T>> for ComplexField {
    fn one(&self) -> Complex<T> {
        Complex::new(T::one(), T::zero())
    }

    fn mul_assign(&self, a: &mut Complex<T>, b: &Complex<T>) {
        *a = *a * *b;
    }
}

impl<T: Float> Field<Complex<T>> for ComplexField {
    fn inv_assign(&self, a: &mut Complex<T>) {
        *a = a.inv();
    }

    fn div_assign(&self, a: &mut Complex<T>, b: &Complex<T>) {
        *a = *a / *b;
    }
}

/// The ring of `dim x dim` real matrices.
///
/// Unlike [`RealField`] this structure carries state: the matrix dimension is
/// needed to build the identities. Operands of other shapes are a caller error
/// and make the underlying ndarray operations panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixRing {
    /// Matrix dimension
    pub dim: usize,
}

impl MatrixRing {
    /// Ring of `dim x dim` matrices
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl LinearField<Array2<f64>> for MatrixRing {
    fn zero(&self) -> Array2<f64> {
        Array2::zeros((self.dim, self.dim))
    }

    fn add_assign(&self, a: &mut Array2<f64>, b: &Array2<f64>) {
        a.zip_mut_with(b, |x, &y| *x += y);
    }

    fn neg_assign(&self, a: &mut Array2<f64>) {
        a.mapv_inplace(|x| -x);
    }

    fn scale_assign(&self, a: &mut Array2<f64>, scalar: f64) {
        a.mapv_inplace(|x| x * scalar);
    }

    fn sub_assign(&self, a: &mut Array2<f64>, b: &Array2<f64>) {
        a.zip_mut_with(b, |x, &y| *x -= y);
    }
}

impl Ring<Array2<f64>> for MatrixRing {
    fn one(&self) -> Array2<f64> {
        Array2::eye(self.dim)
    }

    fn mul_assign(&self, a: &mut Array2<f64>, b: &Array2<f64>) {
        *a = a.dot(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_real_field_basic_ops() {
        let f = RealField;
        assert_eq!(f.add(&5.0_f64, &3.0), 8.0);
        assert_eq!(f.sub(&5.0_f64, &3.0), 2.0);
        assert_eq!(f.neg(&5.0_f64), -5.0);
        assert_eq!(f.scale(&5.0_f64, 0.5), 2.5);
        assert_eq!(f.mul(&5.0_f64, &3.0), 15.0);
        assert_eq!(f.inv(&4.0_f64), 0.25);
        assert_eq!(f.div(&3.0_f64, &4.0), 0.75);
    }

    #[test]
    fn test_real_field_f32() {
        let f = RealField;
        let mut x = 3.0_f32;
        f.scale_assign(&mut x, 2.0);
        assert_eq!(x, 6.0_f32);
        assert_eq!(<RealField as LinearField<f32>>::zero(&f), 0.0_f32);
    }

    #[test]
    fn test_assign_leaves_other_operand_alone() {
        let f = RealField;
        let mut a = 1.0_f64;
        let b = 2.0_f64;
        f.add_assign(&mut a, &b);
        assert_eq!(a, 3.0);
        assert_eq!(b, 2.0);
    }

    /// A structure that only implements the required operations, to exercise the defaults.
    struct Minimal;

    impl LinearField<f64> for Minimal {
        fn zero(&self) -> f64 {
            0.0
        }
        fn add_assign(&self, a: &mut f64, b: &f64) {
            *a += *b;
        }
        fn neg_assign(&self, a: &mut f64) {
            *a = -*a;
        }
        fn scale_assign(&self, a: &mut f64, scalar: f64) {
            *a *= scalar;
        }
    }

    impl Ring<f64> for Minimal {
        fn one(&self) -> f64 {
            1.0
        }
        fn mul_assign(&self, a: &mut f64, b: &f64) {
            *a *= *b;
        }
    }

    impl Field<f64> for Minimal {
        fn inv_assign(&self, a: &mut f64) {
            *a = 1.0 / *a;
        }
    }

    #[test]
    fn test_default_sub_and_div() {
        let f = Minimal;
        assert_eq!(f.sub(&7.0, &2.0), 5.0);
        assert_eq!(f.div(&1.0, &8.0), 0.125);

        let mut x = 10.0;
        f.sub_assign(&mut x, &4.0);
        assert_eq!(x, 6.0);
        f.div_assign(&mut x, &3.0);
        assert_eq!(x, 2.0);
    }

    #[test]
    fn test_complex_field() {
        let f = ComplexField;
        let i = Complex::new(0.0_f64, 1.0);
        assert_eq!(f.mul(&i, &i), Complex::new(-1.0, 0.0));
        assert_eq!(f.inv(&i), Complex::new(0.0, -1.0));
        assert_eq!(f.scale(&i, 2.0), Complex::new(0.0, 2.0));
        let one: Complex<f64> = f.one();
        let zero: Complex<f64> = f.zero();
        assert_eq!(f.add(&one, &zero), Complex::new(1.0, 0.0));
    }

    #[test]
    fn test_matrix_ring_is_not_commutative() {
        let ring = MatrixRing::new(2);
        let a = array![[1.0, 1.0], [0.0, 1.0]];
        let b = array![[1.0, 0.0], [1.0, 1.0]];

        assert_eq!(ring.mul(&a, &b), array![[2.0, 1.0], [1.0, 1.0]]);
        assert_eq!(ring.mul(&b, &a), array![[1.0, 1.0], [1.0, 2.0]]);
        assert_eq!(ring.mul(&a, &ring.one()), a);
        assert_eq!(ring.add(&a, &ring.zero()), a);
        assert_eq!(ring.sub(&a, &a), ring.zero());
    }

    #[test]
    fn test_sum_and_product() {
        let f = RealField;
        let xs = [1.0_f64, 2.0, 3.0, 4.0];
        assert_eq!(sum(&f, &xs), 10.0);
        assert_eq!(product(&f, &xs), 24.0);
        assert_eq!(sum::<f64, _>(&f, &[]), 0.0);
    }
}
