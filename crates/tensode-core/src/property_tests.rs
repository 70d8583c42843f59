//! Property-based tests for tensors and multi-index enumeration
//!
//! Uses proptest to check addressing and enumeration laws over randomly
//! generated shapes.

#[cfg(test)]
mod tests {
    use crate::algebra::{LinearField, RealField};
    use crate::index::{flat_offset, unflatten};
    use crate::{IndexIterator, Tensor};
    use proptest::prelude::*;

    // Shapes small enough to enumerate exhaustively
    fn shape_strategy() -> impl Strategy<Value = (usize, usize)> {
        (0usize..=4, 1usize..=4)
    }

    #[test]
    fn test_proptest_smoke() {
        let t = Tensor::new(1, 2, vec![0.0, 1.0]).unwrap();
        assert_eq!(t.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_enumeration_count((order, size) in shape_strategy()) {
            let it = IndexIterator::new(order, size);
            let expected = it.total().unwrap();
            prop_assert_eq!(it.count(), expected);
        }

        #[test]
        fn prop_enumeration_is_strictly_increasing((order, size) in shape_strategy()) {
            let offsets: Vec<usize> = IndexIterator::new(order, size)
                .map(|i| flat_offset(&i, size))
                .collect();
            for (expected, offset) in offsets.iter().enumerate() {
                prop_assert_eq!(*offset, expected);
            }
        }

        #[test]
        fn prop_unflatten_inverts_flat_offset(
            (order, size) in shape_strategy(),
            seed in any::<usize>(),
        ) {
            let total = IndexIterator::new(order, size).total().unwrap();
            let offset = seed % total;
            prop_assert_eq!(flat_offset(&unflatten(offset, order, size), size), offset);
        }

        #[test]
        fn prop_from_fn_agrees_with_get((order, size) in shape_strategy()) {
            let t = Tensor::from_fn(order, size, |i| flat_offset(i, size)).unwrap();
            for index in IndexIterator::new(order, size) {
                prop_assert_eq!(*t.get(&index).unwrap(), flat_offset(&index, size));
            }
        }

        #[test]
        fn prop_wrong_length_rejected((order, size) in shape_strategy(), extra in 1usize..4) {
            let total = IndexIterator::new(order, size).total().unwrap();
            prop_assert!(Tensor::new(order, size, vec![0u8; total + extra]).is_err());
        }

        #[test]
        fn prop_real_sub_is_add_neg(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let f = RealField;
            let via_neg = f.add(&a, &f.neg(&b));
            prop_assert!((f.sub(&a, &b) - via_neg).abs() <= 1e-9 * (1.0 + a.abs() + b.abs()));
        }
    }
}
