//! Multi-index enumeration and mixed-radix addressing
//!
//! A tensor of order `o` and size `s` has `s^o` components, each addressed by a
//! multi-index of `o` digits in `[0, s)`. Components are stored flat with the
//! last axis varying fastest, so the flat offset of a multi-index is its value
//! read as a base-`s` number with the last digit least significant.
//!
//! [`IndexIterator`] enumerates multi-indices in exactly that order (an
//! odometer turning its last wheel first), which is what lets generators,
//! traversals and contractions walk components without recomputing offsets.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::error::{component_count, TensorResult};

/// Digit vector addressing one tensor component.
///
/// Inline for up to six axes, which covers every tensor this stack is meant for.
pub type MultiIndex = SmallVec<[usize; 6]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Before the first index
    Fresh,
    /// `current` holds the last yielded index
    Active,
    /// Every index has been yielded
    Exhausted,
}

/// Odometer-order enumeration of all multi-indices of a given order and size.
///
/// The iterator is reusable: [`reset`](IndexIterator::reset) puts it back in
/// front of the first index. Order 0 yields the single empty index; size 0
/// with a positive order yields nothing.
///
/// Once exhausted, further calls return `None` instead of stepping past the
/// last index.
///
/// # Examples
///
/// ```
/// use tensode_core::IndexIterator;
///
/// let all: Vec<Vec<usize>> = IndexIterator::new(2, 2).map(|i| i.to_vec()).collect();
/// assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct IndexIterator {
    order: usize,
    size: usize,
    current: MultiIndex,
    cursor: Cursor,
}

impl IndexIterator {
    /// Create an iterator positioned before the first multi-index
    pub fn new(order: usize, size: usize) -> Self {
        Self {
            order,
            size,
            current: SmallVec::from_elem(0, order),
            cursor: Cursor::Fresh,
        }
    }

    /// Number of digits per multi-index
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of values each digit may take
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of multi-indices, `size^order`
    pub fn total(&self) -> TensorResult<usize> {
        component_count(self.order, self.size)
    }

    fn is_empty_shape(&self) -> bool {
        self.size == 0 && self.order > 0
    }

    /// Whether another multi-index remains.
    ///
    /// After the first index this is false exactly when every digit equals
    /// `size - 1`.
    pub fn has_next(&self) -> bool {
        match self.cursor {
            Cursor::Fresh => !self.is_empty_shape(),
            Cursor::Active => self.current.iter().any(|&d| d + 1 != self.size),
            Cursor::Exhausted => false,
        }
    }

    /// The most recently yielded multi-index, if any
    pub fn current(&self) -> Option<&[usize]> {
        match self.cursor {
            Cursor::Active => Some(&self.current),
            _ => None,
        }
    }

    /// Step to the next multi-index and borrow it, without allocating.
    pub fn advance(&mut self) -> Option<&[usize]> {
        match self.cursor {
            Cursor::Fresh => {
                if self.is_empty_shape() {
                    self.cursor = Cursor::Exhausted;
                    return None;
                }
                self.cursor = Cursor::Active;
            }
            Cursor::Active => {
                if !self.has_next() {
                    self.cursor = Cursor::Exhausted;
                    return None;
                }
                for digit in self.current.iter_mut().rev() {
                    *digit += 1;
                    if *digit < self.size {
                        break;
                    }
                    *digit = 0;
                }
            }
            Cursor::Exhausted => return None,
        }
        Some(&self.current)
    }

    /// Return to the position before the first multi-index.
    pub fn reset(&mut self) {
        self.current.iter_mut().for_each(|d| *d = 0);
        self.cursor = Cursor::Fresh;
    }
}

impl Iterator for IndexIterator {
    type Item = MultiIndex;

    fn next(&mut self) -> Option<MultiIndex> {
        self.advance().map(MultiIndex::from_slice)
    }
}

impl FusedIterator for IndexIterator {}

/// Flat offset of `index` in a tensor of the given size (last digit least significant).
///
/// The caller guarantees every digit is below `size`.
pub fn flat_offset(index: &[usize], size: usize) -> usize {
    index.iter().fold(0, |acc, &digit| acc * size + digit)
}

/// Inverse of [`flat_offset`]: the multi-index of `offset` for the given shape.
pub fn unflatten(mut offset: usize, order: usize, size: usize) -> MultiIndex {
    let mut index: MultiIndex = SmallVec::from_elem(0, order);
    if size == 0 {
        return index;
    }
    for digit in index.iter_mut().rev() {
        *digit = offset % size;
        offset /= size;
    }
    index
}
