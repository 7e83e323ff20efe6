pub mod math;

use num::Num;
use serde::{Deserialize, Serialize};

/// SparseVec is a sparse vector that stores only its non-zero elements.
/// It holds `inds` and `vals`:
/// `inds` keeps the element indices,
/// `vals` keeps the element values.
///
/// Elements are guaranteed to be sorted by ascending `inds`.
/// `len` is the logical (dense) length, e.g. the vocabulary size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N>
where
    N: Num,
{
    inds: Vec<usize>,
    vals: Vec<N>,
    len: usize,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// nnz のみ確保する
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        SparseVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
        }
    }

    /// Append an element at the end of the vector.
    /// Zero values only extend `len`.
    ///
    /// # Arguments
    /// * `value` - value of the element at index `len`
    #[inline]
    pub fn push(&mut self, value: N) {
        if value != N::zero() {
            self.raw_push(self.len, value);
        }
        self.len += 1;
    }

    /// Append a non-zero element without touching `len`.
    /// `index` must be greater than every index already stored.
    #[inline]
    pub(crate) fn raw_push(&mut self, index: usize, value: N) {
        debug_assert!(self.inds.last().map_or(true, |&last| last < index));
        self.inds.push(index);
        self.vals.push(value);
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of non-zero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Get the value at `index`, zero when the element is not stored.
    #[inline]
    pub fn get(&self, index: usize) -> N {
        match self.inds.binary_search(&index) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// Iterate over the stored `(index, value)` pairs in ascending index order.
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter())
    }

    /// Indices of the non-zero elements (the support of the vector).
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    /// Apply `f` to every stored element, keeping `len`.
    /// Results equal to zero are dropped.
    pub fn map_nonzero<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, N) -> N,
    {
        let mut result = SparseVec::with_capacity(self.nnz());
        result.len = self.len;
        for (idx, &val) in self.raw_iter() {
            let value = f(idx, val);
            if value != N::zero() {
                result.raw_push(idx, value);
            }
        }
        result
    }
}

impl<N> From<Vec<N>> for SparseVec<N>
where
    N: Num + Copy,
{
    fn from(dense: Vec<N>) -> Self {
        let mut vec = SparseVec::with_capacity(dense.len());
        for value in dense {
            vec.push(value);
        }
        vec.shrink_to_fit();
        vec
    }
}
