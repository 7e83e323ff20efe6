use std::{cmp::Ordering, ops::AddAssign};

use num::{Float, Num};

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// ドット積を計算するメソッド
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// # Arguments
    /// * `other` - 他のベクトル
    ///
    /// # Returns
    /// * `R` - ドット積の結果
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let self_inds = self.indices();
        let self_vals = self.values();
        let other_inds = other.indices();
        let other_vals = other.values();

        let mut i = 0;
        let mut j = 0;
        while i < self_inds.len() && j < other_inds.len() {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    result += self_vals[i].into() * other_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// ||a||^2
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for val in self.values() {
            let val: R = (*val).into();
            result += val * val;
        }
        result
    }

    /// Indices that are non-zero in both vectors, ascending.
    #[inline]
    pub fn support_intersection(&self, other: &Self) -> Vec<usize> {
        let self_inds = self.indices();
        let other_inds = other.indices();
        let mut shared = Vec::with_capacity(self_inds.len().min(other_inds.len()));

        let mut i = 0;
        let mut j = 0;
        while i < self_inds.len() && j < other_inds.len() {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    shared.push(self_inds[i]);
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        shared
    }
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// Scale the vector to unit L2 length.
    /// A vector without support is returned unchanged.
    pub fn l2_normalized(mut self) -> Self {
        let norm = self
            .values()
            .iter()
            .fold(N::zero(), |acc, &v| acc + v * v)
            .sqrt();
        if norm > N::zero() {
            for val in self.vals.iter_mut() {
                *val = *val / norm;
            }
        }
        self
    }

    /// コサイン類似度
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// returns 0 when either vector has no support
    pub fn cosine_similarity(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        let dot: f64 = self.dot(other);
        let norm_a: f64 = self.norm_sq::<f64>().sqrt();
        let norm_b: f64 = other.norm_sq::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot / (norm_a * norm_b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn dot_only_multiplies_shared_indices() {
        let a = SparseVec::from(vec![1.0, 0.0, 2.0, 3.0]);
        let b = SparseVec::from(vec![4.0, 5.0, 0.0, 1.0]);
        let dot: f64 = a.dot(&b);
        assert!(approx_eq(dot, 7.0));
    }

    #[test]
    fn support_intersection_keeps_indices_non_zero_in_both() {
        let a = SparseVec::from(vec![1.0, 0.0, 2.0, 3.0, 0.0]);
        let b = SparseVec::from(vec![0.0, 5.0, 2.0, 1.0, 9.0]);
        assert_eq!(a.support_intersection(&b), vec![2, 3]);
        assert_eq!(b.support_intersection(&a), vec![2, 3]);
    }

    #[test]
    fn l2_normalized_has_unit_length() {
        let v = SparseVec::from(vec![3.0f64, 0.0, 4.0]).l2_normalized();
        assert!(approx_eq(v.norm_sq::<f64>(), 1.0));
        assert!(approx_eq(v.get(0), 0.6));
        assert!(approx_eq(v.get(2), 0.8));
    }

    #[test]
    fn cosine_similarity_of_disjoint_vectors_is_zero() {
        let a = SparseVec::from(vec![1.0f64, 0.0]);
        let b = SparseVec::from(vec![0.0f64, 1.0]);
        assert_eq!(a.cosine_similarity(&b), 0.0);

        let empty = SparseVec::from(vec![0.0f64, 0.0]);
        assert_eq!(a.cosine_similarity(&empty), 0.0);
    }
}
