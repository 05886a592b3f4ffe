// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Higher scores first, NaN after every number
fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// A key and its score, ordered so that the best ranked compares as the smallest
#[derive(Debug, Clone, Copy)]
pub struct Ranked<K>(pub K, pub f64);

impl<K: Ord> PartialEq for Ranked<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for Ranked<K> {}

impl<K: Ord> PartialOrd for Ranked<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Ranked<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_scores(self.1, other.1).then_with(|| self.0.cmp(&other.0))
    }
}

/// Keeps the `n` best candidates seen so far
pub struct TopN<K> {
    n: usize,
    // the worst kept candidate sits on top
    max_heap: BinaryHeap<Ranked<K>>,
}

impl<K: Ord> TopN<K> {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            max_heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, key: K, score: f64) {
        if self.n == 0 {
            return;
        }

        let candidate = Ranked(key, score);
        if self.max_heap.len() < self.n {
            self.max_heap.push(candidate);
        } else if let Some(worst) = self.max_heap.peek() {
            if candidate < *worst {
                self.max_heap.pop();
                self.max_heap.push(candidate);
            }
        }
    }

    /// Candidates in rank order
    pub fn into_vec(self) -> Vec<Ranked<K>> {
        self.max_heap.into_sorted_vec()
    }
}

impl<K: Ord> Extend<(K, f64)> for TopN<K> {
    fn extend<T: IntoIterator<Item = (K, f64)>>(&mut self, iter: T) {
        for (key, score) in iter {
            self.push(key, score);
        }
    }
}

/// The `n` best `(key, score)` pairs, ties broken by ascending key
pub fn top_n<K, I>(n: usize, candidates: I) -> Vec<Ranked<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut top = TopN::new(n);
    top.extend(candidates);
    top.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<K: Copy>(ranked: &[Ranked<K>]) -> Vec<K> {
        ranked.iter().map(|r| r.0).collect()
    }

    #[test]
    fn best_scores_first() {
        let ranked = top_n(2, vec![(1, 4.5), (2, 4.9), (3, 3.0)]);
        assert_eq!(keys(&ranked), vec![2, 1]);
    }

    #[test]
    fn ties_by_ascending_key() {
        let ranked = top_n(3, vec![(9, 4.0), (4, 4.0), (1, 4.0), (2, 4.0), (7, 5.0)]);
        assert_eq!(keys(&ranked), vec![7, 1, 2]);
    }

    #[test]
    fn fewer_candidates_than_n() {
        let ranked = top_n(10, vec![(1, 0.5), (2, 0.7)]);
        assert_eq!(keys(&ranked), vec![2, 1]);
    }

    #[test]
    fn unbounded_n_keeps_every_candidate() {
        let ranked = top_n(usize::MAX, vec![(1, 0.5), (2, 0.7)]);
        assert_eq!(keys(&ranked), vec![2, 1]);
    }

    #[test]
    fn zero_keeps_nothing() {
        let ranked = top_n(0, vec![(1, 0.5), (2, 0.7)]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn nan_ranks_last() {
        let ranked = top_n(3, vec![(1, f64::NAN), (2, 0.1), (3, -4.0)]);
        assert_eq!(keys(&ranked), vec![2, 3, 1]);

        let ranked = top_n(2, vec![(1, f64::NAN), (2, 0.1), (3, -4.0)]);
        assert_eq!(keys(&ranked), vec![2, 3]);
    }

    #[test]
    fn same_result_as_full_sort() {
        let candidates: Vec<(usize, f64)> = (0..200)
            .map(|i| (i, ((i * 37) % 23) as f64 / 7.0))
            .collect();

        let mut sorted: Vec<_> = candidates.iter().map(|&(k, s)| Ranked(k, s)).collect();
        sorted.sort();
        sorted.truncate(15);

        let ranked = top_n(15, candidates);
        assert_eq!(keys(&ranked), keys(&sorted));
    }
}
