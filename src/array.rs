//! Slice helpers.
//!
//! Every function returns a new `Vec`; inputs are never mutated. Membership
//! checks use `PartialEq`, so they work for floats and other types without
//! `Hash` or `Ord`, at quadratic cost.

use std::cmp::Ordering;

/// Removes duplicates, keeping the first occurrence of each value in order.
///
/// ```
/// use jmni_until::array::unique_array;
///
/// assert_eq!(unique_array(&[1, 2, 2, 3, 4, 4, 5]), vec![1, 2, 3, 4, 5]);
/// ```
pub fn unique_array<T: PartialEq + Clone>(items: &[T]) -> Vec<T> {
    items.iter().fold(Vec::new(), |mut acc, item| {
        if !acc.contains(item) {
            acc.push(item.clone());
        }
        acc
    })
}

/// Returns an ascending, stable-sorted copy.
pub fn sort_array<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort();
    sorted
}

/// Returns a copy sorted with a custom comparator.
///
/// ```
/// use jmni_until::array::sort_array_by;
///
/// let descending = sort_array_by(&[3, 1, 4, 2], |a, b| b.cmp(a));
/// assert_eq!(descending, vec![4, 3, 2, 1]);
/// ```
pub fn sort_array_by<T, F>(items: &[T], compare: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(compare);
    sorted
}

/// An item or an arbitrarily deep list of items.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    /// A single value.
    Item(T),
    /// A nested list.
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Shorthand for `Nested::Item`.
    pub fn item(value: T) -> Self {
        Nested::Item(value)
    }

    /// Shorthand for `Nested::List`.
    pub fn list(items: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::List(items.into_iter().collect())
    }
}

/// Flattens nested lists into a single level, depth first.
///
/// ```
/// use jmni_until::array::{flatten_array, Nested};
///
/// // [1, [2, [3, [4]], 5]]
/// let nested = [
///     Nested::item(1),
///     Nested::list([
///         Nested::item(2),
///         Nested::list([Nested::item(3), Nested::list([Nested::item(4)])]),
///         Nested::item(5),
///     ]),
/// ];
/// assert_eq!(flatten_array(&nested), vec![1, 2, 3, 4, 5]);
/// ```
pub fn flatten_array<T: Clone>(items: &[Nested<T>]) -> Vec<T> {
    let mut out = Vec::new();
    flatten_into(items, &mut out);
    out
}

fn flatten_into<T: Clone>(items: &[Nested<T>], out: &mut Vec<T>) {
    for item in items {
        match item {
            Nested::Item(value) => out.push(value.clone()),
            Nested::List(inner) => flatten_into(inner, out),
        }
    }
}

/// Items of `a` that do not appear in `b`, in the order of `a`.
pub fn difference<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|item| !b.contains(item)).cloned().collect()
}

/// Items of `a` that also appear in `b`, in the order of `a`.
///
/// Duplicates in `a` are kept.
pub fn intersection<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    a.iter().filter(|item| b.contains(item)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_array_keeps_first_occurrence() {
        assert_eq!(
            unique_array(&["apple", "banana", "apple", "orange"]),
            vec!["apple", "banana", "orange"]
        );
        assert!(unique_array::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_unique_array_nan_is_never_a_duplicate() {
        let out = unique_array(&[f64::NAN, f64::NAN, 1.0, 1.0]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_sort_array_does_not_mutate_input() {
        let input = vec![5, 3, 8, 1];
        assert_eq!(sort_array(&input), vec![1, 3, 5, 8]);
        assert_eq!(input, vec![5, 3, 8, 1]);
        assert_eq!(
            sort_array(&["banana", "apple", "orange"]),
            vec!["apple", "banana", "orange"]
        );
    }

    #[test]
    fn test_sort_array_by_is_stable() {
        let pairs = [(1, 'b'), (0, 'x'), (1, 'a')];
        let sorted = sort_array_by(&pairs, |l, r| l.0.cmp(&r.0));
        assert_eq!(sorted, vec![(0, 'x'), (1, 'b'), (1, 'a')]);
    }

    #[test]
    fn test_flatten_flat_input() {
        let flat = [Nested::item(1), Nested::item(2), Nested::item(3)];
        assert_eq!(flatten_array(&flat), vec![1, 2, 3]);
        assert!(flatten_array(&[Nested::<i32>::list([])]).is_empty());
    }

    #[test]
    fn test_difference_and_intersection() {
        let a = [1, 2, 3, 4];
        let b = [3, 4, 5, 6];
        assert_eq!(difference(&a, &b), vec![1, 2]);
        assert_eq!(intersection(&a, &b), vec![3, 4]);
        assert_eq!(intersection(&[3, 3, 1], &b), vec![3, 3]);
    }
}
