//! Comparison sorts used to rebuild the keyed index.

use std::fmt;
use std::str::FromStr;

/// Algorithm used by [`crate::index::KeyedIndex::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Quick,
    Merge,
}

impl SortAlgorithm {
    /// Sort `items` by the key `key` extracts.
    pub fn sort_by_key<T, K, F>(self, items: &mut [T], key: F)
    where
        T: Clone,
        K: Ord + ?Sized,
        F: Fn(&T) -> &K,
    {
        match self {
            Self::Quick => quick_sort_by_key(items, &key),
            Self::Merge => merge_sort_by_key(items, &key),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quick => f.write_str("QuickSort"),
            Self::Merge => f.write_str("MergeSort"),
        }
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quick" | "quicksort" => Ok(Self::Quick),
            "merge" | "mergesort" => Ok(Self::Merge),
            other => Err(format!(
                "Unknown sort algorithm: {other} (expected quick or merge)"
            )),
        }
    }
}

/// Lomuto quicksort, pivot is the last element. Not stable.
///
/// Recurses into the smaller partition and loops on the larger one, so stack
/// depth stays logarithmic even on already-sorted input.
pub fn quick_sort_by_key<T, K, F>(mut items: &mut [T], key: &F)
where
    K: Ord + ?Sized,
    F: Fn(&T) -> &K,
{
    while items.len() > 1 {
        let pivot = partition(items, key);
        let (left, rest) = std::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut rest[1..];

        if left.len() < right.len() {
            quick_sort_by_key(left, key);
            items = right;
        } else {
            quick_sort_by_key(right, key);
            items = left;
        }
    }
}

fn partition<T, K, F>(items: &mut [T], key: &F) -> usize
where
    K: Ord + ?Sized,
    F: Fn(&T) -> &K,
{
    let high = items.len() - 1;
    let mut store = 0;

    for j in 0..high {
        // Ties go left with the pivot.
        if key(&items[j]) <= key(&items[high]) {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, high);
    store
}

/// Top-down mergesort. Stable: on ties the left run wins.
pub fn merge_sort_by_key<T, K, F>(items: &mut [T], key: &F)
where
    T: Clone,
    K: Ord + ?Sized,
    F: Fn(&T) -> &K,
{
    if items.len() < 2 {
        return;
    }

    let mid = (items.len() - 1) / 2 + 1;
    merge_sort_by_key(&mut items[..mid], key);
    merge_sort_by_key(&mut items[mid..], key);
    merge(items, mid, key);
}

fn merge<T, K, F>(items: &mut [T], mid: usize, key: &F)
where
    T: Clone,
    K: Ord + ?Sized,
    F: Fn(&T) -> &K,
{
    let left = items[..mid].to_vec();
    let right = items[mid..].to_vec();

    let (mut i, mut j) = (0, 0);
    for slot in items.iter_mut() {
        let take_left = match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) => key(l) <= key(r),
            (Some(_), None) => true,
            (None, _) => false,
        };

        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn by_first(pair: &(u32, char)) -> &u32 {
        &pair.0
    }

    fn itself(x: &u32) -> &u32 {
        x
    }

    #[test]
    fn test_quick_sort() {
        let mut items: Vec<u32> = vec![5, 1, 4, 1, 3, 9, 2, 6];
        quick_sort_by_key(&mut items, &itself);
        assert_eq!(items, vec![1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn test_quick_sort_sorted_and_reversed_input() {
        let mut ascending: Vec<u32> = (0..2000).collect();
        quick_sort_by_key(&mut ascending, &itself);
        assert!(ascending.windows(2).all(|w| w[0] <= w[1]));

        let mut descending: Vec<u32> = (0..2000).rev().collect();
        quick_sort_by_key(&mut descending, &itself);
        assert_eq!(descending, (0..2000).collect::<Vec<_>>());
    }

    #[test]
    fn test_merge_sort_is_stable() {
        let mut items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        merge_sort_by_key(&mut items, &by_first);
        assert_eq!(
            items,
            vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]
        );
    }

    #[test]
    fn test_sort_empty_and_single() {
        let mut empty: Vec<u8> = Vec::new();
        SortAlgorithm::Quick.sort_by_key(&mut empty, |x| x);
        SortAlgorithm::Merge.sort_by_key(&mut empty, |x| x);
        assert!(empty.is_empty());

        let mut single = vec![7u8];
        SortAlgorithm::Quick.sort_by_key(&mut single, |x| x);
        SortAlgorithm::Merge.sort_by_key(&mut single, |x| x);
        assert_eq!(single, vec![7]);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("quick".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Quick));
        assert_eq!("QuickSort".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Quick));
        assert_eq!("merge".parse::<SortAlgorithm>(), Ok(SortAlgorithm::Merge));
        assert!("bubble".parse::<SortAlgorithm>().is_err());
    }

    proptest! {
        #[test]
        fn property_both_sorts_agree_with_std(items in proptest::collection::vec(any::<u16>(), 0..200)) {
            let mut expected = items.clone();
            expected.sort_unstable();

            let mut quick = items.clone();
            SortAlgorithm::Quick.sort_by_key(&mut quick, |x| x);
            let mut merge = items;
            SortAlgorithm::Merge.sort_by_key(&mut merge, |x| x);

            prop_assert_eq!(&quick, &expected);
            prop_assert_eq!(&merge, &expected);
        }
    }
}
