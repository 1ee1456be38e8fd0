//! Comparison counting.

use std::cell::Cell;
use std::cmp::Ordering;

/// Caller-owned comparison counter.
///
/// Wraps comparison functions so that every call made through them is counted.
/// The counter is not tied to the item type, so measurements stay isolated per counter instance.
///
/// # Example
///
/// ```
/// use tape_sort::{ComparisonCounter, Tape, TapeSorter};
///
/// let counter = ComparisonCounter::new();
/// let mut tape = Tape::from_iter(vec![1, 2, 3, 4]);
///
/// TapeSorter::new().classic_sort_by(&mut tape, counter.compare());
/// assert_eq!(counter.count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ComparisonCounter {
    count: Cell<u64>,
}

impl ComparisonCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        ComparisonCounter::default()
    }

    /// Returns a comparison function using the natural order of `T` that is counted by this counter.
    pub fn compare<'a, T>(&'a self) -> impl FnMut(&T, &T) -> Ordering + 'a
    where
        T: Ord + 'a,
    {
        self.compare_by(T::cmp)
    }

    /// Wraps `compare` so that every call is counted by this counter.
    pub fn compare_by<'a, T, F>(&'a self, mut compare: F) -> impl FnMut(&T, &T) -> Ordering + 'a
    where
        T: 'a,
        F: FnMut(&T, &T) -> Ordering + 'a,
    {
        move |a: &T, b: &T| {
            self.count.set(self.count.get() + 1);
            compare(a, b)
        }
    }

    /// Returns the number of comparisons made since creation or the last reset.
    pub fn count(&self) -> u64 {
        self.count.get()
    }

    /// Resets the counter to zero.
    pub fn reset(&self) {
        self.count.set(0);
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use super::ComparisonCounter;

    #[test]
    fn test_comparison_counter() {
        let counter = ComparisonCounter::new();
        let mut compare = counter.compare();

        assert_eq!(compare(&1, &2), Ordering::Less);
        assert_eq!(compare(&2, &2), Ordering::Equal);
        assert_eq!(counter.count(), 2);

        counter.reset();
        assert_eq!(counter.count(), 0);

        let mut reversed = counter.compare_by(|a: &i32, b: &i32| a.cmp(b).reverse());
        assert_eq!(reversed(&1, &2), Ordering::Greater);
        assert_eq!(counter.count(), 1);
    }
}
