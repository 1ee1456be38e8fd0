//! `tape-sort` implements merge sort variants over simulated sequential-access tapes.
//!
//! A tape can only be read at its cursor, advanced forward one position or rewound to its start,
//! so sorting has to be done in passes: items are split by ascending runs onto auxiliary tapes
//! and the runs are merged back, until a single run is left. The sorts differ in how many tapes they
//! use and how they organize the passes, and they are compared by the number of writes and
//! comparisons they make on the same input.
//!
//! # Overview
//!
//! `tape-sort` provides the following algorithms:
//!
//! * **Classic sort:**
//!   the three-tape sort, splitting the input onto two auxiliary tapes and merging them back.
//! * **Multiway sort:**
//!   generalization of the classic sort to any number (at least 2) of auxiliary tapes.
//! * **Balanced sort:**
//!   two equally sized groups of tapes, merging runs from one group while distributing them over
//!   the other one, so no separate split pass is needed.
//!
//! Writes are recorded by the [`TapeSorter`], comparisons can be counted with a [`ComparisonCounter`].
//!
//! # Example
//!
//! ```
//! use tape_sort::{ComparisonCounter, Tape, TapeSorter};
//!
//! let mut sorter = TapeSorter::new();
//! let counter = ComparisonCounter::new();
//!
//! let mut tape = Tape::from_iter(vec![4, 2, 7, 1, 9, 3, 6]);
//! sorter.multi_sort_by(&mut tape, 3, counter.compare()).unwrap();
//!
//! assert_eq!(tape.to_vec(), vec![1, 2, 3, 4, 6, 7, 9]);
//! println!("writes: {}, comparisons: {}", sorter.total_writes(), counter.count());
//! ```

pub mod counter;
mod merger;
pub mod sort;
pub mod tape;

pub use counter::ComparisonCounter;
pub use sort::{SortError, TapeCountPolicy, TapeSorter, TapeSorterBuilder, MIN_TAPES_NUMBER};
pub use tape::Tape;
