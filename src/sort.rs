//! Tape sorter.

use log;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::mem;
use std::slice;

use crate::merger;
use crate::tape::Tape;

/// Minimum number of auxiliary tapes (tapes per group for the balanced sort) a multiway sort needs.
pub const MIN_TAPES_NUMBER: usize = 2;

/// Sorting error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Too few tapes requested for a multiway sort.
    InvalidArgument { tapes_number: usize, minimum: usize },
}

impl Error for SortError {}

impl Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            SortError::InvalidArgument { tapes_number, minimum } => write!(
                f,
                "invalid argument: {} tapes requested, at least {} required",
                tapes_number, minimum
            ),
        }
    }
}

/// Defines how multiway sorts react to a tape count below [`MIN_TAPES_NUMBER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapeCountPolicy {
    /// Fail with [`SortError::InvalidArgument`].
    Strict,
    /// Log a warning and leave the input tape unsorted.
    Lenient,
}

impl Default for TapeCountPolicy {
    fn default() -> Self {
        TapeCountPolicy::Strict
    }
}

/// Tape sorter builder. Provides methods for [`TapeSorter`] initialization.
#[derive(Debug, Clone, Default)]
pub struct TapeSorterBuilder {
    /// Reaction to an insufficient tape count.
    tape_count_policy: TapeCountPolicy,
}

impl TapeSorterBuilder {
    /// Creates an instance of a builder with default parameters.
    pub fn new() -> Self {
        TapeSorterBuilder::default()
    }

    /// Builds a [`TapeSorter`] instance using provided configuration.
    pub fn build(self) -> TapeSorter {
        TapeSorter::new_with_policy(self.tape_count_policy)
    }

    /// Sets the reaction to an insufficient tape count.
    pub fn with_tape_count_policy(mut self, policy: TapeCountPolicy) -> TapeSorterBuilder {
        self.tape_count_policy = policy;
        return self;
    }
}

/// Tape sorter.
///
/// Implements three merge sort variants working on [`Tape`]s: the classic three-tape sort, the
/// multiway sort using any number of auxiliary tapes and the balanced sort merging between two
/// groups of tapes. Every algorithm leaves the sorted items on the tape passed in, rewound to
/// its start.
///
/// The sorter keeps a ledger of the writes made by all the sorts it has run, which is what the
/// algorithms are compared by.
#[derive(Debug, Default)]
pub struct TapeSorter {
    /// Reaction to an insufficient tape count.
    tape_count_policy: TapeCountPolicy,
    /// Writes made by all the sorts run so far.
    total_writes: u64,
    /// Number of auxiliary tapes created so far.
    allocated_tapes: usize,
}

impl TapeSorter {
    /// Creates a new sorter using default configuration.
    pub fn new() -> Self {
        TapeSorter::default()
    }

    fn new_with_policy(tape_count_policy: TapeCountPolicy) -> Self {
        TapeSorter {
            tape_count_policy,
            total_writes: 0,
            allocated_tapes: 0,
        }
    }

    /// Returns the total number of writes made by every sort run by this sorter, including writes
    /// to the input tapes. Writes made to the tapes outside of a sort are not included.
    pub fn total_writes(&self) -> u64 {
        self.total_writes
    }

    /// Returns the number of auxiliary tapes created by this sorter.
    pub fn allocated_tapes(&self) -> usize {
        self.allocated_tapes
    }

    /// Sorts the tape using the classic three-tape sort.
    pub fn classic_sort<T>(&mut self, tape: &mut Tape<T>)
    where
        T: Ord + Clone,
    {
        self.classic_sort_by(tape, T::cmp)
    }

    /// Sorts the tape using the classic three-tape sort and a custom compare function.
    ///
    /// The input is split by runs onto two auxiliary tapes which are then merged back onto the input.
    /// This repeats until the split finds the input to be a single run.
    ///
    /// # Arguments
    /// * `tape` - Tape to be sorted
    /// * `compare` - Function to be used to compare items
    pub fn classic_sort_by<T, F>(&mut self, tape: &mut Tape<T>, mut compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        log::info!("classic sort started");

        tape.rewind();
        let initial_writes = tape.writes();
        let mut aux = self.allocate(2);

        let mut passes = 0;
        loop {
            passes += 1;
            let runs = merger::split_runs(tape, &mut aux, &mut compare);
            log::debug!("pass {}: input split into {} runs", passes, runs);

            if aux[1].read().is_none() {
                break;
            }

            let (left, right) = aux.split_at_mut(1);
            merger::merge_two_way(tape, &mut left[0], &mut right[0], &mut compare);
            tape.rewind();
        }

        tape.rewind();
        let writes = self.record(tape.writes() - initial_writes, &aux);

        log::info!("classic sort done (passes: {}, writes: {})", passes, writes);
    }

    /// Sorts the tape using the multiway sort with `tapes_number` auxiliary tapes.
    pub fn multi_sort<T>(&mut self, tape: &mut Tape<T>, tapes_number: usize) -> Result<(), SortError>
    where
        T: Ord + Clone,
    {
        self.multi_sort_by(tape, tapes_number, T::cmp)
    }

    /// Sorts the tape using the multiway sort with `tapes_number` auxiliary tapes and
    /// a custom compare function.
    ///
    /// The input is split by runs onto the auxiliary tapes round-robin, then the runs are merged
    /// back onto the input, one run from every auxiliary tape at a time. This repeats until the split
    /// finds the input to be a single run. With two auxiliary tapes the result is the same as the
    /// one of the classic sort.
    ///
    /// # Arguments
    /// * `tape` - Tape to be sorted
    /// * `tapes_number` - Number of auxiliary tapes, at least [`MIN_TAPES_NUMBER`]
    /// * `compare` - Function to be used to compare items
    pub fn multi_sort_by<T, F>(
        &mut self,
        tape: &mut Tape<T>,
        tapes_number: usize,
        mut compare: F,
    ) -> Result<(), SortError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        tape.rewind();
        if !self.check_tapes_number(tapes_number)? {
            return Ok(());
        }

        log::info!("multiway sort started (tapes: {})", tapes_number);

        let initial_writes = tape.writes();
        let mut aux = self.allocate(tapes_number);

        let mut passes = 0;
        loop {
            passes += 1;
            let runs = merger::split_runs(tape, &mut aux, &mut compare);
            log::debug!("pass {}: input split into {} runs", passes, runs);

            if aux[1].read().is_none() {
                break;
            }

            tape.erase();
            let generations = merger::merge_runs(&mut aux, slice::from_mut(tape), &mut compare);
            log::debug!("pass {}: {} run generations merged", passes, generations);

            for aux_tape in aux.iter_mut() {
                aux_tape.erase();
            }
        }

        tape.rewind();
        let writes = self.record(tape.writes() - initial_writes, &aux);

        log::info!("multiway sort done (passes: {}, writes: {})", passes, writes);

        return Ok(());
    }

    /// Sorts the tape using the balanced sort with two groups of `tapes_number` tapes.
    pub fn balanced_sort<T>(&mut self, tape: &mut Tape<T>, tapes_number: usize) -> Result<(), SortError>
    where
        T: Ord + Clone,
    {
        self.balanced_sort_by(tape, tapes_number, T::cmp)
    }

    /// Sorts the tape using the balanced sort with two groups of `tapes_number` tapes and
    /// a custom compare function.
    ///
    /// Runs are merged from the tapes of the "from" group while every merged run goes to the next tape
    /// of the "to" group, so splitting happens as part of merging. After each pass the groups swap
    /// roles. The input tape is the first tape of the initial "from" group. Sorting is done once
    /// a whole pass lands on the first "to" tape, that tape is then moved into `tape`.
    ///
    /// # Arguments
    /// * `tape` - Tape to be sorted
    /// * `tapes_number` - Number of tapes in each group, at least [`MIN_TAPES_NUMBER`]
    /// * `compare` - Function to be used to compare items
    pub fn balanced_sort_by<T, F>(
        &mut self,
        tape: &mut Tape<T>,
        tapes_number: usize,
        mut compare: F,
    ) -> Result<(), SortError>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        tape.rewind();
        if !self.check_tapes_number(tapes_number)? {
            return Ok(());
        }

        log::info!("balanced sort started (tapes: 2 x {})", tapes_number);

        let initial_writes = tape.writes();
        let mut from = Vec::with_capacity(tapes_number);
        from.push(mem::take(tape));
        from.extend(self.allocate(tapes_number - 1));
        let mut to = self.allocate(tapes_number);

        let mut passes = 0;
        loop {
            passes += 1;
            let generations = merger::merge_runs(&mut from, &mut to, &mut compare);
            log::debug!("pass {}: {} run generations merged", passes, generations);

            if to[1].read().is_none() {
                break;
            }

            log::trace!("swapping tape groups");
            mem::swap(&mut from, &mut to);
            for to_tape in to.iter_mut() {
                to_tape.erase();
            }
        }

        let writes = from.iter().chain(to.iter()).map(Tape::writes).sum::<u64>() - initial_writes;
        self.total_writes += writes;

        *tape = mem::take(&mut to[0]);
        tape.rewind();

        log::info!("balanced sort done (passes: {}, writes: {})", passes, writes);

        return Ok(());
    }

    /// Checks the tape count against the configured policy.
    /// Returns `false` if sorting should be skipped.
    fn check_tapes_number(&self, tapes_number: usize) -> Result<bool, SortError> {
        if tapes_number >= MIN_TAPES_NUMBER {
            return Ok(true);
        }

        match self.tape_count_policy {
            TapeCountPolicy::Strict => Err(SortError::InvalidArgument {
                tapes_number,
                minimum: MIN_TAPES_NUMBER,
            }),
            TapeCountPolicy::Lenient => {
                log::warn!(
                    "too few tapes ({}, at least {} required), input left unsorted",
                    tapes_number,
                    MIN_TAPES_NUMBER
                );
                Ok(false)
            }
        }
    }

    fn allocate<T>(&mut self, tapes_number: usize) -> Vec<Tape<T>> {
        self.allocated_tapes += tapes_number;
        return Vec::from_iter((0..tapes_number).map(|_| Tape::new()));
    }

    /// Adds the writes made to the input and the auxiliary tapes to the ledger.
    /// Returns the number of writes made by the sort.
    fn record<T>(&mut self, input_writes: u64, aux: &[Tape<T>]) -> u64 {
        let writes = input_writes + aux.iter().map(Tape::writes).sum::<u64>();
        self.total_writes += writes;
        return writes;
    }
}
