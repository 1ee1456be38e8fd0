//! Sequential-access tape.

/// Simulated sequential-access storage medium.
///
/// A tape is a run of positions with a single cursor. The cursor can only move forward, one
/// position at a time, or be rewound to the first position. Positions are created lazily as the
/// cursor moves past the current end, and a position stays empty until something is written to it.
///
/// Moving the cursor from an empty position is a no-op, so repeatedly advancing a tape never runs
/// past the end of the written data. The sorting algorithms rely on that: an empty read means
/// "no more items on this tape".
#[derive(Debug, Clone)]
pub struct Tape<T> {
    // always holds at least one position; written positions form a prefix
    cells: Vec<Option<T>>,
    cursor: usize,
    writes: u64,
}

impl<T> Tape<T> {
    /// Creates an empty tape consisting of a single empty position.
    pub fn new() -> Self {
        Tape {
            cells: vec![None],
            cursor: 0,
            writes: 0,
        }
    }

    /// Returns the item at the cursor or [`None`] if the position is empty.
    pub fn read(&self) -> Option<&T> {
        self.cells[self.cursor].as_ref()
    }

    /// Overwrites the item at the cursor and increments the write counter.
    pub fn write(&mut self, item: T) {
        self.writes += 1;
        self.cells[self.cursor] = Some(item);
    }

    /// Moves the cursor to the next position, creating it if needed.
    /// Does nothing if the current position is empty.
    pub fn advance(&mut self) {
        if self.cells[self.cursor].is_none() {
            return;
        }

        self.cursor += 1;
        if self.cursor == self.cells.len() {
            self.cells.push(None);
        }
    }

    /// Moves the cursor back to the first position. Contents and write counter are kept.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Discards the whole content leaving a single empty position under the cursor.
    /// The write counter is kept.
    pub fn erase(&mut self) {
        self.cells.clear();
        self.cells.push(None);
        self.cursor = 0;
    }

    /// Returns the number of writes performed on the tape since construction
    /// or the last [`Tape::reset_writes`] call.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Resets the write counter to zero.
    /// Useful to isolate a single measured sort from the writes that loaded the tape.
    pub fn reset_writes(&mut self) {
        self.writes = 0;
    }

    /// Returns the number of items stored on the tape. The cursor is not moved.
    pub fn len(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_some()).count()
    }

    /// Checks if the tape holds no items. The cursor is not moved.
    pub fn is_empty(&self) -> bool {
        self.cells[0].is_none()
    }

    /// Collects the tape content into a vector.
    ///
    /// The tape is read the same way the algorithms read it: it is rewound first and then advanced
    /// over every item, so the cursor is left at the end of the tape.
    pub fn to_vec(&mut self) -> Vec<T>
    where
        T: Clone,
    {
        let mut items = Vec::new();

        self.rewind();
        while let Some(item) = self.read() {
            items.push(item.clone());
            self.advance();
        }

        return items;
    }

    /// Consumes the tape returning its content.
    pub fn into_vec(self) -> Vec<T> {
        self.cells.into_iter().flatten().collect()
    }
}

impl<T> Default for Tape<T> {
    fn default() -> Self {
        Tape::new()
    }
}

/// Loads items onto a new tape in iteration order, leaving the cursor at the first item.
/// Loading is not counted as writes.
impl<T> FromIterator<T> for Tape<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut cells = Vec::from_iter(items.into_iter().map(Some));
        cells.push(None);

        Tape {
            cells,
            cursor: 0,
            writes: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::Tape;

    #[rstest]
    #[case(vec![])]
    #[case(vec![7])]
    #[case(vec![3, 1, 2])]
    fn test_tape_load(#[case] items: Vec<i32>) {
        let mut tape = Tape::from_iter(items.clone());

        assert_eq!(tape.len(), items.len());
        assert_eq!(tape.is_empty(), items.is_empty());
        assert_eq!(tape.writes(), 0);
        assert_eq!(tape.read(), items.first());
        assert_eq!(tape.to_vec(), items);
        assert_eq!(tape.read(), None);
        assert_eq!(tape.into_vec(), items);
    }

    #[test]
    fn test_tape_write_and_advance() {
        let mut tape = Tape::new();
        assert_eq!(tape.read(), None);

        // advancing from an empty position does not move the cursor
        tape.advance();
        tape.write(1);
        tape.advance();
        tape.write(2);
        assert_eq!(tape.read(), Some(&2));

        tape.advance();
        tape.advance();
        tape.advance();
        assert_eq!(tape.read(), None);

        tape.write(3);
        assert_eq!(tape.writes(), 3);

        tape.rewind();
        assert_eq!(tape.read(), Some(&1));
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_tape_overwrite() {
        let mut tape = Tape::from_iter(vec![1, 2, 3]);

        tape.advance();
        tape.write(5);
        tape.rewind();

        assert_eq!(tape.to_vec(), vec![1, 5, 3]);
        assert_eq!(tape.writes(), 1);
    }

    #[test]
    fn test_tape_erase() {
        let mut tape = Tape::from_iter(vec![1, 2, 3]);
        tape.advance();
        tape.write(4);

        tape.erase();
        assert_eq!(tape.read(), None);
        assert!(tape.is_empty());
        assert_eq!(tape.len(), 0);
        assert_eq!(tape.writes(), 1);

        tape.write(9);
        tape.advance();
        tape.write(8);
        tape.rewind();
        assert_eq!(tape.to_vec(), vec![9, 8]);
    }

    #[test]
    fn test_tape_reset_writes() {
        let mut tape = Tape::new();
        tape.write("a");
        tape.advance();
        tape.write("b");
        assert_eq!(tape.writes(), 2);

        tape.reset_writes();
        assert_eq!(tape.writes(), 0);
        assert_eq!(tape.len(), 2);
    }
}
