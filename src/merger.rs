//! Run splitting and merging passes.
//!
//! A run is a maximal ascending sequence of items on a tape. Runs are never stored explicitly:
//! the end of a run is detected by comparing the next item of a tape with the item that was
//! written last, and a run has ended once the next item is strictly less than it.

use std::cmp::Ordering;

use crate::tape::Tape;

/// Distributes the items of the input tape over the target tapes.
///
/// Items are appended to the current target tape while they keep ascending, every descent starts
/// a new run on the next target tape (round-robin). The input tape is expected to be rewound and the
/// target tapes to be empty. Returns the number of runs started, the targets are left rewound.
pub(crate) fn split_runs<T, F>(input: &mut Tape<T>, targets: &mut [Tape<T>], compare: &mut F) -> usize
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut current = 0;
    let mut runs = 0;

    while let Some(item) = input.read() {
        match targets[current].read() {
            Some(last) if is_less(compare, item, last) => {
                current = (current + 1) % targets.len();
                runs += 1;
            }
            None => runs += 1,
            Some(_) => {}
        }

        // the very first write lands on the empty head position since advancing from it is a no-op
        targets[current].advance();
        targets[current].write(item.clone());
        input.advance();
    }

    for tape in targets.iter_mut() {
        tape.rewind();
    }

    return runs;
}

/// Merges runs of two rewound tapes into the output tape.
///
/// Runs are merged pairwise: once one side's run ends, the rest of the other side's run is copied
/// and the output cursor is moved onto a fresh empty position, which marks the start of the next
/// pair. When one of the tapes runs out, whatever is left on the other one is appended as is.
/// The output tape is erased first, both sources are erased at the end.
pub(crate) fn merge_two_way<T, F>(output: &mut Tape<T>, left: &mut Tape<T>, right: &mut Tape<T>, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    output.erase();

    while left.read().is_some() && right.read().is_some() {
        if run_ended(left, output, compare) {
            copy_run(right, output, compare);
            output.advance();
        } else if run_ended(right, output, compare) {
            copy_run(left, output, compare);
            output.advance();
        } else {
            let source = pick_lower(left, right, compare);
            transfer(source, output);
        }
    }

    for source in [left, right] {
        while source.read().is_some() {
            transfer(source, output);
        }
        source.erase();
    }
}

/// Merges runs of the rewound source tapes, dealing the merged runs over the target tapes.
///
/// A source tape is active while its current run is not exhausted. The lowest head among active
/// tapes is moved to the current target, ties go to the lowest source index. Once no source is
/// active the next generation of runs begins: every non-empty source is activated again and the
/// output moves to the next target tape (round-robin). With a single target all generations are
/// appended to the same tape.
///
/// Returns the number of merged run generations, the targets are left rewound.
pub(crate) fn merge_runs<T, F>(sources: &mut [Tape<T>], targets: &mut [Tape<T>], compare: &mut F) -> usize
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut active = Vec::from_iter(sources.iter().map(|tape| tape.read().is_some()));
    let mut target = 0;
    let mut generations = 1;

    loop {
        let lowest = match select_lowest(sources, &active, compare) {
            Some(index) => index,
            None if sources.iter().all(|tape| tape.read().is_none()) => break,
            None => {
                for (flag, tape) in active.iter_mut().zip(sources.iter()) {
                    *flag = tape.read().is_some();
                }
                target = (target + 1) % targets.len();
                generations += 1;
                continue;
            }
        };

        transfer(&mut sources[lowest], &mut targets[target]);

        if sources[lowest].read().is_none() || run_ended(&sources[lowest], &targets[target], compare) {
            active[lowest] = false;
        }
    }

    for tape in targets.iter_mut() {
        tape.rewind();
    }

    return generations;
}

/// Returns the index of the active tape holding the lowest item, ties are resolved
/// in favour of the lowest index.
fn select_lowest<T, F>(tapes: &[Tape<T>], active: &[bool], compare: &mut F) -> Option<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lowest: Option<(usize, &T)> = None;

    for (index, tape) in tapes.iter().enumerate() {
        if !active[index] {
            continue;
        }
        let item = match tape.read() {
            Some(item) => item,
            None => continue,
        };

        match lowest {
            Some((_, current)) if !is_less(compare, item, current) => {}
            _ => lowest = Some((index, item)),
        }
    }

    return lowest.map(|(index, _)| index);
}

/// Returns the tape with the lower head, `left` on ties.
fn pick_lower<'a, T, F>(left: &'a mut Tape<T>, right: &'a mut Tape<T>, compare: &mut F) -> &'a mut Tape<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let right_lower = match (left.read(), right.read()) {
        (Some(l), Some(r)) => is_less(compare, r, l),
        (None, Some(_)) => true,
        _ => false,
    };

    if right_lower {
        right
    } else {
        left
    }
}

/// Checks whether the head of `source` no longer continues the run last written to `output`.
/// An empty source or output never ends a run.
fn run_ended<T, F>(source: &Tape<T>, output: &Tape<T>, compare: &mut F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    match (source.read(), output.read()) {
        (Some(item), Some(last)) => is_less(compare, item, last),
        _ => false,
    }
}

/// Copies items from `source` while they continue the run last written to `output`.
fn copy_run<T, F>(source: &mut Tape<T>, output: &mut Tape<T>, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    while source.read().is_some() && !run_ended(source, output, compare) {
        transfer(source, output);
    }
}

/// Appends the head of `source` to `output` and advances `source`.
fn transfer<T: Clone>(source: &mut Tape<T>, output: &mut Tape<T>) {
    if let Some(item) = source.read() {
        output.advance();
        output.write(item.clone());
        source.advance();
    }
}

fn is_less<T, F>(compare: &mut F, a: &T, b: &T) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    compare(a, b) == Ordering::Less
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::{merge_runs, merge_two_way, split_runs};
    use crate::tape::Tape;

    fn tapes(contents: Vec<Vec<i32>>) -> Vec<Tape<i32>> {
        Vec::from_iter(contents.into_iter().map(Tape::from_iter))
    }

    fn contents(tapes: &mut [Tape<i32>]) -> Vec<Vec<i32>> {
        Vec::from_iter(tapes.iter_mut().map(|tape| tape.to_vec()))
    }

    #[rstest]
    #[case(vec![3, 5, 1, 2, 0], 2, vec![vec![3, 5, 0], vec![1, 2]], 3)]
    #[case(vec![3, 5, 1, 2, 0], 3, vec![vec![3, 5], vec![1, 2], vec![0]], 3)]
    #[case(vec![1, 2, 2, 3], 2, vec![vec![1, 2, 2, 3], vec![]], 1)]
    #[case(vec![4, 3, 2, 1], 3, vec![vec![4, 1], vec![3], vec![2]], 4)]
    #[case(vec![1, 3, 2, 4], 2, vec![vec![1, 3], vec![2, 4]], 2)]
    fn test_split_runs(
        #[case] input: Vec<i32>,
        #[case] tapes_number: usize,
        #[case] expected_tapes: Vec<Vec<i32>>,
        #[case] expected_runs: usize,
    ) {
        let mut input = Tape::from_iter(input);
        let mut targets = tapes(vec![vec![]; tapes_number]);

        let runs = split_runs(&mut input, &mut targets, &mut i32::cmp);

        assert_eq!(runs, expected_runs);
        assert_eq!(contents(&mut targets), expected_tapes);
    }

    #[rstest]
    #[case(vec![1, 4, 2], vec![3, 5], vec![1, 3, 4, 5, 2])]
    #[case(vec![2, 6], vec![1, 3, 0, 4], vec![1, 2, 3, 6, 0, 4])]
    #[case(vec![5], vec![1, 2, 3], vec![1, 2, 3, 5])]
    #[case(vec![1, 9, 2, 8], vec![3, 4, 5, 6], vec![1, 3, 4, 5, 6, 9, 2, 8])]
    fn test_merge_two_way(#[case] left: Vec<i32>, #[case] right: Vec<i32>, #[case] expected_result: Vec<i32>) {
        let mut output = Tape::from_iter(vec![7, 7, 7]);
        let mut left = Tape::from_iter(left);
        let mut right = Tape::from_iter(right);

        merge_two_way(&mut output, &mut left, &mut right, &mut i32::cmp);

        assert_eq!(output.to_vec(), expected_result);
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[rstest]
    #[case(
        vec![vec![1, 4, 2], vec![3, 5], vec![0]],
        1,
        vec![vec![0, 1, 3, 4, 5, 2]],
        2,
    )]
    #[case(
        vec![vec![1, 4, 2], vec![3, 5], vec![0]],
        2,
        vec![vec![0, 1, 3, 4, 5], vec![2]],
        2,
    )]
    #[case(
        vec![vec![3, 1, 0], vec![], vec![2]],
        2,
        vec![vec![2, 3, 0], vec![1]],
        3,
    )]
    #[case(
        vec![vec![1, 2], vec![], vec![]],
        3,
        vec![vec![1, 2], vec![], vec![]],
        1,
    )]
    fn test_merge_runs(
        #[case] sources: Vec<Vec<i32>>,
        #[case] targets_number: usize,
        #[case] expected_targets: Vec<Vec<i32>>,
        #[case] expected_generations: usize,
    ) {
        let mut sources = tapes(sources);
        let mut targets = tapes(vec![vec![]; targets_number]);

        let generations = merge_runs(&mut sources, &mut targets, &mut i32::cmp);

        assert_eq!(generations, expected_generations);
        assert_eq!(contents(&mut targets), expected_targets);
        assert!(sources.iter().all(|tape| tape.read().is_none()));
    }

    #[test]
    fn test_merge_runs_tie_break() {
        let mut sources = vec![
            Tape::from_iter(vec![(1, 'c')]),
            Tape::from_iter(vec![(1, 'a'), (2, 'a')]),
            Tape::from_iter(vec![(1, 'b')]),
        ];
        let mut targets = vec![Tape::new()];

        merge_runs(&mut sources, &mut targets, &mut |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));

        assert_eq!(targets[0].to_vec(), vec![(1, 'c'), (1, 'a'), (1, 'b'), (2, 'a')]);
    }

    #[test]
    fn test_merge_two_way_tie_break() {
        let mut output = Tape::new();
        let mut left = Tape::from_iter(vec![(1, 'l')]);
        let mut right = Tape::from_iter(vec![(1, 'r')]);

        merge_two_way(&mut output, &mut left, &mut right, &mut |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));

        assert_eq!(output.to_vec(), vec![(1, 'l'), (1, 'r')]);
    }
}
