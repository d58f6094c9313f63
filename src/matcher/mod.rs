pub mod types;
pub use types::*;

use std::cmp::{max, min};
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;
use std::ops::Range;

/// Splits text into lines, keeping the `\n` terminator on every line that has one.
/// Concatenating the result gives back `text` unchanged.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(ToString::to_string).collect()
}

/// Computes the edit script turning `old` into `new`.
///
/// # Examples
///
/// ```
/// use revdiff::matcher::{opcodes, OpCode, Tag};
///
/// let old = vec!["a", "b", "c"];
/// let new = vec!["a", "x", "c"];
/// assert_eq!(opcodes(&old, &new), vec![
///     OpCode::new(Tag::Equal, 0..1, 0..1),
///     OpCode::new(Tag::Replace, 1..2, 1..2),
///     OpCode::new(Tag::Equal, 2..3, 2..3),
/// ]);
/// ```
pub fn opcodes<T: Eq + Hash>(old: &[T], new: &[T]) -> Vec<OpCode> {
    SequenceMatcher::new(old, new).opcodes()
}

/// Computes the edit script and groups it into hunks with `context` lines
/// of surrounding equal elements.
pub fn grouped_opcodes<T: Eq + Hash>(old: &[T], new: &[T], context: usize) -> Vec<Vec<OpCode>> {
    SequenceMatcher::new(old, new).grouped_opcodes(context)
}

/// Longest-matching-block sequence matcher.
///
/// The longest run of equal elements is located first, then the same search
/// is repeated on both sides of it. When several runs share the maximal
/// length, the one starting earliest in `old` wins, then the one starting
/// earliest in `new`. The result is minimal for ordinary inputs but not
/// guaranteed to be globally minimal when content repeats heavily.
pub struct SequenceMatcher<'a, T> {
    old: &'a [T],
    new: &'a [T],
    new_index: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(old: &'a [T], new: &'a [T]) -> Self {
        let mut new_index: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, el) in new.iter().enumerate() {
            new_index.entry(el).or_default().push(j);
        }
        SequenceMatcher {
            old,
            new,
            new_index,
        }
    }

    /// Finds the longest run of equal elements inside the given windows.
    /// Returns a zero-sized match at the window starts if nothing matches.
    pub fn find_longest_match(&self, old: Range<usize>, new: Range<usize>) -> Match {
        let mut best = Match {
            old: old.start,
            new: new.start,
            size: 0,
        };
        // run_lengths[j] = length of the equal run ending at (i - 1, j)
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for i in old {
            let mut next_lengths = HashMap::new();
            if let Some(positions) = self.new_index.get(&self.old[i]) {
                for &j in positions {
                    if j < new.start {
                        continue;
                    }
                    if j >= new.end {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lengths.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_lengths.insert(j, k);
                    if k > best.size {
                        best = Match {
                            old: i + 1 - k,
                            new: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            run_lengths = next_lengths;
        }
        best
    }

    /// All matching blocks in ascending order, adjacent blocks merged.
    /// The last element is always the sentinel `(old.len(), new.len(), 0)`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0..self.old.len(), 0..self.new.len())];
        let mut blocks = Vec::new();
        while let Some((old, new)) = queue.pop() {
            let m = self.find_longest_match(old.clone(), new.clone());
            if m.size == 0 {
                continue;
            }
            if old.start < m.old && new.start < m.new {
                queue.push((old.start..m.old, new.start..m.new));
            }
            if m.old + m.size < old.end && m.new + m.size < new.end {
                queue.push((m.old + m.size..old.end, m.new + m.size..new.end));
            }
            blocks.push(m);
        }
        blocks.sort();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.old + last.size == block.old && last.new + last.size == block.new =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match {
            old: self.old.len(),
            new: self.new.len(),
            size: 0,
        });
        merged
    }

    /// The edit script. Ranges are contiguous and cover both sequences.
    pub fn opcodes(&self) -> Vec<OpCode> {
        let (mut i, mut j) = (0, 0);
        let mut codes = Vec::new();
        for block in self.matching_blocks() {
            let tag = match (i < block.old, j < block.new) {
                (true, true) => Some(Tag::Replace),
                (true, false) => Some(Tag::Delete),
                (false, true) => Some(Tag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                codes.push(OpCode::new(tag, i..block.old, j..block.new));
            }
            i = block.old + block.size;
            j = block.new + block.size;
            if block.size > 0 {
                codes.push(OpCode::new(Tag::Equal, block.old..i, block.new..j));
            }
        }
        codes
    }

    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<OpCode>> {
        group_opcodes(self.opcodes(), context)
    }
}

struct GroupBuilder {
    context: usize,
    current: Vec<OpCode>,
    groups: Vec<Vec<OpCode>>,
}

impl GroupBuilder {
    fn new(context: usize) -> Self {
        GroupBuilder {
            context,
            current: vec![],
            groups: vec![],
        }
    }

    fn process(&mut self, code: OpCode) {
        if code.is_equal() && code.old.len() > self.context.saturating_mul(2) {
            let n = self.context;
            self.push(OpCode::new(
                Tag::Equal,
                code.old.start..code.old.start + n,
                code.new.start..code.new.start + n,
            ));
            self.flush();
            self.push(OpCode::new(
                Tag::Equal,
                code.old.end - n..code.old.end,
                code.new.end - n..code.new.end,
            ));
        } else {
            self.push(code);
        }
    }

    fn push(&mut self, code: OpCode) {
        if !code.old.is_empty() || !code.new.is_empty() {
            self.current.push(code);
        }
    }

    fn flush(&mut self) {
        let group = mem::take(&mut self.current);
        if group.iter().any(|c| !c.is_equal()) {
            self.groups.push(group);
        }
    }

    fn finish(mut self) -> Vec<Vec<OpCode>> {
        self.flush();
        self.groups
    }
}

/// Groups an edit script into hunks.
///
/// Leading and trailing equal runs are cut down to `context` elements, equal
/// runs longer than `2 * context` split the script into separate hunks.
/// A script without changes yields no hunks.
pub fn group_opcodes(mut codes: Vec<OpCode>, context: usize) -> Vec<Vec<OpCode>> {
    if let Some(first) = codes.first_mut().filter(|c| c.is_equal()) {
        first.old.start = max(first.old.start, first.old.end.saturating_sub(context));
        first.new.start = max(first.new.start, first.new.end.saturating_sub(context));
    }
    if let Some(last) = codes.last_mut().filter(|c| c.is_equal()) {
        last.old.end = min(last.old.end, last.old.start.saturating_add(context));
        last.new.end = min(last.new.end, last.new.start.saturating_add(context));
    }

    let mut builder = GroupBuilder::new(context);
    for code in codes {
        builder.process(code);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_ranges_cover_both_sides(old: Vec<u8>, new: Vec<u8>) {
            let codes = opcodes(&old, &new);
            let (mut i, mut j) = (0, 0);
            for code in &codes {
                prop_assert_eq!(code.old.start, i);
                prop_assert_eq!(code.new.start, j);
                i = code.old.end;
                j = code.new.end;
            }
            prop_assert_eq!(i, old.len());
            prop_assert_eq!(j, new.len());
        }

        #[test]
        fn test_equal_ranges_match(old: Vec<u8>, new: Vec<u8>) {
            for code in opcodes(&old, &new) {
                match code.tag {
                    Tag::Equal => prop_assert_eq!(&old[code.old.clone()], &new[code.new.clone()]),
                    Tag::Delete => prop_assert!(code.new.is_empty() && !code.old.is_empty()),
                    Tag::Insert => prop_assert!(code.old.is_empty() && !code.new.is_empty()),
                    Tag::Replace => prop_assert!(!code.old.is_empty() && !code.new.is_empty()),
                }
            }
        }

        #[test]
        fn test_idempotency(els: Vec<u8>) {
            let result = opcodes(&els, &els);
            let expected = if els.is_empty() {
                vec![]
            } else {
                vec![OpCode::new(Tag::Equal, 0..els.len(), 0..els.len())]
            };
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn test_new_empty(els in prop::collection::vec(any::<u8>(), 1..50)) {
            let result = opcodes(&els, &Vec::new());
            prop_assert_eq!(result, vec![OpCode::new(Tag::Delete, 0..els.len(), 0..0)]);
        }

        #[test]
        fn test_old_empty(els in prop::collection::vec(any::<u8>(), 1..50)) {
            let result = opcodes(&Vec::new(), &els);
            prop_assert_eq!(result, vec![OpCode::new(Tag::Insert, 0..0, 0..els.len())]);
        }

        #[test]
        fn test_all_changes_grouped(
            old in prop::collection::vec(0..4u8, 0..30),
            new in prop::collection::vec(0..4u8, 0..30),
            context in 0..5usize,
        ) {
            let codes = opcodes(&old, &new);
            let grouped: Vec<OpCode> = group_opcodes(codes.clone(), context)
                .into_iter()
                .flatten()
                .collect();
            for code in codes.iter().filter(|c| !c.is_equal()) {
                prop_assert!(grouped.contains(code));
            }
        }
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\nb"), vec!["a\n", "b"]);
        assert_eq!(split_lines("a\n\n"), vec!["a\n", "\n"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_simple_replace() {
        let old = vec!["a", "b", "c"];
        let new = vec!["a", "x", "c"];
        assert_eq!(
            opcodes(&old, &new),
            vec![
                OpCode::new(Tag::Equal, 0..1, 0..1),
                OpCode::new(Tag::Replace, 1..2, 1..2),
                OpCode::new(Tag::Equal, 2..3, 2..3),
            ]
        );
    }

    #[test]
    fn test_completely_different() {
        let old = vec!["a", "b", "c"];
        let new = vec!["x", "y", "z"];
        assert_eq!(
            opcodes(&old, &new),
            vec![OpCode::new(Tag::Replace, 0..3, 0..3)]
        );
    }

    #[test]
    fn test_insertion_in_middle() {
        let old = vec!["a", "c"];
        let new = vec!["a", "b", "c"];
        assert_eq!(
            opcodes(&old, &new),
            vec![
                OpCode::new(Tag::Equal, 0..1, 0..1),
                OpCode::new(Tag::Insert, 1..1, 1..2),
                OpCode::new(Tag::Equal, 1..2, 2..3),
            ]
        );
    }

    #[test]
    fn test_duplicates() {
        let old = vec!["a", "a", "b"];
        let new = vec!["a", "b", "b"];
        assert_eq!(
            opcodes(&old, &new),
            vec![
                OpCode::new(Tag::Delete, 0..1, 0..0),
                OpCode::new(Tag::Equal, 1..3, 0..2),
                OpCode::new(Tag::Insert, 3..3, 2..3),
            ]
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let old = vec!["x", "a", "x"];
        let new = vec!["x"];
        let matcher = SequenceMatcher::new(&old, &new);
        assert_eq!(
            matcher.find_longest_match(0..3, 0..1),
            Match { old: 0, new: 0, size: 1 }
        );
        assert_eq!(
            matcher.opcodes(),
            vec![
                OpCode::new(Tag::Equal, 0..1, 0..1),
                OpCode::new(Tag::Delete, 1..3, 1..1),
            ]
        );
    }

    #[test]
    fn test_matching_blocks_are_merged() {
        let old = vec![1, 2, 3, 4];
        let new = vec![1, 2, 3, 4];
        assert_eq!(
            SequenceMatcher::new(&old, &new).matching_blocks(),
            vec![
                Match { old: 0, new: 0, size: 4 },
                Match { old: 4, new: 4, size: 0 },
            ]
        );
    }

    #[test]
    fn test_two_groups() {
        // two changes far apart, should produce two groups
        let old = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let new = vec![99, 2, 3, 4, 5, 6, 7, 8, 9, 99];
        assert_eq!(
            grouped_opcodes(&old, &new, 3),
            vec![
                vec![
                    OpCode::new(Tag::Replace, 0..1, 0..1),
                    OpCode::new(Tag::Equal, 1..4, 1..4),
                ],
                vec![
                    OpCode::new(Tag::Equal, 6..9, 6..9),
                    OpCode::new(Tag::Replace, 9..10, 9..10),
                ],
            ]
        );
    }

    #[test]
    fn test_large_context_single_group() {
        let old = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let new = vec![99, 2, 3, 4, 5, 6, 7, 8, 9, 99];
        assert_eq!(
            grouped_opcodes(&old, &new, 10_000),
            vec![vec![
                OpCode::new(Tag::Replace, 0..1, 0..1),
                OpCode::new(Tag::Equal, 1..9, 1..9),
                OpCode::new(Tag::Replace, 9..10, 9..10),
            ]]
        );
    }

    #[test]
    fn test_zero_context() {
        let old = vec![1, 2, 3, 4, 5];
        let new = vec![1, 2, 99, 4, 5];
        assert_eq!(
            grouped_opcodes(&old, &new, 0),
            vec![vec![OpCode::new(Tag::Replace, 2..3, 2..3)]]
        );
    }

    #[test]
    fn test_context_trims_edges() {
        let old = vec![1, 2, 3, 4, 5, 6, 7];
        let new = vec![1, 2, 3, 99, 5, 6, 7];
        assert_eq!(
            grouped_opcodes(&old, &new, 1),
            vec![vec![
                OpCode::new(Tag::Equal, 2..3, 2..3),
                OpCode::new(Tag::Replace, 3..4, 3..4),
                OpCode::new(Tag::Equal, 4..5, 4..5),
            ]]
        );
    }

    #[test]
    fn test_no_changes() {
        let old = vec![1, 2, 3, 4, 5];
        assert!(grouped_opcodes(&old, &old, 3).is_empty());
        assert!(grouped_opcodes::<u8>(&[], &[], 3).is_empty());
    }
}
