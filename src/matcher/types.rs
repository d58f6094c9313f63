use std::ops::Range;

/// Kind of an edit script operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// One operation of an edit script.
/// `old` indexes into the old sequence, `new` into the new one.
/// A `Delete` has an empty `new` range positioned where the deletion happens,
/// an `Insert` has an empty `old` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpCode {
    pub tag: Tag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl OpCode {
    pub fn new(tag: Tag, old: Range<usize>, new: Range<usize>) -> Self {
        OpCode { tag, old, new }
    }

    pub fn is_equal(&self) -> bool {
        self.tag == Tag::Equal
    }
}

/// A run of `size` equal elements starting at `old` and `new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub old: usize,
    pub new: usize,
    pub size: usize,
}
