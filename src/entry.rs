//! Rule entries: the data model for a single row of the romanization table.

/// Index of a [`DependentEntry`] within a [`crate::rule::Rule`]'s entry arena.
pub type EntryId = usize;

/// A single keystroke rule, frozen.
///
/// Exactly one of `output` or `next` is non-empty, and `input` is always
/// non-empty (enforced at construction time). Two entries are the "same"
/// entry iff all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// The keystrokes the user types.
    pub input: String,
    /// The display characters produced.
    pub output: String,
    /// Characters virtually prepended to the next entry's input stream.
    pub next: String,
}

impl Entry {
    pub fn new(input: impl Into<String>, output: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            next: next.into(),
        }
    }
}

/// An [`Entry`] carrying the results of rule preprocessing.
///
/// Mutable during preprocessing (the four passes in [`crate::rule::preprocess`]
/// mutate `dependencies`, `substitutables` and `has_only_common_prefix` in
/// place); immutable afterwards. Dependency/substitutable lists reference
/// sibling entries by [`EntryId`] rather than by pointer, so that one pass can
/// point at an entry whose own fields haven't been filled in yet.
#[derive(Debug, Clone)]
pub struct DependentEntry {
    pub entry: Entry,
    /// Entries that must be typed first to prime this one's first characters.
    pub dependencies: Vec<EntryId>,
    /// Alternative entries that could prime this one instead of `dependencies`.
    pub substitutables: Vec<EntryId>,
    /// This entry's input is a strict prefix of some other entry's input.
    pub has_only_common_prefix: bool,
    /// Synthetic entry standing in for a directly-typeable character.
    pub is_direct_inputtable: bool,
}

impl DependentEntry {
    pub(crate) fn new(entry: Entry) -> Self {
        Self {
            entry,
            dependencies: Vec::new(),
            substitutables: Vec::new(),
            has_only_common_prefix: false,
            is_direct_inputtable: false,
        }
    }
}

/// A reference to either a rule-file-derived entry, or a synthetic identity
/// entry standing in for a character the user may type literally.
///
/// Synthetic direct-input entries are created ad hoc during parent search and
/// are never registered in a [`crate::rule::Rule`]'s lookup tables, so they
/// can't be addressed by [`EntryId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentEntry {
    Rule(EntryId),
    Direct(char),
}

/// Read-only view over a [`ParentEntry`]'s fields, resolved against a rule.
pub struct EntryView<'a> {
    pub entry: &'a Entry,
    pub dependencies: &'a [EntryId],
    pub substitutables: &'a [EntryId],
    pub has_only_common_prefix: bool,
    pub is_direct_inputtable: bool,
}
