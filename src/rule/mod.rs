//! A preprocessed, frozen romanization rule set.

mod parse;
mod preprocess;

pub use parse::{parse_entries, parse_file};

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::entry::{DependentEntry, Entry, EntryId, EntryView, ParentEntry};
use crate::error::{RuleError, RuleValidationError};

/// The characters a user can type with no priming entry at all.
///
/// Defaults to printable ASCII, since a plain latin letter or digit never
/// needs a priming entry to be typed.
pub fn default_direct_inputtable() -> HashSet<char> {
    (0x20u8..=0x7e).map(|b| b as char).collect()
}

/// A preprocessed set of romanization entries, ready to tile display strings.
///
/// Built in two phases: [`Rule::from_entries`] runs the four preprocessing
/// passes over a mutable arena, then freezes it. Once built, a `Rule` is
/// immutable and `Sync`.
#[derive(Debug, Clone)]
pub struct Rule {
    entries: Vec<DependentEntry>,
    input_edict: HashMap<String, EntryId>,
    output_edict: HashMap<String, Vec<EntryId>>,
    direct_inputtable: HashSet<char>,
    max_input_len: usize,
    max_output_len: usize,
    allow_direct_next_input: bool,
}

impl Rule {
    /// Parse and validate a rule file from disk, using the direct-inputtable
    /// set and `allow_direct_next_input` policy from the global
    /// [`crate::config::config`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let raw = parse::parse_file(path.as_ref())?;
        let cfg = crate::config::config();
        let rule = Self::from_entries(raw, cfg.direct_inputtable.clone())?
            .with_allow_direct_next_input(cfg.allow_direct_next_input);
        Ok(rule)
    }

    /// Validate and preprocess a raw entry list into a frozen `Rule`.
    pub fn from_entries(
        raw: Vec<Entry>,
        direct_inputtable: HashSet<char>,
    ) -> Result<Self, RuleValidationError> {
        let preprocess::Dicts {
            mut entries,
            input_edict,
            output_edict,
            only_next_edict,
        } = preprocess::build_dicts(raw)?;

        preprocess::fill_dependencies(&mut entries, &direct_inputtable, &only_next_edict)?;
        preprocess::fill_substitutables(&mut entries, &only_next_edict);
        preprocess::fill_common_prefix(&mut entries, &input_edict);

        let max_input_len = entries
            .iter()
            .map(|e| e.entry.input.chars().count())
            .max()
            .unwrap_or(0);
        let max_output_len = entries
            .iter()
            .map(|e| e.entry.output.chars().count())
            .max()
            .unwrap_or(0);

        tracing::debug!(
            entry_count = entries.len(),
            max_input_len,
            max_output_len,
            "rule preprocessing complete"
        );

        Ok(Self {
            entries,
            input_edict,
            output_edict,
            direct_inputtable,
            max_input_len,
            max_output_len,
            allow_direct_next_input: false,
        })
    }

    /// When false (the default), a rule entry can only chain through another
    /// entry's `next` field if that other entry is itself rule-derived — a
    /// directly-typeable tail character never counts as having primed a
    /// `next`. Set true to relax that and let direct input satisfy `next`
    /// too.
    pub fn with_allow_direct_next_input(mut self, allow: bool) -> Self {
        self.allow_direct_next_input = allow;
        self
    }

    pub fn allow_direct_next_input(&self) -> bool {
        self.allow_direct_next_input
    }

    /// Longest `input` of any entry, in characters.
    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    /// Longest `output` of any entry, in characters.
    pub fn max_output_len(&self) -> usize {
        self.max_output_len
    }

    pub fn is_direct_inputtable(&self, ch: char) -> bool {
        self.direct_inputtable.contains(&ch)
    }

    /// Every entry whose `output` equals `output`, by [`EntryId`].
    pub fn entries_by_output(&self, output: &str) -> &[EntryId] {
        self.output_edict
            .get(output)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The entry currently addressable by this exact `input`, if any.
    pub fn entry_by_input(&self, input: &str) -> Option<EntryId> {
        self.input_edict.get(input).copied()
    }

    pub(crate) fn dependent(&self, id: EntryId) -> &DependentEntry {
        &self.entries[id]
    }

    pub fn entry(&self, id: EntryId) -> &Entry {
        &self.entries[id].entry
    }

    /// Resolve a [`ParentEntry`] into a borrowed view of its fields.
    ///
    /// A [`ParentEntry::Direct`] is synthesized on the fly: it has no
    /// dependencies or substitutables of its own, its `input`/`output` are
    /// both the single character, and `is_direct_inputtable` is always true.
    pub fn view(&self, pe: ParentEntry) -> ViewOrOwned<'_> {
        match pe {
            ParentEntry::Rule(id) => {
                let e = &self.entries[id];
                ViewOrOwned::Borrowed(EntryView {
                    entry: &e.entry,
                    dependencies: &e.dependencies,
                    substitutables: &e.substitutables,
                    has_only_common_prefix: e.has_only_common_prefix,
                    is_direct_inputtable: e.is_direct_inputtable,
                })
            }
            ParentEntry::Direct(ch) => {
                let mut buf = [0u8; 4];
                let s = ch.encode_utf8(&mut buf).to_string();
                ViewOrOwned::Owned(Entry::new(s.clone(), s, ""))
            }
        }
    }
}

/// Either a borrowed view into a rule-derived entry, or an owned synthetic
/// entry standing in for a directly-typeable character.
pub enum ViewOrOwned<'a> {
    Borrowed(EntryView<'a>),
    Owned(Entry),
}

impl<'a> ViewOrOwned<'a> {
    pub fn input(&self) -> &str {
        match self {
            ViewOrOwned::Borrowed(v) => &v.entry.input,
            ViewOrOwned::Owned(e) => &e.input,
        }
    }

    pub fn output(&self) -> &str {
        match self {
            ViewOrOwned::Borrowed(v) => &v.entry.output,
            ViewOrOwned::Owned(e) => &e.output,
        }
    }

    pub fn next(&self) -> &str {
        match self {
            ViewOrOwned::Borrowed(v) => &v.entry.next,
            ViewOrOwned::Owned(e) => &e.next,
        }
    }

    pub fn dependencies(&self) -> &[EntryId] {
        match self {
            ViewOrOwned::Borrowed(v) => v.dependencies,
            ViewOrOwned::Owned(_) => &[],
        }
    }

    pub fn substitutables(&self) -> &[EntryId] {
        match self {
            ViewOrOwned::Borrowed(v) => v.substitutables,
            ViewOrOwned::Owned(_) => &[],
        }
    }

    pub fn has_only_common_prefix(&self) -> bool {
        match self {
            ViewOrOwned::Borrowed(v) => v.has_only_common_prefix,
            ViewOrOwned::Owned(_) => false,
        }
    }

    pub fn to_entry(&self) -> Entry {
        Entry::new(self.input(), self.output(), self.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Rule {
        Rule::from_entries(
            vec![
                Entry::new("ka", "か", ""),
                Entry::new("a", "あ", ""),
                Entry::new("k", "", "k"),
                Entry::new("tt", "っ", "t"),
                Entry::new("ta", "た", ""),
            ],
            default_direct_inputtable(),
        )
        .unwrap()
    }

    #[test]
    fn builds_from_entries() {
        let rule = sample();
        assert!(rule.entry_by_input("ka").is_some());
        assert_eq!(rule.max_input_len(), 2);
    }

    #[test]
    fn empty_rule_set_rejected() {
        let err = Rule::from_entries(vec![], default_direct_inputtable()).unwrap_err();
        assert!(matches!(err, RuleValidationError::Empty));
    }

    #[test]
    fn direct_char_view_synthesizes_identity_entry() {
        let rule = sample();
        let view = rule.view(ParentEntry::Direct('x'));
        assert_eq!(view.input(), "x");
        assert_eq!(view.output(), "x");
        assert!(view.dependencies().is_empty());
    }
}
