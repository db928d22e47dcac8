//! Rule preprocessing passes (§4.1): dictionary construction, dependency fill,
//! substitutables fill, common-prefix marking.

use std::collections::HashMap;

use crate::entry::{DependentEntry, Entry, EntryId};
use crate::error::RuleValidationError;
use crate::strutil;

pub(crate) struct Dicts {
    pub entries: Vec<DependentEntry>,
    pub input_edict: HashMap<String, EntryId>,
    pub output_edict: HashMap<String, Vec<EntryId>>,
    /// `next -> entries with that next and empty output`. Used only during
    /// preprocessing; dropped once [`fill_dependencies`]/[`fill_substitutables`]
    /// have run.
    pub only_next_edict: HashMap<String, Vec<EntryId>>,
}

/// Step 1: populate `input_edict`, `output_edict` and `only_next_edict`.
///
/// A later entry with an input already seen overwrites the earlier one in
/// `input_edict` unless both `input` and `output` match, in which case
/// construction fails. Entries are never dropped from the arena itself —
/// only from `input_edict`'s addressability.
pub(crate) fn build_dicts(raw: Vec<Entry>) -> Result<Dicts, RuleValidationError> {
    if raw.is_empty() {
        return Err(RuleValidationError::Empty);
    }

    let mut entries = Vec::with_capacity(raw.len());
    let mut input_edict: HashMap<String, EntryId> = HashMap::new();
    let mut output_edict: HashMap<String, Vec<EntryId>> = HashMap::new();
    let mut only_next_edict: HashMap<String, Vec<EntryId>> = HashMap::new();

    for e in raw {
        if e.input.is_empty() {
            return Err(RuleValidationError::EmptyInput {
                output: e.output,
                next: e.next,
            });
        }
        if e.output.is_empty() && e.next.is_empty() {
            return Err(RuleValidationError::NoOutputOrNext { input: e.input });
        }
        if let Some(&existing) = input_edict.get(&e.input) {
            if entries[existing].entry.output == e.output {
                return Err(RuleValidationError::DuplicateEntry {
                    input: e.input,
                    output: e.output,
                });
            }
        }

        let id = entries.len();
        let has_output = !e.output.is_empty();
        let has_next = !e.next.is_empty();
        let output = e.output.clone();
        let next = e.next.clone();
        let input = e.input.clone();

        entries.push(DependentEntry::new(e));
        input_edict.insert(input, id);
        if has_output {
            output_edict.entry(output).or_default().push(id);
        }
        if !has_output && has_next {
            only_next_edict.entry(next).or_default().push(id);
        }
    }

    Ok(Dicts {
        entries,
        input_edict,
        output_edict,
        only_next_edict,
    })
}

/// Step 2: for each entry, walk its input from the end; the first character
/// that isn't directly typeable must be primed by some entry in
/// `only_next_edict`, found by looking up the prefix ending at that character.
pub(crate) fn fill_dependencies(
    entries: &mut [DependentEntry],
    direct_inputtable: &std::collections::HashSet<char>,
    only_next_edict: &HashMap<String, Vec<EntryId>>,
) -> Result<(), RuleValidationError> {
    for id in 0..entries.len() {
        let input = entries[id].entry.input.clone();
        let chars: Vec<char> = input.chars().collect();
        let mut deps = None;
        for i in 1..=chars.len() {
            let ch = chars[chars.len() - i];
            if direct_inputtable.contains(&ch) {
                continue;
            }
            let prefix: String = chars[..chars.len() - i + 1].iter().collect();
            match only_next_edict.get(&prefix) {
                Some(list) => {
                    deps = Some(list.clone());
                    break;
                }
                None => return Err(RuleValidationError::MissingPriming { input }),
            }
        }
        if let Some(deps) = deps {
            entries[id].dependencies = deps;
        }
    }
    Ok(())
}

/// Step 3: for entries with no dependencies, every prefix of the input that
/// appears in `only_next_edict` is an alternative (optional) priming route.
pub(crate) fn fill_substitutables(
    entries: &mut [DependentEntry],
    only_next_edict: &HashMap<String, Vec<EntryId>>,
) {
    for id in 0..entries.len() {
        if !entries[id].dependencies.is_empty() {
            continue;
        }
        let input = entries[id].entry.input.clone();
        for prefix in strutil::prefixes(&input, input.chars().count()) {
            if let Some(list) = only_next_edict.get(&prefix) {
                entries[id].substitutables.extend(list.iter().copied());
            }
        }
    }
}

/// Step 4: mark every entry whose input is a strict prefix of some other
/// entry's input. Such entries can't stand alone as the last tile of a word.
pub(crate) fn fill_common_prefix(
    entries: &mut [DependentEntry],
    input_edict: &HashMap<String, EntryId>,
) {
    let inputs: Vec<(EntryId, String)> = entries
        .iter()
        .enumerate()
        .map(|(id, e)| (id, e.entry.input.clone()))
        .collect();
    for (_, input) in inputs {
        let len = input.chars().count();
        if len == 0 {
            continue;
        }
        for prefix in strutil::prefixes(&input, len - 1) {
            if let Some(&pid) = input_edict.get(&prefix) {
                entries[pid].has_only_common_prefix = true;
            }
        }
    }
}
