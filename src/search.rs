//! Parent search: for a display-string suffix, find every rule entry (or
//! directly-typeable character) that could produce it, given what comes
//! after it.

use std::rc::Rc;

use crate::entry::ParentEntry;
use crate::error::BuildError;
use crate::rule::Rule;
use crate::strutil;

/// One candidate tile: an entry plus, if its `next` field chains into
/// another already-placed entry, the node for that entry.
///
/// Shared via `Rc` because the same chain can be referenced as `child` from
/// many sibling candidates discovered in [`search_parents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryNode {
    pub entry: ParentEntry,
    pub child: Option<Rc<EntryNode>>,
}

impl std::hash::Hash for EntryNode {
    /// Hashes only `entry`, not `child` — two chains with the same head
    /// entry hash identically regardless of what follows. Weaker than a
    /// full structural hash, but still consistent with `Eq`.
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.entry.hash(state);
    }
}

impl EntryNode {
    pub fn leaf(entry: ParentEntry) -> Self {
        Self { entry, child: None }
    }

    /// Total displayed character count of this entry plus its whole child chain.
    pub fn total_length(&self, rule: &Rule) -> usize {
        let mut len = rule.view(self.entry).output().chars().count();
        if let Some(child) = &self.child {
            len += child.total_length(rule);
        }
        len
    }

    /// This node's entry, then its child chain's entries, in tiling order.
    pub fn children(&self) -> Vec<ParentEntry> {
        let mut out = vec![self.entry];
        let mut cur = &self.child;
        while let Some(node) = cur {
            out.push(node.entry);
            cur = &node.child;
        }
        out
    }

    /// Every route of priming entries (dependencies, or an empty route if
    /// this entry has substitutable alternatives) needed before this node's
    /// own entry can be typed. Does not include `self.entry`.
    pub fn flatten_dependencies(&self, rule: &Rule) -> Vec<Vec<ParentEntry>> {
        let mut result = Vec::new();
        backtrack(rule, self.entry, Vec::new(), &mut result);
        result
    }
}

fn backtrack(
    rule: &Rule,
    entry: ParentEntry,
    stack: Vec<ParentEntry>,
    result: &mut Vec<Vec<ParentEntry>>,
) {
    let view = rule.view(entry);
    if view.dependencies().is_empty() || !view.substitutables().is_empty() {
        result.push(stack.clone());
    }
    for &d in view.dependencies() {
        let mut new_stack = stack.clone();
        new_stack.insert(0, ParentEntry::Rule(d));
        backtrack(rule, ParentEntry::Rule(d), new_stack, result);
    }
    for &s in view.substitutables() {
        let mut new_stack = stack.clone();
        new_stack.insert(0, ParentEntry::Rule(s));
        backtrack(rule, ParentEntry::Rule(s), new_stack, result);
    }
}

fn tail_input(rule: &Rule, tail: Option<&Rc<EntryNode>>) -> String {
    tail.map(|t| rule.view(t.entry).input().to_string())
        .unwrap_or_default()
}

fn tail_is_direct_inputtable(rule: &Rule, tail: Option<&Rc<EntryNode>>) -> bool {
    match tail.map(|t| t.entry) {
        None => false,
        Some(ParentEntry::Direct(_)) => true,
        Some(ParentEntry::Rule(id)) => rule.dependent(id).is_direct_inputtable,
    }
}

/// Every entry (or direct character) that, typed next, could produce `text`
/// ending right where `tail` begins.
pub fn search_parents(
    rule: &Rule,
    text: &str,
    tail: Option<&Rc<EntryNode>>,
) -> Result<Vec<EntryNode>, BuildError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut current = Vec::new();
    let tail_input = tail_input(rule, tail);
    let tail_is_direct = tail_is_direct_inputtable(rule, tail);
    let tail_input_prefixes = strutil::prefixes(&tail_input, tail_input.chars().count());
    let text_suffixes = strutil::suffixes(text, rule.max_output_len());

    for s in &text_suffixes {
        for &eid in rule.entries_by_output(s) {
            let dep = rule.dependent(eid);
            if dep.has_only_common_prefix {
                // A common-prefix-only entry can't stand alone as the final
                // tile of the word — unless something still follows it.
                if tail_input.is_empty() {
                    continue;
                }
                // Skip it if gluing this entry's input onto any prefix of
                // the tail's input would itself be a valid, longer entry —
                // that longer entry should be preferred instead.
                if tail_input_prefixes.iter().any(|p| {
                    let combined = format!("{}{}", dep.entry.input, p);
                    rule.entry_by_input(&combined).is_some()
                }) {
                    continue;
                }
            }

            if dep.entry.next.is_empty() {
                current.push(EntryNode::leaf(ParentEntry::Rule(eid)));
            } else if tail_input.starts_with(&dep.entry.next) {
                if !tail_is_direct || rule.allow_direct_next_input() {
                    current.push(EntryNode {
                        entry: ParentEntry::Rule(eid),
                        child: tail.cloned(),
                    });
                }
            }
        }

        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if rule.is_direct_inputtable(ch) {
                current.push(EntryNode::leaf(ParentEntry::Direct(ch)));
            }
        }
    }

    if current.is_empty() {
        return Err(BuildError::NoTiling {
            text: text.to_string(),
            position: text.chars().count(),
        });
    }

    Ok(current)
}
