//! Property-based invariants from the testable-properties list: determinism
//! under arbitrary keystroke chunking, and purity of `test`.

use proptest::prelude::*;

use lex_automaton::build_automaton;
use lex_automaton::entry::Entry;
use lex_automaton::rule::{default_direct_inputtable, Rule};

fn sample_rule() -> Rule {
    Rule::from_entries(
        vec![
            Entry::new("ka", "か", ""),
            Entry::new("ca", "か", ""),
            Entry::new("sa", "さ", ""),
            Entry::new("tt", "っ", "t"),
            Entry::new("cc", "っ", "c"),
            Entry::new("ti", "ち", ""),
            Entry::new("chi", "ち", ""),
        ],
        default_direct_inputtable(),
    )
    .unwrap()
}

/// (display text, a keystroke string known to fully type it).
fn arb_case() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("か", "ka")),
        Just(("か", "ca")),
        Just(("さ", "sa")),
        Just(("っち", "tti")),
        Just(("っち", "cchi")),
    ]
}

proptest! {
    #[test]
    fn chunking_never_changes_final_outcome((text, keys) in arb_case(), seed in any::<u32>()) {
        let rule = sample_rule();
        let baseline = {
            let mut a = build_automaton(&rule, text).unwrap();
            for ch in keys.chars() {
                a.input(&ch.to_string());
            }
            (a.outputted(), a.inputted(), a.finished())
        };

        // Deterministically vary the chunking using `seed` without calling
        // into proptest's own Vec<bool> strategy twice per case.
        let chars: Vec<char> = keys.chars().collect();
        let mut chunks = vec![String::new()];
        chunks.last_mut().unwrap().push(chars[0]);
        for (i, ch) in chars.iter().enumerate().skip(1) {
            if (seed >> (i % 32)) & 1 == 1 {
                chunks.push(String::new());
            }
            chunks.last_mut().unwrap().push(*ch);
        }

        let mut a = build_automaton(&rule, text).unwrap();
        for chunk in &chunks {
            a.input(chunk);
        }

        prop_assert_eq!(a.outputted(), baseline.0);
        prop_assert_eq!(a.inputted(), baseline.1);
        prop_assert_eq!(a.finished(), baseline.2);
        prop_assert!(a.finished());
        prop_assert_eq!(a.outputted(), text);
    }

    #[test]
    fn test_does_not_mutate_state((text, keys) in arb_case()) {
        let rule = sample_rule();
        let a = build_automaton(&rule, text).unwrap();
        let first_key = keys.chars().next().unwrap().to_string();
        let before = (a.outputted(), a.inputted(), a.finished());
        let r1 = a.test(&first_key);
        let r2 = a.test(&first_key);
        prop_assert_eq!(r1.succeeded, r2.succeeded);
        prop_assert_eq!(r1.passed_entries.len(), r2.passed_entries.len());
        let after = (a.outputted(), a.inputted(), a.finished());
        prop_assert_eq!(before, after);
    }
}
