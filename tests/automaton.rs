//! End-to-end scenarios over a small romaji rule set (a subset of the
//! standard Google IME romanization table).

use lex_automaton::entry::Entry;
use lex_automaton::rule::{default_direct_inputtable, Rule};
use lex_automaton::build_automaton;

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

#[test]
fn ka_via_k_a() {
    let rule = sample_rule();
    let mut a = build_automaton(&rule, "か").unwrap();
    assert_eq!(a.outputted(), "");
    assert!(a.input("k").succeeded);
    assert!(!a.finished());
    assert!(a.input("a").succeeded);
    assert_eq!(a.outputted(), "か");
    assert!(a.finished());
}

#[test]
fn ka_via_c_a() {
    let rule = sample_rule();
    let mut a = build_automaton(&rule, "か").unwrap();
    assert!(a.input("c").succeeded);
    assert!(a.input("a").succeeded);
    assert_eq!(a.outputted(), "か");
    assert!(a.finished());
}

#[test]
fn ka_rejects_x() {
    let rule = sample_rule();
    let mut a = build_automaton(&rule, "か").unwrap();
    let result = a.input("x");
    assert!(!result.succeeded);
    assert_eq!(a.outputted(), "");
    assert!(!a.finished());
}

#[test]
fn sokuon_chi_via_t_t_i() {
    let rule = sample_rule();
    let mut a = build_automaton(&rule, "っち").unwrap();
    assert!(a.input("t").succeeded);
    assert_eq!(a.outputted(), "");
    assert!(a.input("t").succeeded);
    assert_eq!(a.outputted(), "っ");
    assert!(a.input("i").succeeded);
    assert_eq!(a.outputted(), "っち");
    assert!(a.finished());
}

#[test]
fn sokuon_chi_via_c_c_h_i() {
    let rule = sample_rule();
    let mut a = build_automaton(&rule, "っち").unwrap();
    assert!(a.input("c").succeeded);
    assert_eq!(a.outputted(), "");
    assert!(a.input("c").succeeded);
    assert_eq!(a.outputted(), "っ");
    assert!(a.input("h").succeeded);
    assert_eq!(a.outputted(), "っ");
    assert!(a.input("i").succeeded);
    assert_eq!(a.outputted(), "っち");
    assert!(a.finished());
}

#[test]
fn sa_via_s_a() {
    let rule = sample_rule();
    let mut a = build_automaton(&rule, "さ").unwrap();
    assert!(a.input("s").succeeded);
    assert!(a.input("a").succeeded);
    assert_eq!(a.outputted(), "さ");
    assert!(a.finished());
}

#[test]
fn reset_returns_to_initial_observable_state() {
    let rule = sample_rule();
    let mut a = build_automaton(&rule, "か").unwrap();
    a.input("k");
    a.input("a");
    assert!(a.finished());
    a.reset();
    assert_eq!(a.outputted(), "");
    assert_eq!(a.inputted(), "");
    assert!(!a.finished());
}

#[test]
fn test_is_pure_and_repeatable() {
    let rule = sample_rule();
    let a = build_automaton(&rule, "か").unwrap();
    let first = a.test("k");
    let second = a.test("k");
    assert_eq!(first.succeeded, second.succeeded);
    assert_eq!(
        first.passed_entries.len(),
        second.passed_entries.len()
    );
    // test() never mutates: a fresh test("k") after calling it once still succeeds.
    assert!(a.test("k").succeeded);
}

#[test]
fn chunking_does_not_affect_final_outcome() {
    let rule = sample_rule();

    let mut one_at_a_time = build_automaton(&rule, "っち").unwrap();
    for ch in "tti".chars() {
        one_at_a_time.input(&ch.to_string());
    }

    let mut as_chunks = build_automaton(&rule, "っち").unwrap();
    as_chunks.input("tt");
    as_chunks.input("i");

    assert_eq!(one_at_a_time.outputted(), as_chunks.outputted());
    assert_eq!(one_at_a_time.inputted(), as_chunks.inputted());
    assert_eq!(one_at_a_time.finished(), as_chunks.finished());
}

#[test]
fn unmatchable_display_string_is_a_build_error() {
    let rule = sample_rule();
    assert!(build_automaton(&rule, "漢").is_err());
}
