//! Drives a small in-memory rule set through a display string from the
//! command line, printing progress after each keystroke.
//!
//! ```text
//! cargo run --example drive -- こんにちは
//! ```

use lex_automaton::entry::Entry;
use lex_automaton::rule::{default_direct_inputtable, Rule};
use lex_automaton::{build_automaton, Automaton};

fn sample_rule() -> Rule {
    Rule::from_entries(
        vec![
            Entry::new("ka", "か", ""),
            Entry::new("ki", "き", ""),
            Entry::new("n", "ん", ""),
            Entry::new("nn", "ん", ""),
            Entry::new("ni", "に", ""),
            Entry::new("i", "い", ""),
            Entry::new("ha", "は", ""),
            Entry::new("ko", "こ", ""),
            Entry::new("tt", "っ", "t"),
            Entry::new("ta", "た", ""),
            Entry::new("chi", "ち", ""),
            Entry::new("ti", "ち", ""),
        ],
        default_direct_inputtable(),
    )
    .expect("sample rule set is well-formed")
}

fn main() {
    let text = std::env::args().nth(1).unwrap_or_else(|| "こんにちは".to_string());
    let rule = sample_rule();
    let automaton = build_automaton(&rule, &text);
    let mut automaton: Automaton = match automaton {
        Ok(a) => a,
        Err(e) => {
            eprintln!("cannot build automaton for {text:?}: {e}");
            std::process::exit(1);
        }
    };

    println!("typing {text:?}, try keys one at a time (blank line to quit):");
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        println!("inputted={:?} outputted={:?} finished={}", automaton.inputted(), automaton.outputted(), automaton.finished());
        if automaton.finished() {
            break;
        }
        line.clear();
        if stdin.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let key = line.trim_end_matches('\n');
        if key.is_empty() {
            break;
        }
        let result = automaton.input(key);
        if !result.succeeded {
            println!("rejected: {key:?}");
        }
    }
}
