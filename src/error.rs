//! Construction-time error types.
//!
//! Runtime keystroke rejection is not an error — see [`crate::automaton::InputResult`].

/// Errors raised while parsing a rule file into raw entries.
#[derive(Debug, thiserror::Error)]
pub enum RuleParseError {
    #[error("line {line}: expected 2 or 3 tab-separated columns, found {found}")]
    WrongColumnCount { line: usize, found: usize },
    #[error("line {line}: input column is empty")]
    EmptyInput { line: usize },
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while validating/preprocessing a set of entries into a [`crate::rule::Rule`].
#[derive(Debug, thiserror::Error)]
pub enum RuleValidationError {
    #[error("entry has empty input (output={output:?}, next={next:?})")]
    EmptyInput { output: String, next: String },
    #[error("entry {input:?} has neither output nor next")]
    NoOutputOrNext { input: String },
    #[error("duplicate entry: input={input:?} output={output:?}")]
    DuplicateEntry { input: String, output: String },
    #[error("entry {input:?} contains a non-direct-inputtable character with no priming entry to supply it")]
    MissingPriming { input: String },
    #[error("rule set contains no entries")]
    Empty,
}

/// Errors raised while loading a [`crate::rule::Rule`] straight from a file.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error(transparent)]
    Parse(#[from] RuleParseError),
    #[error(transparent)]
    Validation(#[from] RuleValidationError),
}

/// Errors raised while tiling a display string over a [`crate::rule::Rule`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no rule entry (direct or indirect) produces the text ending at position {position} of {text:?}")]
    NoTiling { text: String, position: usize },
}
