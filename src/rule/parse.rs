//! Rule file tokenizer.
//!
//! File format (tab-separated, UTF-8, one entry per line):
//!
//! ```text
//! <input>\t<output>          # next = ""
//! <input>\t<output>\t<next>
//! ```

use std::io::BufRead;
use std::path::Path;

use crate::entry::Entry;
use crate::error::RuleParseError;

/// Parse rule file contents (already read into memory) into raw entries.
pub fn parse_entries(reader: impl BufRead) -> Result<Vec<Entry>, RuleParseError> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| RuleParseError::Io {
            path: "<in-memory>".to_string(),
            source,
        })?;
        let line_no = idx + 1;
        let cols: Vec<&str> = line.split('\t').collect();
        let (input, output, next) = match cols.as_slice() {
            [input, output] => (*input, *output, ""),
            [input, output, next] => (*input, *output, *next),
            other => {
                return Err(RuleParseError::WrongColumnCount {
                    line: line_no,
                    found: other.len(),
                })
            }
        };
        if input.is_empty() {
            return Err(RuleParseError::EmptyInput { line: line_no });
        }
        entries.push(Entry::new(input, output, next));
    }
    Ok(entries)
}

/// Parse a rule file from disk.
pub fn parse_file(path: &Path) -> Result<Vec<Entry>, RuleParseError> {
    let file = std::fs::File::open(path).map_err(|source| RuleParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_entries(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_column_line() {
        let entries = parse_entries("ka\tか".as_bytes()).unwrap();
        assert_eq!(entries, vec![Entry::new("ka", "か", "")]);
    }

    #[test]
    fn parses_three_column_line() {
        let entries = parse_entries("tt\tっ\tt".as_bytes()).unwrap();
        assert_eq!(entries, vec![Entry::new("tt", "っ", "t")]);
    }

    #[test]
    fn parses_multiple_lines() {
        let entries = parse_entries("ka\tか\nsa\tさ\n".as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![Entry::new("ka", "か", ""), Entry::new("sa", "さ", "")]
        );
    }

    #[test]
    fn rejects_blank_lines() {
        let err = parse_entries("ka\tか\n\nsa\tさ\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RuleParseError::WrongColumnCount { line: 2, found: 1 }
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse_entries("\tか\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RuleParseError::EmptyInput { line: 1 }));
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = parse_entries("ka\tか\tx\ty\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RuleParseError::WrongColumnCount { line: 1, found: 4 }
        ));
    }
}
