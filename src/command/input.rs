//! Tokenizing raw input lines

use super::error::CommandError;

/// A raw line split into its keyword and argument text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// First whitespace-delimited word
    pub keyword: String,
    /// Remaining words joined by single spaces
    pub rest: String,
}

/// Splits a line into keyword and arguments
pub fn split_line(line: &str) -> Result<ParsedLine, CommandError> {
    let mut words = line.split_whitespace();
    let keyword = words.next().ok_or(CommandError::EmptyInput)?;

    Ok(ParsedLine {
        keyword: keyword.to_string(),
        rest: words.collect::<Vec<_>>().join(" "),
    })
}

/// Parses a 1-based task number
///
/// Range is checked by the task list, not here.
pub fn parse_index(text: &str) -> Result<usize, CommandError> {
    let text = text.trim();
    text.parse::<usize>()
        .map_err(|_| CommandError::NotANumber(text.to_string()))
}

/// Splits off the first word, returning it and the trimmed remainder
pub fn split_first_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_keyword_and_rest() {
        let parsed = split_line("  deadline   buy  milk /by 2024-01-01 ").unwrap();
        assert_eq!(parsed.keyword, "deadline");
        assert_eq!(parsed.rest, "buy milk /by 2024-01-01");
    }

    #[test]
    fn keyword_only() {
        let parsed = split_line("list").unwrap();
        assert_eq!(parsed.keyword, "list");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn blank_line_is_empty_input() {
        assert!(matches!(split_line("   "), Err(CommandError::EmptyInput)));
        assert!(matches!(split_line(""), Err(CommandError::EmptyInput)));
    }

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_index(" 3 ").unwrap(), 3);
        assert_eq!(parse_index("0").unwrap(), 0);
        assert!(matches!(parse_index("three"), Err(CommandError::NotANumber(s)) if s == "three"));
        assert!(matches!(parse_index("-1"), Err(CommandError::NotANumber(_))));
        assert!(matches!(parse_index(""), Err(CommandError::NotANumber(_))));
    }

    #[test]
    fn splits_first_word() {
        assert_eq!(split_first_word("2 new text here"), ("2", "new text here"));
        assert_eq!(split_first_word("2"), ("2", ""));
        assert_eq!(split_first_word(""), ("", ""));
    }
}
