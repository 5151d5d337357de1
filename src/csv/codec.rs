//! Single-row CSV parsing and field escaping.
//!
//! The dialect is the one used by the record files in the field: fields are
//! comma separated, quoted fields may use either `'` or `"` with
//! backslash-escaped occurrences of their own quote character, and unquoted
//! fields may not contain quotes or backslashes at all. Implemented as an
//! explicit scanner rather than a regex so the accepted language is easy to
//! audit.

use thiserror::Error;

/// Errors from the CSV scanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty
    #[error("empty input")]
    Empty,

    /// A quoted field was never closed
    #[error("unterminated quoted field starting at byte {0}")]
    UnterminatedQuote(usize),

    /// A backslash with nothing after it
    #[error("dangling escape at end of input")]
    DanglingEscape,

    /// A character that is illegal where it appeared
    #[error("unexpected character {0:?} at byte {1}")]
    UnexpectedChar(char, usize),
}

/// Parse one CSV record into its field values.
///
/// Quoted fields come back with their surrounding quotes removed and escaped
/// quote characters collapsed; other backslash sequences inside quotes are
/// preserved verbatim. Whitespace around field boundaries is stripped. A
/// trailing comma yields one additional empty field.
pub fn parse(text: &str) -> Result<Vec<String>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut chars = text.char_indices().peekable();
    let mut fields = Vec::new();

    loop {
        // Insignificant whitespace before the field. Raw newlines are only
        // legal inside quoted fields.
        while let Some(&(pos, c)) = chars.peek() {
            match c {
                ' ' | '\t' => {
                    chars.next();
                }
                '\n' | '\r' => return Err(ParseError::UnexpectedChar(c, pos)),
                _ => break,
            }
        }

        match chars.peek().copied() {
            Some((pos, quote @ ('\'' | '"'))) => {
                chars.next();
                fields.push(parse_quoted(&mut chars, quote, pos)?);
                // Only whitespace may sit between the closing quote and the
                // next separator.
                while let Some(&(pos, c)) = chars.peek() {
                    match c {
                        ' ' | '\t' => {
                            chars.next();
                        }
                        ',' => break,
                        _ => return Err(ParseError::UnexpectedChar(c, pos)),
                    }
                }
            }
            _ => fields.push(parse_unquoted(&mut chars)?),
        }

        match chars.next() {
            Some((_, ',')) => {
                if chars.peek().is_none()
                    || chars.clone().all(|(_, c)| c == ' ' || c == '\t')
                {
                    // Trailing comma: one more empty field.
                    fields.push(String::new());
                    break;
                }
            }
            None => break,
            Some((pos, c)) => return Err(ParseError::UnexpectedChar(c, pos)),
        }
    }

    // A whitespace-only record has no fields at all.
    if fields.len() == 1 && fields[0].is_empty() && text.trim().is_empty() {
        fields.clear();
    }

    Ok(fields)
}

fn parse_quoted(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    quote: char,
    start: usize,
) -> Result<String, ParseError> {
    let mut value = String::new();

    loop {
        match chars.next() {
            Some((_, c)) if c == quote => return Ok(value),
            Some((_, '\\')) => match chars.next() {
                // Only the field's own quote character is unescaped; any
                // other sequence stays as written.
                Some((_, c)) if c == quote => value.push(c),
                Some((_, c)) => {
                    value.push('\\');
                    value.push(c);
                }
                None => return Err(ParseError::DanglingEscape),
            },
            Some((_, c)) => value.push(c),
            None => return Err(ParseError::UnterminatedQuote(start)),
        }
    }
}

fn parse_unquoted(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<String, ParseError> {
    let mut value = String::new();

    while let Some(&(pos, c)) = chars.peek() {
        match c {
            ',' => break,
            '\'' | '"' | '\\' => return Err(ParseError::UnexpectedChar(c, pos)),
            '\n' | '\r' => return Err(ParseError::UnexpectedChar(c, pos)),
            _ => {
                value.push(c);
                chars.next();
            }
        }
    }

    // Leading whitespace was consumed by the caller; drop the trailing run.
    Ok(value.trim_end_matches([' ', '\t']).to_string())
}

/// Escape a field value for inclusion in a record.
///
/// `None` becomes the empty quoted field `""`. Values containing a comma,
/// double quote or newline are wrapped in double quotes with interior quotes
/// doubled; everything else passes through unchanged. Numeric fields are
/// written as plain decimal strings and never go through this function.
pub fn escape_field(value: Option<&str>) -> String {
    let Some(value) = value else {
        return "\"\"".to_string();
    };

    if value.contains(',') || value.contains('"') || value.contains('\n') {
        return format!("\"{}\"", value.replace('"', "\"\""));
    }

    if value.is_empty() {
        return "\"\"".to_string();
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_fields() {
        assert_eq!(
            parse("254,3,254-R3").unwrap(),
            vec!["254", "3", "254-R3"]
        );
    }

    #[test]
    fn test_parse_empty_middle_field() {
        assert_eq!(parse("a,,c").unwrap(), vec!["a", "", "c"]);
    }

    #[test]
    fn test_parse_trailing_comma_appends_empty_field() {
        assert_eq!(parse("a,b,").unwrap(), vec!["a", "b", ""]);
        assert_eq!(parse("a,b,  ").unwrap(), vec!["a", "b", ""]);
    }

    #[test]
    fn test_parse_quoted_field_with_comma() {
        assert_eq!(
            parse("a,\"b,c\",d").unwrap(),
            vec!["a", "b,c", "d"]
        );
    }

    #[test]
    fn test_parse_single_quoted_field() {
        assert_eq!(
            parse("a,'b,c',d").unwrap(),
            vec!["a", "b,c", "d"]
        );
    }

    #[test]
    fn test_parse_escaped_own_quote() {
        assert_eq!(parse(r"'it\'s fine'").unwrap(), vec!["it's fine"]);
        assert_eq!(parse(r#""say \"hi\"""#).unwrap(), vec!["say \"hi\""]);
    }

    #[test]
    fn test_parse_preserves_foreign_escapes() {
        // Inside double quotes only \" collapses; \n stays two characters.
        assert_eq!(parse(r#""a\nb""#).unwrap(), vec![r"a\nb"]);
    }

    #[test]
    fn test_parse_quoted_field_may_contain_newline() {
        assert_eq!(parse("\"a\nb\",c").unwrap(), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_parse_strips_boundary_whitespace() {
        assert_eq!(parse("  a , b c ,d").unwrap(), vec!["a", "b c", "d"]);
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(parse(""), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_whitespace_only_has_no_fields() {
        assert_eq!(parse("   ").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_parse_rejects_quote_in_unquoted_field() {
        assert!(parse("ab\"c,d").is_err());
        assert!(parse("ab'c").is_err());
    }

    #[test]
    fn test_parse_rejects_unterminated_quote() {
        assert!(matches!(
            parse("\"abc"),
            Err(ParseError::UnterminatedQuote(0))
        ));
    }

    #[test]
    fn test_parse_rejects_junk_after_closing_quote() {
        assert!(parse("'a'b,c").is_err());
    }

    #[test]
    fn test_parse_rejects_raw_newline_outside_quotes() {
        assert!(parse("a,b\nc").is_err());
    }

    #[test]
    fn test_parse_lone_comma_is_two_empty_fields() {
        assert_eq!(parse(",").unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_escape_none_and_empty() {
        assert_eq!(escape_field(None), "\"\"");
        assert_eq!(escape_field(Some("")), "\"\"");
    }

    #[test]
    fn test_escape_plain_value_unchanged() {
        assert_eq!(escape_field(Some("robot was fast")), "robot was fast");
    }

    #[test]
    fn test_escape_comma_wraps_in_double_quotes() {
        let escaped = escape_field(Some("slow, then fast"));
        assert!(escaped.starts_with('"') && escaped.ends_with('"'));
        assert_eq!(escaped, "\"slow, then fast\"");
    }

    #[test]
    fn test_escape_doubles_interior_quotes() {
        assert_eq!(escape_field(Some("a \"b\" c")), "\"a \"\"b\"\" c\"");
    }

    #[test]
    fn test_round_trip_for_app_producible_values() {
        let fields = ["254", "3", "254-R3", "R1", "R", "Ann", "good auto"];
        let joined = fields
            .iter()
            .map(|f| escape_field(Some(f)))
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(parse(&joined).unwrap(), fields.to_vec());
    }

    #[test]
    fn test_round_trip_comma_value() {
        let joined = escape_field(Some("slow, then fast"));
        assert_eq!(parse(&joined).unwrap(), vec!["slow, then fast"]);
    }
}
