//! Tokenizer for FURST assembly text.

use crate::error::AsmError;

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A mnemonic or type-code name. Always lowercase.
    Ident(String),
    /// A numeric literal: decimal (optionally negative) or `0x` hex.
    Number(i64),
    /// A label definition, `name:`.
    LabelDef(String),
    /// A label reference, `@name`.
    LabelRef(String),
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    // Strip comment
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        let token = if let Some(name) = word.strip_suffix(':') {
            if name.is_empty() {
                return Err(AsmError::UnexpectedToken {
                    line: line_num,
                    token: word.to_string(),
                });
            }
            Token::LabelDef(name.to_lowercase())
        } else if let Some(name) = word.strip_prefix('@') {
            if name.is_empty() {
                return Err(AsmError::UnexpectedToken {
                    line: line_num,
                    token: word.to_string(),
                });
            }
            Token::LabelRef(name.to_lowercase())
        } else if word.starts_with("0x") || word.starts_with("0X") {
            let value =
                i64::from_str_radix(&word[2..], 16).map_err(|_| AsmError::InvalidNumber {
                    line: line_num,
                    token: word.to_string(),
                })?;
            Token::Number(value)
        } else if word.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
            || (word.starts_with('-') && word.len() > 1)
        {
            let value: i64 = word.parse().map_err(|_| AsmError::InvalidNumber {
                line: line_num,
                token: word.to_string(),
            })?;
            Token::Number(value)
        } else {
            Token::Ident(word.to_lowercase())
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line() {
        assert_eq!(tokenize_line("", 1).unwrap(), vec![]);
    }

    #[test]
    fn comment_only() {
        assert_eq!(tokenize_line("; loop prologue", 1).unwrap(), vec![]);
    }

    #[test]
    fn simple_mnemonic() {
        assert_eq!(
            tokenize_line("add", 1).unwrap(),
            vec![Token::Ident("add".to_string())]
        );
    }

    #[test]
    fn mnemonic_with_comment() {
        assert_eq!(
            tokenize_line("psh 5 ; operand", 1).unwrap(),
            vec![Token::Ident("psh".to_string()), Token::Number(5)]
        );
    }

    #[test]
    fn uppercase_normalized() {
        assert_eq!(
            tokenize_line("PSH", 1).unwrap(),
            vec![Token::Ident("psh".to_string())]
        );
    }

    #[test]
    fn hex_number() {
        assert_eq!(
            tokenize_line("psh 0xFF", 1).unwrap(),
            vec![Token::Ident("psh".to_string()), Token::Number(255)]
        );
    }

    #[test]
    fn negative_number() {
        assert_eq!(
            tokenize_line("psh -5", 1).unwrap(),
            vec![Token::Ident("psh".to_string()), Token::Number(-5)]
        );
    }

    #[test]
    fn label_definition() {
        assert_eq!(
            tokenize_line("main:", 1).unwrap(),
            vec![Token::LabelDef("main".to_string())]
        );
    }

    #[test]
    fn label_definition_with_instruction() {
        assert_eq!(
            tokenize_line("again: inc", 1).unwrap(),
            vec![
                Token::LabelDef("again".to_string()),
                Token::Ident("inc".to_string()),
            ]
        );
    }

    #[test]
    fn label_reference() {
        assert_eq!(
            tokenize_line("jmp @main", 1).unwrap(),
            vec![
                Token::Ident("jmp".to_string()),
                Token::LabelRef("main".to_string()),
            ]
        );
    }

    #[test]
    fn bare_colon_rejected() {
        let err = tokenize_line(":", 2).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnexpectedToken {
                line: 2,
                token: ":".to_string(),
            }
        );
    }

    #[test]
    fn bare_at_rejected() {
        let err = tokenize_line("jmp @", 3).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnexpectedToken {
                line: 3,
                token: "@".to_string(),
            }
        );
    }

    #[test]
    fn invalid_hex_number() {
        let err = tokenize_line("psh 0xZZ", 4).unwrap_err();
        assert_eq!(
            err,
            AsmError::InvalidNumber {
                line: 4,
                token: "0xZZ".to_string(),
            }
        );
    }

    #[test]
    fn oversized_decimal_rejected() {
        let err = tokenize_line("psh 99999999999999999999", 5).unwrap_err();
        assert!(matches!(err, AsmError::InvalidNumber { line: 5, .. }));
    }
}
