//! Two-pass assembler: pass 1 lays out instructions from the address just
//! past the bootstrap pointer and records label addresses; pass 2 resolves
//! references and emits the image. The `main` label is the entry point.

use std::collections::HashMap;

use furst_common::{ImageBuilder, Opcode, Operand, TypeCode, WORD_SIZE};

use crate::error::AsmError;
use crate::lexer::{tokenize_line, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
enum OperandValue {
    Word(u32),
    Label { name: String, line: usize },
    Code(TypeCode),
}

#[derive(Debug)]
struct Statement {
    opcode: Opcode,
    operands: Vec<OperandValue>,
}

fn token_text(token: &Token) -> String {
    match token {
        Token::Ident(s) => s.clone(),
        Token::Number(n) => n.to_string(),
        Token::LabelDef(name) => format!("{name}:"),
        Token::LabelRef(name) => format!("@{name}"),
    }
}

fn convert_operand(shape: Operand, token: &Token, line: usize) -> Result<OperandValue, AsmError> {
    match (shape, token) {
        (Operand::Word, Token::Number(n)) => {
            if *n < -(1i64 << 31) || *n > u32::MAX as i64 {
                return Err(AsmError::OperandRange { line, value: *n });
            }
            Ok(OperandValue::Word(*n as u32))
        }
        (Operand::Word, Token::LabelRef(name)) => Ok(OperandValue::Label {
            name: name.clone(),
            line,
        }),
        (Operand::TypeCode, Token::Ident(name)) => TypeCode::from_name(name)
            .map(OperandValue::Code)
            .ok_or_else(|| AsmError::UnknownTypeCode {
                line,
                token: name.clone(),
            }),
        (Operand::TypeCode, Token::Number(n)) => u8::try_from(*n)
            .ok()
            .and_then(|byte| TypeCode::try_from(byte).ok())
            .map(OperandValue::Code)
            .ok_or_else(|| AsmError::UnknownTypeCode {
                line,
                token: n.to_string(),
            }),
        (_, other) => Err(AsmError::UnexpectedToken {
            line,
            token: token_text(other),
        }),
    }
}

/// Assemble text into a binary image.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn assemble(text: &str) -> Result<Vec<u8>, AsmError> {
    let mut labels: HashMap<String, u32> = HashMap::new();
    let mut statements = Vec::new();
    let mut addr = WORD_SIZE;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        let mut rest = tokens.as_slice();

        // Leading label definitions bind to the next instruction address.
        while let Some(Token::LabelDef(name)) = rest.first() {
            if labels.insert(name.clone(), addr).is_some() {
                return Err(AsmError::DuplicateLabel {
                    line: line_num,
                    label: name.clone(),
                });
            }
            rest = &rest[1..];
        }

        let Some(first) = rest.first() else { continue };
        let mnemonic = match first {
            Token::Ident(m) => m,
            other => {
                return Err(AsmError::UnexpectedToken {
                    line: line_num,
                    token: token_text(other),
                })
            }
        };
        let opcode =
            Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
                line: line_num,
                token: mnemonic.clone(),
            })?;

        let shapes = opcode.operands();
        let args = &rest[1..];
        if args.len() < shapes.len() {
            return Err(AsmError::MissingOperand {
                line: line_num,
                mnemonic: opcode.mnemonic(),
                expected: shapes.len(),
            });
        }
        if args.len() > shapes.len() {
            return Err(AsmError::ExtraOperand {
                line: line_num,
                token: token_text(&args[shapes.len()]),
            });
        }

        let mut operands = Vec::with_capacity(shapes.len());
        for (shape, token) in shapes.iter().zip(args) {
            operands.push(convert_operand(*shape, token, line_num)?);
        }

        addr += opcode.width();
        statements.push(Statement { opcode, operands });
    }

    let entry = *labels.get("main").ok_or(AsmError::MissingMain)?;

    let mut b = ImageBuilder::new();
    for stmt in &statements {
        b.op(stmt.opcode);
        for operand in &stmt.operands {
            match operand {
                OperandValue::Word(w) => {
                    b.word(*w);
                }
                OperandValue::Label { name, line } => {
                    let target = *labels.get(name).ok_or_else(|| AsmError::UnknownLabel {
                        line: *line,
                        label: name.clone(),
                    })?;
                    b.word(target);
                }
                OperandValue::Code(code) => {
                    b.byte(*code as u8);
                }
            }
        }
    }
    Ok(b.finish(entry))
}
