//! Decoding of textual key tokens into [`CalcKey`]s
//!
//! | Token                          | Key                                  |
//! |--------------------------------|--------------------------------------|
//! | `+ - * / mod and or xor`       | binary operator                      |
//! | `asr lsr shl rol ror`          | shift / rotate operator              |
//! | `=`                            | perform the pending operation        |
//! | `clear`, `ce`, `back`          | clear all, clear entry, backspace    |
//! | `ms mr mc m+ m-`               | memory keys                          |
//! | `neg not min max`              | bit edit keys                        |
//! | `flip:N`                       | flip bit N                           |
//! | `radix:N`, `bits:N`            | configuration                        |
//! | `signed`, `unsigned`           | configuration                        |
//! | `set:TEXT`                     | replace the active operand           |
//! | anything alphanumeric          | one digit key per character          |
//!
//! Everything after a `#` on a line is a comment.  Digit strings that collide with a key name,
//! like hexadecimal `ce`, have to be split into single digits (`c e`).

use anyhow::{anyhow, Context, Result};
use bitcalc_core::{CalcKey, CalcOp, MemoryOp};

/// Decodes a single token, which may expand to several digit keys
pub fn parse_token(token: &str) -> Result<Vec<CalcKey>> {
    if let Ok(op) = CalcOp::try_from_name(token) {
        return Ok(vec![CalcKey::Operation(op)]);
    }

    let key = match token {
        "=" => CalcKey::Equals,
        "clear" => CalcKey::Clear,
        "ce" => CalcKey::ClearEntry,
        "back" => CalcKey::Backspace,
        "ms" => CalcKey::MemoryStore,
        "mr" => CalcKey::MemoryRecall,
        "mc" => CalcKey::MemoryClear,
        "m+" => CalcKey::MemoryAccumulate(MemoryOp::Add),
        "m-" => CalcKey::MemoryAccumulate(MemoryOp::Sub),
        "neg" => CalcKey::Negate,
        "not" => CalcKey::Not,
        "min" => CalcKey::Min,
        "max" => CalcKey::Max,
        "signed" => CalcKey::SetSigned(true),
        "unsigned" => CalcKey::SetSigned(false),
        _ => return parse_parameterized(token),
    };
    Ok(vec![key])
}

fn parse_parameterized(token: &str) -> Result<Vec<CalcKey>> {
    if let Some((name, arg)) = token.split_once(':') {
        let number =
            || arg.parse::<u32>().with_context(|| format!("invalid argument in \"{token}\""));
        let key = match name {
            "flip" => CalcKey::FlipBit(number()?),
            "radix" => CalcKey::SetRadix(number()?),
            "bits" => CalcKey::SetBitWidth(number()?),
            "set" => CalcKey::SetOperand(arg.to_string()),
            _ => return Err(anyhow!("unknown key \"{token}\"")),
        };
        return Ok(vec![key]);
    }

    if !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(token.chars().map(CalcKey::Digit).collect());
    }
    Err(anyhow!("unknown key \"{token}\""))
}

/// Decodes a line of whitespace separated tokens, ignoring comments
pub fn parse_line(line: &str) -> Result<Vec<CalcKey>> {
    let code = line.split('#').next().unwrap_or_default();
    let mut keys = Vec::new();
    for token in code.split_whitespace() {
        keys.extend(parse_token(token)?);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_win_over_digits() {
        assert_eq!(parse_token("and").unwrap(), vec![CalcKey::Operation(CalcOp::And)]);
        assert_eq!(parse_token("+").unwrap(), vec![CalcKey::Operation(CalcOp::Add)]);
        assert_eq!(
            parse_token("ff").unwrap(),
            vec![CalcKey::Digit('f'), CalcKey::Digit('f')]
        );
    }

    #[test]
    fn parameterized_keys() {
        assert_eq!(parse_token("flip:3").unwrap(), vec![CalcKey::FlipBit(3)]);
        assert_eq!(parse_token("bits:8").unwrap(), vec![CalcKey::SetBitWidth(8)]);
        assert_eq!(parse_token("radix:16").unwrap(), vec![CalcKey::SetRadix(16)]);
        assert_eq!(parse_token("set:-ff").unwrap(), vec![CalcKey::SetOperand("-ff".into())]);
        assert!(parse_token("bits:x").is_err());
        assert!(parse_token("what:1").is_err());
    }

    #[test]
    fn lines_and_comments() {
        let keys = parse_line("3 + 4 * 2 =  # fourteen").unwrap();
        assert_eq!(
            keys,
            vec![
                CalcKey::Digit('3'),
                CalcKey::Operation(CalcOp::Add),
                CalcKey::Digit('4'),
                CalcKey::Operation(CalcOp::Mul),
                CalcKey::Digit('2'),
                CalcKey::Equals,
            ]
        );
        assert!(parse_line("# only a comment").unwrap().is_empty());
        assert!(parse_line("1 ?? 2").is_err());
    }
}
