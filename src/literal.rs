//! 指令字字面量解析
//!
//! 按 C `strtol(s, NULL, 0)` 的规则确定进制：
//! `0x` 十六进制，前导 `0` 八进制，其余十进制；额外接受 `0b` / `0o` 前缀。
//! 与 `strtol` 不同，非法字符会报错而不是静默得到 0。

use std::num::IntErrorKind;

use thiserror::Error;

/// 字面量解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("empty literal")]
    Empty,
    #[error("invalid digit in literal '{literal}'")]
    InvalidDigit { literal: String },
    #[error("literal '{literal}' does not fit in 32 bits")]
    OutOfRange { literal: String },
}

/// 把一行文本解析为 32-bit 指令字
///
/// 负数按 `i32` 的补码解释，例如 `-1` 得到 `0xFFFF_FFFF`。
pub fn parse_word(text: &str) -> Result<u32, LiteralError> {
    let literal = text.trim();
    if literal.is_empty() {
        return Err(LiteralError::Empty);
    }

    let (negative, unsigned) = match literal.as_bytes()[0] {
        b'-' => (true, &literal[1..]),
        b'+' => (false, &literal[1..]),
        _ => (false, literal),
    };
    let (radix, digits) = split_radix(unsigned);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(LiteralError::InvalidDigit { literal: literal.to_string() });
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => LiteralError::OutOfRange { literal: literal.to_string() },
        _ => LiteralError::InvalidDigit { literal: literal.to_string() },
    })?;

    if negative {
        if magnitude > 1 << 31 {
            return Err(LiteralError::OutOfRange { literal: literal.to_string() });
        }
        Ok((magnitude as u32).wrapping_neg())
    } else {
        u32::try_from(magnitude).map_err(|_| LiteralError::OutOfRange { literal: literal.to_string() })
    }
}

fn split_radix(s: &str) -> (u32, &str) {
    let lower = s.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => (16, &s[2..]),
        Some("0b") => (2, &s[2..]),
        Some("0o") => (8, &s[2..]),
        _ if s.len() > 1 && s.starts_with('0') => (8, &s[1..]),
        _ => (10, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_word("0x80000537"), Ok(0x80000537));
        assert_eq!(parse_word("0XFFFFFFFF"), Ok(u32::MAX));
        assert_eq!(parse_word("  0x13\n"), Ok(0x13));
    }

    #[test]
    fn test_parse_decimal_and_octal() {
        assert_eq!(parse_word("19"), Ok(19));
        assert_eq!(parse_word("0"), Ok(0));
        assert_eq!(parse_word("023"), Ok(0o23));
        assert_eq!(parse_word("0o23"), Ok(0o23));
        assert_eq!(parse_word("0b10011"), Ok(0x13));
    }

    #[test]
    fn test_parse_negative_wraps() {
        assert_eq!(parse_word("-1"), Ok(0xFFFF_FFFF));
        assert_eq!(parse_word("-2147483648"), Ok(0x8000_0000));
        assert!(matches!(parse_word("-2147483649"), Err(LiteralError::OutOfRange { .. })));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(parse_word("0x100000000"), Err(LiteralError::OutOfRange { .. })));
        assert!(matches!(parse_word("4294967296"), Err(LiteralError::OutOfRange { .. })));
        assert!(matches!(
            parse_word("0xFFFFFFFFFFFFFFFFFFFF"),
            Err(LiteralError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_word(""), Err(LiteralError::Empty));
        assert_eq!(parse_word("   "), Err(LiteralError::Empty));
        assert!(matches!(parse_word("exit"), Err(LiteralError::InvalidDigit { .. })));
        assert!(matches!(parse_word("0x"), Err(LiteralError::InvalidDigit { .. })));
        assert!(matches!(parse_word("0x+5"), Err(LiteralError::InvalidDigit { .. })));
        assert!(matches!(parse_word("--1"), Err(LiteralError::InvalidDigit { .. })));
        assert!(matches!(parse_word("09"), Err(LiteralError::InvalidDigit { .. })));
    }
}
