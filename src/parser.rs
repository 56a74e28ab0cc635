use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{anychar, hex_digit1},
    combinator::{all_consuming, map, map_res, opt, value},
    multi::fold_many0,
    sequence::preceded,
    Finish, IResult,
};

use crate::error::{Error, Result};

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Parse exactly two hex digits as a byte
pub fn hex_pair(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), |digits| {
        u8::from_str_radix(digits, 16)
    })(input)
}

/// Parse a byte written in hex with an optional `0x` prefix
///
/// Leading zeros are allowed, the value must fit in a byte.
pub fn hex_token(input: &str) -> IResult<&str, u8> {
    preceded(
        opt(tag_no_case("0x")),
        map_res(hex_digit1, |digits| u8::from_str_radix(digits, 16)),
    )(input)
}

/// Collect every run of two hex digits, skipping anything else
///
/// A lone digit next to a non-hex character is dropped.
pub fn hex_scan(input: &str) -> IResult<&str, Vec<u8>> {
    fold_many0(
        alt((map(hex_pair, Some), value(None, anychar))),
        Vec::new,
        |mut bytes, byte| {
            if let Some(byte) = byte {
                bytes.push(byte);
            }
            bytes
        },
    )(input)
}

/// Format tolerant hex input, `66 C3 30`, `66C330` and `66-c3-30` all give the same bytes
pub fn scan_hex_bytes(input: &str) -> Vec<u8> {
    match hex_scan(input).finish() {
        Ok((_, bytes)) => bytes,
        Err(_) => Vec::new(),
    }
}

/// Strict whitespace separated hex bytes
///
/// # Errors
///
/// [`Error::InvalidHexByte`] for the first token that is not a byte.
pub fn hex_tokens(input: &str) -> Result<Vec<u8>> {
    input
        .split_whitespace()
        .map(|token| {
            all_consuming(hex_token)(token)
                .finish()
                .map(|(_, byte)| byte)
                .map_err(|_| Error::InvalidHexByte {
                    token: token.to_owned(),
                })
        })
        .collect()
}

/// Scan hex text into a fixed size array
///
/// # Errors
///
/// [`Error::LengthMismatch`] when the text does not hold exactly `N` bytes.
pub fn hex_array<const N: usize>(input: &str) -> Result<[u8; N]> {
    let bytes = scan_hex_bytes(input);
    bytes.as_slice().try_into().map_err(|_| Error::LengthMismatch {
        expected: N,
        actual: bytes.len(),
    })
}

/// Uppercase hex pairs separated by a space
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
