/*  Copyright (C) 2012-2023 by László Nagy
    This file is part of Bear.

    Bear is a tool to generate compilation database for clang tooling.

    Bear is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    Bear is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Conversion of a number between its decimal and hexadecimal form.

use std::fmt;

use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, multispace0, one_of};
use nom::combinator::{all_consuming, map, map_opt, opt};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;
use num_bigint::{BigInt, Sign};
use thiserror::Error;

const HEXADECIMAL_PREFIX: &str = "0x";

/// This error type encompasses any error that can be returned by this module.
///
/// The messages are meant to be shown to the user as they are.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Usage: hex_convert <number>")]
    Usage,
    #[error("Invalid input. Please provide a valid decimal or hexadecimal number.")]
    Parse(String),
}

/// The result of a successful conversion.
///
/// Numbers are not limited in size.
#[derive(Debug, PartialEq, Eq)]
pub enum Conversion {
    FromHexadecimal { input: String, value: BigInt },
    FromDecimal { value: BigInt },
}

impl Conversion {
    pub fn value(&self) -> &BigInt {
        match self {
            Conversion::FromHexadecimal { value, .. } => value,
            Conversion::FromDecimal { value } => value,
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::FromHexadecimal { input, value } => {
                writeln!(f, "Hexadecimal: {}", input)?;
                write!(f, "Decimal: {}", value)
            }
            Conversion::FromDecimal { value } => {
                writeln!(f, "Decimal: {}", value)?;
                write!(f, "Hexadecimal: {}", to_hexadecimal(value))
            }
        }
    }
}

/// Convert the only element of the command line arguments.
pub fn run(arguments: &[String]) -> Result<Conversion, Error> {
    match arguments {
        [input] => convert(input),
        _ => Err(Error::Usage),
    }
}

/// Inputs with the hexadecimal prefix are read as base 16, everything else
/// as base 10.
pub fn convert(input: &str) -> Result<Conversion, Error> {
    let into_error = |_| Error::Parse(input.to_string());

    if input.starts_with(HEXADECIMAL_PREFIX) {
        let (_, value) = hexadecimal(input).map_err(into_error)?;
        log::debug!("hexadecimal input {:?} read as {}", input, value);
        Ok(Conversion::FromHexadecimal { input: input.to_string(), value })
    } else {
        let (_, value) = decimal(input).map_err(into_error)?;
        log::debug!("decimal input {:?} read as {}", input, value);
        Ok(Conversion::FromDecimal { value })
    }
}

/// Lower case, prefixed form. Negative numbers keep the sign in front.
pub fn to_hexadecimal(value: &BigInt) -> String {
    let digits = value.magnitude().to_str_radix(16);
    match value.sign() {
        Sign::Minus => format!("-{}{}", HEXADECIMAL_PREFIX, digits),
        _ => format!("{}{}", HEXADECIMAL_PREFIX, digits),
    }
}

// Digits can be grouped by single underscores.
fn digits(input: &str, radix: u32) -> IResult<&str, String> {
    map(
        separated_list1(char('_'), take_while1(move |c: char| c.is_digit(radix))),
        |groups: Vec<&str>| groups.concat(),
    )(input)
}

fn decimal_digits(input: &str) -> IResult<&str, String> {
    digits(input, 10)
}

fn hexadecimal_digits(input: &str) -> IResult<&str, String> {
    digits(input, 16)
}

fn decimal(input: &str) -> IResult<&str, BigInt> {
    map_opt(
        all_consuming(delimited(multispace0, pair(opt(one_of("+-")), decimal_digits), multispace0)),
        |(sign, digits): (Option<char>, String)| {
            BigInt::parse_bytes(digits.as_bytes(), 10)
                .map(|value| if sign == Some('-') { -value } else { value })
        },
    )(input)
}

fn hexadecimal(input: &str) -> IResult<&str, BigInt> {
    map_opt(
        all_consuming(delimited(
            tag(HEXADECIMAL_PREFIX),
            preceded(opt(char('_')), hexadecimal_digits),
            multispace0,
        )),
        |digits: String| BigInt::parse_bytes(digits.as_bytes(), 16),
    )(input)
}

#[cfg(test)]
mod test {
    use super::*;

    fn number(value: i64) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn test_hexadecimal_input() {
        let result = convert("0x1A").unwrap();

        assert_eq!(Conversion::FromHexadecimal { input: String::from("0x1A"), value: number(26) }, result);
        assert_eq!("Hexadecimal: 0x1A\nDecimal: 26", result.to_string());
    }

    #[test]
    fn test_decimal_input() {
        let result = convert("26").unwrap();

        assert_eq!(Conversion::FromDecimal { value: number(26) }, result);
        assert_eq!("Decimal: 26\nHexadecimal: 0x1a", result.to_string());
    }

    #[test]
    fn test_decimal_syntax() {
        assert_eq!(Ok(Conversion::FromDecimal { value: number(-26) }), convert("-26"));
        assert_eq!(Ok(Conversion::FromDecimal { value: number(26) }), convert("+26"));
        assert_eq!(Ok(Conversion::FromDecimal { value: number(26) }), convert(" 26\n"));
        assert_eq!(Ok(Conversion::FromDecimal { value: number(1000000) }), convert("1_000_000"));
        assert_eq!(Ok(Conversion::FromDecimal { value: number(7) }), convert("007"));
        assert_eq!(Ok(Conversion::FromDecimal { value: number(0) }), convert("-0"));

        assert_eq!("Decimal: -26\nHexadecimal: -0x1a", convert("-26").unwrap().to_string());
        assert_eq!("Decimal: 0\nHexadecimal: 0x0", convert("0").unwrap().to_string());
    }

    #[test]
    fn test_hexadecimal_syntax() {
        assert_eq!(&number(255), convert("0xff").unwrap().value());
        assert_eq!(&number(255), convert("0xFF").unwrap().value());
        assert_eq!(&number(255), convert("0x_ff").unwrap().value());
        assert_eq!(&number(65535), convert("0xff_ff").unwrap().value());
        assert_eq!(&number(255), convert("0xff ").unwrap().value());
    }

    #[test]
    fn test_invalid_input() {
        for input in ["abc", "", " ", "1a", "1__0", "_1", "1_", "--1", "0x", "0x_", "0xg", "0x-1", "0X1A", " 0x1A", "1.5"] {
            assert_eq!(Err(Error::Parse(input.to_string())), convert(input), "input: {:?}", input);
        }
    }

    #[test]
    fn test_large_numbers() {
        let result = convert("0x80000000000000000000000000000000").unwrap();
        assert_eq!("170141183460469231731687303715884105728", result.value().to_string());

        let result = convert("-170141183460469231731687303715884105728").unwrap();
        assert_eq!(
            "Decimal: -170141183460469231731687303715884105728\nHexadecimal: -0x80000000000000000000000000000000",
            result.to_string()
        );
    }

    #[test]
    fn test_invalid_input_message() {
        let result = convert("abc").unwrap_err();

        assert_eq!("Invalid input. Please provide a valid decimal or hexadecimal number.", result.to_string());
    }

    #[test]
    fn test_argument_count() {
        assert_eq!(Err(Error::Usage), run(&[]));
        assert_eq!(Err(Error::Usage), run(&[String::from("1"), String::from("2")]));
        assert_eq!(Ok(Conversion::FromDecimal { value: number(1) }), run(&[String::from("1")]));

        assert_eq!("Usage: hex_convert <number>", Error::Usage.to_string());
    }

    #[test]
    fn test_round_trip() {
        let values = vec![
            number(0),
            number(1),
            number(9),
            number(10),
            number(15),
            number(16),
            number(26),
            number(255),
            number(4096),
            number(0xdead_beef),
            number(i64::MAX),
            BigInt::from(u128::MAX),
            BigInt::from(1u8) << 200usize,
            (BigInt::from(1u8) << 521usize) - 1,
        ];

        for value in values {
            let hexadecimal = to_hexadecimal(&value);

            match convert(hexadecimal.as_str()) {
                Ok(Conversion::FromHexadecimal { input, value: result }) => {
                    assert_eq!(hexadecimal, input);
                    assert_eq!(value, result);
                }
                _ => assert!(false),
            }
        }
    }
}
