use crate::core::Value;
use chrono::{NaiveDate, NaiveDateTime, DateTime, Utc};
use uuid::Uuid;
use rust_decimal::Decimal;
use std::str::FromStr;
use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while, take_while1},
    character::complete::{alpha1, char, digit1, multispace0},
    combinator::{map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, tuple},
    IResult,
};

pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
        |s: &str| s.to_string(),
    )(input)
}

/// Single-quoted string with `''` standing for a literal quote. Empty strings
/// are allowed.
pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('\''),
            recognize(many0(alt((tag("''"), take_while1(|c: char| c != '\''))))),
            char('\''),
        ),
        |s: &str| s.replace("''", "'"),
    )(input)
}

/// `x'DEADBEEF'` byte string.
fn hex_literal(input: &str) -> IResult<&str, Vec<u8>> {
    map_res(
        pair(
            tag_no_case("x"),
            delimited(char('\''), take_while(|c: char| c.is_ascii_hexdigit()), char('\'')),
        ),
        |(_, digits): (&str, &str)| hex::decode(digits),
    )(input)
}

fn typed_text(s: String) -> Value {
    // Uuid first: the canonical hyphenated form never parses as a date
    if s.len() == 36 {
        if let Ok(u) = Uuid::parse_str(&s) {
            return Value::Uuid(u);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Value::Date(d);
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(&s) {
        return Value::TimestampTz(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S") {
        return Value::Timestamp(t);
    }
    Value::Text(s)
}

/// SQL-ish literal: NULL, TRUE/FALSE, x'..' bytes, quoted text (dates,
/// timestamps and uuids are recognized inside quotes), decimals, integers.
pub fn value(input: &str) -> IResult<&str, Value> {
    alt((
        // NULL
        map(tag_no_case("NULL"), |_| Value::Null),

        // Boolean
        map(tag_no_case("TRUE"), |_| Value::Boolean(true)),
        map(tag_no_case("FALSE"), |_| Value::Boolean(false)),

        // Bytes: x'00ff'
        map(hex_literal, Value::Bytea),

        // Date/Timestamp/Uuid/Text in quotes
        map(string_literal, typed_text),

        // Numeric with decimal point - exact Decimal, Real when out of range
        map_res(
            recognize(tuple((
                opt(char('-')),
                digit1,
                char('.'),
                digit1,
            ))),
            |s: &str| -> Result<Value, String> {
                if let Ok(d) = Decimal::from_str(s) {
                    Ok(Value::Numeric(d))
                } else {
                    Ok(Value::Real(s.parse().map_err(|e| format!("{e:?}"))?))
                }
            }
        ),

        // Integer
        map_res(
            recognize(pair(opt(char('-')), digit1)),
            |s: &str| s.parse::<i64>().map(Value::Integer),
        ),
    ))(input)
}
