// Placeholder scan of SQL command templates
//
// Finds `?`, `?NNN` and `:name`/`@name`/`$name` placeholders while skipping
// string literals, quoted identifiers, comments and `::` casts.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while, take_while1},
    character::complete::{anychar, char, digit0, one_of},
    combinator::{map, opt, recognize},
    multi::{fold_many0, many0},
    sequence::{pair, preceded, tuple},
    IResult,
};
use thiserror::Error;

use super::common::identifier;

/// Placeholder layout of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderStyle {
    None,
    /// Number of parameter slots: a bare `?` takes the slot after the
    /// highest seen so far, `?N` names slot N.
    Positional(usize),
    /// Distinct names, with their prefix, in order of first appearance.
    Named(Vec<String>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("template mixes positional '?' and named ({}) placeholders", .named.join(", "))]
pub struct MixedPlaceholders {
    pub positional: usize,
    pub named: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Positional(Option<usize>),
    Named(&'a str),
    Skip,
}

fn quoted(quote: char) -> impl FnMut(&str) -> IResult<&str, &str> {
    move |input| {
        recognize(tuple((
            char(quote),
            many0(alt((
                recognize(pair(char(quote), char(quote))),
                take_while1(|c: char| c != quote),
            ))),
            char(quote),
        )))(input)
    }
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("--"), opt(is_not("\n"))))(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// Words may contain `$` after their first character, so `col$1` is not a
// placeholder.
fn word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(is_word_char),
        take_while(|c: char| is_word_char(c) || c == '$'),
    ))(input)
}

fn numbered(input: &str) -> IResult<&str, Option<usize>> {
    map(preceded(char('?'), digit0), |digits: &str| {
        // An out-of-range number still counts as a slot nobody can fill.
        (!digits.is_empty()).then(|| digits.parse().unwrap_or(usize::MAX))
    })(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(word, |_| Token::Skip),
        map(
            take_while1(|c: char| !is_word_char(c) && !"'\"`-/:?@$".contains(c)),
            |_| Token::Skip,
        ),
        map(quoted('\''), |_| Token::Skip),
        map(quoted('"'), |_| Token::Skip),
        map(quoted('`'), |_| Token::Skip),
        map(line_comment, |_| Token::Skip),
        map(block_comment, |_| Token::Skip),
        map(tag("::"), |_| Token::Skip),
        map(recognize(preceded(one_of(":@$"), identifier)), Token::Named),
        map(numbered, Token::Positional),
        map(anychar, |_| Token::Skip),
    ))(input)
}

/// Classifies the placeholders of `sql`.
///
/// A template using both `?` and named placeholders is rejected; no driver
/// binds such a template consistently.
pub fn analyze(sql: &str) -> Result<PlaceholderStyle, MixedPlaceholders> {
    let scanned: IResult<&str, (usize, Vec<&str>)> = fold_many0(
        token,
        || (0, Vec::new()),
        |(mut slots, mut named), tok| {
            match tok {
                Token::Positional(None) => slots += 1,
                Token::Positional(Some(n)) => slots = slots.max(n),
                Token::Named(name) if !named.contains(&name) => named.push(name),
                Token::Named(_) | Token::Skip => {}
            }
            (slots, named)
        },
    )(sql);

    let (positional, named) = scanned.map(|(_, found)| found).unwrap_or_default();
    let named: Vec<String> = named.into_iter().map(str::to_string).collect();

    match (positional, named.is_empty()) {
        (0, true) => Ok(PlaceholderStyle::None),
        (n, true) => Ok(PlaceholderStyle::Positional(n)),
        (0, false) => Ok(PlaceholderStyle::Named(named)),
        (positional, false) => Err(MixedPlaceholders { positional, named }),
    }
}
