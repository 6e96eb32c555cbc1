// Parameter lists typed at the shell: `3`, `'a@b.com', 3`, `:email = 'a@b.com', pw = 'h'`

use nom::{
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use super::common::{identifier, value, ws};
use crate::core::{AdapterError, ParamKey, Params, Result, Value};

fn param_name(input: &str) -> IResult<&str, String> {
    map(recognize(preceded(opt(char(':')), identifier)), str::to_string)(input)
}

fn entry(input: &str) -> IResult<&str, (Option<String>, Value)> {
    pair(opt(terminated(param_name, ws(char('=')))), ws(value))(input)
}

fn entries(input: &str) -> IResult<&str, Vec<(Option<String>, Value)>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(ws(char(',')), entry),
        multispace0,
    ))(input)
}

/// Parses a comma-separated parameter list into `Params`.
///
/// Unnamed entries are keyed by their position in the list; a single named
/// entry turns the whole list into named parameters.
pub fn parse_params(input: &str) -> Result<Params> {
    let (_, parsed) = entries(input).map_err(|e| AdapterError::InvalidParams(format!("{e}")))?;

    let keyed = parsed.into_iter().enumerate().map(|(idx, (name, v))| {
        let key = name.map_or(ParamKey::Index(idx), ParamKey::Name);
        (key, v)
    });

    Ok(Params::infer(keyed))
}
