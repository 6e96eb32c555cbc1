use crate::core::{AdapterError, Params, Result};
use crate::driver::Statement;
use crate::parser::PlaceholderStyle;

/// Checks `params` against the template's placeholders and binds them.
///
/// Mismatches are reported before anything reaches the driver, so a
/// positional set never silently fills named slots and a short list never
/// leaves placeholders bound to NULL.
pub(crate) fn bind_params<S: Statement>(
    stmt: &mut S,
    sql: &str,
    style: &PlaceholderStyle,
    params: &Params,
) -> Result<()> {
    match (params, style) {
        (Params::None, PlaceholderStyle::None) => Ok(()),
        (Params::None, _) => Err(AdapterError::execution(
            sql,
            "statement has placeholders but no parameters were given",
        )),

        (Params::Positional(_), PlaceholderStyle::Named(_)) => Err(AdapterError::execution(
            sql,
            "positional parameters given for a template with named placeholders",
        )),
        (Params::Positional(values), style) => {
            let expected = match style {
                PlaceholderStyle::Positional(n) => *n,
                _ => 0,
            };
            if values.len() != expected {
                return Err(AdapterError::execution(
                    sql,
                    format!(
                        "expected {expected} positional parameter(s), got {}",
                        values.len()
                    ),
                ));
            }
            for (idx, value) in values.iter().enumerate() {
                stmt.bind_position(idx + 1, value)
                    .map_err(|e| AdapterError::execution(sql, e.message))?;
            }
            Ok(())
        }

        (Params::Named(_), PlaceholderStyle::Positional(_)) => Err(AdapterError::execution(
            sql,
            "named parameters given for a template with positional placeholders",
        )),
        (Params::Named(pairs), style) => {
            if let PlaceholderStyle::Named(names) = style {
                if let Some(missing) = names
                    .iter()
                    .find(|name| !pairs.iter().any(|(given, _)| given == *name))
                {
                    return Err(AdapterError::execution(
                        sql,
                        format!("no value bound for parameter {missing}"),
                    ));
                }
            }
            for (name, value) in pairs {
                stmt.bind_name(name, value)
                    .map_err(|e| AdapterError::execution(sql, e.message))?;
            }
            Ok(())
        }
    }
}
