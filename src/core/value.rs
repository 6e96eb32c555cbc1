use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime, DateTime, Utc};
use uuid::Uuid;
use rust_decimal::Decimal;

/// A single scalar exchanged with the driver, either as a bound parameter
/// or as a column of a fetched row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Null,
    // Numeric types
    Integer(i64),
    Real(f64),
    Numeric(Decimal),
    // String types
    Text(String),
    // Boolean
    Boolean(bool),
    // Date/Time types
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    // Special types
    Uuid(Uuid),
    Json(String),      // JSON as text
    Bytea(Vec<u8>),    // Binary data
}

impl Value {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Json(s) => Some(s),
            _ => None,
        }
    }

    /// Plain JSON rendering used for row output: numbers stay numbers,
    /// everything without a JSON counterpart becomes its display string.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::{Number, Value as Json};

        match self {
            Self::Null => Json::Null,
            Self::Integer(i) => Json::Number(Number::from(*i)),
            Self::Real(r) => Number::from_f64(*r).map_or_else(|| Json::String(r.to_string()), Json::Number),
            Self::Boolean(b) => Json::Bool(*b),
            Self::Text(s) => Json::String(s.clone()),
            Self::Json(j) => serde_json::from_str(j).unwrap_or_else(|_| Json::String(j.clone())),
            other => Json::String(other.to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Numeric(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Self::TimestampTz(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Json(j) => write!(f, "{j}"),
            Self::Bytea(b) => write!(f, "\\x{}", hex::encode(b)),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_scalar! {
    i64 => Integer,
    i32 => Integer,
    i16 => Integer,
    u32 => Integer,
    f64 => Real,
    f32 => Real,
    bool => Boolean,
    String => Text,
    &str => Text,
    Decimal => Numeric,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    Uuid => Uuid,
    Vec<u8> => Bytea,
    &[u8] => Bytea,
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
