use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::value::Value;

/// Key of a dynamically shaped parameter container.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParamKey {
    Index(usize),
    Name(String),
}

impl From<usize> for ParamKey {
    fn from(idx: usize) -> Self {
        Self::Index(idx)
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Parameters for a single statement execution.
///
/// The variant decides the binding mode: `Positional` values are bound in
/// order to `?` placeholders, `Named` values are bound by name to `:name`
/// placeholders. `None` skips binding entirely.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Params {
    #[default]
    None,
    Positional(Vec<Value>),
    Named(Vec<(String, Value)>),
}

impl Params {
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Named parameters. Names may be given with or without the leading `:`.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (placeholder_name(k.as_ref()), v.into()))
                .collect(),
        )
    }

    /// Decides the binding mode of a keyed container: a single name key makes
    /// the whole set named, otherwise values are positional in key order.
    ///
    /// Index keys inside a named set are kept under their decimal name and
    /// will not match any placeholder.
    pub fn infer<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ParamKey, V)>,
        V: Into<Value>,
    {
        let mut entries: Vec<(ParamKey, Value)> =
            entries.into_iter().map(|(k, v)| (k, v.into())).collect();

        if entries.is_empty() {
            return Self::None;
        }

        if entries.iter().any(|(k, _)| matches!(k, ParamKey::Name(_))) {
            let pairs = entries.into_iter().map(|(k, v)| match k {
                ParamKey::Name(name) => (name, v),
                ParamKey::Index(idx) => (idx.to_string(), v),
            });
            Self::named(pairs)
        } else {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Self::Positional(entries.into_iter().map(|(_, v)| v).collect())
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Positional(values) => values.len(),
            Self::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn mode(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Positional(_) => "positional",
            Self::Named(_) => "named",
        }
    }
}

/// Normalizes a parameter name to carry a placeholder prefix.
pub fn placeholder_name(name: &str) -> String {
    if name.starts_with([':', '@', '$']) {
        name.to_string()
    } else {
        format!(":{name}")
    }
}

// A bare scalar is a one-element positional set.
macro_rules! impl_scalar_params {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Params {
                fn from(v: $ty) -> Self {
                    Self::Positional(vec![v.into()])
                }
            }
        )*
    };
}

impl_scalar_params! {
    Value, i64, i32, i16, u32, f64, f32, bool, String, &str,
    Decimal, NaiveDate, NaiveDateTime, DateTime<Utc>, Uuid,
}

impl<V: Into<Value>> From<Vec<V>> for Params {
    fn from(values: Vec<V>) -> Self {
        Self::positional(values)
    }
}

impl<V: Into<Value>> From<HashMap<String, V>> for Params {
    fn from(map: HashMap<String, V>) -> Self {
        Self::named(map)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Params {
    fn from(map: BTreeMap<String, V>) -> Self {
        Self::named(map)
    }
}

impl<T: Into<Self>> From<Option<T>> for Params {
    fn from(params: Option<T>) -> Self {
        params.map_or(Self::None, Into::into)
    }
}

impl From<()> for Params {
    fn from((): ()) -> Self {
        Self::None
    }
}
