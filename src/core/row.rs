use serde::ser::{Serialize, SerializeMap, Serializer};
use super::value::Value;

/// One fetched row: column names paired with values, in the order the
/// driver returned the columns. Serializes as a plain JSON-style map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Builds a row from parallel column and value lists.
    ///
    /// Extra entries on either side are dropped so that both lists stay the
    /// same length.
    pub fn new(mut columns: Vec<String>, mut values: Vec<Value>) -> Self {
        let len = columns.len().min(values.len());
        columns.truncate(len);
        values.truncate(len);
        Self { columns, values }
    }

    /// Looks a value up by column name.
    ///
    /// When several columns share a name (a join selecting two `id`s, say)
    /// the last one wins, like an associative fetch would.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .rposition(|c| c == column)
            .map(|idx| &self.values[idx])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }

    fn shadowed(&self, idx: usize) -> bool {
        self.columns[idx + 1..].contains(&self.columns[idx])
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let visible: Vec<(&str, &Value)> = self
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.shadowed(*idx))
            .map(|(_, entry)| entry)
            .collect();
        let mut map = serializer.serialize_map(Some(visible.len()))?;
        for (column, value) in visible {
            map.serialize_entry(column, &value.to_json())?;
        }
        map.end()
    }
}
