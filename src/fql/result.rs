//! Flattened FQL result sets.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// One row of a [`ResultSet`], with one value per field.
#[derive(Debug, Clone, PartialEq)]
pub struct Row(Vec<Value>);

impl Row {
    /// The value at a field index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the row has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All values, in field order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

/// The rows returned by an FQL query, flattened into a table.
///
/// The field list comes from the first non-empty record in the response, in
/// the order the server sent its keys. Later records are aligned to it by name: a
/// missing field becomes `null` and a field the first record lacked is
/// dropped (with a warning in the logs).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    fields: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Flatten decoded JSON records. Elements that are not objects are
    /// skipped.
    pub fn from_records(records: Vec<Value>) -> Self {
        let mut result = ResultSet::default();

        for (n, record) in records.into_iter().enumerate() {
            let Value::Object(mut map) = record else {
                continue;
            };

            if result.fields.is_empty() && !map.is_empty() {
                result.fields = map.keys().cloned().collect();
                result.index = result
                    .fields
                    .iter()
                    .enumerate()
                    .map(|(i, f)| (f.clone(), i))
                    .collect();
                // Rows seen before any field names existed are all-null.
                for row in &mut result.rows {
                    row.0.resize(result.fields.len(), Value::Null);
                }
            }

            let mut missing = 0;
            let values: Vec<Value> = result
                .fields
                .iter()
                .map(|field| {
                    map.remove(field).unwrap_or_else(|| {
                        missing += 1;
                        Value::Null
                    })
                })
                .collect();

            if missing > 0 || !map.is_empty() {
                tracing::warn!(
                    record = n,
                    missing,
                    extra = ?map.keys().collect::<Vec<_>>(),
                    "FQL record fields differ from the result columns"
                );
            }

            result.rows.push(Row(values));
        }

        result
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field names, in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The column index of a field.
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.index.get(field).copied()
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// The value of `field` in row `row`.
    pub fn get(&self, row: usize, field: &str) -> Option<&Value> {
        let column = self.field_index(field)?;
        self.rows.get(row)?.get(column)
    }

    /// Deserialize every row into `T`, using field names as keys.
    ///
    /// # Example
    ///
    /// ```
    /// use facebook_rs::fql::ResultSet;
    /// use serde_json::json;
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Person {
    ///     uid: i64,
    ///     name: String,
    /// }
    ///
    /// let result = ResultSet::from_records(vec![
    ///     json!({"uid": 15504121, "name": "Jimmy Sawczuk"}),
    /// ]);
    /// let people: Vec<Person> = result.rows_as().unwrap();
    /// assert_eq!(people[0].name, "Jimmy Sawczuk");
    /// ```
    pub fn rows_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .fields
                    .iter()
                    .cloned()
                    .zip(row.0.iter().cloned())
                    .collect();
                let value = Value::Object(object);
                T::deserialize(&value).map_err(|e| Error::decode::<T>(e, value.to_string().as_bytes()))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Body of an FQL endpoint response: either rows or an error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FqlResponse {
    Rows(Vec<Value>),
    Error(crate::FqlError),
}
