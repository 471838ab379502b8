//! FQL query templates and the builder that expands them.

use secrecy::SecretString;

use super::param::{escape_all, FqlParam};
use crate::client::DEFAULT_FQL_MAX_BATCH_SIZE;
use crate::{Error, Result};

/// The kind of a placeholder in a query template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    /// `%s`
    String,
    /// `%d`
    Int,
    /// `%f`
    Float,
    /// `%S`
    StringArray,
    /// `%D`
    IntArray,
    /// `%F`
    FloatArray,
}

impl PlaceholderKind {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b's' => Some(PlaceholderKind::String),
            b'd' => Some(PlaceholderKind::Int),
            b'f' => Some(PlaceholderKind::Float),
            b'S' => Some(PlaceholderKind::StringArray),
            b'D' => Some(PlaceholderKind::IntArray),
            b'F' => Some(PlaceholderKind::FloatArray),
            _ => None,
        }
    }

    /// Returns `true` for the array forms.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            PlaceholderKind::StringArray | PlaceholderKind::IntArray | PlaceholderKind::FloatArray
        )
    }

    /// The placeholder as written in a template.
    pub fn token(&self) -> &'static str {
        match self {
            PlaceholderKind::String => "%s",
            PlaceholderKind::Int => "%d",
            PlaceholderKind::Float => "%f",
            PlaceholderKind::StringArray => "%S",
            PlaceholderKind::IntArray => "%D",
            PlaceholderKind::FloatArray => "%F",
        }
    }
}

/// A placeholder occurrence in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// What the placeholder accepts
    pub kind: PlaceholderKind,
    /// Byte offset of the `%`
    pub position: usize,
}

/// Find every placeholder in `template`, left to right.
///
/// # Example
///
/// ```
/// use facebook_rs::fql::{scan, PlaceholderKind};
///
/// let found = scan("SELECT name FROM user WHERE uid IN (%D) AND sex = %s");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].kind, PlaceholderKind::IntArray);
/// assert_eq!(found[1].kind, PlaceholderKind::String);
/// ```
pub fn scan(template: &str) -> Vec<Placeholder> {
    template
        .as_bytes()
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] == b'%')
        .filter_map(|(position, pair)| {
            PlaceholderKind::from_byte(pair[1]).map(|kind| Placeholder { kind, position })
        })
        .collect()
}

/// A parameterized FQL query.
///
/// The template uses `%s`, `%d` and `%f` for a single string, integer or
/// float, and `%S`, `%D` and `%F` for arrays of them. Arguments are bound in
/// order of appearance. Each value is wrapped in single quotes; array
/// elements are joined with `, `.
///
/// An array with more elements than the batch size is split into chunks,
/// and one query is built per chunk. With several oversized arrays, one
/// query is built for every combination of chunks.
///
/// # Example
///
/// ```
/// use facebook_rs::fql::FqlQuery;
///
/// let query = FqlQuery::new("SELECT uid, name FROM user WHERE uid IN (%D)")
///     .bind(vec![1i64, 2, 3])
///     .max_batch_size(2);
///
/// assert_eq!(
///     query.build().unwrap(),
///     vec![
///         "SELECT uid, name FROM user WHERE uid IN ('1', '2')",
///         "SELECT uid, name FROM user WHERE uid IN ('3')",
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FqlQuery {
    template: String,
    params: Vec<FqlParam>,
    max_batch_size: Option<usize>,
    access_token: Option<SecretString>,
}

impl FqlQuery {
    /// Create a query from a template with no arguments bound yet.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            params: Vec::new(),
            max_batch_size: None,
            access_token: None,
        }
    }

    /// Create a query with all arguments at once.
    pub fn with_params(template: impl Into<String>, params: Vec<FqlParam>) -> Self {
        Self {
            params,
            ..Self::new(template)
        }
    }

    /// Bind the next argument.
    pub fn bind(mut self, param: impl Into<FqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Split arrays longer than `size`; `0` disables splitting.
    ///
    /// Without this, the client's configured batch size is used.
    pub fn max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = Some(size);
        self
    }

    /// Run this query with a token other than the client's.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(SecretString::from(token.into()));
        self
    }

    /// The template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The bound arguments.
    pub fn params(&self) -> &[FqlParam] {
        &self.params
    }

    /// The placeholders found in the template.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        scan(&self.template)
    }

    pub(crate) fn token_override(&self) -> Option<&SecretString> {
        self.access_token.as_ref()
    }

    /// Expand the template into the queries to send.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateMismatch`] if the number of placeholders
    /// differs from the number of arguments, or a scalar placeholder is
    /// bound to an array (or the reverse).
    pub fn build(&self) -> Result<Vec<String>> {
        self.build_with_default(DEFAULT_FQL_MAX_BATCH_SIZE)
    }

    pub(crate) fn build_with_default(&self, default_batch_size: usize) -> Result<Vec<String>> {
        let batch_size = self.max_batch_size.unwrap_or(default_batch_size);
        let placeholders = self.placeholders();

        if placeholders.len() != self.params.len() {
            return Err(Error::TemplateMismatch(format!(
                "{} placeholder(s) but {} argument(s)",
                placeholders.len(),
                self.params.len()
            )));
        }

        for (i, (placeholder, param)) in placeholders.iter().zip(&self.params).enumerate() {
            if placeholder.kind.is_array() != param.is_array() {
                return Err(Error::TemplateMismatch(format!(
                    "argument {} is {} but placeholder {} at byte {} expects {}",
                    i + 1,
                    if param.is_array() { "an array" } else { "a scalar" },
                    placeholder.kind.token(),
                    placeholder.position,
                    if placeholder.kind.is_array() { "an array" } else { "a scalar" },
                )));
            }
        }

        let mut queries = vec![String::new()];
        let mut cursor = 0;

        for (placeholder, param) in placeholders.iter().zip(&self.params) {
            append(&mut queries, &self.template[cursor..placeholder.position]);
            cursor = placeholder.position + 2;

            match param {
                FqlParam::Array(values) if batch_size > 0 && values.len() > batch_size => {
                    let chunks: Vec<String> = values.chunks(batch_size).map(escape_all).collect();
                    queries = queries
                        .iter()
                        .flat_map(|q| chunks.iter().map(move |chunk| format!("{}{}", q, chunk)))
                        .collect();
                }
                _ => append(&mut queries, &param.escape()),
            }
        }
        append(&mut queries, &self.template[cursor..]);

        queries.retain(|q| !q.is_empty());
        Ok(queries)
    }
}

fn append(queries: &mut [String], text: &str) {
    for query in queries.iter_mut() {
        query.push_str(text);
    }
}

/// Build an [`FqlQuery`] from a template and its arguments.
///
/// ```
/// let query = facebook_rs::fql!(
///     "SELECT name FROM page WHERE username = %s AND fan_count > %d",
///     "starbucks",
///     1000i64,
/// );
/// assert_eq!(
///     query.build().unwrap(),
///     vec!["SELECT name FROM page WHERE username = 'starbucks' AND fan_count > '1000'"]
/// );
/// ```
#[macro_export]
macro_rules! fql {
    ($template:expr $(, $param:expr)* $(,)?) => {
        $crate::fql::FqlQuery::new($template)$(.bind($param))*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_all_kinds() {
        let kinds: Vec<_> = scan("%s %d %f %S %D %F %x %")
            .into_iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                PlaceholderKind::String,
                PlaceholderKind::Int,
                PlaceholderKind::Float,
                PlaceholderKind::StringArray,
                PlaceholderKind::IntArray,
                PlaceholderKind::FloatArray,
            ]
        );
    }

    #[test]
    fn test_scan_positions() {
        let found = scan("a %s b %%d");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].position, 2);
        assert_eq!(found[1].position, 8);
    }

    #[test]
    fn test_count_mismatch() {
        let err = FqlQuery::new("SELECT uid FROM user WHERE uid IN (%d, %d)")
            .bind(15504121i64)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::TemplateMismatch(_)));

        let err = FqlQuery::new("SELECT uid FROM user").bind("x").build().unwrap_err();
        assert!(matches!(err, Error::TemplateMismatch(_)));
    }

    #[test]
    fn test_kind_mismatch() {
        let err = FqlQuery::new("uid = %d").bind(vec![1i64, 2]).build().unwrap_err();
        assert!(matches!(err, Error::TemplateMismatch(_)));

        let err = FqlQuery::new("uid IN (%D)").bind(1i64).build().unwrap_err();
        assert!(matches!(err, Error::TemplateMismatch(_)));
    }

    #[test]
    fn test_no_placeholders() {
        let queries = FqlQuery::new("SELECT uid, name FROM user WHERE uid = me()")
            .build()
            .unwrap();
        assert_eq!(queries, vec!["SELECT uid, name FROM user WHERE uid = me()"]);
    }

    #[test]
    fn test_scalar_substitution() {
        let queries = FqlQuery::new("SELECT page_id FROM page WHERE username = %s")
            .bind("Starbucks")
            .build()
            .unwrap();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("'Starbucks'"));
    }

    #[test]
    fn test_scalars_in_order() {
        let queries = FqlQuery::new("SELECT uid, name FROM user WHERE uid IN (%d, %d) AND x = %f")
            .bind(15504121i64)
            .bind(774070614i64)
            .bind(0.5f64)
            .build()
            .unwrap();
        assert_eq!(
            queries,
            vec!["SELECT uid, name FROM user WHERE uid IN ('15504121', '774070614') AND x = '0.500000'"]
        );
    }

    #[test]
    fn test_substituted_value_containing_placeholder_text() {
        let queries = FqlQuery::new("a = %s AND b = %s")
            .bind("%s")
            .bind("x")
            .build()
            .unwrap();
        assert_eq!(queries, vec!["a = '%s' AND b = 'x'"]);
    }

    #[test]
    fn test_array_within_batch_size() {
        let queries = FqlQuery::new("uid IN (%D)")
            .bind(vec![1i64, 2, 3])
            .max_batch_size(3)
            .build()
            .unwrap();
        assert_eq!(queries, vec!["uid IN ('1', '2', '3')"]);
    }

    #[test]
    fn test_array_split_count() {
        for (len, batch) in [(1usize, 1usize), (5, 2), (6, 2), (10, 3), (7, 7), (100, 25)] {
            let values: Vec<i64> = (0..len as i64).collect();
            let queries = FqlQuery::new("uid IN (%D)")
                .bind(values)
                .max_batch_size(batch)
                .build()
                .unwrap();
            assert_eq!(queries.len(), len.div_ceil(batch), "len={} batch={}", len, batch);
        }
    }

    #[test]
    fn test_two_oversized_arrays_cartesian() {
        let queries = FqlQuery::new("a IN (%D) AND b IN (%S)")
            .bind(vec![1i64, 2, 3])
            .bind(vec!["x", "y"])
            .max_batch_size(2)
            .build()
            .unwrap();

        assert_eq!(
            queries,
            vec![
                "a IN ('1', '2') AND b IN ('x', 'y')",
                "a IN ('3') AND b IN ('x', 'y')",
            ]
        );

        let queries = FqlQuery::new("a IN (%D) AND b IN (%S)")
            .bind(vec![1i64, 2, 3])
            .bind(vec!["x", "y", "z", "w", "v"])
            .max_batch_size(2)
            .build()
            .unwrap();

        assert_eq!(queries.len(), 2 * 3);
        assert_eq!(queries[0], "a IN ('1', '2') AND b IN ('x', 'y')");
        assert_eq!(queries[2], "a IN ('1', '2') AND b IN ('v')");
        assert_eq!(queries[5], "a IN ('3') AND b IN ('v')");
    }

    #[test]
    fn test_zero_batch_size_disables_split() {
        let queries = FqlQuery::new("uid IN (%D)")
            .bind(vec![1i64, 2, 3, 4])
            .max_batch_size(0)
            .build()
            .unwrap();
        assert_eq!(queries.len(), 1);
    }

    #[test]
    fn test_default_batch_size_splits_every_element() {
        let queries = FqlQuery::new("uid IN (%D)").bind(vec![1i64, 2]).build().unwrap();
        assert_eq!(queries, vec!["uid IN ('1')", "uid IN ('2')"]);
    }

    #[test]
    fn test_empty_template_yields_nothing() {
        assert!(FqlQuery::new("").build().unwrap().is_empty());
    }

    #[test]
    fn test_macro_binds_in_order() {
        let query = crate::fql!("%s %D", "a", vec![1i64]);
        assert_eq!(query.params().len(), 2);
        assert_eq!(query.build().unwrap(), vec!["'a' '1'"]);
    }
}
