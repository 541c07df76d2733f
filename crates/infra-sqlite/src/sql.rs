// Parameterized SQL Fragments
//
// Clause text is assembled from enumerable column names only; every
// caller-influenced value travels as a bound `SqlArg` and is never
// interpolated into the statement string.

use joblist_core::error::{AppError, Result};
use std::collections::HashMap;

/// Owned SQL parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Int(i64),
    Null,
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_string())
    }
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        SqlArg::Text(value)
    }
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        SqlArg::Int(value)
    }
}

/// A `SET` fragment plus its bound values, positions already assigned
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateClause {
    pub set_clause: String,
    pub args: Vec<SqlArg>,
}

impl UpdateClause {
    /// 1-based position for a parameter appended after `args`
    /// (typically the row id in the WHERE predicate)
    pub fn next_position(&self) -> usize {
        self.args.len() + 1
    }
}

/// Build a `SET` clause for a partial update.
///
/// `fields` holds logical field names and their new values in the order
/// the caller supplied them; placeholders `$1..$n` follow that order, so
/// positions are deterministic. An explicit `SqlArg::Null` means "set to
/// NULL"; an absent field is left untouched by the resulting statement.
///
/// `column_names` translates a logical name to its physical column where
/// they differ; unmapped names are used verbatim. Column names are quoted
/// in the output; values are returned separately for binding.
///
/// The builder knows nothing about the target table. Callers append
/// trailing parameters (e.g. the row id) at `next_position()`.
pub fn build_partial_update(
    fields: &[(&str, SqlArg)],
    column_names: &HashMap<&str, &str>,
) -> Result<UpdateClause> {
    if fields.is_empty() {
        return Err(AppError::Validation("no data".to_string()));
    }

    let fragments: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(idx, &(name, _))| {
            let column = column_names.get(name).copied().unwrap_or(name);
            format!("\"{}\"=${}", column, idx + 1)
        })
        .collect();

    Ok(UpdateClause {
        set_clause: fragments.join(", "),
        args: fields.iter().map(|(_, value)| value.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_is_a_validation_error() {
        let err = build_partial_update(&[], &HashMap::new()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("no data"));
    }

    #[test]
    fn test_column_mapping_and_positions() {
        let fields = vec![
            ("name", SqlArg::from("New-Name")),
            ("description", SqlArg::from("new company")),
            ("numEmployees", SqlArg::from(500)),
        ];
        let column_names = HashMap::from([("numEmployees", "num_employees")]);

        let clause = build_partial_update(&fields, &column_names).unwrap();
        assert_eq!(
            clause.set_clause,
            r#""name"=$1, "description"=$2, "num_employees"=$3"#
        );
        assert_eq!(
            clause.args,
            vec![
                SqlArg::Text("New-Name".to_string()),
                SqlArg::Text("new company".to_string()),
                SqlArg::Int(500),
            ]
        );
        assert_eq!(clause.next_position(), 4);
    }

    #[test]
    fn test_unmapped_names_used_verbatim() {
        let fields = vec![("title", SqlArg::from("x"))];
        let clause = build_partial_update(&fields, &HashMap::new()).unwrap();
        assert_eq!(clause.set_clause, r#""title"=$1"#);
    }

    #[test]
    fn test_null_is_a_significant_value() {
        let fields = vec![
            ("salary", SqlArg::Null),
            ("equity", SqlArg::Null),
        ];
        let clause = build_partial_update(&fields, &HashMap::new()).unwrap();
        assert_eq!(clause.set_clause, r#""salary"=$1, "equity"=$2"#);
        assert_eq!(clause.args, vec![SqlArg::Null, SqlArg::Null]);
    }

    #[test]
    fn test_positions_follow_input_order() {
        let forward = vec![("a", SqlArg::from(1)), ("b", SqlArg::from(2))];
        let reverse = vec![("b", SqlArg::from(2)), ("a", SqlArg::from(1))];

        let clause = build_partial_update(&forward, &HashMap::new()).unwrap();
        assert_eq!(clause.set_clause, r#""a"=$1, "b"=$2"#);

        let clause = build_partial_update(&reverse, &HashMap::new()).unwrap();
        assert_eq!(clause.set_clause, r#""b"=$1, "a"=$2"#);
    }
}
