//! Lookups against an in-memory configuration tree.
//!
//! Keys are dotted paths such as `database.host`.

use toml::{Table, Value};
use tracing::debug;

use super::source::ValueSource;

/// A [`ValueSource`] backed by an already merged `toml::Table`.
///
/// Scalar leaves are rendered as strings. Tables and arrays have no string
/// form and read as absent.
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    table: Table,
}

impl TableSource {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

impl From<Table> for TableSource {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

impl ValueSource for TableSource {
    fn lookup(&self, key: &str) -> Option<String> {
        let value = lookup_path(&self.table, key)?;
        let rendered = value_to_string(value);
        if rendered.is_none() {
            debug!(key, "path resolves to a non-scalar value");
        }
        rendered
    }
}

/// Walks a dotted path through nested tables.
fn lookup_path<'a>(root: &'a Table, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = root.get(parts.next()?)?;

    for part in parts {
        current = current.as_table()?.get(part)?;
    }

    Some(current)
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_source(toml_str: &str) -> TableSource {
        TableSource::new(toml::from_str(toml_str).unwrap())
    }

    #[test]
    fn test_root_key() {
        let source = make_source(r#"name = "dragon""#);
        assert_eq!(source.lookup("name").as_deref(), Some("dragon"));
    }

    #[test]
    fn test_nested_path() {
        let source = make_source(
            r#"
            [database]
            host = "db.internal"
            port = 5432
            "#,
        );
        assert_eq!(source.lookup("database.host").as_deref(), Some("db.internal"));
        assert_eq!(source.lookup("database.port").as_deref(), Some("5432"));
    }

    #[test]
    fn test_scalar_rendering() {
        let source = make_source(
            r#"
            debug = true
            ratio = 0.5
            at = 1979-05-27T07:32:00Z
            "#,
        );
        assert_eq!(source.lookup("debug").as_deref(), Some("true"));
        assert_eq!(source.lookup("ratio").as_deref(), Some("0.5"));
        assert_eq!(source.lookup("at").as_deref(), Some("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn test_missing_and_non_scalar_paths() {
        let source = make_source(
            r#"
            hosts = ["a", "b"]
            [database]
            host = "db.internal"
            "#,
        );
        assert_eq!(source.lookup("database"), None);
        assert_eq!(source.lookup("hosts"), None);
        assert_eq!(source.lookup("database.user"), None);
        assert_eq!(source.lookup("database.host.inner"), None);
        assert_eq!(source.lookup("cache.host"), None);
    }
}
