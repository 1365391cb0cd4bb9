//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend. It uses rusqlite with bundled SQLite.
//! Statements are assembled from [`Column`] names only; every caller-supplied
//! value is bound as a parameter.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::types::{Type, Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};

use petstore_core::{
    Column, CompareOp, Cursor, Filter, PetId, PetValues, Predicate, Row, SortOrder, Value,
    TABLE_NAME,
};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{resolve_projection, Store};

/// How long a writer waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file (and its parent directory) and runs migrations if it
    /// doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.display(), "opened pet database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a blocking operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        f(&conn)
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(v) => SqlValue::Integer(*v),
        Value::Text(s) => SqlValue::Text(s.clone()),
    }
}

/// Whether `value` has the storage type of `column`.
fn same_type(column: Column, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Integer(_) => column.is_integer(),
        Value::Text(_) => !column.is_integer(),
    }
}

/// Render one predicate, pushing its bound parameter.
///
/// Type-mismatched comparisons are rendered as constants instead of letting
/// SQLite coerce the operand through column affinity, so both backends agree.
fn render_predicate(p: &Predicate, params: &mut Vec<SqlValue>) -> String {
    let column = p.column.as_str();
    match (&p.value, p.op) {
        (Value::Null, CompareOp::Eq) => format!("{column} IS NULL"),
        (Value::Null, CompareOp::Ne) => format!("{column} IS NOT NULL"),
        (value, op) if !same_type(p.column, value) => match op {
            CompareOp::Ne => format!("{column} IS NOT NULL"),
            _ => "0".to_string(),
        },
        (value, op) => {
            params.push(to_sql(value));
            format!("{column} {} ?", op.as_sql())
        }
    }
}

fn where_clause(filter: &Filter, params: &mut Vec<SqlValue>) -> String {
    if filter.is_empty() {
        return String::new();
    }
    let terms: Vec<String> = filter
        .predicates()
        .iter()
        .map(|p| render_predicate(p, params))
        .collect();
    format!(" WHERE {}", terms.join(" AND "))
}

fn order_clause(order: &SortOrder) -> String {
    let mut terms: Vec<String> = order
        .keys()
        .iter()
        .map(|k| {
            let dir = if k.descending { "DESC" } else { "ASC" };
            format!("{} {}", k.column.as_str(), dir)
        })
        .collect();
    // Ties (and the no-order case) fall back to id order.
    terms.push(format!("{} ASC", Column::Id.as_str()));
    format!(" ORDER BY {}", terms.join(", "))
}

/// Column/value pairs of the present fields, in table order.
fn assignments(values: &PetValues) -> Vec<(Column, SqlValue)> {
    let mut out = Vec::with_capacity(values.len());
    if let Some(name) = &values.name {
        out.push((Column::Name, SqlValue::Text(name.clone())));
    }
    if let Some(breed) = &values.breed {
        let breed = if breed.is_empty() {
            SqlValue::Null
        } else {
            SqlValue::Text(breed.clone())
        };
        out.push((Column::Breed, breed));
    }
    if let Some(gender) = values.gender {
        out.push((Column::Gender, SqlValue::Integer(i64::from(gender))));
    }
    if let Some(weight) = values.weight {
        out.push((Column::Weight, SqlValue::Integer(i64::from(weight))));
    }
    out
}

// Helper to convert a projected row
fn read_row(row: &rusqlite::Row<'_>, columns: &[Column]) -> rusqlite::Result<Row> {
    let mut cells = Vec::with_capacity(columns.len());
    for (idx, &column) in columns.iter().enumerate() {
        let value = match row.get_ref(idx)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Text(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(rusqlite::Error::Utf8Error)?;
                if column == Column::Breed && text.is_empty() {
                    Value::Null
                } else {
                    Value::Text(text.to_string())
                }
            }
            ValueRef::Real(_) => {
                return Err(rusqlite::Error::InvalidColumnType(
                    idx,
                    column.as_str().into(),
                    Type::Real,
                ))
            }
            ValueRef::Blob(_) => {
                return Err(rusqlite::Error::InvalidColumnType(
                    idx,
                    column.as_str().into(),
                    Type::Blob,
                ))
            }
        };
        cells.push((column, value));
    }
    Ok(Row::new(cells))
}

/// Map constraint failures to [`StoreError::Constraint`].
fn classify(e: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(err, msg) = &e {
        if err.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::Constraint(msg.clone().unwrap_or_else(|| err.to_string()));
        }
    }
    StoreError::Database(e)
}

impl Store for SqliteStore {
    fn insert(&self, values: &PetValues) -> Result<PetId> {
        let assignments = assignments(values);

        self.with_conn(|conn| {
            if assignments.is_empty() {
                conn.execute(&format!("INSERT INTO {TABLE_NAME} DEFAULT VALUES"), [])
                    .map_err(classify)?;
            } else {
                let columns: Vec<&str> = assignments.iter().map(|(c, _)| c.as_str()).collect();
                let placeholders = vec!["?"; assignments.len()].join(", ");
                let sql = format!(
                    "INSERT INTO {TABLE_NAME} ({}) VALUES ({placeholders})",
                    columns.join(", ")
                );
                conn.execute(&sql, params_from_iter(assignments.iter().map(|(_, v)| v)))
                    .map_err(classify)?;
            }
            Ok(PetId(conn.last_insert_rowid()))
        })
    }

    fn query(&self, projection: &[Column], filter: &Filter, order: &SortOrder) -> Result<Cursor> {
        let columns = resolve_projection(projection);
        let mut params = Vec::new();
        let names: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
        let sql = format!(
            "SELECT {} FROM {TABLE_NAME}{}{}",
            names.join(", "),
            where_clause(filter, &mut params),
            order_clause(order)
        );

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(params.iter()), |row| read_row(row, &columns))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(Cursor::new(columns.clone(), rows))
        })
    }

    fn update(&self, values: &PetValues, filter: &Filter) -> Result<usize> {
        let assignments = assignments(values);
        if assignments.is_empty() {
            return Ok(0);
        }

        let sets: Vec<String> = assignments
            .iter()
            .map(|(c, _)| format!("{} = ?", c.as_str()))
            .collect();
        let mut params: Vec<SqlValue> = assignments.into_iter().map(|(_, v)| v).collect();
        let sql = format!(
            "UPDATE {TABLE_NAME} SET {}{}",
            sets.join(", "),
            where_clause(filter, &mut params)
        );

        self.with_conn(|conn| {
            conn.execute(&sql, params_from_iter(params.iter()))
                .map_err(classify)
        })
    }

    fn delete(&self, filter: &Filter) -> Result<usize> {
        let mut params = Vec::new();
        let sql = format!(
            "DELETE FROM {TABLE_NAME}{}",
            where_clause(filter, &mut params)
        );

        self.with_conn(|conn| Ok(conn.execute(&sql, params_from_iter(params.iter()))?))
    }

    fn count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), [], |row| {
                    row.get(0)
                })?;
            usize::try_from(count).map_err(|_| StoreError::InvalidData(format!("row count {count}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;
    use petstore_core::{Gender, Pet};

    fn toto() -> PetValues {
        PetValues::new()
            .name("Toto")
            .breed("Terrier")
            .gender(Gender::Male)
            .weight(7)
    }

    #[test]
    fn test_insert_and_get() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.insert(&toto()).unwrap();

        let pet = store.get_pet(id).unwrap().unwrap();
        assert_eq!(
            pet,
            Pet {
                id,
                name: "Toto".into(),
                breed: Some("Terrier".into()),
                gender: Gender::Male,
                weight: 7,
            }
        );
    }

    #[test]
    fn test_weight_defaults_to_zero() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store
            .insert(&PetValues::new().name("Ghost").gender(Gender::Unknown))
            .unwrap();
        let pet = store.get_pet(id).unwrap().unwrap();
        assert_eq!(pet.weight, 0);
        assert_eq!(pet.breed, None);
    }

    #[test]
    fn test_constraints_surface_as_errors() {
        let store = SqliteStore::open_memory().unwrap();
        let missing_name = store.insert(&PetValues::new().gender(Gender::Male));
        assert!(matches!(missing_name, Err(StoreError::Constraint(_))));

        let bad_gender = store.insert(&PetValues::new().name("Rex").gender_code(5));
        assert!(matches!(bad_gender, Err(StoreError::Constraint(_))));

        let empty = store.insert(&PetValues::new());
        assert!(matches!(empty, Err(StoreError::Constraint(_))));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = SqliteStore::open_memory().unwrap();
        let first = store.insert(&toto()).unwrap();
        let second = store.insert(&toto()).unwrap();
        assert_eq!(store.delete(&Filter::id(second)).unwrap(), 1);

        let third = store.insert(&toto()).unwrap();
        assert!(third > second);
        assert!(second > first);
    }

    #[test]
    fn test_projection_and_order() {
        let store = SqliteStore::open_memory().unwrap();
        store.insert(&toto()).unwrap();
        store
            .insert(&PetValues::new().name("Binx").gender(Gender::Female).weight(3))
            .unwrap();

        let cursor = store
            .query(
                &[Column::Name, Column::Breed],
                &Filter::all(),
                &SortOrder::none().asc(Column::Name),
            )
            .unwrap();
        assert_eq!(cursor.columns(), &[Column::Name, Column::Breed]);
        let names: Vec<&str> = cursor.iter().filter_map(|r| r.get_str(Column::Name)).collect();
        assert_eq!(names, vec!["Binx", "Toto"]);
        assert_eq!(cursor.rows()[0].get(Column::Breed), Some(&Value::Null));
        assert!(cursor.rows()[0].get(Column::Id).is_none());
    }

    #[test]
    fn test_update_matching_rows() {
        let store = SqliteStore::open_memory().unwrap();
        let a = store.insert(&toto()).unwrap();
        let b = store.insert(&toto().name("Rex")).unwrap();

        let n = store
            .update(
                &PetValues::new().weight(12),
                &Filter::all().equals(Column::Name, "Rex"),
            )
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(store.get_pet(a).unwrap().unwrap().weight, 7);
        assert_eq!(store.get_pet(b).unwrap().unwrap().weight, 12);

        let none = store
            .update(&PetValues::new().weight(1), &Filter::id(PetId(999)))
            .unwrap();
        assert_eq!(none, 0);
    }

    #[test]
    fn test_empty_breed_is_stored_as_unknown() {
        let store = SqliteStore::open_memory().unwrap();
        let id = store.insert(&toto().breed("")).unwrap();
        let cursor = store
            .query(&[], &Filter::all().equals(Column::Breed, Value::Null), &SortOrder::none())
            .unwrap();
        assert_eq!(cursor.len(), 1);
        assert_eq!(store.get_pet(id).unwrap().unwrap().breed, None);
    }

    #[test]
    fn test_cross_type_filter_does_not_coerce() {
        let store = SqliteStore::open_memory().unwrap();
        store.insert(&toto()).unwrap();

        let eq = store
            .query(&[], &Filter::all().equals(Column::Gender, "1"), &SortOrder::none())
            .unwrap();
        assert!(eq.is_empty());

        let ne = store
            .query(&[], &Filter::all().not_equals(Column::Gender, "1"), &SortOrder::none())
            .unwrap();
        assert_eq!(ne.len(), 1);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pets.db");

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(&toto()).unwrap()
        };

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.get_pet(id).unwrap().unwrap().name, "Toto");
    }
}
