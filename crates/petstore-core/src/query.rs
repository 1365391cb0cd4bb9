//! Query vocabulary: cell values, filters, sort orders and result cursors.
//!
//! Filters are typed conjunctions of column comparisons. There is no textual
//! query language; backends translate a [`Filter`] into whatever they need.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::address::Address;
use crate::error::{CoreError, Result};
use crate::pet::{normalize_breed, Pet};
use crate::types::{Column, Gender, PetId};

/// A single cell value.
///
/// Values order as `Null < Integer < Text`, integers numerically and text
/// bytewise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    /// The value stored in `column` for `pet`.
    pub fn of(pet: &Pet, column: Column) -> Self {
        match column {
            Column::Id => Value::Integer(pet.id.get()),
            Column::Name => Value::Text(pet.name.clone()),
            Column::Breed => pet.breed.clone().map_or(Value::Null, Value::Text),
            Column::Gender => Value::Integer(i64::from(pet.gender.code())),
            Column::Weight => Value::Integer(i64::from(pet.weight)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<PetId> for Value {
    fn from(id: PetId) -> Self {
        Value::Integer(id.get())
    }
}

impl From<Gender> for Value {
    fn from(gender: Gender) -> Self {
        Value::Integer(i64::from(gender.code()))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// SQL spelling of the operator.
    pub const fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// `column op value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: Column,
    pub op: CompareOp,
    pub value: Value,
}

impl Predicate {
    /// Evaluate against one cell.
    ///
    /// Comparing with `Null` under `Eq`/`Ne` tests for null-ness. A null cell
    /// never satisfies any other comparison. Values of different types are
    /// never equal and never ordered.
    pub fn eval(&self, cell: &Value) -> bool {
        match (&self.value, cell, self.op) {
            (Value::Null, cell, CompareOp::Eq) => cell.is_null(),
            (Value::Null, cell, CompareOp::Ne) => !cell.is_null(),
            (Value::Null, _, _) | (_, Value::Null, _) => false,
            (Value::Integer(want), Value::Integer(have), op) => compare(op, have.cmp(want)),
            (Value::Text(want), Value::Text(have), op) => compare(op, have.cmp(want)),
            (_, _, op) => op == CompareOp::Ne,
        }
    }
}

fn compare(op: CompareOp, ord: Ordering) -> bool {
    match op {
        CompareOp::Eq => ord == Ordering::Equal,
        CompareOp::Ne => ord != Ordering::Equal,
        CompareOp::Lt => ord == Ordering::Less,
        CompareOp::Le => ord != Ordering::Greater,
        CompareOp::Gt => ord == Ordering::Greater,
        CompareOp::Ge => ord != Ordering::Less,
    }
}

/// A conjunction of predicates. The empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Match every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match exactly the record with `id`.
    pub fn id(id: PetId) -> Self {
        Self::all().equals(Column::Id, id)
    }

    /// Add an arbitrary predicate.
    pub fn and(mut self, column: Column, op: CompareOp, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            column,
            op,
            value: value.into(),
        });
        self
    }

    pub fn equals(self, column: Column, value: impl Into<Value>) -> Self {
        self.and(column, CompareOp::Eq, value)
    }

    pub fn not_equals(self, column: Column, value: impl Into<Value>) -> Self {
        self.and(column, CompareOp::Ne, value)
    }

    pub fn less_than(self, column: Column, value: impl Into<Value>) -> Self {
        self.and(column, CompareOp::Lt, value)
    }

    pub fn at_most(self, column: Column, value: impl Into<Value>) -> Self {
        self.and(column, CompareOp::Le, value)
    }

    pub fn greater_than(self, column: Column, value: impl Into<Value>) -> Self {
        self.and(column, CompareOp::Gt, value)
    }

    pub fn at_least(self, column: Column, value: impl Into<Value>) -> Self {
        self.and(column, CompareOp::Ge, value)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether `pet` satisfies every predicate.
    pub fn matches(&self, pet: &Pet) -> bool {
        self.predicates
            .iter()
            .all(|p| p.eval(&Value::of(pet, p.column)))
    }
}

/// One ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: Column,
    pub descending: bool,
}

/// Caller-supplied ordering. Empty means implementation-defined order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    keys: Vec<SortKey>,
}

impl SortOrder {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn asc(mut self, column: Column) -> Self {
        self.keys.push(SortKey {
            column,
            descending: false,
        });
        self
    }

    pub fn desc(mut self, column: Column) -> Self {
        self.keys.push(SortKey {
            column,
            descending: true,
        });
        self
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compare two records under this order.
    pub fn compare(&self, a: &Pet, b: &Pet) -> Ordering {
        for key in &self.keys {
            let ord = Value::of(a, key.column).cmp(&Value::of(b, key.column));
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// A result row restricted to a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(Column, Value)>,
}

impl Row {
    pub fn new(cells: Vec<(Column, Value)>) -> Self {
        Self { cells }
    }

    /// Project `pet` onto `columns`, in the given order.
    pub fn project(pet: &Pet, columns: &[Column]) -> Self {
        Self {
            cells: columns.iter().map(|&c| (c, Value::of(pet, c))).collect(),
        }
    }

    pub fn get(&self, column: Column) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    pub fn get_i64(&self, column: Column) -> Option<i64> {
        self.get(column).and_then(Value::as_i64)
    }

    pub fn get_str(&self, column: Column) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    pub fn cells(&self) -> &[(Column, Value)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl TryFrom<&Row> for Pet {
    type Error = CoreError;

    fn try_from(row: &Row) -> Result<Self> {
        let cell = |column: Column| row.get(column).ok_or(CoreError::MissingColumn(column));
        let integer = |column: Column| {
            cell(column)?.as_i64().ok_or_else(|| {
                CoreError::MalformedRow(format!("column {column} is not an integer"))
            })
        };

        let id = PetId(integer(Column::Id)?);
        let name = cell(Column::Name)?
            .as_str()
            .ok_or_else(|| CoreError::MalformedRow("column name is not text".into()))?
            .to_string();
        let breed = match cell(Column::Breed)? {
            Value::Null => None,
            Value::Text(s) => normalize_breed(Some(s.clone())),
            Value::Integer(_) => {
                return Err(CoreError::MalformedRow("column breed is not text".into()))
            }
        };
        let code = integer(Column::Gender)?;
        let gender = i32::try_from(code)
            .ok()
            .and_then(Gender::from_code)
            .ok_or_else(|| CoreError::MalformedRow(format!("unknown gender code {code}")))?;
        let weight = integer(Column::Weight)?;
        let weight = u32::try_from(weight)
            .map_err(|_| CoreError::MalformedRow(format!("weight {weight} out of range")))?;

        Ok(Pet {
            id,
            name,
            breed,
            gender,
            weight,
        })
    }
}

/// A finite sequence of result rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    columns: Vec<Column>,
    rows: Vec<Row>,
    notification_address: Option<Address>,
}

impl Cursor {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            notification_address: None,
        }
    }

    /// Tag the cursor with the address whose changes invalidate it.
    pub fn with_notification_address(mut self, address: Address) -> Self {
        self.notification_address = Some(address);
        self
    }

    pub fn notification_address(&self) -> Option<&Address> {
        self.notification_address.as_ref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decode every row into a [`Pet`]. Requires a full projection.
    pub fn to_pets(&self) -> Result<Vec<Pet>> {
        self.rows.iter().map(Pet::try_from).collect()
    }
}

impl IntoIterator for Cursor {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cursor {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
