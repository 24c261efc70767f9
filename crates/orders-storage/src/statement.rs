//! Parameterized SQL statements for entity CRUD.
//!
//! Statement text is composed only from [`Entity`] constants; every value
//! that originates from a request travels as a bound `?N` parameter.

use rusqlite::types::Value;

use crate::entity::Entity;

/// A SQL statement with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    /// A statement with no parameters.
    ///
    /// Only for text built from compile-time identifiers, never from
    /// request data.
    pub fn literal(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// A statement template with values bound to `?1..?N` in order.
    pub fn bound(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Statement {
            sql: sql.into(),
            params,
        }
    }
}

fn column_list<E: Entity>() -> String {
    E::FIELDS
        .iter()
        .map(|f| f.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `SELECT <columns> FROM <table> ORDER BY <key>`.
pub fn select_all<E: Entity>() -> Statement {
    Statement::literal(format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list::<E>(),
        E::TABLE,
        E::KEY.name
    ))
}

/// Inserts one row. `values` must line up with `E::FIELDS`.
pub fn insert<E: Entity>(values: Vec<Value>) -> Statement {
    debug_assert_eq!(values.len(), E::FIELDS.len());
    let placeholders = (1..=E::FIELDS.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    Statement::bound(
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            column_list::<E>(),
            placeholders
        ),
        values,
    )
}

/// Overwrites every column of the row addressed by `key`.
///
/// The key column is part of the SET list, so a body key different from
/// `key` renames the row.
pub fn update<E: Entity>(key: Value, mut values: Vec<Value>) -> Statement {
    debug_assert_eq!(values.len(), E::FIELDS.len());
    let assignments = E::FIELDS
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{} = ?{}", f.name, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        E::TABLE,
        assignments,
        E::KEY.name,
        E::FIELDS.len() + 1
    );
    values.push(key);
    Statement::bound(sql, values)
}

/// Deletes the row addressed by `key`.
pub fn delete<E: Entity>(key: Value) -> Statement {
    Statement::bound(
        format!("DELETE FROM {} WHERE {} = ?1", E::TABLE, E::KEY.name),
        vec![key],
    )
}
