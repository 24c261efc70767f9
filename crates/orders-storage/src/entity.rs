//! Entity descriptors for the backed relations.
//!
//! Every relation exposed over HTTP is described by an [`Entity`]
//! implementation: its table name, its addressing key, and its columns in
//! table order. Statement builders, request validation, and the API document
//! all read these constants, so SQL identifiers only ever come from here.

use serde::Serialize;

/// Column value kind, used to validate and bind inbound values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, trimmed and escaped on input.
    Text,
    /// Decimal number, stored as REAL.
    Decimal,
    /// Whole number, stored as INTEGER.
    Integer,
    /// Calendar date, stored as `YYYY-MM-DD` TEXT.
    Date,
}

/// One column of a backed relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn text(name: &'static str) -> Self {
        Field {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn decimal(name: &'static str) -> Self {
        Field {
            name,
            kind: FieldKind::Decimal,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Field {
            name,
            kind: FieldKind::Integer,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Field {
            name,
            kind: FieldKind::Date,
        }
    }
}

/// A flat record backed by one relation.
///
/// `FIELDS` lists every column in table order with the key included, so an
/// insert binds exactly `FIELDS.len()` values.
pub trait Entity: Serialize + Send + Sized + 'static {
    /// Backing relation name.
    const TABLE: &'static str;
    /// Human-readable singular name used in logs and the API document.
    const NAME: &'static str;
    /// The addressing column for read/update/delete.
    const KEY: Field;
    /// All columns, key included, in table order.
    const FIELDS: &'static [Field];

    /// Maps a row selected with `FIELDS` in order.
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self>;
}
