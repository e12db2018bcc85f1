//! Property Map - A single field-to-column binding with engine-facing flags

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Maps one entity field to a database column, plus the key/identity,
/// read-only and ignore flags a query engine consults when generating SQL.
///
/// The column name defaults to the field name. Instances are configured
/// through the fluent setters during the declaration pass and frozen once
/// the owning [`EntityMap`](crate::EntityMap) is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMap {
    property: String,
    column: String,
    is_key: bool,
    is_identity: bool,
    is_read_only: bool,
    ignored: bool,
}

impl PropertyMap {
    pub(crate) fn new(property: &str) -> Self {
        Self {
            property: property.to_string(),
            column: property.to_string(),
            is_key: false,
            is_identity: false,
            is_read_only: false,
            ignored: false,
        }
    }

    /// Map the field to the given column name. An empty name keeps the
    /// current column; setters never fail.
    pub fn to_column(&mut self, column: &str) -> &mut Self {
        if column.is_empty() {
            warn!(property = %self.property, "ignoring empty column name");
        } else {
            self.column = column.to_string();
        }
        self
    }

    /// Mark the field as part of the primary key.
    pub fn key(&mut self) -> &mut Self {
        self.is_key = true;
        self
    }

    /// Mark the field as a database-generated identity column. Implies
    /// [`key`](Self::key).
    pub fn identity(&mut self) -> &mut Self {
        self.is_key = true;
        self.is_identity = true;
        self
    }

    /// Exclude the field from inserts and updates.
    pub fn read_only(&mut self) -> &mut Self {
        self.is_read_only = true;
        self
    }

    /// Exclude the field from mapping entirely; column resolution falls
    /// back to the naming convention as if the field were unmapped.
    pub fn ignore(&mut self) -> &mut Self {
        self.ignored = true;
        self
    }

    /// The entity field this map was declared for.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The column name generated SQL should use.
    pub fn column_name(&self) -> &str {
        &self.column
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    pub fn is_identity(&self) -> bool {
        self.is_identity
    }

    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }
}
