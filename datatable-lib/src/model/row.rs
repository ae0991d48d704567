//! Row trait and the generic JSON record

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Trait for records that can be held by a [`DataTable`](crate::table::DataTable).
///
/// Identity belongs to the consumer; the table only uses it to key row
/// selection.
///
/// # Example
///
/// ```
/// use datatable_lib::model::TableRow;
///
/// #[derive(Clone)]
/// struct Kit {
///     id: String,
///     serial: String,
/// }
///
/// impl TableRow for Kit {
///     fn id(&self) -> String {
///         self.id.clone()
///     }
/// }
/// ```
pub trait TableRow: Clone + 'static {
    /// Return a unique identifier for this row.
    fn id(&self) -> String;
}

/// A dynamic record as returned by the REST API.
///
/// The `_id` field becomes the row identity, every other field lands in the
/// field map.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{Record, Value};
///
/// let company = Record::new("c-1")
///     .set("name", "Acme Storage")
///     .set("kits", 12i64);
///
/// assert_eq!(company.get("name"), Some(&Value::from("Acme Storage")));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// The unique identifier of the record.
    #[serde(rename = "_id")]
    pub(crate) id: String,

    /// The field values.
    #[serde(flatten)]
    pub(crate) fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Sets a field value (builder style).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl TableRow for Record {
    fn id(&self) -> String {
        self.id.clone()
    }
}
