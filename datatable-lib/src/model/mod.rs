//! Row, column and value types

mod column;
mod row;
mod value;

pub use column::Accessor;
pub use column::ColumnDef;
pub use column::FilterFn;
pub use row::Record;
pub use row::TableRow;
pub use value::Value;
