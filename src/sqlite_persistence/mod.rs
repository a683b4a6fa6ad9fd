mod schema;

pub use schema::{Column, ForeignKey, ForeignKeyOnChange, Schema, SqlType, Table};
