use anyhow::{bail, Result};
use rusqlite::{params, types::Type, Connection};

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Allow unused_mut because the variable is only mutated when optional
            // field assignments are passed to the macro (e.g., `is_primary_key = true`)
            #[allow(unused_mut)]
            let mut column = Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
                is_unique: false,
                foreign_key: None,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
}

impl SqlType {
    fn sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
        }
    }
}

#[allow(unused)]
pub enum ForeignKeyOnChange {
    NoAction,
    Restrict,
    SetNull,
    Cascade,
}

impl ForeignKeyOnChange {
    fn sql(&self) -> &'static str {
        match self {
            ForeignKeyOnChange::NoAction => "NO ACTION",
            ForeignKeyOnChange::Restrict => "RESTRICT",
            ForeignKeyOnChange::SetNull => "SET NULL",
            ForeignKeyOnChange::Cascade => "CASCADE",
        }
    }
}

pub struct ForeignKey {
    pub foreign_table: &'static str,
    pub foreign_column: &'static str,
    pub on_delete: ForeignKeyOnChange,
}

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
    pub is_unique: bool,
    pub foreign_key: Option<&'static ForeignKey>,
}

pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indices: &'static [(&'static str, &'static str)],
}

impl Table {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        let mut create_sql = format!("CREATE TABLE {} (", self.name);
        for (column_index, column) in self.columns.iter().enumerate() {
            if column_index > 0 {
                create_sql.push_str(", ");
            }
            create_sql.push_str(&format!("{} {}", column.name, column.sql_type.sql()));
            if column.is_primary_key {
                create_sql.push_str(" PRIMARY KEY");
            }
            if column.non_null {
                create_sql.push_str(" NOT NULL");
            }
            if column.is_unique {
                create_sql.push_str(" UNIQUE");
            }
            if let Some(foreign_key) = column.foreign_key {
                create_sql.push_str(&format!(
                    " REFERENCES {}({}) ON DELETE {}",
                    foreign_key.foreign_table,
                    foreign_key.foreign_column,
                    foreign_key.on_delete.sql()
                ));
            }
        }
        create_sql.push_str(");");
        conn.execute(&create_sql, params![])?;

        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )?;
        }
        Ok(())
    }
}

/// A fixed set of table definitions that can be created on a fresh database
/// or validated against an existing one. There is no migration support, a
/// database either matches the declared schema or it is rejected.
pub struct Schema {
    pub tables: &'static [Table],
}

impl Schema {
    pub fn create(&self, conn: &Connection) -> Result<()> {
        conn.execute("PRAGMA foreign_keys = ON;", params![])?;
        for table in self.tables {
            table.create(conn)?;
        }
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> Result<()> {
        for table in self.tables {
            validate_columns(table, conn)?;
            validate_indices(table, conn)?;
            validate_foreign_keys(table, conn)?;
        }
        Ok(())
    }
}

struct ActualColumn {
    name: String,
    sql_type: String,
    non_null: bool,
    is_primary_key: bool,
}

fn validate_columns(table: &Table, conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table.name))?;
    let actual_columns: Vec<ActualColumn> = stmt
        .query_map(params![], |row| {
            Ok(ActualColumn {
                name: row.get(1)?,
                sql_type: row.get(2)?,
                non_null: row.get::<_, i32>(3)? == 1,
                is_primary_key: row.get::<_, i32>(5)? == 1,
            })
        })?
        .collect::<Result<_, _>>()?;

    if actual_columns.len() != table.columns.len() {
        bail!(
            "Table {} has {} columns, expected {}. Found column names: {}, expected: {}",
            table.name,
            actual_columns.len(),
            table.columns.len(),
            actual_columns
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            table
                .columns
                .iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    for (actual, expected) in actual_columns.iter().zip(table.columns.iter()) {
        if actual.name != expected.name {
            bail!(
                "Table {} column name mismatch: expected {}, got {}",
                table.name,
                expected.name,
                actual.name
            );
        }
        let actual_type = match actual.sql_type.as_str() {
            "TEXT" => &SqlType::Text,
            "INTEGER" => &SqlType::Integer,
            "REAL" => &SqlType::Real,
            other => {
                return Err(
                    rusqlite::Error::InvalidColumnType(2, other.to_string(), Type::Text).into(),
                )
            }
        };
        if actual_type != expected.sql_type {
            bail!(
                "Table {} column {} type mismatch: expected {:?}, got {}",
                table.name,
                expected.name,
                expected.sql_type,
                actual.sql_type
            );
        }
        if actual.non_null != expected.non_null {
            bail!(
                "Table {} column {} non-null mismatch: expected {}, got {}",
                table.name,
                expected.name,
                expected.non_null,
                actual.non_null
            );
        }
        if actual.is_primary_key != expected.is_primary_key {
            bail!(
                "Table {} column {} primary key mismatch: expected {}, got {}",
                table.name,
                expected.name,
                expected.is_primary_key,
                actual.is_primary_key
            );
        }
    }
    Ok(())
}

fn validate_indices(table: &Table, conn: &Connection) -> Result<()> {
    for (index_name, _columns) in table.indices {
        let index_exists: bool = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1 AND tbl_name=?2",
                params![index_name, table.name],
                |_| Ok(true),
            )
            .unwrap_or(false);

        if !index_exists {
            bail!("Table {} is missing index '{}'", table.name, index_name);
        }
    }
    Ok(())
}

fn validate_foreign_keys(table: &Table, conn: &Connection) -> Result<()> {
    // PRAGMA foreign_key_list returns: id, seq, table, from, to, on_update, on_delete, match
    let mut fk_stmt = conn.prepare(&format!("PRAGMA foreign_key_list({})", table.name))?;

    struct ActualFk {
        from_column: String,
        to_table: String,
        to_column: String,
        on_delete: String,
    }

    let actual_fks: Vec<ActualFk> = fk_stmt
        .query_map([], |row| {
            Ok(ActualFk {
                from_column: row.get(3)?,
                to_table: row.get(2)?,
                to_column: row.get(4)?,
                on_delete: row.get(6)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    for column in table.columns {
        if let Some(expected_fk) = column.foreign_key {
            let expected_on_delete = expected_fk.on_delete.sql();

            let found = actual_fks.iter().any(|actual| {
                actual.from_column == column.name
                    && actual.to_table == expected_fk.foreign_table
                    && actual.to_column == expected_fk.foreign_column
                    && actual.on_delete == expected_on_delete
            });

            if !found {
                let partial_match = actual_fks
                    .iter()
                    .find(|actual| actual.from_column == column.name);

                if let Some(actual) = partial_match {
                    bail!(
                        "Table {} column {} has foreign key mismatch: expected REFERENCES {}({}) ON DELETE {}, got REFERENCES {}({}) ON DELETE {}",
                        table.name,
                        column.name,
                        expected_fk.foreign_table,
                        expected_fk.foreign_column,
                        expected_on_delete,
                        actual.to_table,
                        actual.to_column,
                        actual.on_delete
                    );
                } else {
                    bail!(
                        "Table {} column {} is missing foreign key: expected REFERENCES {}({}) ON DELETE {}",
                        table.name,
                        column.name,
                        expected_fk.foreign_table,
                        expected_fk.foreign_column,
                        expected_on_delete
                    );
                }
            }
        }
    }
    Ok(())
}
