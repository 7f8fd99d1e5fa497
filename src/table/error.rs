use thiserror::Error;

/// Every way a table can fail to match the column contract it is used with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{table}: missing required column `{column}`")]
    MissingColumn { table: String, column: String },

    #[error("{table}: row {row} has {found} fields, column `{column}` is read from position {position}")]
    ShortRow {
        table: String,
        row: usize,
        found: usize,
        position: usize,
        column: String,
    },

    #[error("{table}: joining would overwrite existing column `{column}`")]
    ColumnCollision { table: String, column: String },

    #[error("{table}: key `{key}` appears more than once")]
    DuplicateKey { table: String, key: String },
}
