// sqlx::Error -> AppError mapping

use queryspec_core::error::AppError;

/// Convert a driver error into the core error type
///
/// Syntax and schema errors become `Query`; everything else is `Database`.
pub fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            let Some(code) = db_err.code() else {
                return AppError::Database(format!("Database error: {}", message));
            };

            // SQLite result codes: https://www.sqlite.org/rescode.html
            match code.as_ref() {
                "2067" | "1555" => {
                    AppError::Database(format!("Unique constraint violation: {} ({})", message, code))
                }
                "787" => AppError::Database(format!(
                    "Foreign key constraint violation: {} ({})",
                    message, code
                )),
                "5" => AppError::Database(format!("Database locked (SQLITE_BUSY): {}", message)),
                // SQLITE_ERROR: syntax errors, unknown tables/columns
                "1" => AppError::Query(format!("Invalid query: {}", message)),
                other => AppError::Database(format!("Database error [{}]: {}", other, message)),
            }
        }
        sqlx::Error::ColumnNotFound(col) => AppError::Query(format!("Column not found: {}", col)),
        sqlx::Error::ColumnDecode { index, source } => {
            AppError::Database(format!("Cannot decode column {}: {}", index, source))
        }
        sqlx::Error::Configuration(source) => AppError::Config(source.to_string()),
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}
