//! SQLite constraint failure inspection.

/// Returns the `table.column` a unique constraint failed on, if `e` is one.
///
/// SQLite reports unique violations as
/// `UNIQUE constraint failed: users.email`; the column list is taken from that
/// message since SQLite does not expose constraint names.
pub fn unique_violation_target(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    let message = db_err.message();
    let target = message
        .split_once(':')
        .map(|(_, columns)| columns.trim().to_string())
        .unwrap_or_else(|| message.to_string());

    Some(target)
}

/// Returns true if `e` is a unique violation on the given `table.column`.
pub fn is_unique_violation_on(e: &sqlx::Error, column: &str) -> bool {
    unique_violation_target(e).is_some_and(|target| target.split(", ").any(|c| c == column))
}
