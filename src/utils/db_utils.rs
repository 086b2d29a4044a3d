use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::ApiError;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug)]
pub enum SqlValue {
    Text(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Date(NaiveDate),
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
    pub id_value: i64,
}

/// ===============================
/// Build a partial UPDATE from typed column/value pairs
/// ===============================
///
/// Callers pass only the columns the client actually supplied, so
/// unspecified fields keep their prior value. Column names come from a
/// hard-coded allowlist at each call site, never from request keys.
pub fn build_update(
    table: &str,
    fields: Vec<(&str, SqlValue)>,
    id_column: &str,
    id_value: i64,
) -> Result<SqlUpdate, ApiError> {
    if fields.is_empty() {
        return Err(ApiError::Validation(
            "No fields provided for update".to_string(),
        ));
    }

    // Build SET clause
    let set_clause = fields
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column);

    let values = fields.into_iter().map(|(_, value)| value).collect();

    Ok(SqlUpdate {
        sql,
        values,
        id_value,
    })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &SqlitePool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
        };
    }

    let result = query.bind(update.id_value).execute(pool).await?;
    Ok(result.rows_affected())
}

/// Referential-integrity check used before child-entity inserts.
pub async fn employee_exists(pool: &SqlitePool, employee_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = ? LIMIT 1)")
        .bind(employee_id)
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_set_clause_in_field_order() {
        let update = build_update(
            "employees",
            vec![
                ("name", SqlValue::Text("Jane".into())),
                ("salary", SqlValue::F64(4200.0)),
            ],
            "id",
            7,
        )
        .unwrap();

        assert_eq!(update.sql, "UPDATE employees SET name = ?, salary = ? WHERE id = ?");
        assert_eq!(update.values.len(), 2);
        assert_eq!(update.id_value, 7);
    }

    #[test]
    fn empty_update_is_a_validation_error() {
        let err = build_update("employees", Vec::new(), "id", 1).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
