use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

const SHAPE_COLUMNS: &str = "id, owner_id, x, y, color, size, created_at, updated_at";

/// Shape record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: i32,
    pub owner_id: i32,
    pub x: i32,
    pub y: i32,
    pub color: String,
    pub size: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Shapes in creation order; an owner with no shapes yields an empty list.
pub async fn list_by_owner(db: &PgPool, owner_id: i32) -> anyhow::Result<Vec<Shape>> {
    let rows = sqlx::query_as::<_, Shape>(&format!(
        "SELECT {SHAPE_COLUMNS} FROM shapes WHERE owner_id = $1 ORDER BY created_at ASC"
    ))
    .bind(owner_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(
    db: &PgPool,
    owner_id: i32,
    x: i32,
    y: i32,
    color: &str,
    size: i32,
) -> anyhow::Result<Shape> {
    let shape = sqlx::query_as::<_, Shape>(&format!(
        "INSERT INTO shapes (owner_id, x, y, color, size)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {SHAPE_COLUMNS}"
    ))
    .bind(owner_id)
    .bind(x)
    .bind(y)
    .bind(color)
    .bind(size)
    .fetch_one(db)
    .await?;
    Ok(shape)
}

/// Filtered by both id and owner; None when no row matched, which the caller
/// must report as not found rather than success.
pub async fn update(
    db: &PgPool,
    owner_id: i32,
    shape_id: i32,
    x: i32,
    y: i32,
    color: &str,
    size: i32,
) -> anyhow::Result<Option<Shape>> {
    let shape = sqlx::query_as::<_, Shape>(&format!(
        "UPDATE shapes
         SET x = $1, y = $2, color = $3, size = $4, updated_at = CURRENT_TIMESTAMP
         WHERE id = $5 AND owner_id = $6
         RETURNING {SHAPE_COLUMNS}"
    ))
    .bind(x)
    .bind(y)
    .bind(color)
    .bind(size)
    .bind(shape_id)
    .bind(owner_id)
    .fetch_optional(db)
    .await?;
    Ok(shape)
}

/// Idempotent: deleting an absent shape is not an error.
pub async fn delete(db: &PgPool, owner_id: i32, shape_id: i32) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM shapes WHERE id = $1 AND owner_id = $2")
        .bind(shape_id)
        .bind(owner_id)
        .execute(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_serializes_camel_case() {
        let now = OffsetDateTime::now_utc();
        let shape = Shape {
            id: 1,
            owner_id: 2,
            x: 10,
            y: 20,
            color: "bg-blue-500".into(),
            size: 48,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"ownerId\":2"));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(!json.contains("owner_id"));
    }
}
