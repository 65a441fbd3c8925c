use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Public profile subset of a user row.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub bio: Option<String>,
    pub display_name: Option<String>,
}

pub async fn fetch(db: &PgPool, id: i32) -> anyhow::Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, email, username, bio, display_name
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(profile)
}

/// Updates display name and bio, returning the fresh profile.
/// None means the user row no longer exists.
pub async fn update(
    db: &PgPool,
    id: i32,
    display_name: Option<&str>,
    bio: Option<&str>,
) -> anyhow::Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        UPDATE users
        SET display_name = $1, bio = $2
        WHERE id = $3
        RETURNING id, email, username, bio, display_name
        "#,
    )
    .bind(display_name)
    .bind(bio)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_camel_case() {
        let profile = Profile {
            id: 3,
            email: "a@b.com".into(),
            username: "a".into(),
            bio: Some("hello".into()),
            display_name: Some("Ada".into()),
        };

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"displayName\":\"Ada\""));
        assert!(!json.contains("display_name"));
    }
}
