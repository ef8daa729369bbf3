//! Table DDL. Idempotent: every statement is `IF NOT EXISTS`.

use crate::error::AppError;
use sqlx::PgPool;

/// Creation order follows foreign keys: entity tables first, association tables last.
const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS people (
        id BIGSERIAL PRIMARY KEY,
        name TEXT,
        birth_year TEXT,
        species TEXT,
        height BIGINT,
        mass BIGINT,
        gender TEXT,
        hair_color TEXT,
        skin_color TEXT,
        homeworld TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS planets (
        id BIGSERIAL PRIMARY KEY,
        name TEXT,
        population BIGINT,
        rotation_period BIGINT,
        orbital_period BIGINT,
        diameter BIGINT,
        gravity TEXT,
        terrain TEXT,
        surface TEXT,
        climate TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_planets (
        user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        planet_id BIGINT NOT NULL REFERENCES planets (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, planet_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_people (
        user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        people_id BIGINT NOT NULL REFERENCES people (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, people_id)
    )
    "#,
    // Read-only from the API; rows are written by whatever owns vehicle data.
    r#"
    CREATE TABLE IF NOT EXISTS favorite_vehicles (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        payload JSONB NOT NULL
    )
    "#,
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(tables = DDL.len(), "schema ready");
    Ok(())
}
