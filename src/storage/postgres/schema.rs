//! Idempotent DDL for the clinic tables.
//!
//! Tables in the id registry use plain `BIGINT` keys filled by the service;
//! the rest use `BIGSERIAL`.

use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::StorageResult;

/// `CREATE TABLE IF NOT EXISTS` statements in dependency order.
pub const TABLES: &[(&str, &str)] = &[
    (
        "persona",
        r"CREATE TABLE IF NOT EXISTS persona (
            id BIGINT PRIMARY KEY,
            nombres TEXT NOT NULL,
            apellidos TEXT NOT NULL,
            ci TEXT NOT NULL,
            telefono TEXT NOT NULL,
            email TEXT NOT NULL,
            direccion TEXT NOT NULL,
            activo BOOLEAN NOT NULL DEFAULT TRUE
        )",
    ),
    (
        "usuario",
        r"CREATE TABLE IF NOT EXISTS usuario (
            id BIGINT PRIMARY KEY,
            username TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            rol TEXT NOT NULL DEFAULT 'veterinario',
            activo BOOLEAN NOT NULL DEFAULT TRUE,
            persona_id BIGINT NOT NULL REFERENCES persona(id)
        )",
    ),
    (
        "mascota",
        r"CREATE TABLE IF NOT EXISTS mascota (
            id BIGINT PRIMARY KEY,
            nombre TEXT NOT NULL,
            especie TEXT NOT NULL,
            raza TEXT,
            edad INTEGER,
            sexo TEXT,
            peso DOUBLE PRECISION,
            talla DOUBLE PRECISION,
            grupo_sanguineo TEXT,
            alergias TEXT,
            antecedentes TEXT,
            activo BOOLEAN NOT NULL DEFAULT TRUE,
            dueno_persona_id BIGINT NOT NULL REFERENCES persona(id)
        )",
    ),
    (
        "veterinario",
        r"CREATE TABLE IF NOT EXISTS veterinario (
            id BIGINT PRIMARY KEY,
            licencia TEXT NOT NULL,
            especialidad TEXT,
            activo BOOLEAN NOT NULL DEFAULT TRUE,
            persona_id BIGINT NOT NULL REFERENCES persona(id)
        )",
    ),
    (
        "cita",
        r"CREATE TABLE IF NOT EXISTS cita (
            id BIGSERIAL PRIMARY KEY,
            fecha_hora TIMESTAMP NOT NULL,
            motivo TEXT NOT NULL,
            prioridad TEXT NOT NULL,
            estado TEXT NOT NULL,
            observaciones TEXT NOT NULL,
            mascota_id BIGINT NOT NULL REFERENCES mascota(id),
            veterinario_id BIGINT NOT NULL REFERENCES veterinario(id)
        )",
    ),
    (
        "historial_clinico",
        r"CREATE TABLE IF NOT EXISTS historial_clinico (
            id BIGSERIAL PRIMARY KEY,
            fecha DATE NOT NULL,
            sintomas TEXT,
            diagnostico TEXT,
            observaciones TEXT,
            mascota_id BIGINT NOT NULL REFERENCES mascota(id),
            veterinario_id BIGINT NOT NULL REFERENCES veterinario(id),
            cita_id BIGINT REFERENCES cita(id)
        )",
    ),
    (
        "tratamiento",
        r"CREATE TABLE IF NOT EXISTS tratamiento (
            id BIGSERIAL PRIMARY KEY,
            nombre TEXT NOT NULL,
            estado TEXT NOT NULL DEFAULT 'activo',
            fecha_inicio DATE NOT NULL,
            fecha_fin DATE,
            objetivo TEXT,
            historial_id BIGINT NOT NULL REFERENCES historial_clinico(id)
        )",
    ),
    (
        "control_tratamiento",
        r"CREATE TABLE IF NOT EXISTS control_tratamiento (
            id BIGSERIAL PRIMARY KEY,
            fecha_control DATE NOT NULL,
            estado TEXT NOT NULL DEFAULT 'pendiente',
            observaciones TEXT,
            tratamiento_id BIGINT NOT NULL REFERENCES tratamiento(id)
        )",
    ),
];

/// Create any missing clinic tables.
///
/// # Errors
///
/// Returns an error if a DDL statement fails.
pub async fn ensure_schema(pool: &PgPool) -> StorageResult<()> {
    for &(table, ddl) in TABLES {
        sqlx::query(ddl).execute(pool).await?;
        debug!(table, "Table ensured");
    }
    info!(tables = TABLES.len(), "Schema ready");
    Ok(())
}
