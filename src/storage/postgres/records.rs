//! Row mapping between clinic resources and PostgreSQL.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres, Row};

use crate::domain::{
    Appointment, ClinicalHistory, Person, Pet, Record, Resource, Treatment, TreatmentControl,
    User, Veterinarian,
};

/// A query with positional PostgreSQL arguments.
pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// A resource that can be read from and bound into PostgreSQL statements.
pub trait PgResource: Resource + for<'r> FromRow<'r, PgRow> {
    /// Bind every column of `Resource::COLUMNS`, in order.
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_>;
}

impl<'r, T> FromRow<'r, PgRow> for Record<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self::new(row.try_get("id")?, T::from_row(row)?))
    }
}

impl PgResource for Person {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.nombres)
            .bind(self.apellidos)
            .bind(self.ci)
            .bind(self.telefono)
            .bind(self.email)
            .bind(self.direccion)
            .bind(self.activo)
    }
}

impl PgResource for User {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.username)
            .bind(self.password_hash)
            .bind(self.rol)
            .bind(self.activo)
            .bind(self.persona_id)
    }
}

impl PgResource for Pet {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.nombre)
            .bind(self.especie)
            .bind(self.raza)
            .bind(self.edad)
            .bind(self.sexo)
            .bind(self.peso)
            .bind(self.talla)
            .bind(self.grupo_sanguineo)
            .bind(self.alergias)
            .bind(self.antecedentes)
            .bind(self.activo)
            .bind(self.dueno_persona_id)
    }
}

impl PgResource for Veterinarian {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.licencia)
            .bind(self.especialidad)
            .bind(self.activo)
            .bind(self.persona_id)
    }
}

impl PgResource for Appointment {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.fecha_hora)
            .bind(self.motivo)
            .bind(self.prioridad)
            .bind(self.estado)
            .bind(self.observaciones)
            .bind(self.mascota_id)
            .bind(self.veterinario_id)
    }
}

impl PgResource for ClinicalHistory {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.fecha)
            .bind(self.sintomas)
            .bind(self.diagnostico)
            .bind(self.observaciones)
            .bind(self.mascota_id)
            .bind(self.veterinario_id)
            .bind(self.cita_id)
    }
}

impl PgResource for Treatment {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.nombre)
            .bind(self.estado)
            .bind(self.fecha_inicio)
            .bind(self.fecha_fin)
            .bind(self.objetivo)
            .bind(self.historial_id)
    }
}

impl PgResource for TreatmentControl {
    fn bind_fields(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.fecha_control)
            .bind(self.estado)
            .bind(self.observaciones)
            .bind(self.tratamiento_id)
    }
}
