//! Appointments, clinical histories, treatments and treatment controls.
//!
//! These tables use database-generated identifiers.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::resource::{IdStrategy, Resource, optional_id, require_id, require_text};

/// A scheduled visit of a pet with a veterinarian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub fecha_hora: NaiveDateTime,
    pub motivo: String,
    pub prioridad: String,
    pub estado: String,
    pub observaciones: String,
    pub mascota_id: i64,
    pub veterinario_id: i64,
}

impl Resource for Appointment {
    const TABLE: &'static str = "cita";
    const COLUMNS: &'static [&'static str] = &[
        "fecha_hora",
        "motivo",
        "prioridad",
        "estado",
        "observaciones",
        "mascota_id",
        "veterinario_id",
    ];
    const ID_STRATEGY: IdStrategy = IdStrategy::Generated;

    fn validate(&self) -> Result<(), String> {
        require_text("motivo", &self.motivo)?;
        require_text("prioridad", &self.prioridad)?;
        require_text("estado", &self.estado)?;
        require_text("observaciones", &self.observaciones)?;
        require_id("mascota_id", self.mascota_id)?;
        require_id("veterinario_id", self.veterinario_id)
    }
}

/// One entry of a pet's clinical history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ClinicalHistory {
    pub fecha: NaiveDate,
    #[serde(default)]
    pub sintomas: Option<String>,
    #[serde(default)]
    pub diagnostico: Option<String>,
    #[serde(default)]
    pub observaciones: Option<String>,
    pub mascota_id: i64,
    pub veterinario_id: i64,
    #[serde(default)]
    pub cita_id: Option<i64>,
}

impl Resource for ClinicalHistory {
    const TABLE: &'static str = "historial_clinico";
    const COLUMNS: &'static [&'static str] = &[
        "fecha",
        "sintomas",
        "diagnostico",
        "observaciones",
        "mascota_id",
        "veterinario_id",
        "cita_id",
    ];
    const ID_STRATEGY: IdStrategy = IdStrategy::Generated;

    fn validate(&self) -> Result<(), String> {
        require_id("mascota_id", self.mascota_id)?;
        require_id("veterinario_id", self.veterinario_id)?;
        optional_id("cita_id", self.cita_id)
    }
}

/// A treatment prescribed from a clinical history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Treatment {
    pub nombre: String,
    #[serde(default = "default_treatment_state")]
    pub estado: String,
    pub fecha_inicio: NaiveDate,
    #[serde(default)]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(default)]
    pub objetivo: Option<String>,
    pub historial_id: i64,
}

fn default_treatment_state() -> String {
    "activo".to_string()
}

impl Resource for Treatment {
    const TABLE: &'static str = "tratamiento";
    const COLUMNS: &'static [&'static str] = &[
        "nombre",
        "estado",
        "fecha_inicio",
        "fecha_fin",
        "objetivo",
        "historial_id",
    ];
    const ID_STRATEGY: IdStrategy = IdStrategy::Generated;

    fn validate(&self) -> Result<(), String> {
        require_text("nombre", &self.nombre)?;
        require_text("estado", &self.estado)?;
        if self.fecha_fin.is_some_and(|fin| fin < self.fecha_inicio) {
            return Err("fecha_fin cannot precede fecha_inicio".to_string());
        }
        require_id("historial_id", self.historial_id)
    }
}

/// A follow-up check of a treatment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TreatmentControl {
    pub fecha_control: NaiveDate,
    #[serde(default = "default_control_state")]
    pub estado: String,
    #[serde(default)]
    pub observaciones: Option<String>,
    pub tratamiento_id: i64,
}

fn default_control_state() -> String {
    "pendiente".to_string()
}

impl Resource for TreatmentControl {
    const TABLE: &'static str = "control_tratamiento";
    const COLUMNS: &'static [&'static str] =
        &["fecha_control", "estado", "observaciones", "tratamiento_id"];
    const ID_STRATEGY: IdStrategy = IdStrategy::Generated;

    fn validate(&self) -> Result<(), String> {
        require_text("estado", &self.estado)?;
        require_id("tratamiento_id", self.tratamiento_id)
    }
}
