//! Pets and their owners.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::IdTable;
use super::people::default_active;
use super::resource::{IdStrategy, Resource, require_id, require_text};

/// A patient of the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Pet {
    pub nombre: String,
    pub especie: String,
    #[serde(default)]
    pub raza: Option<String>,
    /// Age in years.
    #[serde(default)]
    pub edad: Option<i32>,
    #[serde(default)]
    pub sexo: Option<String>,
    /// Weight in kilograms.
    #[serde(default)]
    pub peso: Option<f64>,
    /// Height in centimetres.
    #[serde(default)]
    pub talla: Option<f64>,
    #[serde(default)]
    pub grupo_sanguineo: Option<String>,
    #[serde(default)]
    pub alergias: Option<String>,
    #[serde(default)]
    pub antecedentes: Option<String>,
    #[serde(default = "default_active")]
    pub activo: bool,
    pub dueno_persona_id: i64,
}

impl Resource for Pet {
    const TABLE: &'static str = "mascota";
    const COLUMNS: &'static [&'static str] = &[
        "nombre",
        "especie",
        "raza",
        "edad",
        "sexo",
        "peso",
        "talla",
        "grupo_sanguineo",
        "alergias",
        "antecedentes",
        "activo",
        "dueno_persona_id",
    ];
    const ID_STRATEGY: IdStrategy = IdStrategy::Allocated(IdTable::Mascota);

    fn validate(&self) -> Result<(), String> {
        require_text("nombre", &self.nombre)?;
        require_text("especie", &self.especie)?;
        if self.edad.is_some_and(|edad| edad < 0) {
            return Err("edad cannot be negative".to_string());
        }
        for (field, value) in [("peso", self.peso), ("talla", self.talla)] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(format!("{field} must be a non-negative number"));
            }
        }
        require_id("dueno_persona_id", self.dueno_persona_id)
    }
}
