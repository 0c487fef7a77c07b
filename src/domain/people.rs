//! People, system users and veterinarians.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::resource::{IdStrategy, Resource, require_id, require_text};
use super::IdTable;

/// A person registered at the clinic (pet owner or staff).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub nombres: String,
    pub apellidos: String,
    /// National identity document number.
    pub ci: String,
    pub telefono: String,
    pub email: String,
    pub direccion: String,
    pub activo: bool,
}

impl Resource for Person {
    const TABLE: &'static str = "persona";
    const COLUMNS: &'static [&'static str] = &[
        "nombres",
        "apellidos",
        "ci",
        "telefono",
        "email",
        "direccion",
        "activo",
    ];
    const ID_STRATEGY: IdStrategy = IdStrategy::Allocated(IdTable::Persona);

    fn validate(&self) -> Result<(), String> {
        require_text("nombres", &self.nombres)?;
        require_text("apellidos", &self.apellidos)?;
        require_text("ci", &self.ci)?;
        require_text("telefono", &self.telefono)?;
        require_text("email", &self.email)?;
        require_text("direccion", &self.direccion)
    }
}

/// Login account tied to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    /// Stored as supplied; hashing is the client's job.
    pub password_hash: String,
    #[serde(default = "default_role")]
    pub rol: String,
    #[serde(default = "default_active")]
    pub activo: bool,
    pub persona_id: i64,
}

fn default_role() -> String {
    "veterinario".to_string()
}

pub(crate) const fn default_active() -> bool {
    true
}

impl Resource for User {
    const TABLE: &'static str = "usuario";
    const COLUMNS: &'static [&'static str] =
        &["username", "password_hash", "rol", "activo", "persona_id"];
    const ID_STRATEGY: IdStrategy = IdStrategy::Allocated(IdTable::Usuario);

    fn validate(&self) -> Result<(), String> {
        require_text("username", &self.username)?;
        require_text("password_hash", &self.password_hash)?;
        require_text("rol", &self.rol)?;
        require_id("persona_id", self.persona_id)
    }
}

/// A licensed veterinarian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Veterinarian {
    pub licencia: String,
    #[serde(default)]
    pub especialidad: Option<String>,
    #[serde(default = "default_active")]
    pub activo: bool,
    pub persona_id: i64,
}

impl Resource for Veterinarian {
    const TABLE: &'static str = "veterinario";
    const COLUMNS: &'static [&'static str] = &["licencia", "especialidad", "activo", "persona_id"];
    const ID_STRATEGY: IdStrategy = IdStrategy::Allocated(IdTable::Veterinario);

    fn validate(&self) -> Result<(), String> {
        require_text("licencia", &self.licencia)?;
        require_id("persona_id", self.persona_id)
    }
}
