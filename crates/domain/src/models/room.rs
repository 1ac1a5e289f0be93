//! Room domain models.

use serde::{Deserialize, Serialize};

/// A room that is free for an entire requested stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRoom {
    pub habitacion_id: i64,
    pub hotel_id: i64,
    pub numero: String,
    pub tipo: String,
    pub capacidad: i32,
    /// Nightly rate in whole pesos.
    pub precio_diario: i64,
}
