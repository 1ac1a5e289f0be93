//! Client entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the hotelreef.cliente table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientEntity {
    pub cliente_id: i64,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub user_id: Option<Uuid>,
}
