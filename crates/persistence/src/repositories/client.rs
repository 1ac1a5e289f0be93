//! Client repository for database operations.

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use domain::models::ClientIdentity;

use crate::entities::ClientEntity;
use crate::error::{constraint_violation, constraints};
use crate::metrics::QueryTimer;

/// Repository for booking client operations.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Creates a new ClientRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the client linked to a user.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<ClientEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_client_by_user_id");
        let result = sqlx::query_as::<_, ClientEntity>(
            r#"
            SELECT cliente_id, nombre, apellido, correo, user_id
            FROM hotelreef.cliente
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Returns the client id for a user, linking or creating the client on first use.
    ///
    /// Resolution order:
    /// 1. a client already linked to the user;
    /// 2. the oldest unlinked client whose email matches, which gets linked;
    /// 3. a new client built from the identity.
    ///
    /// Concurrent callers for the same user always end up with the same id:
    /// the partial unique index on `cliente.user_id` arbitrates the race.
    pub async fn resolve_for_user(&self, identity: &ClientIdentity) -> Result<i64, sqlx::Error> {
        if let Some(client) = self.find_by_user_id(identity.user_id).await? {
            return Ok(client.cliente_id);
        }

        match self.link_unclaimed_by_email(identity).await {
            Ok(Some(cliente_id)) => {
                info!(cliente_id, user_id = %identity.user_id, "Linked existing client to user");
                return Ok(cliente_id);
            }
            Ok(None) => {}
            Err(e)
                if constraint_violation(&e)
                    .is_some_and(|v| v.is_unique_on(constraints::CLIENT_USER_ID_KEY)) =>
            {
                debug!(user_id = %identity.user_id, "Client linked concurrently, re-reading");
                if let Some(client) = self.find_by_user_id(identity.user_id).await? {
                    return Ok(client.cliente_id);
                }
            }
            Err(e) => return Err(e),
        }

        let cliente_id = self.upsert_for_user(identity).await?;
        info!(cliente_id, user_id = %identity.user_id, "Resolved client for user");
        Ok(cliente_id)
    }

    async fn link_unclaimed_by_email(
        &self,
        identity: &ClientIdentity,
    ) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("link_client_by_email");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE hotelreef.cliente
            SET user_id = $1
            WHERE cliente_id = (
                SELECT cliente_id
                FROM hotelreef.cliente
                WHERE user_id IS NULL AND lower(correo) = lower($2)
                ORDER BY cliente_id
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING cliente_id
            "#,
        )
        .bind(identity.user_id)
        .bind(&identity.email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    async fn upsert_for_user(&self, identity: &ClientIdentity) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("upsert_client_for_user");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO hotelreef.cliente (nombre, apellido, correo, user_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) WHERE user_id IS NOT NULL
            DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING cliente_id
            "#,
        )
        .bind(&identity.nombre)
        .bind(&identity.apellido)
        .bind(&identity.email)
        .bind(identity.user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
