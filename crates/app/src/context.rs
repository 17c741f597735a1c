//! App Context

use std::sync::Arc;

use coupons::resolver::CouponResolver;
use thiserror::Error;

use crate::{
    coupons::PgCouponsService,
    database::{self, Db},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct AppContext {
    pub coupons: CouponResolver,
}

impl AppContext {
    /// Wire the resolver to Postgres-backed coupon sources.
    #[must_use]
    pub fn new(db: Db) -> Self {
        let service = Arc::new(PgCouponsService::new(db));

        Self {
            coupons: CouponResolver::new(service.clone(), service),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(Db::new(pool)))
    }
}
