//! Coupons Service

use async_trait::async_trait;
use coupons::{
    ids::ProductId,
    sources::{
        CodeCouponSource, CouponLookup, DefaultCouponSource, DefaultCoupons, IncomingCoupon,
        LookupError,
    },
};
use jiff::Timestamp;
use tracing::{Span, debug};

use crate::{
    coupons::{CouponsServiceError, repository::PgCouponsRepository},
    database::Db,
};

/// Postgres-backed default and id/code coupon sources.
#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    /// Read coupons through `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }

    /// Fetch the sale running for `product` at `point_in_time`.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails or a stored row cannot be decoded.
    pub async fn find_default_coupon(
        &self,
        product: &ProductId,
        point_in_time: Timestamp,
    ) -> Result<Option<DefaultCoupons>, CouponsServiceError> {
        let mut tx = self.db.begin_snapshot_transaction().await?;

        let row = self
            .repository
            .get_default_coupon(&mut tx, product, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(row.map(DefaultCoupons::from))
    }

    /// Fetch the coupon matching `lookup`, preferring an id match over a code match.
    ///
    /// An empty lookup returns `None` without touching the database.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails or a stored row cannot be decoded.
    pub async fn find_coupon_for_id_or_code(
        &self,
        lookup: &CouponLookup,
        point_in_time: Timestamp,
    ) -> Result<Option<IncomingCoupon>, CouponsServiceError> {
        if lookup.is_empty() {
            debug!("no coupon id or code supplied");

            return Ok(None);
        }

        let mut tx = self.db.begin_snapshot_transaction().await?;

        let row = self
            .repository
            .get_coupon_for_id_or_code(&mut tx, lookup, point_in_time)
            .await?;

        tx.commit().await?;

        Ok(row.map(IncomingCoupon::from))
    }
}

#[async_trait]
impl DefaultCouponSource for PgCouponsService {
    #[tracing::instrument(
        name = "coupons.service.default_coupon",
        skip(self, product),
        fields(product = %product, found = tracing::field::Empty),
        err
    )]
    async fn default_coupon(
        &self,
        product: &ProductId,
        point_in_time: Timestamp,
    ) -> Result<Option<DefaultCoupons>, LookupError> {
        let defaults = self.find_default_coupon(product, point_in_time).await?;

        Span::current().record("found", defaults.is_some());

        Ok(defaults)
    }
}

#[async_trait]
impl CodeCouponSource for PgCouponsService {
    #[tracing::instrument(
        name = "coupons.service.coupon_for_id_or_code",
        skip(self, lookup),
        fields(
            coupon = lookup.coupon.as_ref().map(tracing::field::display),
            has_code = lookup.code.is_some(),
            found = tracing::field::Empty
        ),
        err
    )]
    async fn coupon_for_id_or_code(
        &self,
        lookup: &CouponLookup,
        point_in_time: Timestamp,
    ) -> Result<Option<IncomingCoupon>, LookupError> {
        let incoming = self
            .find_coupon_for_id_or_code(lookup, point_in_time)
            .await?;

        Span::current().record("found", incoming.is_some());

        Ok(incoming)
    }
}
