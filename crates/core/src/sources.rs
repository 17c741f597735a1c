//! Coupon Sources
//!
//! The resolver only reads coupons through these two capabilities, so storage
//! can be swapped for fakes in tests.

use std::error::Error as StdError;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    coupons::{Coupon, CouponId},
    ids::ProductId,
    merchant_coupons::MerchantCoupon,
};

/// The sale running for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultCoupons {
    /// The sale coupon itself.
    pub default_coupon: Option<Coupon>,

    /// The merchant coupon the sale applies; `None` means no sale is running.
    pub default_merchant_coupon: Option<MerchantCoupon>,
}

/// A coupon resolved from a user-supplied id or code, joined with its merchant coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingCoupon {
    /// The matched coupon.
    pub coupon: Coupon,

    /// The merchant coupon the matched coupon applies, if any.
    pub merchant_coupon: Option<MerchantCoupon>,
}

impl IncomingCoupon {
    /// Whether the matched coupon can be applied at `at`.
    #[must_use]
    pub fn is_valid_at(&self, at: Timestamp) -> bool {
        self.coupon.is_valid_at(at)
    }
}

/// Identifies an incoming coupon by id, by code, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponLookup {
    /// Coupon identifier.
    pub coupon: Option<CouponId>,

    /// User-entered code.
    pub code: Option<String>,
}

impl CouponLookup {
    /// Nothing to look up.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coupon.is_none() && self.code.is_none()
    }
}

/// Failure reading coupons from a source.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The backing store failed.
    #[error("coupon storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

impl LookupError {
    /// Wrap a storage failure.
    pub fn storage<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Storage(Box::new(error))
    }
}

/// Looks up the sale currently running for a product.
#[automock]
#[async_trait]
pub trait DefaultCouponSource: Send + Sync {
    /// Returns the default coupon live for `product` at `point_in_time`, if any.
    async fn default_coupon(
        &self,
        product: &ProductId,
        point_in_time: Timestamp,
    ) -> Result<Option<DefaultCoupons>, LookupError>;
}

/// Looks up a coupon by id or code.
#[automock]
#[async_trait]
pub trait CodeCouponSource: Send + Sync {
    /// Returns the coupon matching `lookup`, if any.
    ///
    /// Precedence between id and code is up to the source.
    async fn coupon_for_id_or_code(
        &self,
        lookup: &CouponLookup,
        point_in_time: Timestamp,
    ) -> Result<Option<IncomingCoupon>, LookupError>;
}
