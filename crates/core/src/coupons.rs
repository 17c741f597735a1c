//! Site Coupons

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    ids::{ProductId, TypedId},
    merchant_coupons::{MerchantCoupon, MerchantCouponId},
};

/// Coupon ID
pub type CouponId = TypedId<Coupon>;

/// A promotional coupon wrapping a merchant coupon.
///
/// Every window and limit is optional so partially populated records can be
/// validated safely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon identifier.
    pub id: CouponId,

    /// User-enterable code, if the coupon can be redeemed by code.
    pub code: Option<String>,

    /// The merchant coupon this coupon applies.
    pub merchant_coupon_id: Option<MerchantCouponId>,

    /// Whether this is a site-wide sale coupon applied without a code.
    pub is_default: bool,

    /// Product the coupon is limited to, if any.
    pub restricted_to_product_id: Option<ProductId>,

    /// Start of the validity window (inclusive).
    pub starts_at: Option<Timestamp>,

    /// End of the validity window (exclusive).
    pub expires_at: Option<Timestamp>,

    /// Redemption cap for bulk/shared coupons; `None` or `Some(0)` is unlimited.
    pub max_uses: Option<u32>,

    /// Redemptions so far.
    pub used_count: u32,
}

impl Coupon {
    /// Create an unrestricted coupon with no window, limit or merchant coupon.
    #[must_use]
    pub fn new(id: CouponId) -> Self {
        Self {
            id,
            code: None,
            merchant_coupon_id: None,
            is_default: false,
            restricted_to_product_id: None,
            starts_at: None,
            expires_at: None,
            max_uses: None,
            used_count: 0,
        }
    }

    /// Whether the coupon can be applied right now.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Timestamp::now())
    }

    /// Whether the coupon can be applied at `at`.
    ///
    /// The coupon must have started, must not have expired, and a usage-limited
    /// coupon must have redemptions left.
    #[must_use]
    pub fn is_valid_at(&self, at: Timestamp) -> bool {
        self.has_started(at) && !self.has_expired(at) && !self.is_used_up()
    }

    /// `at` is on or after the start of the window, or there is no start.
    #[must_use]
    pub fn has_started(&self, at: Timestamp) -> bool {
        self.starts_at.is_none_or(|starts_at| at >= starts_at)
    }

    /// `at` is on or after the expiration, when one is set.
    #[must_use]
    pub fn has_expired(&self, at: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| at >= expires_at)
    }

    /// Whether redemptions are capped.
    #[must_use]
    pub fn is_usage_limited(&self) -> bool {
        self.max_uses.is_some_and(|max_uses| max_uses > 0)
    }

    /// A usage-limited coupon that has reached its cap.
    #[must_use]
    pub fn is_used_up(&self) -> bool {
        self.max_uses
            .is_some_and(|max_uses| max_uses > 0 && self.used_count >= max_uses)
    }

    /// Whether this coupon wraps `merchant_coupon`, compared by identity.
    #[must_use]
    pub fn wraps(&self, merchant_coupon: &MerchantCoupon) -> bool {
        self.merchant_coupon_id.as_ref() == Some(&merchant_coupon.id)
    }
}

/// Validate an optional coupon at `at`; a missing coupon is never valid.
#[must_use]
pub fn is_valid(coupon: Option<&Coupon>, at: Timestamp) -> bool {
    coupon.is_some_and(|coupon| coupon.is_valid_at(at))
}
