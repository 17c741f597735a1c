//! Active Merchant Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use coupons::{
    coupons::Coupon,
    merchant_coupons::MerchantCoupon,
    resolver::{ActiveCouponDecision, ActiveCouponQuery},
};

use crate::{extensions::*, observability::record_decision, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MerchantCouponResponse {
    /// Merchant coupon identifier
    pub id: String,

    /// External identifier, e.g. a payment provider coupon id
    pub identifier: Option<String>,

    /// Fraction of the price taken off, as a decimal string (`"0.25"` is 25%)
    pub percentage_discount: String,

    /// Merchant coupon type (`special`, `bulk` or `ppp`)
    pub kind: String,
}

impl From<MerchantCoupon> for MerchantCouponResponse {
    fn from(merchant_coupon: MerchantCoupon) -> Self {
        Self {
            id: merchant_coupon.id.into_string(),
            identifier: merchant_coupon.identifier,
            percentage_discount: merchant_coupon.percentage_discount.to_string(),
            kind: merchant_coupon.kind.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    /// Coupon identifier
    pub id: String,

    /// Redeemable code
    pub code: Option<String>,

    /// Merchant coupon applied by this coupon
    pub merchant_coupon_id: Option<String>,

    /// Whether this coupon is a running sale
    pub is_default: bool,

    /// Product this coupon is limited to
    pub restricted_to_product_id: Option<String>,

    /// Start of the validity window (inclusive)
    pub starts_at: Option<String>,

    /// End of the validity window (exclusive)
    pub expires_at: Option<String>,

    /// Redemption cap; absent means unlimited
    pub max_uses: Option<u32>,

    /// Redemptions so far
    pub used_count: u32,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id.into_string(),
            code: coupon.code,
            merchant_coupon_id: coupon.merchant_coupon_id.map(|id| id.into_string()),
            is_default: coupon.is_default,
            restricted_to_product_id: coupon.restricted_to_product_id.map(|id| id.into_string()),
            starts_at: coupon.starts_at.map(|at| at.to_string()),
            expires_at: coupon.expires_at.map(|at| at.to_string()),
            max_uses: coupon.max_uses,
            used_count: coupon.used_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActiveCouponResponse {
    /// The merchant coupon to apply, or `null` when no discount applies
    pub active_merchant_coupon: Option<MerchantCouponResponse>,

    /// The sale coupon, present only when the sale's discount was chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_coupon: Option<CouponResponse>,
}

impl From<ActiveCouponDecision> for ActiveCouponResponse {
    fn from(decision: ActiveCouponDecision) -> Self {
        Self {
            active_merchant_coupon: decision.active_merchant_coupon.map(Into::into),
            default_coupon: decision.default_coupon.map(Into::into),
        }
    }
}

/// Get Active Merchant Coupon Handler
///
/// Returns the single merchant coupon that applies when buying the product,
/// weighing any running sale against the supplied coupon id or code.
#[endpoint(tags("coupons"), summary = "Get Active Merchant Coupon")]
pub(crate) async fn handler(
    product: PathParam<String>,
    coupon: QueryParam<String, false>,
    code: QueryParam<String, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ActiveCouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;
    let product = product.into_inner();

    if product.trim().is_empty() {
        return Err(StatusError::bad_request().brief("product is required"));
    }

    let query = ActiveCouponQuery::from_raw(
        &product,
        coupon.into_inner().as_deref().unwrap_or_default(),
        code.into_inner().as_deref().unwrap_or_default(),
        point_in_time,
    );

    let decision = state
        .app
        .coupons
        .get_active_merchant_coupon(&query)
        .await
        .or_500("failed to resolve active merchant coupon")?;

    record_decision(decision.origin().as_str());

    Ok(Json(decision.into()))
}
