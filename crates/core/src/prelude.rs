//! Coupons prelude.
//!
//! Convenience exports for resolver consumers and source implementations.

pub use crate::{
    coupons::{Coupon, CouponId, is_valid},
    ids::{ProductId, TypedId},
    merchant_coupons::{MerchantCoupon, MerchantCouponId, MerchantCouponKind},
    resolver::{
        ActiveCouponDecision, ActiveCouponQuery, CouponResolver, DiscountOrigin, ResolveError,
        decide,
    },
    sources::{
        CodeCouponSource, CouponLookup, DefaultCouponSource, DefaultCoupons, IncomingCoupon,
        LookupError,
    },
};
