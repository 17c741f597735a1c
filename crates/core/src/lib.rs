//! Coupons
//!
//! Decides which single merchant coupon applies to a purchase when a running
//! sale competes with a coupon supplied by id or code.
//!
//! The resolver reads coupons through two injected capabilities,
//! [`sources::DefaultCouponSource`] and [`sources::CodeCouponSource`], and
//! never writes.

pub mod coupons;
pub mod ids;
pub mod merchant_coupons;
pub mod prelude;
pub mod resolver;
pub mod sources;
