//! Coupon Handlers

pub(crate) mod active;
