//! Coupons persistence

mod errors;
mod repository;
mod service;

pub use errors::CouponsServiceError;
pub use service::PgCouponsService;
