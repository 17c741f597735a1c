//! Postgres-backed coupon sources and shared application wiring.

pub mod context;
pub mod coupons;
pub mod database;

#[cfg(test)]
mod test;
