//! Test Helpers

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::query;

use coupons::merchant_coupons::MerchantCouponKind;

use crate::test::TestContext;

/// Column values for a fixture row in `coupons`.
#[derive(Debug, Clone)]
pub(crate) struct NewCouponRow<'a> {
    pub(crate) id: &'a str,
    pub(crate) code: Option<&'a str>,
    pub(crate) merchant_coupon_id: Option<&'a str>,
    pub(crate) is_default: bool,
    pub(crate) restricted_to_product_id: Option<&'a str>,
    pub(crate) starts_at: Option<Timestamp>,
    pub(crate) expires_at: Option<Timestamp>,
    pub(crate) max_uses: i32,
    pub(crate) used_count: i32,
}

impl<'a> NewCouponRow<'a> {
    /// An active, unrestricted, unlimited coupon with no merchant coupon.
    pub(crate) fn new(id: &'a str) -> Self {
        Self {
            id,
            code: None,
            merchant_coupon_id: None,
            is_default: false,
            restricted_to_product_id: None,
            starts_at: None,
            expires_at: None,
            max_uses: -1,
            used_count: 0,
        }
    }
}

pub(crate) async fn insert_merchant_coupon(
    ctx: &TestContext,
    id: &str,
    percentage_discount: Decimal,
    kind: MerchantCouponKind,
) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO merchant_coupons (id, identifier, percentage_discount, kind) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(id)
    .bind(format!("{id}_identifier"))
    .bind(percentage_discount)
    .bind(kind.as_str())
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

pub(crate) async fn insert_coupon(
    ctx: &TestContext,
    row: NewCouponRow<'_>,
) -> Result<(), sqlx::Error> {
    query(
        "INSERT INTO coupons (id, code, merchant_coupon_id, is_default, restricted_to_product_id, \
         starts_at, expires_at, max_uses, used_count) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(row.id)
    .bind(row.code)
    .bind(row.merchant_coupon_id)
    .bind(row.is_default)
    .bind(row.restricted_to_product_id)
    .bind(row.starts_at.map(SqlxTimestamp::from))
    .bind(row.expires_at.map(SqlxTimestamp::from))
    .bind(row.max_uses)
    .bind(row.used_count)
    .execute(ctx.db.pool())
    .await?;

    Ok(())
}

pub(crate) async fn disable_merchant_coupon(
    ctx: &TestContext,
    id: &str,
) -> Result<(), sqlx::Error> {
    query("UPDATE merchant_coupons SET status = 0 WHERE id = $1")
        .bind(id)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}
