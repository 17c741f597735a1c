//! Coupons Repository

use coupons::{
    coupons::Coupon,
    ids::ProductId,
    merchant_coupons::{MerchantCoupon, MerchantCouponKind},
    sources::{CouponLookup, DefaultCoupons, IncomingCoupon},
};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

const GET_DEFAULT_COUPON_SQL: &str = include_str!("sql/get_default_coupon.sql");
const GET_COUPON_FOR_ID_OR_CODE_SQL: &str = include_str!("sql/get_coupon_for_id_or_code.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_default_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductId,
        point_in_time: Timestamp,
    ) -> Result<Option<CouponRow>, sqlx::Error> {
        query_as::<Postgres, CouponRow>(GET_DEFAULT_COUPON_SQL)
            .bind(product.as_str())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon_for_id_or_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lookup: &CouponLookup,
        point_in_time: Timestamp,
    ) -> Result<Option<CouponRow>, sqlx::Error> {
        query_as::<Postgres, CouponRow>(GET_COUPON_FOR_ID_OR_CODE_SQL)
            .bind(lookup.coupon.as_ref().map(|coupon| coupon.as_str()))
            .bind(lookup.code.as_deref())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_optional(&mut **tx)
            .await
    }
}

/// A coupon row joined with its (optional) merchant coupon.
#[derive(Debug, Clone)]
pub(crate) struct CouponRow {
    pub(crate) coupon: Coupon,
    pub(crate) merchant_coupon: Option<MerchantCoupon>,
}

impl From<CouponRow> for DefaultCoupons {
    fn from(row: CouponRow) -> Self {
        Self {
            default_coupon: Some(row.coupon),
            default_merchant_coupon: row.merchant_coupon,
        }
    }
}

impl From<CouponRow> for IncomingCoupon {
    fn from(row: CouponRow) -> Self {
        Self {
            coupon: row.coupon,
            merchant_coupon: row.merchant_coupon,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let max_uses: i32 = row.try_get("max_uses")?;
        let used_count: i32 = row.try_get("used_count")?;

        let used_count = u32::try_from(used_count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "used_count".to_string(),
            source: Box::new(e),
        })?;

        let coupon = Coupon {
            id: row.try_get::<String, _>("id")?.into(),
            code: row.try_get("code")?,
            merchant_coupon_id: row
                .try_get::<Option<String>, _>("merchant_coupon_id")?
                .map(Into::into),
            is_default: row.try_get("is_default")?,
            restricted_to_product_id: row
                .try_get::<Option<String>, _>("restricted_to_product_id")?
                .map(Into::into),
            starts_at: row
                .try_get::<Option<SqlxTimestamp>, _>("starts_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            // Negative caps are the storage convention for "unlimited".
            max_uses: u32::try_from(max_uses).ok().filter(|max_uses| *max_uses > 0),
            used_count,
        };

        let merchant_coupon = match row.try_get::<Option<String>, _>("mc_id")? {
            Some(id) => Some(merchant_coupon_from_row(row, id)?),
            None => None,
        };

        Ok(Self {
            coupon,
            merchant_coupon,
        })
    }
}

fn merchant_coupon_from_row(row: &PgRow, id: String) -> sqlx::Result<MerchantCoupon> {
    let kind: String = row.try_get("mc_kind")?;

    let kind = kind
        .parse::<MerchantCouponKind>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "mc_kind".to_string(),
            source: Box::new(e),
        })?;

    Ok(MerchantCoupon {
        id: id.into(),
        identifier: row.try_get("mc_identifier")?,
        percentage_discount: row.try_get::<Decimal, _>("mc_percentage_discount")?,
        kind,
    })
}
