//! Merchant Coupons

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TypedId;

/// Merchant Coupon ID
pub type MerchantCouponId = TypedId<MerchantCoupon>;

/// The payment-processor category of a merchant coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantCouponKind {
    /// Promotional discount, typically behind a sale or a code.
    Special,

    /// Seat discount attached to a bulk purchase.
    Bulk,

    /// Purchasing-power parity discount.
    Ppp,
}

impl MerchantCouponKind {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Special => "special",
            Self::Bulk => "bulk",
            Self::Ppp => "ppp",
        }
    }
}

impl Display for MerchantCouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored merchant coupon kind is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown merchant coupon kind: {0}")]
pub struct UnknownMerchantCouponKind(pub String);

impl FromStr for MerchantCouponKind {
    type Err = UnknownMerchantCouponKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "special" => Ok(Self::Special),
            "bulk" => Ok(Self::Bulk),
            "ppp" => Ok(Self::Ppp),
            other => Err(UnknownMerchantCouponKind(other.to_string())),
        }
    }
}

/// A discount defined at the payment processor.
///
/// `percentage_discount` is a fraction off the price (`0.25` takes a quarter
/// off). Values are trusted as stored; range checks belong to the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCoupon {
    /// Merchant coupon identifier.
    pub id: MerchantCouponId,

    /// The payment processor's own coupon identifier, when one has been issued.
    pub identifier: Option<String>,

    /// Fraction taken off the price.
    pub percentage_discount: Decimal,

    /// Merchant coupon category.
    pub kind: MerchantCouponKind,
}

impl MerchantCoupon {
    /// Create a special merchant coupon with the given discount.
    #[must_use]
    pub fn new(id: MerchantCouponId, percentage_discount: Decimal) -> Self {
        Self {
            id,
            identifier: None,
            percentage_discount,
            kind: MerchantCouponKind::Special,
        }
    }

    /// Whether this coupon takes strictly more off than `other`.
    ///
    /// Equal discounts do not beat each other.
    #[must_use]
    pub fn beats(&self, other: &Self) -> bool {
        self.percentage_discount > other.percentage_discount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_requires_a_strictly_larger_discount() {
        let quarter = MerchantCoupon::new("mc_a".into(), Decimal::new(25, 2));
        let same = MerchantCoupon::new("mc_b".into(), Decimal::new(25, 2));
        let half = MerchantCoupon::new("mc_c".into(), Decimal::new(5, 1));

        assert!(half.beats(&quarter));
        assert!(!quarter.beats(&half));
        assert!(!quarter.beats(&same));
        assert!(!same.beats(&quarter));
    }

    #[test]
    fn kind_round_trips_through_storage_names() {
        for kind in [
            MerchantCouponKind::Special,
            MerchantCouponKind::Bulk,
            MerchantCouponKind::Ppp,
        ] {
            assert_eq!(kind.as_str().parse::<MerchantCouponKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "gift".parse::<MerchantCouponKind>(),
            Err(UnknownMerchantCouponKind("gift".to_string()))
        );
    }
}
