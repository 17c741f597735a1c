//! Active Merchant Coupon Resolution

use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

use jiff::Timestamp;
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, debug};

use crate::{
    coupons::{Coupon, CouponId},
    ids::ProductId,
    merchant_coupons::MerchantCoupon,
    sources::{
        CodeCouponSource, CouponLookup, DefaultCouponSource, DefaultCoupons, IncomingCoupon,
        LookupError,
    },
};

/// Errors raised while resolving the active merchant coupon.
///
/// Lookup failures are surfaced as-is, never downgraded to "no coupon".
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The default (sale) coupon lookup failed.
    #[error("failed to look up default coupon")]
    DefaultCoupon(#[source] LookupError),

    /// The id/code coupon lookup failed.
    #[error("failed to look up incoming coupon")]
    IncomingCoupon(#[source] LookupError),
}

/// Input to [`CouponResolver::get_active_merchant_coupon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCouponQuery {
    /// Product being purchased.
    pub product: ProductId,

    /// Site coupon id supplied with the purchase.
    pub site_coupon: Option<CouponId>,

    /// Discount code entered by the customer.
    pub code: Option<String>,

    /// Instant at which validity is evaluated.
    pub point_in_time: Timestamp,
}

impl ActiveCouponQuery {
    /// Query for `product` with no coupon id or code.
    #[must_use]
    pub fn new(product: ProductId, point_in_time: Timestamp) -> Self {
        Self {
            product,
            site_coupon: None,
            code: None,
            point_in_time,
        }
    }

    /// Build a query from raw request strings, where an empty string means "no value".
    #[must_use]
    pub fn from_raw(
        product: &str,
        site_coupon_id: &str,
        code: &str,
        point_in_time: Timestamp,
    ) -> Self {
        let code = code.trim();

        Self {
            product: ProductId::new(product.trim()),
            site_coupon: CouponId::from_raw(site_coupon_id),
            code: (!code.is_empty()).then(|| code.to_string()),
            point_in_time,
        }
    }

    /// Attach a site coupon id.
    #[must_use]
    pub fn with_site_coupon(mut self, site_coupon: CouponId) -> Self {
        self.site_coupon = Some(site_coupon);
        self
    }

    /// Attach a discount code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn lookup(&self) -> CouponLookup {
        CouponLookup {
            coupon: self.site_coupon.clone(),
            code: self.code.clone(),
        }
    }
}

/// Which competing discount won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountOrigin {
    /// The coupon resolved from the supplied id or code.
    Incoming,

    /// The product's running sale.
    Sale,

    /// No discount applies.
    NoDiscount,
}

impl DiscountOrigin {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Sale => "sale",
            Self::NoDiscount => "none",
        }
    }
}

impl Display for DiscountOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The discount that applies to a purchase.
///
/// `active_merchant_coupon` always serialises (as `null` when absent);
/// `default_coupon` is only present when the selected merchant coupon is the
/// one the sale coupon wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveCouponDecision {
    /// The merchant coupon to apply, if any.
    pub active_merchant_coupon: Option<MerchantCoupon>,

    /// The sale coupon, when it is what ended up applying.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_coupon: Option<Coupon>,

    #[serde(skip)]
    origin: DiscountOrigin,
}

impl ActiveCouponDecision {
    /// A decision that applies nothing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            active_merchant_coupon: None,
            default_coupon: None,
            origin: DiscountOrigin::NoDiscount,
        }
    }

    /// Which competing discount won.
    #[must_use]
    pub fn origin(&self) -> DiscountOrigin {
        self.origin
    }
}

/// Pick the single merchant coupon that applies.
///
/// Priority order:
/// 1. A valid incoming coupon competing with a sale wins only with a strictly
///    larger discount; ties go to the sale.
/// 2. A valid incoming coupon with no sale running.
/// 3. The sale, whether or not an incoming coupon was supplied.
/// 4. Nothing.
///
/// An incoming coupon without a merchant coupon counts as no incoming coupon.
#[must_use]
pub fn decide(
    defaults: Option<DefaultCoupons>,
    incoming: Option<IncomingCoupon>,
    point_in_time: Timestamp,
) -> ActiveCouponDecision {
    let DefaultCoupons {
        default_coupon,
        default_merchant_coupon,
    } = defaults.unwrap_or_default();

    let incoming_merchant_coupon = incoming
        .filter(|incoming| incoming.is_valid_at(point_in_time))
        .and_then(|incoming| incoming.merchant_coupon);

    let (active_merchant_coupon, origin) = match (incoming_merchant_coupon, default_merchant_coupon)
    {
        (Some(incoming), Some(sale)) => {
            if incoming.beats(&sale) {
                debug!(incoming = %incoming.id, sale = %sale.id, "incoming coupon beats sale");

                (Some(incoming), DiscountOrigin::Incoming)
            } else {
                debug!(incoming = %incoming.id, sale = %sale.id, "sale holds against incoming coupon");

                (Some(sale), DiscountOrigin::Sale)
            }
        }
        (Some(incoming), None) => {
            debug!(incoming = %incoming.id, "no sale running, applying incoming coupon");

            (Some(incoming), DiscountOrigin::Incoming)
        }
        (None, Some(sale)) => {
            debug!(sale = %sale.id, "applying sale");

            (Some(sale), DiscountOrigin::Sale)
        }
        (None, None) => (None, DiscountOrigin::NoDiscount),
    };

    let default_coupon = default_coupon.filter(|coupon| {
        active_merchant_coupon
            .as_ref()
            .is_some_and(|active| coupon.wraps(active))
    });

    ActiveCouponDecision {
        active_merchant_coupon,
        default_coupon,
        origin,
    }
}

/// Resolves the merchant coupon that applies to a purchase.
#[derive(Clone)]
pub struct CouponResolver {
    defaults: Arc<dyn DefaultCouponSource>,
    incoming: Arc<dyn CodeCouponSource>,
}

impl Debug for CouponResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CouponResolver").finish_non_exhaustive()
    }
}

impl CouponResolver {
    /// Create a resolver over the given sources.
    #[must_use]
    pub fn new(
        defaults: Arc<dyn DefaultCouponSource>,
        incoming: Arc<dyn CodeCouponSource>,
    ) -> Self {
        Self { defaults, incoming }
    }

    /// Decide which merchant coupon applies to `query`.
    ///
    /// Both lookups run concurrently. The id/code lookup is always issued,
    /// even when the query carries neither.
    ///
    /// # Errors
    ///
    /// Returns an error when either lookup fails.
    #[tracing::instrument(
        name = "coupons.resolver.get_active_merchant_coupon",
        skip(self, query),
        fields(
            product = %query.product,
            has_site_coupon = query.site_coupon.is_some(),
            has_code = query.code.is_some(),
            origin = tracing::field::Empty,
            active_merchant_coupon = tracing::field::Empty
        ),
        err
    )]
    pub async fn get_active_merchant_coupon(
        &self,
        query: &ActiveCouponQuery,
    ) -> Result<ActiveCouponDecision, ResolveError> {
        let lookup = query.lookup();

        let (defaults, incoming) = tokio::try_join!(
            async {
                self.defaults
                    .default_coupon(&query.product, query.point_in_time)
                    .await
                    .map_err(ResolveError::DefaultCoupon)
            },
            async {
                self.incoming
                    .coupon_for_id_or_code(&lookup, query.point_in_time)
                    .await
                    .map_err(ResolveError::IncomingCoupon)
            },
        )?;

        let decision = decide(defaults, incoming, query.point_in_time);

        let span = Span::current();

        span.record("origin", tracing::field::display(decision.origin()));

        if let Some(active) = &decision.active_merchant_coupon {
            span.record("active_merchant_coupon", tracing::field::display(&active.id));
        }

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn at() -> Timestamp {
        Timestamp::UNIX_EPOCH
    }

    fn merchant_coupon(id: &str, hundredths: i64) -> MerchantCoupon {
        MerchantCoupon::new(id.into(), Decimal::new(hundredths, 2))
    }

    fn incoming(merchant_coupon: Option<MerchantCoupon>) -> IncomingCoupon {
        IncomingCoupon {
            coupon: Coupon {
                merchant_coupon_id: merchant_coupon.as_ref().map(|mc| mc.id.clone()),
                ..Coupon::new("incoming".into())
            },
            merchant_coupon,
        }
    }

    fn sale(merchant_coupon: MerchantCoupon) -> DefaultCoupons {
        DefaultCoupons {
            default_coupon: Some(Coupon {
                merchant_coupon_id: Some(merchant_coupon.id.clone()),
                is_default: true,
                ..Coupon::new("sale".into())
            }),
            default_merchant_coupon: Some(merchant_coupon),
        }
    }

    #[test]
    fn nothing_found_applies_nothing() {
        let decision = decide(None, None, at());

        assert_eq!(decision, ActiveCouponDecision::none());
        assert_eq!(decision.origin(), DiscountOrigin::NoDiscount);
    }

    #[test]
    fn incoming_without_merchant_coupon_counts_as_absent() {
        let decision = decide(
            Some(sale(merchant_coupon("mc_sale", 10))),
            Some(incoming(None)),
            at(),
        );

        assert_eq!(decision.origin(), DiscountOrigin::Sale);
        assert!(decision.default_coupon.is_some());
    }

    #[test]
    fn sale_without_merchant_coupon_is_no_sale() {
        let defaults = DefaultCoupons {
            default_coupon: Some(Coupon::new("sale".into())),
            default_merchant_coupon: None,
        };

        let decision = decide(Some(defaults), None, at());

        assert_eq!(decision, ActiveCouponDecision::none());
    }

    #[test]
    fn default_coupon_attached_when_incoming_shares_its_merchant_coupon() {
        let shared = merchant_coupon("mc_shared", 20);

        let decision = decide(Some(sale(shared.clone())), Some(incoming(Some(shared))), at());

        assert_eq!(decision.origin(), DiscountOrigin::Sale);
        assert!(decision.default_coupon.is_some());
    }

    #[test]
    fn serialises_absent_coupon_as_null_and_omits_default_key() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(ActiveCouponDecision::none())?;

        assert_eq!(json, serde_json::json!({ "active_merchant_coupon": null }));

        Ok(())
    }

    #[test]
    fn from_raw_maps_empty_strings_to_none() {
        let query = ActiveCouponQuery::from_raw("prod_1", "", "  ", at());

        assert_eq!(query, ActiveCouponQuery::new("prod_1".into(), at()));
        assert!(query.lookup().is_empty());
    }

    #[test]
    fn from_raw_keeps_supplied_values() {
        let query = ActiveCouponQuery::from_raw("prod_1", "coupon_1", "SPRING", at());

        assert_eq!(
            query,
            ActiveCouponQuery::new("prod_1".into(), at())
                .with_site_coupon("coupon_1".into())
                .with_code("SPRING")
        );
    }
}
