//! App Router

use salvo::Router;

use crate::coupons;

pub(crate) fn app_router() -> Router {
    Router::with_path("products/{product}/active-coupon").get(coupons::active::handler)
}
