//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use coupons::{
    resolver::CouponResolver,
    sources::{MockCodeCouponSource, MockDefaultCouponSource},
};
use coupons_app::context::AppContext;

use crate::state::State;

pub(crate) fn state_with_sources(
    defaults: MockDefaultCouponSource,
    incoming: MockCodeCouponSource,
) -> Arc<State> {
    State::from_app_context(AppContext {
        coupons: CouponResolver::new(Arc::new(defaults), Arc::new(incoming)),
    })
}

pub(crate) fn coupons_service(
    defaults: MockDefaultCouponSource,
    incoming: MockCodeCouponSource,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_sources(defaults, incoming)))
            .push(route),
    )
}
