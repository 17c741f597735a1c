//! Request state: the coupon resolver wiring shared by every handler.

use std::sync::Arc;

use coupons_app::context::AppContext;

/// Injected into the depot once at startup and fetched with `obtain_or_500`.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    /// Wrap an already connected application context.
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        Self { app }
    }

    /// Shared form handed to `affix_state::inject`.
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app))
    }
}
