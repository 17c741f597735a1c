//! Test context for service-level integration tests.

use std::sync::Arc;

use coupons::resolver::CouponResolver;

use crate::{coupons::PgCouponsService, database::Db};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub(crate) db: TestDb,
    pub(crate) coupons: PgCouponsService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let db = TestDb::new().await;

        Self {
            coupons: PgCouponsService::new(Db::new(db.pool().clone())),
            db,
        }
    }

    /// A resolver reading both sources from this context's database.
    pub(crate) fn resolver(&self) -> CouponResolver {
        let service = Arc::new(self.coupons.clone());

        CouponResolver::new(service.clone(), service)
    }
}
