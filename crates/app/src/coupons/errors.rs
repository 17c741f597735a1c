//! Coupons service errors.

use coupons::sources::LookupError;
use sqlx::Error;
use thiserror::Error;

/// Failure reading coupons from Postgres.
#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error("coupon not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CouponsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            Error::ColumnDecode { .. } => Self::InvalidData,
            error => Self::Sql(error),
        }
    }
}

impl From<CouponsServiceError> for LookupError {
    fn from(error: CouponsServiceError) -> Self {
        LookupError::storage(error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = CouponsServiceError::from(Error::RowNotFound);

        assert!(matches!(error, CouponsServiceError::NotFound));
    }

    #[test]
    fn decode_failures_map_to_invalid_data() {
        let error = CouponsServiceError::from(Error::ColumnDecode {
            index: "used_count".to_string(),
            source: "negative".into(),
        });

        assert!(matches!(error, CouponsServiceError::InvalidData));
    }

    #[test]
    fn converts_into_storage_lookup_error() {
        let error = LookupError::from(CouponsServiceError::Sql(Error::PoolTimedOut));

        assert!(matches!(error, LookupError::Storage(_)));
        assert!(error.source().is_some(), "expected the service error as source");
    }
}
