//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{error, warn};

/// Map any error onto an HTTP status error, logging it first.
pub(crate) trait ResultExt<T> {
    /// Caller sent something unusable.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;

    /// Something on our side failed.
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            warn!("{brief}: {error}");

            StatusError::bad_request().brief(brief)
        })
    }

    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn or_400_maps_to_bad_request() {
        let result: Result<(), &str> = Err("nope");

        let error = result.or_400("bad input").err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn or_500_maps_to_internal_server_error() {
        let result: Result<(), &str> = Err("boom");

        let error = result.or_500("failed").err();

        assert_eq!(
            error.map(|e| e.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn ok_values_pass_through() {
        let result: Result<u8, &str> = Ok(7);

        assert_eq!(result.or_500("unused").ok(), Some(7));
    }
}
