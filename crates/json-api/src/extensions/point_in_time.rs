//! Point-in-time query parsing helpers.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

/// Resolve the optional `at` query parameter, defaulting to the current instant.
pub(crate) trait PointInTimeExt {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for Option<String> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        self.filter(|value| !value.trim().is_empty())
            .map(|value| value.trim().parse::<Timestamp>())
            .transpose()
            .or_400("could not parse \"at\" query parameter")
            .map(|point_in_time| point_in_time.unwrap_or_else(Timestamp::now))
    }
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        self.into_inner().into_point_in_time()
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_rfc3339_instant() -> TestResult {
        let at = Some("2026-02-21T12:00:00Z".to_string()).into_point_in_time()?;

        assert_eq!(at, "2026-02-21T12:00:00Z".parse::<Timestamp>()?);

        Ok(())
    }

    #[test]
    fn missing_or_blank_defaults_to_now() -> TestResult {
        let before = Timestamp::now();

        let missing = None::<String>.into_point_in_time()?;
        let blank = Some(" ".to_string()).into_point_in_time()?;

        assert!(missing >= before, "expected a current timestamp");
        assert!(blank >= before, "expected a current timestamp");

        Ok(())
    }

    #[test]
    fn garbage_is_a_bad_request() {
        let error = Some("yesterday".to_string()).into_point_in_time().err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::BAD_REQUEST));
    }
}
