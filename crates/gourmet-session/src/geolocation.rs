//! Device-position acquisition.

use std::future::Future;
use std::time::Duration;

use gourmet_core::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("geolocation permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out acquiring position")]
    Timeout,
}

impl GeolocationError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Geolocation is not supported on this device.",
            GeolocationError::PermissionDenied => "Location access was denied.",
            GeolocationError::PositionUnavailable => "Your current position is unavailable.",
            GeolocationError::Timeout => "Timed out while getting your location.",
        }
    }
}

/// A source of the device's current position.
pub trait Locator {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

/// Reports coordinates supplied up front, e.g. from command-line flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocator {
    position: Option<Coordinates>,
}

impl FixedLocator {
    #[must_use]
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl Locator for FixedLocator {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send {
        let position = self.position;
        async move { position.ok_or(GeolocationError::Unsupported) }
    }
}

/// Runs `locator`, failing with [`GeolocationError::Timeout`] after `limit`.
///
/// # Errors
///
/// Returns the locator's own error, or `Timeout` when it does not answer in time.
pub async fn locate_with_timeout<L: Locator + Sync>(
    locator: &L,
    limit: Duration,
) -> Result<Coordinates, GeolocationError> {
    match tokio::time::timeout(limit, locator.locate()).await {
        Ok(result) => {
            if let Err(e) = &result {
                tracing::warn!(error = %e, "geolocation failed");
            }
            result
        }
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis(), "geolocation timed out");
            Err(GeolocationError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StalledLocator;

    impl Locator for StalledLocator {
        fn locate(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(Coordinates::new(0.0, 0.0))
            }
        }
    }

    struct DeniedLocator;

    impl Locator for DeniedLocator {
        fn locate(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send {
            async { Err(GeolocationError::PermissionDenied) }
        }
    }

    #[tokio::test]
    async fn fixed_locator_reports_position() {
        let locator = FixedLocator::new(Some(Coordinates::new(35.0, 139.0)));
        let position = locate_with_timeout(&locator, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(position, Coordinates::new(35.0, 139.0));
    }

    #[tokio::test]
    async fn fixed_locator_without_position_is_unsupported() {
        let err = locate_with_timeout(&FixedLocator::default(), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, GeolocationError::Unsupported);
    }

    #[tokio::test]
    async fn slow_locator_times_out() {
        let err = locate_with_timeout(&StalledLocator, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert_eq!(err, GeolocationError::Timeout);
        assert_eq!(err.user_message(), "Timed out while getting your location.");
    }

    #[tokio::test]
    async fn locator_error_passes_through() {
        let err = locate_with_timeout(&DeniedLocator, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err, GeolocationError::PermissionDenied);
    }
}
