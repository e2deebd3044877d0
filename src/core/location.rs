use crate::domain::ports::LocationProvider;

/// Used whenever the location cannot be determined.
pub const DEFAULT_LOCATION: &str = "India";

pub fn normalize_location(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Asks `provider` for the customer's location and falls back to `fallback`
/// on any failure. Errors are logged, never returned.
pub async fn resolve_location<P>(provider: &P, fallback: &str) -> String
where
    P: LocationProvider + ?Sized,
{
    match provider.locate().await {
        Ok(location) => {
            tracing::info!("📍 Detected location: {}", location);
            location
        }
        Err(e) => {
            tracing::warn!(
                "⚠️ Could not determine location ({}), defaulting to '{}'",
                e,
                fallback
            );
            fallback.to_string()
        }
    }
}
