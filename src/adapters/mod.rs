// Adapters layer: HTTP-backed implementations of the domain ports.

pub mod gemini;
pub mod geolocation;
pub mod leap_api;

pub use gemini::GeminiLeapYears;
pub use geolocation::IpGeolocationClient;
pub use leap_api::LeapApiClient;
