use reqwest::StatusCode;

/// Failure modes of location resolution.
///
/// The presentation layer collapses both variants into a single
/// "could not find that location" message, but callers that need to
/// can still tell "no match" apart from a transport problem.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no coordinates found for the given location")]
    Unresolved,

    #[error("location provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
}

/// Failure modes of a weather fetch.
///
/// Every variant renders as "could not fetch weather data" in the UI;
/// nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("no weather API key configured (set OPENWEATHER_API_KEY)")]
    MissingApiKey,

    #[error("weather provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather provider returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather provider response: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
