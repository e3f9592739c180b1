//! Natural-language preference parsing, at its interface.
//!
//! The crate does not talk to a language model. Callers either implement
//! [`PreferenceParser`] themselves or hand a [`HostedParser`] the transport
//! to their service, and may wrap the parser in a [`CachedParser`] with a
//! cache they own.

mod cache;

pub use cache::{CachedParser, JsonFileCache, MemoryCache, PreferenceCache};

use crate::error::PreferenceError;
use crate::models::UserPreferences;

/// Environment variable holding the preference service key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Turns free text into structured preferences.
///
/// An input the parser does not understand yields an all-`None` record,
/// not an error; errors are reserved for the service itself failing.
pub trait PreferenceParser {
    fn parse(&self, text: &str) -> Result<UserPreferences, PreferenceError>;
}

impl<T: PreferenceParser + ?Sized> PreferenceParser for &T {
    fn parse(&self, text: &str) -> Result<UserPreferences, PreferenceError> {
        (**self).parse(text)
    }
}

/// Decode a JSON preference payload, e.g. a model's structured output.
pub fn parse_payload(json: &str) -> Result<UserPreferences, PreferenceError> {
    Ok(serde_json::from_str(json)?)
}

/// Parser for inputs that already are a JSON preference record.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPreferenceParser;

impl PreferenceParser for JsonPreferenceParser {
    fn parse(&self, text: &str) -> Result<UserPreferences, PreferenceError> {
        parse_payload(text)
    }
}

/// Credentials for a hosted preference service.
#[derive(Clone)]
pub struct ParserCredentials {
    pub api_key: String,
}

impl std::fmt::Debug for ParserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserCredentials").field("api_key", &"<redacted>").finish()
    }
}

impl ParserCredentials {
    /// Read the key from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, PreferenceError> {
        let _ = dotenv::dotenv();
        Self::from_var(std::env::var(API_KEY_VAR).ok())
    }

    fn from_var(value: Option<String>) -> Result<Self, PreferenceError> {
        match value {
            Some(k) if !k.trim().is_empty() => Ok(Self { api_key: k }),
            _ => Err(PreferenceError::MissingCredential(API_KEY_VAR)),
        }
    }
}

/// Parser backed by a hosted service.
///
/// `transport` receives the credentials and the user's text and returns the
/// service's structured output as JSON. Credentials are read from the
/// environment on first use unless given up front, so a cached answer never
/// needs a key.
pub struct HostedParser<T> {
    credentials: Option<ParserCredentials>,
    transport: T,
}

impl<T> HostedParser<T>
where
    T: Fn(&ParserCredentials, &str) -> Result<String, PreferenceError>,
{
    pub fn new(transport: T) -> Self {
        Self { credentials: None, transport }
    }

    pub fn with_credentials(credentials: ParserCredentials, transport: T) -> Self {
        Self { credentials: Some(credentials), transport }
    }

    fn credentials(&self) -> Result<ParserCredentials, PreferenceError> {
        match &self.credentials {
            Some(c) => Ok(c.clone()),
            None => ParserCredentials::from_env(),
        }
    }
}

impl<T> PreferenceParser for HostedParser<T>
where
    T: Fn(&ParserCredentials, &str) -> Result<String, PreferenceError>,
{
    fn parse(&self, text: &str) -> Result<UserPreferences, PreferenceError> {
        let credentials = self.credentials()?;
        let payload = (self.transport)(&credentials, text)?;
        parse_payload(&payload)
    }
}

/// Run `parser` on the user's text.
///
/// Returns the preferences to rank with and whether the text was
/// understood. Blank text means "no preferences" and counts as understood;
/// an all-`None` result means "not understood" and is ranked exactly like
/// no preferences.
pub fn interpret<P: PreferenceParser>(parser: &P, text: &str) -> Result<(UserPreferences, bool), PreferenceError> {
    if text.trim().is_empty() {
        return Ok((UserPreferences::default(), true));
    }
    let parsed = parser.parse(text)?;
    if parsed.is_unspecified() {
        return Ok((UserPreferences::default(), false));
    }
    Ok((parsed, true))
}
