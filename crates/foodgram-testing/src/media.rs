//! Sample image payloads in the base64 data-URL form accepted by the API.

/// A 1×1 transparent PNG as a data URL.
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// A data URL whose payload is not valid base64.
pub const BROKEN_DATA_URL: &str = "data:image/png;base64,@@not-base64@@";
