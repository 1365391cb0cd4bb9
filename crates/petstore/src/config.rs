//! Provider configuration.

use petstore_core::CONTENT_AUTHORITY;

/// Configuration for the [`PetProvider`](crate::PetProvider).
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Authority accepted in fully qualified addresses and used in content
    /// types.
    pub authority: String,
    /// Whether queries are logged at debug level (mutations always are).
    pub log_reads: bool,
}

impl ProviderConfig {
    /// Configuration publishing under a custom authority.
    pub fn with_authority(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            ..Self::default()
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            authority: CONTENT_AUTHORITY.to_string(),
            log_reads: false,
        }
    }
}
