use crate::error::ProviderError;
use crate::identifier::IdentifierKind;
use crate::provider::IdentifierProvider;

/// Provider for targets with no identifier queries. Touches no OS state.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedProvider;

impl IdentifierProvider for UnsupportedProvider {
    fn read(&self, _kind: IdentifierKind) -> Result<String, ProviderError> {
        Err(ProviderError::Unsupported)
    }
}
