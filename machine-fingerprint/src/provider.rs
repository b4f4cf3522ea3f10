use crate::error::ProviderError;
use crate::identifier::IdentifierKind;

/// Reads raw platform identifiers.
///
/// Implementations return the value as the OS reports it; trimming and
/// failure handling belong to [`Fingerprint::collect`](crate::Fingerprint::collect).
/// Return [`ProviderError::Unsupported`] for identifiers the platform has no
/// query for, so the caller can substitute the sentinel.
pub trait IdentifierProvider {
    fn read(&self, kind: IdentifierKind) -> Result<String, ProviderError>;
}

impl<P: IdentifierProvider + ?Sized> IdentifierProvider for &P {
    fn read(&self, kind: IdentifierKind) -> Result<String, ProviderError> {
        (**self).read(kind)
    }
}

impl<P: IdentifierProvider + ?Sized> IdentifierProvider for Box<P> {
    fn read(&self, kind: IdentifierKind) -> Result<String, ProviderError> {
        (**self).read(kind)
    }
}
