use std::io;

use thiserror::Error;

/// Why a provider could not produce an identifier.
///
/// These never reach the fingerprint itself: the assembler turns
/// [`ProviderError::Unsupported`] into the sentinel and everything else into
/// an empty segment. They exist for logging.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("identifier not available on this platform")]
    Unsupported,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{0} not found")]
    Missing(&'static str),
    #[error("{call} failed with status {code:#x}")]
    Os { call: &'static str, code: i32 },
    #[error("value is not valid UTF-8/UTF-16")]
    Encoding,
    #[cfg(target_os = "windows")]
    #[error("Windows error: {0}")]
    Windows(#[from] windows::core::Error),
    #[cfg(target_os = "macos")]
    #[error("system error: {0}")]
    Nix(#[from] nix::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected 3 '#'-separated segments, found {found}")]
pub struct FingerprintParseError {
    pub found: usize,
}
