//! Best-effort machine fingerprint: `<board serial>#<disk serial>#<username>`.
//!
//! Each identifier comes from a platform query picked at build time (WMI and a
//! storage ioctl on Windows, the IORegistry and password database on macOS).
//! A failed query leaves its segment empty; other platforms get fixed
//! placeholders. Nothing here ever fails the caller.

mod error;
mod fingerprint;
mod identifier;
mod jni_export;
mod platform;
mod provider;
mod scoped;

pub use error::{FingerprintParseError, ProviderError};
pub use fingerprint::{Fingerprint, SEPARATOR};
pub use identifier::{IdentifierKind, trim_identifier};
pub use platform::{NativeProvider, UnsupportedProvider};
pub use provider::IdentifierProvider;
pub use scoped::live_os_handles;

/// Fingerprint of the current machine and user, e.g. `C02X1234#S4EVNX0M#alice`.
///
/// Blocks on the platform queries. Segments whose query failed are empty;
/// on platforms other than Windows and macOS the result is always
/// `unknown_board#unknown_hdd#unknown_username`.
pub fn get_machine_fingerprint() -> String {
    Fingerprint::collect(&NativeProvider::default()).to_string()
}
