mod disk;
mod iokit;

use nix::unistd::{Uid, User};
use objc2_io_kit::kIOPlatformSerialNumberKey;

use crate::error::ProviderError;
use crate::identifier::IdentifierKind;
use crate::provider::IdentifierProvider;

/// IORegistry lookups for board and disk, the password database for the user.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacProvider;

impl IdentifierProvider for MacProvider {
    fn read(&self, kind: IdentifierKind) -> Result<String, ProviderError> {
        match kind {
            IdentifierKind::Board => platform_serial(),
            IdentifierKind::Disk => disk::root_disk_serial(),
            IdentifierKind::Username => current_username(),
        }
    }
}

fn platform_serial() -> Result<String, ProviderError> {
    let expert = iokit::matching_service(c"IOPlatformExpertDevice")
        .ok_or(ProviderError::Missing("IOPlatformExpertDevice"))?;
    iokit::string_property(&expert, kIOPlatformSerialNumberKey)
        .ok_or(ProviderError::Missing("IOPlatformSerialNumber"))
}

fn current_username() -> Result<String, ProviderError> {
    User::from_uid(Uid::effective())?
        .map(|user| user.name)
        .ok_or(ProviderError::Missing("passwd entry"))
}
