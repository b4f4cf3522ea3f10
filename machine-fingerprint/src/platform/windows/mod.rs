mod storage;
mod wmi;

use windows::Win32::System::WindowsProgramming::GetUserNameW;
use windows::core::PWSTR;

use crate::error::ProviderError;
use crate::identifier::IdentifierKind;
use crate::provider::IdentifierProvider;

// UNLEN from lmcons.h, plus the terminator.
const USERNAME_BUFFER_LEN: usize = 256 + 1;

/// WMI for the baseboard, a storage ioctl for the disk, `GetUserNameW` for the user.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsProvider;

impl IdentifierProvider for WindowsProvider {
    fn read(&self, kind: IdentifierKind) -> Result<String, ProviderError> {
        match kind {
            IdentifierKind::Board => wmi::baseboard_serial(),
            IdentifierKind::Disk => storage::primary_disk_serial(),
            IdentifierKind::Username => current_username(),
        }
    }
}

fn current_username() -> Result<String, ProviderError> {
    let mut buffer = [0u16; USERNAME_BUFFER_LEN];
    let mut len = buffer.len() as u32;
    unsafe { GetUserNameW(Some(PWSTR(buffer.as_mut_ptr())), &mut len)? };

    // `len` counts the terminating NUL.
    let chars = (len as usize).saturating_sub(1).min(buffer.len());
    String::from_utf16(&buffer[..chars]).map_err(|_| ProviderError::Encoding)
}
