use std::ffi::c_void;
use std::mem::size_of;

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_FLAGS_AND_ATTRIBUTES, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows::Win32::System::IO::DeviceIoControl;
use windows::Win32::System::Ioctl::{
    IOCTL_STORAGE_QUERY_PROPERTY, PropertyStandardQuery, STORAGE_DEVICE_DESCRIPTOR,
    STORAGE_PROPERTY_QUERY, StorageDeviceProperty,
};
use windows::core::w;

use crate::error::ProviderError;
use crate::scoped::Scoped;

const DESCRIPTOR_BUFFER_LEN: usize = 10000;

/// Serial number of `PhysicalDrive0` as reported by its storage descriptor.
pub fn primary_disk_serial() -> Result<String, ProviderError> {
    // No access rights needed for a property query.
    let device = unsafe {
        CreateFileW(
            w!(r"\\.\PhysicalDrive0"),
            0,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            None,
            OPEN_EXISTING,
            FILE_FLAGS_AND_ATTRIBUTES(0),
            None,
        )?
    };
    let device = Scoped::new(device, close_handle);

    let query = STORAGE_PROPERTY_QUERY {
        PropertyId: StorageDeviceProperty,
        QueryType: PropertyStandardQuery,
        ..Default::default()
    };
    let mut buffer = vec![0u8; DESCRIPTOR_BUFFER_LEN];
    let mut returned = 0u32;

    unsafe {
        DeviceIoControl(
            device.get(),
            IOCTL_STORAGE_QUERY_PROPERTY,
            Some(&query as *const _ as *const c_void),
            size_of::<STORAGE_PROPERTY_QUERY>() as u32,
            Some(buffer.as_mut_ptr() as *mut c_void),
            buffer.len() as u32,
            Some(&mut returned),
            None,
        )?;
    }

    let filled = &buffer[..(returned as usize).min(buffer.len())];
    if filled.len() < size_of::<STORAGE_DEVICE_DESCRIPTOR>() {
        return Err(ProviderError::Missing("STORAGE_DEVICE_DESCRIPTOR"));
    }
    // The byte buffer carries no alignment guarantee for the descriptor.
    let descriptor =
        unsafe { (filled.as_ptr() as *const STORAGE_DEVICE_DESCRIPTOR).read_unaligned() };

    serial_at(filled, descriptor.SerialNumberOffset as usize)
        .ok_or(ProviderError::Missing("SerialNumberOffset"))
}

fn close_handle(handle: HANDLE) {
    unsafe {
        let _ = CloseHandle(handle);
    }
}

/// NUL-terminated string starting at `offset`. Offset 0 means "no serial".
fn serial_at(descriptor: &[u8], offset: usize) -> Option<String> {
    if offset == 0 || offset >= descriptor.len() {
        return None;
    }
    let tail = &descriptor[offset..];
    let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    Some(String::from_utf8_lossy(&tail[..end]).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_nul_terminated_serial() {
        let mut buf = vec![0u8; 64];
        buf[40..48].copy_from_slice(b"  WD-123");
        assert_eq!(serial_at(&buf, 40).as_deref(), Some("  WD-123"));
    }

    #[test]
    fn zero_or_out_of_range_offset_is_none() {
        let buf = vec![b'x'; 16];
        assert_eq!(serial_at(&buf, 0), None);
        assert_eq!(serial_at(&buf, 16), None);
        assert_eq!(serial_at(&buf, 8).as_deref(), Some("xxxxxxxx"));
    }
}
