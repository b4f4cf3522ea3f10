use std::ffi::{CStr, c_char};
use std::os::unix::fs::MetadataExt;

use super::iokit::{self, IoObject};
use crate::error::ProviderError;
use crate::platform::select::first_non_empty;

unsafe extern "C" {
    fn devname(dev: libc::dev_t, kind: libc::mode_t) -> *mut c_char;
}

/// BSD name (e.g. `disk3s1s1`) of the block device mounted at `/`.
fn root_device_name() -> Result<String, ProviderError> {
    let dev = std::fs::metadata("/")?.dev() as libc::dev_t;
    let name = unsafe { devname(dev, libc::S_IFBLK) };
    if name.is_null() {
        return Err(ProviderError::Missing("root block device"));
    }
    // devname returns a static buffer; copy out before anything else calls it.
    let name = unsafe { CStr::from_ptr(name) };
    name.to_str()
        .map(str::to_owned)
        .map_err(|_| ProviderError::Encoding)
}

fn find_media(bsd_name: &str) -> Result<IoObject, ProviderError> {
    let media = iokit::matching_services(c"IOMedia")?;
    while let Some(service) = iokit::next(&media) {
        if iokit::string_property(&service, c"BSD Name").as_deref() == Some(bsd_name) {
            return Ok(service);
        }
    }
    Err(ProviderError::Missing("IOMedia for root device"))
}

/// `Serial Number` of `start`, then of each service-plane ancestor in turn.
///
/// Lazy: one registry entry is held at a time and the walk ends when the
/// consumer stops pulling or the root of the plane is reached.
fn ancestor_serials(start: IoObject) -> impl Iterator<Item = Option<String>> {
    let mut pending = Some(start);
    let mut current: Option<IoObject> = None;
    std::iter::from_fn(move || {
        let node = match pending.take() {
            Some(node) => node,
            None => iokit::parent(current.as_ref()?).ok()?,
        };
        let serial = iokit::string_property(&node, c"Serial Number");
        current.replace(node);
        Some(serial)
    })
}

/// Serial number of the physical disk backing `/`.
///
/// Starts at the root partition's IOMedia node and climbs the service plane
/// until some ancestor (usually the block storage device) reports one.
pub fn root_disk_serial() -> Result<String, ProviderError> {
    let root = root_device_name()?;
    let media = find_media(&root)?;
    first_non_empty(ancestor_serials(media)).ok_or(ProviderError::Missing("Serial Number"))
}
