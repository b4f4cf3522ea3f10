use std::ffi::CStr;

use objc2_core_foundation::CFString;
use objc2_io_kit::{
    IOIteratorNext, IOObjectRelease, IORegistryEntryCreateCFProperty,
    IORegistryEntryGetParentEntry, IOServiceGetMatchingService, IOServiceGetMatchingServices,
    IOServiceMatching, io_iterator_t, io_object_t, io_registry_entry_t, kIOMainPortDefault,
    kIOServicePlane,
};

use crate::error::ProviderError;
use crate::scoped::Scoped;

/// An IORegistry object reference, released on drop.
pub type IoObject = Scoped<io_object_t>;

fn io_object(object: io_object_t) -> Option<IoObject> {
    if object == 0 {
        return None;
    }
    Some(Scoped::new(object, |o| unsafe {
        IOObjectRelease(o);
    }))
}

/// First registered service of class `class`.
pub fn matching_service(class: &CStr) -> Option<IoObject> {
    // The matching dictionary is consumed by the call.
    let matching = unsafe { IOServiceMatching(class.as_ptr()) }?;
    let service = unsafe { IOServiceGetMatchingService(kIOMainPortDefault, Some(matching.into())) };
    io_object(service)
}

/// Iterator over all registered services of class `class`.
pub fn matching_services(class: &CStr) -> Result<IoObject, ProviderError> {
    let matching = unsafe { IOServiceMatching(class.as_ptr()) }
        .ok_or(ProviderError::Missing("IOServiceMatching dictionary"))?;
    let mut iterator: io_iterator_t = 0;
    let kr = unsafe {
        IOServiceGetMatchingServices(kIOMainPortDefault, Some(matching.into()), &mut iterator)
    };
    if kr != libc::KERN_SUCCESS {
        return Err(ProviderError::Os {
            call: "IOServiceGetMatchingServices",
            code: kr,
        });
    }
    io_object(iterator).ok_or(ProviderError::Missing("IOMedia iterator"))
}

pub fn next(iterator: &IoObject) -> Option<IoObject> {
    io_object(unsafe { IOIteratorNext(iterator.get()) })
}

/// Parent of `entry` in the service plane.
pub fn parent(entry: &IoObject) -> Result<IoObject, ProviderError> {
    let mut parent: io_registry_entry_t = 0;
    let kr = unsafe {
        IORegistryEntryGetParentEntry(entry.get(), kIOServicePlane.as_ptr(), &mut parent)
    };
    if kr != libc::KERN_SUCCESS {
        return Err(ProviderError::Os {
            call: "IORegistryEntryGetParentEntry",
            code: kr,
        });
    }
    io_object(parent).ok_or(ProviderError::Missing("registry parent"))
}

/// String property `key` of `entry`. `None` when absent or not a string.
pub fn string_property(entry: &IoObject, key: &CStr) -> Option<String> {
    let key = CFString::from_str(&key.to_string_lossy());
    // Create rule: the returned CFRetained owns the reference and releases it.
    let value = unsafe { IORegistryEntryCreateCFProperty(entry.get(), Some(&*key), None, 0) }?;
    value.downcast_ref::<CFString>().map(|s| s.to_string())
}
