#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "macos")]
mod macos;

mod select;
mod unsupported;

pub use unsupported::UnsupportedProvider;

#[cfg(target_os = "windows")]
pub use windows::WindowsProvider as NativeProvider;

#[cfg(target_os = "macos")]
pub use macos::MacProvider as NativeProvider;

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub use unsupported::UnsupportedProvider as NativeProvider;
