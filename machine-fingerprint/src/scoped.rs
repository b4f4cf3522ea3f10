use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static LIVE_HANDLES: Cell<usize> = const { Cell::new(0) };
}

/// Number of [`Scoped`] OS handles currently held by the calling thread.
///
/// Zero between fingerprint calls; anything else is a leak.
pub fn live_os_handles() -> usize {
    LIVE_HANDLES.with(Cell::get)
}

/// A raw OS handle that is released exactly once, when the guard drops.
///
/// Wrap handles the moment they are obtained so early returns and loop
/// breaks cannot skip the release. Not `Send`: handles stay on the thread
/// that acquired them.
// Only the Windows and macOS providers hold OS handles.
#[cfg_attr(not(any(target_os = "windows", target_os = "macos")), allow(dead_code))]
pub(crate) struct Scoped<T: Copy> {
    handle: T,
    release: fn(T),
    _not_send: PhantomData<*const ()>,
}

#[cfg_attr(not(any(target_os = "windows", target_os = "macos")), allow(dead_code))]
impl<T: Copy> Scoped<T> {
    pub(crate) fn new(handle: T, release: fn(T)) -> Self {
        LIVE_HANDLES.with(|live| live.set(live.get() + 1));
        Self {
            handle,
            release,
            _not_send: PhantomData,
        }
    }

    pub(crate) fn get(&self) -> T {
        self.handle
    }
}

impl<T: Copy> Drop for Scoped<T> {
    fn drop(&mut self) {
        (self.release)(self.handle);
        LIVE_HANDLES.with(|live| live.set(live.get().saturating_sub(1)));
    }
}
