use std::cell::Cell;

use strum::IntoEnumIterator;

use machine_fingerprint::{
    Fingerprint, IdentifierKind, IdentifierProvider, NativeProvider, ProviderError,
    UnsupportedProvider, get_machine_fingerprint,
};

/// Fails every read with an OS-style error and counts the calls.
#[derive(Default)]
struct BrokenProvider {
    calls: Cell<usize>,
}

impl IdentifierProvider for BrokenProvider {
    fn read(&self, _kind: IdentifierKind) -> Result<String, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        Err(ProviderError::Os {
            call: "ConnectServer",
            code: -2147217405,
        })
    }
}

/// Answers from a table, failing the disk query only.
struct FlakyDisk;

impl IdentifierProvider for FlakyDisk {
    fn read(&self, kind: IdentifierKind) -> Result<String, ProviderError> {
        match kind {
            IdentifierKind::Board => Ok("  C02X1234\n".to_string()),
            IdentifierKind::Disk => Err(ProviderError::Io(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            ))),
            IdentifierKind::Username => Ok("alice".to_string()),
        }
    }
}

#[test]
fn fingerprint_has_exactly_two_separators() {
    let fp = get_machine_fingerprint();
    assert_eq!(fp.matches('#').count(), 2, "{fp:?}");
}

#[test]
fn fingerprint_is_stable_within_a_process() {
    assert_eq!(get_machine_fingerprint(), get_machine_fingerprint());
}

// Linux and other targets hold no OS handles; see `platform::select` for the
// walk-release coverage that runs everywhere.
#[cfg(any(target_os = "windows", target_os = "macos"))]
#[test]
fn native_call_releases_all_os_handles() {
    use machine_fingerprint::live_os_handles;

    let before = live_os_handles();
    let _ = Fingerprint::collect(&NativeProvider::default());
    assert_eq!(live_os_handles(), before);
    assert_eq!(live_os_handles(), 0);
}

#[test]
fn native_segments_are_trimmed() {
    let fp = Fingerprint::collect(&NativeProvider::default());
    for kind in IdentifierKind::iter() {
        let segment = fp.get(kind);
        assert_eq!(machine_fingerprint::trim_identifier(segment), segment);
    }
}

#[test]
fn unsupported_provider_yields_sentinels() {
    let fp = Fingerprint::collect(&UnsupportedProvider);
    assert_eq!(fp.to_string(), "unknown_board#unknown_hdd#unknown_username");
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
#[test]
fn other_platforms_use_sentinels() {
    assert_eq!(
        get_machine_fingerprint(),
        "unknown_board#unknown_hdd#unknown_username"
    );
}

#[test]
fn failing_provider_gives_empty_segments_without_aborting() {
    let provider = BrokenProvider::default();
    let fp = Fingerprint::collect(&provider);
    assert_eq!(fp.to_string(), "##");
    assert_eq!(provider.calls.get(), 3);
}

#[test]
fn single_failure_only_empties_its_segment() {
    let fp = Fingerprint::collect(&FlakyDisk);
    assert_eq!(fp.to_string(), "C02X1234##alice");
}

#[test]
fn boxed_trait_objects_are_providers() {
    let provider: Box<dyn IdentifierProvider> = Box::new(FlakyDisk);
    let fp = Fingerprint::collect(&provider);
    assert_eq!(fp.board(), "C02X1234");
    assert_eq!(fp.username(), "alice");
}

#[test]
fn stored_fingerprint_round_trips_through_parse() {
    let stored = Fingerprint::collect(&FlakyDisk).to_string();
    let parsed: Fingerprint = stored.parse().unwrap();
    assert_eq!(parsed, Fingerprint::collect(&FlakyDisk));
}
