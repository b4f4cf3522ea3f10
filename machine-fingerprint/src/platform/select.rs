//! Selection rules shared by the platform providers. Each takes a lazy
//! iterator so walking stops (and drops whatever handles it holds) as soon
//! as a value is picked.

#![cfg_attr(not(any(target_os = "windows", target_os = "macos")), allow(dead_code))]

/// First present, non-empty value. Absent and empty entries are skipped.
pub(crate) fn first_non_empty<I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    values.into_iter().flatten().find(|v| !v.is_empty())
}

/// First present value, even if empty.
pub(crate) fn first_string<I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    values.into_iter().flatten().next()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::scoped::{Scoped, live_os_handles};

    fn owned(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn non_empty_skips_blank_and_missing_nodes() {
        let values = owned(&[Some(""), None, Some("S1"), Some("S2")]);
        assert_eq!(first_non_empty(values).as_deref(), Some("S1"));
    }

    #[test]
    fn non_empty_is_none_when_every_node_is_blank() {
        assert_eq!(first_non_empty(owned(&[Some(""), None, Some("")])), None);
        assert_eq!(first_non_empty(owned(&[])), None);
    }

    #[test]
    fn string_takes_first_present_row_even_if_empty() {
        let rows = owned(&[None, Some(""), Some("BSN-1")]);
        assert_eq!(first_string(rows).as_deref(), Some(""));

        let rows = owned(&[None, Some("BSN-1"), Some("BSN-2")]);
        assert_eq!(first_string(rows).as_deref(), Some("BSN-1"));
    }

    #[test]
    fn string_is_none_without_present_rows() {
        assert_eq!(first_string(owned(&[None, None])), None);
    }

    thread_local! {
        static RELEASED: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };
    }

    fn record(handle: u32) {
        RELEASED.with(|r| r.borrow_mut().push(handle));
    }

    // Walks handles 1..=4 the way the disk lookup climbs registry parents,
    // holding one guard at a time.
    fn guarded_walk(serials: [&'static str; 4]) -> impl Iterator<Item = Option<String>> {
        let mut current: Option<Scoped<u32>> = None;
        let mut next_handle = 1u32;
        std::iter::from_fn(move || {
            if next_handle > 4 {
                return None;
            }
            let node = Scoped::new(next_handle, record);
            let serial = serials[(node.get() - 1) as usize].to_string();
            next_handle += 1;
            // Dropping the previous node here mirrors stepping to a parent.
            current.replace(node);
            Some(Some(serial))
        })
    }

    #[test]
    fn early_stop_releases_every_walked_handle() {
        let found = first_non_empty(guarded_walk(["", "", "WD-42", "unused"]));
        assert_eq!(found.as_deref(), Some("WD-42"));
        assert_eq!(RELEASED.with(|r| r.borrow().clone()), [1, 2, 3]);
        assert_eq!(live_os_handles(), 0);
    }

    #[test]
    fn exhausted_walk_releases_every_handle() {
        assert_eq!(first_non_empty(guarded_walk(["", "", "", ""])), None);
        assert_eq!(RELEASED.with(|r| r.borrow().clone()), [1, 2, 3, 4]);
        assert_eq!(live_os_handles(), 0);
    }
}
