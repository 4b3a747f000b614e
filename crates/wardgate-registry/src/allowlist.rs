//! IP allow lists: addresses that bypass normal admission checks.
//!
//! The gateway keeps two of them, one for trusted addresses and one for
//! pre-validated ones. Both are built the same way as the client registry
//! (an ordered list behind its own lock) but hold bare IP entries and are
//! usually replaced wholesale on reload rather than edited.

use std::fmt;

use parking_lot::{Mutex, MutexGuard};

use crate::RegistryError;
use crate::list::OrderedList;

/// Which allow list a registry holds. Used for log and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowListKind {
    Trusted,
    Valid,
}

impl fmt::Display for AllowListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trusted => write!(f, "trusted"),
            Self::Valid => write!(f, "valid"),
        }
    }
}

/// One allowed address. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpEntry {
    ip: String,
}

impl IpEntry {
    pub fn ip(&self) -> &str {
        &self.ip
    }
}

/// Exclusive access to an allow list. Dropping it releases the lock.
pub type IpGuard<'a> = MutexGuard<'a, IpList>;

/// A lockable allow list.
#[derive(Debug)]
pub struct IpRegistry {
    inner: Mutex<IpList>,
}

impl IpRegistry {
    /// Creates an empty allow list of the given kind.
    pub fn new(kind: AllowListKind) -> Self {
        Self {
            inner: Mutex::new(IpList {
                kind,
                entries: OrderedList::new(),
            }),
        }
    }

    /// Blocks until the list lock is available and returns the guard.
    pub fn lock(&self) -> IpGuard<'_> {
        self.inner.lock()
    }

    /// Returns the guard if the lock is free right now.
    pub fn try_lock(&self) -> Option<IpGuard<'_>> {
        self.inner.try_lock()
    }
}

/// Allowed addresses in insertion order.
///
/// Obtained only through [`IpRegistry::lock`].
#[derive(Debug)]
pub struct IpList {
    kind: AllowListKind,
    entries: OrderedList<IpEntry>,
}

impl IpList {
    pub fn kind(&self) -> AllowListKind {
        self.kind
    }

    /// Appends an address at the tail. Duplicates are not checked.
    pub fn append(&mut self, ip: impl Into<String>) -> &IpEntry {
        let list = self.kind;
        let entry = self.entries.push_back(IpEntry { ip: ip.into() });
        tracing::debug!(%list, ip = %entry.ip, "allow-list entry added");
        entry
    }

    /// First entry with this address.
    pub fn find_by_ip(&self, ip: &str) -> Option<&IpEntry> {
        self.entries.find(|e| e.ip == ip)
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.find_by_ip(ip).is_some()
    }

    /// Removes the first entry with this address.
    ///
    /// # Errors
    /// Returns [`RegistryError::IpNotFound`] if the address is not listed.
    pub fn remove(&mut self, ip: &str) -> Result<IpEntry, RegistryError> {
        match self.entries.remove_first(|e| e.ip == ip) {
            Some(entry) => {
                tracing::debug!(list = %self.kind, %ip, "allow-list entry removed");
                Ok(entry)
            }
            None => {
                tracing::debug!(list = %self.kind, %ip, "allow-list entry to remove not found");
                Err(RegistryError::IpNotFound {
                    list: self.kind,
                    ip: ip.to_string(),
                })
            }
        }
    }

    /// Releases every entry. Returns how many were released.
    pub fn free_all(&mut self) -> usize {
        for entry in self.entries.iter() {
            tracing::debug!(list = %self.kind, ip = %entry.ip, "freeing allow-list entry");
        }
        let count = self.entries.clear();
        tracing::info!(list = %self.kind, freed = count, "allow list cleared");
        count
    }

    /// Swaps the whole list for `ips` in one locked section.
    ///
    /// Returns the new length.
    pub fn replace<I, S>(&mut self, ips: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.free_all();
        for ip in ips {
            self.append(ip);
        }
        tracing::info!(list = %self.kind, entries = self.entries.len(), "allow list reloaded");
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IpEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trusted(ips: &[&str]) -> IpRegistry {
        let registry = IpRegistry::new(AllowListKind::Trusted);
        {
            let mut list = registry.lock();
            for ip in ips {
                list.append(*ip);
            }
        }
        registry
    }

    fn listed(list: &IpList) -> Vec<&str> {
        list.iter().map(IpEntry::ip).collect()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let registry = trusted(&["10.1.0.1", "10.1.0.2", "10.1.0.3"]);

        let list = registry.lock();
        assert_eq!(listed(&list), vec!["10.1.0.1", "10.1.0.2", "10.1.0.3"]);
        assert_eq!(list.kind(), AllowListKind::Trusted);
    }

    #[test]
    fn test_find_by_ip_hit_and_miss() {
        let registry = trusted(&["10.1.0.1", "10.1.0.2"]);
        let list = registry.lock();

        assert_eq!(list.find_by_ip("10.1.0.2").map(IpEntry::ip), Some("10.1.0.2"));
        assert!(list.contains("10.1.0.1"));
        assert!(!list.contains("10.1.0.9"));
    }

    #[test]
    fn test_remove_unlisted_returns_not_found() {
        let registry = IpRegistry::new(AllowListKind::Valid);
        let mut list = registry.lock();
        list.append("10.2.0.1");

        let result = list.remove("10.2.0.9");

        assert!(matches!(
            result,
            Err(RegistryError::IpNotFound { list: AllowListKind::Valid, ref ip }) if ip == "10.2.0.9"
        ));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_listed_entry() {
        let registry = trusted(&["10.1.0.1", "10.1.0.2", "10.1.0.3"]);
        let mut list = registry.lock();

        let entry = list.remove("10.1.0.2").expect("listed");

        assert_eq!(entry.ip(), "10.1.0.2");
        assert_eq!(listed(&list), vec!["10.1.0.1", "10.1.0.3"]);
    }

    #[test]
    fn test_free_all_empties_list() {
        let registry = trusted(&["10.1.0.1", "10.1.0.2"]);
        let mut list = registry.lock();

        assert_eq!(list.free_all(), 2);
        assert!(list.is_empty());
        assert!(list.find_by_ip("10.1.0.1").is_none());
        assert_eq!(list.free_all(), 0);
    }

    #[test]
    fn test_replace_swaps_contents() {
        let registry = trusted(&["10.1.0.1", "10.1.0.2"]);
        let mut list = registry.lock();

        let len = list.replace(["10.9.0.1", "10.9.0.2", "10.9.0.3"]);

        assert_eq!(len, 3);
        assert!(!list.contains("10.1.0.1"));
        assert_eq!(listed(&list), vec!["10.9.0.1", "10.9.0.2", "10.9.0.3"]);
    }

    #[test]
    fn test_lists_are_independent() {
        let trusted = trusted(&["10.1.0.1"]);
        let valid = IpRegistry::new(AllowListKind::Valid);

        // Both locks can be held at once: they are separate mutexes.
        let t = trusted.lock();
        let v = valid.lock();
        assert!(t.contains("10.1.0.1"));
        assert!(!v.contains("10.1.0.1"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AllowListKind::Trusted.to_string(), "trusted");
        assert_eq!(AllowListKind::Valid.to_string(), "valid");
    }
}
