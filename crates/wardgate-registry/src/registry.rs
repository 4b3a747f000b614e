//! The client registry: every device currently known to the gateway.
//!
//! It's responsible for:
//! - Creating clients when the authentication path admits a device
//! - Looking clients up by IP, MAC, IP+MAC or token
//! - Deleting one client by identity
//! - Bulk-evicting every client carrying a firewall-sync flag
//! - Exposing an ordered traversal for the status exporter
//!
//! # Concurrency note
//!
//! [`ClientList`] itself is a plain, unsynchronised structure. It can only
//! be reached through the [`ClientGuard`] returned by
//! [`ClientRegistry::lock`], so holding a `&mut ClientList` means holding
//! the lock. Callers that need a multi-step sequence (find, then delete or
//! update counters) keep the guard alive across the whole sequence.

use parking_lot::{Mutex, MutexGuard};

use crate::client::unix_now;
use crate::list::OrderedList;
use crate::{Client, ClientFlag, ClientId, RegistryError};

/// Exclusive access to the client list. Dropping it releases the lock.
pub type ClientGuard<'a> = MutexGuard<'a, ClientList>;

/// Forward iterator over live clients in creation order.
///
/// Borrowed from the guard, so it cannot outlive the locked section.
pub type Clients<'a> = std::slice::Iter<'a, Client>;

/// The shared client registry.
///
/// Construct one at startup and hand it to every actor by reference (or
/// inside an `Arc`). All access goes through [`lock`](Self::lock).
#[derive(Debug)]
pub struct ClientRegistry {
    inner: Mutex<ClientList>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ClientList::new()),
        }
    }

    /// Blocks until the registry lock is available and returns the guard.
    ///
    /// Not reentrant: calling this while the current thread already holds
    /// the guard deadlocks.
    pub fn lock(&self) -> ClientGuard<'_> {
        self.inner.lock()
    }

    /// Returns the guard if the lock is free right now.
    pub fn try_lock(&self) -> Option<ClientGuard<'_>> {
        self.inner.try_lock()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Clients in creation order, plus the id counter.
///
/// Obtained only through [`ClientRegistry::lock`].
#[derive(Debug)]
pub struct ClientList {
    clients: OrderedList<Client>,

    /// Last id handed out. Ids start at 1 and are never reused.
    last_id: u64,
}

impl ClientList {
    pub(crate) const fn new() -> Self {
        Self {
            clients: OrderedList::new(),
            last_id: 0,
        }
    }

    /// Creates a client and appends it after every existing one.
    ///
    /// Counters start at zero and `last_updated` at the current time. The
    /// client is fully built before it becomes reachable.
    ///
    /// No duplicate check is made: callers look the device up first.
    pub fn append(
        &mut self,
        ip: impl Into<String>,
        mac: impl Into<String>,
        token: impl Into<String>,
    ) -> &mut Client {
        self.last_id += 1;
        let id = ClientId(self.last_id);
        let client = Client::new(id, ip.into(), mac.into(), token.into(), unix_now());

        let client = self.clients.push_back(client);
        tracing::info!(
            client_id = %client.id(),
            ip = %client.ip(),
            token = %client.token(),
            "client added"
        );
        client
    }

    /// First client (in creation order) with this IP.
    pub fn find_by_ip(&self, ip: &str) -> Option<&Client> {
        self.clients.find(|c| c.ip() == ip)
    }

    pub fn find_by_ip_mut(&mut self, ip: &str) -> Option<&mut Client> {
        self.clients.find_mut(|c| c.ip() == ip)
    }

    /// First client (in creation order) with this MAC.
    pub fn find_by_mac(&self, mac: &str) -> Option<&Client> {
        self.clients.find(|c| c.mac() == mac)
    }

    pub fn find_by_mac_mut(&mut self, mac: &str) -> Option<&mut Client> {
        self.clients.find_mut(|c| c.mac() == mac)
    }

    /// First client (in creation order) with both this IP and this MAC.
    pub fn find_by_ip_mac(&self, ip: &str, mac: &str) -> Option<&Client> {
        self.clients.find(|c| c.ip() == ip && c.mac() == mac)
    }

    pub fn find_by_ip_mac_mut(
        &mut self,
        ip: &str,
        mac: &str,
    ) -> Option<&mut Client> {
        self.clients.find_mut(|c| c.ip() == ip && c.mac() == mac)
    }

    /// First client (in creation order) holding this token.
    pub fn find_by_token(&self, token: &str) -> Option<&Client> {
        self.clients.find(|c| c.token() == token)
    }

    pub fn find_by_token_mut(&mut self, token: &str) -> Option<&mut Client> {
        self.clients.find_mut(|c| c.token() == token)
    }

    /// Looks a client up by identity.
    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.find_mut(|c| c.id() == id)
    }

    /// Removes the client with this id and hands it back.
    ///
    /// The remaining clients keep their order. Dropping the returned value
    /// releases its strings.
    ///
    /// # Errors
    /// Returns [`RegistryError::ClientNotFound`] if no live client has this
    /// id, which is normal when another actor deleted it first.
    pub fn delete(&mut self, id: ClientId) -> Result<Client, RegistryError> {
        if self.clients.is_empty() {
            tracing::debug!(client_id = %id, "client list empty, nothing to delete");
            return Err(RegistryError::ClientNotFound(id));
        }

        match self.clients.remove_first(|c| c.id() == id) {
            Some(client) => {
                tracing::info!(
                    client_id = %id,
                    ip = %client.ip(),
                    token = %client.token(),
                    "client removed"
                );
                Ok(client)
            }
            None => {
                tracing::debug!(client_id = %id, "client to delete could not be found");
                Err(RegistryError::ClientNotFound(id))
            }
        }
    }

    /// Removes every client whose flag equals `flag`, in one pass.
    ///
    /// Returns the evicted clients in their former order. An empty list,
    /// or one with no match, is left untouched.
    pub fn delete_by_flag(&mut self, flag: ClientFlag) -> Vec<Client> {
        let evicted = self.clients.drain_where(|c| c.flag == flag);
        if !evicted.is_empty() {
            tracing::info!(
                flag = flag.0,
                evicted = evicted.len(),
                remaining = self.clients.len(),
                "evicted clients by flag"
            );
        }
        evicted
    }

    /// Iterator positioned at the first (oldest) client.
    pub fn first(&self) -> Clients<'_> {
        self.clients.iter()
    }

    /// Same as [`first`](Self::first).
    pub fn iter(&self) -> Clients<'_> {
        self.clients.iter()
    }

    /// Mutable traversal, for passes that update every client's counters.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Client> {
        self.clients.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Drops every client. Ids keep counting from where they were.
    pub fn clear(&mut self) -> usize {
        let count = self.clients.clear();
        tracing::info!(removed = count, "client list cleared");
        count
    }
}

impl<'a> IntoIterator for &'a ClientList {
    type Item = &'a Client;
    type IntoIter = Clients<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =========================================================================
// Tests
// =========================================================================
