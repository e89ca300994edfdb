use std::collections::BTreeMap;

use super::server::Server;

/// In-memory collection of [`Server`]s keyed by name.
///
/// Nothing here touches the disk; persist with [`crate::save`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerRegistry {
    servers: BTreeMap<String, Server>,
}

impl ServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-name lookup. `None` if no server has that name.
    pub fn get_server(&self, name: &str) -> Option<&Server> {
        self.servers.get(name)
    }

    /// Every server, sorted by name.
    pub fn list_servers(&self) -> impl Iterator<Item = &Server> + '_ {
        self.servers.values()
    }

    /// Updates `user` and `address` of the server called `name`, or adds a
    /// new one if there is none.
    pub fn add_or_update(
        &mut self,
        name: impl Into<String>,
        user: impl Into<String>,
        address: impl Into<String>,
    ) {
        let name = name.into();
        let (user, address) = (user.into(), address.into());
        match self.servers.get_mut(&name) {
            Some(server) => server.update(user, address),
            None => {
                self.servers
                    .insert(name.clone(), Server::new(name, user, address));
            }
        }
    }

    /// Removes the server called `name`, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Server> {
        self.servers.remove(name)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}
