use std::fmt::{self, Display};

/// A named SSH target.
///
/// Records are created and updated only through
/// [`ServerRegistry`](super::registry::ServerRegistry), which keeps `name`
/// fixed for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    name: String,
    user: String,
    address: String,
}

impl Server {
    pub(crate) fn new(name: String, user: String, address: String) -> Self {
        Self {
            name,
            user,
            address,
        }
    }

    /// Returns the unique, human-readable identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Hostname or IP address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The target argument for `ssh`, i.e. `user@address`.
    pub fn connection_string(&self) -> String {
        format!("{}@{}", self.user, self.address)
    }

    pub(crate) fn update(&mut self, user: String, address: String) {
        self.user = user;
        self.address = address;
    }
}

impl Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.connection_string())
    }
}
