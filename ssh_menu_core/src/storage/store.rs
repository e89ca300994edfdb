use std::collections::BTreeMap;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::errors::ConfigError;
use super::registry::ServerRegistry;

/// The only config version this build reads and writes.
pub const VERSION: &str = "1";

const VERSION_KEY: &str = "version";
const SERVERS_KEY: &str = "servers";
const USER_KEY: &str = "user";
const ADDRESS_KEY: &str = "address";

const CONFIG_DIR_NAME: &str = ".ssh-menu";
const SERVERS_FILE_NAME: &str = "servers";

/// On-disk shape of the servers file.
#[derive(Serialize)]
struct ConfigDocument<'a> {
    version: &'a str,
    servers: BTreeMap<&'a str, ServerEntry<'a>>,
}

#[derive(Serialize)]
struct ServerEntry<'a> {
    user: &'a str,
    address: &'a str,
}

impl<'a> ConfigDocument<'a> {
    fn from_registry(registry: &'a ServerRegistry) -> Self {
        let servers = registry
            .list_servers()
            .map(|server| {
                (
                    server.name(),
                    ServerEntry {
                        user: server.user(),
                        address: server.address(),
                    },
                )
            })
            .collect();
        Self {
            version: VERSION,
            servers,
        }
    }

    fn to_pretty_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// `<home>/.ssh-menu`
pub fn default_config_dir(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR_NAME)
}

/// `<home>/.ssh-menu/servers`
pub fn default_servers_path(home: &Path) -> PathBuf {
    default_config_dir(home).join(SERVERS_FILE_NAME)
}

/// Locates the config directory and the servers file inside it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the current user's home directory (`$HOME` on Unix).
    pub fn new() -> io::Result<Self> {
        let base = BaseDirs::new().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Unable to locate home directory")
        })?;
        Ok(Self::from_home(base.home_dir()))
    }

    pub fn from_home(home: impl AsRef<Path>) -> Self {
        Self {
            dir: default_config_dir(home.as_ref()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn servers_path(&self) -> PathBuf {
        self.dir.join(SERVERS_FILE_NAME)
    }

    /// Creates the config directory and an empty servers file.
    /// An existing servers file is never touched, whatever it contains.
    ///
    /// Returns `Ok(true)` if a new file was written.
    pub fn initialize(&self) -> Result<bool, ConfigError> {
        fs::create_dir_all(&self.dir)?;
        write_empty_if_absent(&self.servers_path())
    }
}

/// Same as [`ConfigStore::initialize`] for a servers file at an arbitrary path;
/// the parent directory is created if needed.
pub fn initialize(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_empty_if_absent(path)
}

fn write_empty_if_absent(path: &Path) -> Result<bool, ConfigError> {
    let empty = ServerRegistry::new();
    // The template is written without a trailing newline; `save` adds one.
    let json = ConfigDocument::from_registry(&empty).to_pretty_json()?;
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!("Servers config {:?} already exists, leaving it alone", path);
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(json.as_bytes())?;
    debug!("Wrote empty servers config to {:?}", path);
    Ok(true)
}

/// Reads and validates the servers file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<ServerRegistry, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&text).map_err(ConfigError::Parse)?;
    let registry = registry_from_document(&document)?;
    debug!("Loaded {} server(s) from {:?}", registry.len(), path);
    Ok(registry)
}

fn registry_from_document(document: &Value) -> Result<ServerRegistry, ConfigError> {
    if document.get(VERSION_KEY).and_then(Value::as_str) != Some(VERSION) {
        return Err(ConfigError::invalid("unsupported config version"));
    }

    let servers = document
        .get(SERVERS_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ConfigError::invalid(format!("malformed or missing {SERVERS_KEY} from config"))
        })?;

    let mut registry = ServerRegistry::new();
    for (name, entry) in servers {
        // user before address: the first missing key is the one reported
        let user = required_str(entry, USER_KEY)?;
        let address = required_str(entry, ADDRESS_KEY)?;
        registry.add_or_update(name.as_str(), user, address);
    }
    Ok(registry)
}

fn required_str<'a>(entry: &'a Value, key: &str) -> Result<&'a str, ConfigError> {
    let value = entry
        .get(key)
        .ok_or_else(|| ConfigError::invalid(format!("server missing required key: {key}")))?;
    value
        .as_str()
        .ok_or_else(|| ConfigError::invalid(format!("server key is not a string: {key}")))
}

/// Overwrites the file at `path` with the whole registry.
///
/// This is a plain truncate-and-write: an interrupted save can leave a
/// partial file, and a concurrent writer can lose updates. There is no
/// locking.
pub fn save(path: impl AsRef<Path>, registry: &ServerRegistry) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let mut json = ConfigDocument::from_registry(registry).to_pretty_json()?;
    json.push('\n');
    fs::write(path, json)?;
    debug!("Saved {} server(s) to {:?}", registry.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reason(document: Value) -> String {
        registry_from_document(&document)
            .expect_err("document should be rejected")
            .invalid_reason()
            .expect("should be InvalidConfig")
            .to_owned()
    }

    #[test]
    fn default_paths_derive_from_home() {
        let home = Path::new("/home/alice");
        assert_eq!(default_config_dir(home), Path::new("/home/alice/.ssh-menu"));
        assert_eq!(
            default_servers_path(home),
            Path::new("/home/alice/.ssh-menu/servers")
        );
        assert_eq!(
            ConfigStore::from_home(home).servers_path(),
            default_servers_path(home)
        );
    }

    #[test]
    fn version_must_be_the_string_one() {
        assert_eq!(
            reason(json!({ "version": "2", "servers": {} })),
            "unsupported config version"
        );
        assert_eq!(
            reason(json!({ "version": 1, "servers": {} })),
            "unsupported config version"
        );
        assert_eq!(reason(json!({ "servers": {} })), "unsupported config version");
        assert_eq!(reason(json!(["version", "1"])), "unsupported config version");
    }

    #[test]
    fn servers_must_be_an_object() {
        let expected = "malformed or missing servers from config";
        assert_eq!(reason(json!({ "version": "1" })), expected);
        assert_eq!(reason(json!({ "version": "1", "servers": [] })), expected);
        assert_eq!(reason(json!({ "version": "1", "servers": null })), expected);
    }

    #[test]
    fn user_is_checked_before_address() {
        assert_eq!(
            reason(json!({ "version": "1", "servers": { "box": {} } })),
            "server missing required key: user"
        );
        assert_eq!(
            reason(json!({ "version": "1", "servers": { "box": { "user": "alice" } } })),
            "server missing required key: address"
        );
        assert_eq!(
            reason(json!({ "version": "1", "servers": { "box": "alice@host" } })),
            "server missing required key: user"
        );
    }

    #[test]
    fn non_string_values_are_rejected() {
        assert_eq!(
            reason(json!({
                "version": "1",
                "servers": { "box": { "user": 7, "address": "1.2.3.4" } }
            })),
            "server key is not a string: user"
        );
    }

    #[test]
    fn extra_keys_are_ignored() {
        let registry = registry_from_document(&json!({
            "version": "1",
            "comment": "hand edited",
            "servers": { "box": { "user": "alice", "address": "1.2.3.4", "port": 22 } }
        }))
        .expect("document should load");
        assert_eq!(
            registry.get_server("box").unwrap().connection_string(),
            "alice@1.2.3.4"
        );
    }

    #[test]
    fn document_layout_is_two_space_pretty() {
        let mut registry = ServerRegistry::new();
        registry.add_or_update("box", "alice", "1.2.3.4");
        let json = ConfigDocument::from_registry(&registry)
            .to_pretty_json()
            .unwrap();
        assert_eq!(
            json,
            "{\n  \"version\": \"1\",\n  \"servers\": {\n    \"box\": {\n      \"user\": \"alice\",\n      \"address\": \"1.2.3.4\"\n    }\n  }\n}"
        );
    }
}
