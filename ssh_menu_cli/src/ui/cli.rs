use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use ssh_menu_core::{initialize, load, save, ConfigStore, ServerRegistry};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "ssh-menu", version, subcommand_required = true)]
pub struct Args {
    /// Servers file to use instead of ~/.ssh-menu/servers
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the servers file if it does not exist yet
    Init,
    /// List every saved server
    List,
    /// Add a server, or update the one with the same name
    Add {
        /// Name to refer to the server by
        name: String,
        /// Remote user to log in as
        #[arg(long)]
        user: String,
        /// Hostname or IP address
        #[arg(long)]
        address: String,
    },
    /// Remove a server (does nothing if it is not there)
    Remove {
        name: String,
    },
    /// Print `user@address` for a server, ready for `ssh`
    Show {
        name: String,
    },
}

pub fn run_cli(args: Args) -> Result<()> {
    let stdout = io::stdout();
    run_cli_with(args, &mut stdout.lock())
}

/// Runs a command, writing its report to `out`.
///
/// The servers file is created first if missing, so every command works on a
/// fresh home directory.
pub fn run_cli_with(args: Args, out: &mut impl Write) -> Result<()> {
    let path = match args.config {
        Some(path) => path,
        None => ConfigStore::new()
            .context("Unable to resolve the default config location")?
            .servers_path(),
    };
    let created =
        initialize(&path).with_context(|| format!("Failed to initialize {}", path.display()))?;
    if created {
        info!("Created empty servers config at {}", path.display());
    }

    match args.command {
        Command::Init => run_init(&path, created, out),
        Command::List => run_list(&path, out),
        Command::Add {
            name,
            user,
            address,
        } => run_add(&path, name, user, address, out),
        Command::Remove { name } => run_remove(&path, name, out),
        Command::Show { name } => run_show(&path, name, out),
    }
}

fn run_init(path: &Path, created: bool, out: &mut impl Write) -> Result<()> {
    if created {
        writeln!(out, "Created {}", path.display())?;
    } else {
        writeln!(out, "{} already exists", path.display())?;
    }
    Ok(())
}

fn load_registry(path: &Path) -> Result<ServerRegistry> {
    load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn save_registry(path: &Path, registry: &ServerRegistry) -> Result<()> {
    save(path, registry).with_context(|| format!("Failed to save {}", path.display()))
}

fn run_list(path: &Path, out: &mut impl Write) -> Result<()> {
    let registry = load_registry(path)?;
    for server in registry.list_servers() {
        writeln!(out, "{}\t{}", server.name(), server.connection_string())?;
    }
    Ok(())
}

fn check_not_blank(fields: [(&str, &str); 3]) -> Result<()> {
    for (field, value) in fields {
        if value.trim().is_empty() {
            bail!("{field} must not be empty");
        }
    }
    Ok(())
}

fn run_add(
    path: &Path,
    name: String,
    user: String,
    address: String,
    out: &mut impl Write,
) -> Result<()> {
    check_not_blank([
        ("name", name.as_str()),
        ("user", user.as_str()),
        ("address", address.as_str()),
    ])?;

    let mut registry = load_registry(path)?;
    let verb = if registry.get_server(&name).is_some() {
        "Updated"
    } else {
        "Added"
    };
    registry.add_or_update(name.as_str(), user, address);
    save_registry(path, &registry)?;

    info!("{verb} server {name} in {}", path.display());
    if let Some(server) = registry.get_server(&name) {
        writeln!(out, "{verb} {server}")?;
    }
    Ok(())
}

fn run_remove(path: &Path, name: String, out: &mut impl Write) -> Result<()> {
    let mut registry = load_registry(path)?;
    match registry.remove(&name) {
        Some(server) => {
            save_registry(path, &registry)?;
            info!("Removed server {name} from {}", path.display());
            writeln!(out, "Removed {server}")?;
        }
        None => writeln!(out, "No server named {name}, nothing to remove")?,
    }
    Ok(())
}

fn run_show(path: &Path, name: String, out: &mut impl Write) -> Result<()> {
    let registry = load_registry(path)?;
    let server = registry
        .get_server(&name)
        .ok_or_else(|| anyhow!("No server named {name}"))?;
    writeln!(out, "{}", server.connection_string())?;
    Ok(())
}
