//! Command-line interface for querying Solid devices.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solid_core::config::{self, defaults};
use solid_core::{DeviceInterface, Value};
use solid_devices::{DeviceRecord, DeviceRegistry, InterfaceData};
use solid_predicate::{ParserOptions, Predicate};

/// Solid hardware tool - inspect devices and run predicate queries.
#[derive(Parser, Debug)]
#[command(name = "solid-hardware")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Device fixture file (JSON).
    #[arg(long, global = true, env = "SOLID_DEVICES_FILE")]
    devices: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// List all devices.
    List {
        /// Print the properties of each device.
        #[arg(long)]
        details: bool,
    },
    /// Show the properties of one device.
    Details {
        /// Device UDI.
        udi: String,
    },
    /// List the devices matching a predicate.
    Query {
        /// Predicate text, e.g. "IS StorageVolume".
        predicate: String,
        /// Only consider direct children of this device.
        #[arg(long)]
        parent: Option<String>,
    },
    /// Check a predicate and print its normalized form.
    Validate {
        /// Predicate text.
        predicate: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::List { details } => {
            let registry = load_registry(args.devices)?;
            list_devices(&registry, details);
            Ok(())
        }
        Command::Details { udi } => {
            let registry = load_registry(args.devices)?;
            let device = registry
                .get(&udi)
                .with_context(|| format!("No device with udi '{}'", udi))?;
            print_details(&device);
            Ok(())
        }
        Command::Query { predicate, parent } => {
            let predicate = parse_predicate(&predicate)?;
            let registry = load_registry(args.devices)?;
            for device in registry.list_from_query(&predicate, parent.as_deref()) {
                println!("udi = '{}'", device.udi);
            }
            Ok(())
        }
        Command::Validate { predicate } => {
            println!("{}", parse_predicate(&predicate)?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    // --verbose wins over RUST_LOG
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new(defaults::VERBOSE_LOG_FILTER)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(defaults::LOG_FILTER))
    };

    if config::log_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .init();
    }
}

fn load_registry(path: Option<PathBuf>) -> Result<DeviceRegistry> {
    let path = path.context("No device file given; pass --devices or set SOLID_DEVICES_FILE")?;
    let registry = DeviceRegistry::load_file(&path)
        .with_context(|| format!("Failed to load devices from {}", path.display()))?;
    tracing::debug!(path = %path.display(), devices = registry.len(), "Loaded devices");
    Ok(registry)
}

fn parse_predicate(text: &str) -> Result<Predicate> {
    Predicate::parse_with(text, &ParserOptions::from_env())
        .with_context(|| format!("Invalid predicate '{}'", text))
}

fn list_devices(registry: &DeviceRegistry, details: bool) {
    for device in registry.all_devices() {
        if details {
            print_details(&device);
            println!();
        } else {
            println!("udi = '{}'", device.udi);
        }
    }
}

fn print_details(device: &DeviceRecord) {
    println!("udi = '{}'", device.udi);
    match &device.parent_udi {
        Some(parent) => println!("  parent = '{}'", parent),
        None => println!("  parent = (none)"),
    }
    println!("  vendor = {}", Value::from(device.vendor.as_str()));
    println!("  product = {}", Value::from(device.product.as_str()));
    println!("  description = {}", Value::from(device.description.as_str()));

    for data in device.interfaces() {
        let ty = data.interface_type();
        for (name, value) in data.properties() {
            match symbolic_name(data, name, value) {
                Some(symbol) => println!("  {}.{} = {} ({})", ty, name, value, symbol),
                None => println!("  {}.{} = {}", ty, name, value),
            }
        }
    }
}

/// Enum key(s) for integer values of enumerated properties.
fn symbolic_name(data: &InterfaceData, property: &str, value: &Value) -> Option<String> {
    if !value.is_integer() {
        return None;
    }
    let meta = data.enumeration(property)?;
    meta.value_to_keys(value.to_i64()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use solid_core::InterfaceType;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_devices_env_var_matches_config() {
        let command = Args::command();
        let devices = command
            .get_arguments()
            .find(|arg| arg.get_id() == "devices")
            .unwrap();
        assert_eq!(
            devices.get_env().and_then(|v| v.to_str()),
            Some(config::env_vars::DEVICES_FILE)
        );
    }

    #[test]
    fn test_symbolic_name() {
        let drive = InterfaceData::new(InterfaceType::OpticalDrive);
        assert_eq!(
            symbolic_name(&drive, "supportedMedia", &Value::Int(0x9)),
            Some("Cdr|Dvdr".to_string())
        );
        assert_eq!(symbolic_name(&drive, "bus", &Value::from("Sata")), None);
        assert_eq!(symbolic_name(&drive, "readSpeed", &Value::Int(48)), None);

        let battery = InterfaceData::new(InterfaceType::Battery);
        assert_eq!(
            symbolic_name(&battery, "type", &Value::Int(3)),
            Some("PrimaryBattery".to_string())
        );
        assert_eq!(symbolic_name(&battery, "type", &Value::Int(42)), None);
    }
}
