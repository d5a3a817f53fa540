//! discovery-settings: assemble MQTT device-discovery settings
//!
//! Reads an optional settings file, overlays the command-line values and prints
//! the validated settings mapping.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
