use std::process;
use clap::Parser;

#[macro_use]
extern crate log;

use anyhow::Result;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;


/// Parse command line arguments and run `vcfbox_rs::run_and_serialize()`
fn main() -> Result<()> {
    // ----------------------------- Run CLI Parser
    let cli = parser::Cli::parse();

    // ----------------------------- Init logger.
    logger::Logger::init(cli.verbosity());

    // ----------------------------- unpack Cli, run the appropriate modules and serialize arguments.
    match vcfbox_rs::run_and_serialize(cli) {
        Ok(Some(yaml)) => debug!("Arguments serialized into '{}'", yaml.display()),
        Ok(None)       => {},
        Err(e)         => {
            error!("{:?}", e);
            process::exit(1);
        }
    };

    Ok(())
}
