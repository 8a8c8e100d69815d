use std::path::PathBuf;

use anyhow::Result;
use log::info;

use located_error::LocatedError;
use parser::{Cli, Commands::{Combine, Count, Hapmap, FromYaml}};
use vcfbox_io::{progress, read};

/// Unpack the command line arguments and run the requested module.
///
/// # Errors
/// - if the requested module fails (see `combine::run()`, `vcf_hapmap::run()` and `vcfbox_io::read::count_records()`)
/// - if a `from-yaml` configuration file cannot be deserialized.
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Combine {combine} => {
            combine::run(&combine)?;
        },

        Count {count} => {
            info!("Counting records within '{}'...", count.vcf.display());
            let spinner = progress::spinner("Counting SNPs")?;
            let n = read::count_records(&count.vcf, 0, &spinner)
                .with_loc(|| format!("While counting the records of '{}'", count.vcf.display()))?;
            spinner.finish_and_clear();
            println!("{n}");
        },

        Hapmap {hapmap} => {
            vcf_hapmap::run(&hapmap)?;
        },

        FromYaml {yaml} => {
            let cli = Cli::deserialize(&yaml)?;
            self::run(cli)?;
        },
    };
    Ok(())
}

/// Run the requested module, and serialize its arguments next to its output once it succeeded.
/// A failed run leaves no configuration file behind.
///
/// # Errors
/// - if the requested module fails (see `run()`)
/// - if the arguments cannot be serialized (see `parser::Cli::serialize()`)
pub fn run_and_serialize(cli: Cli) -> Result<Option<PathBuf>> {
    let args = cli.clone();
    run(cli)?;
    args.serialize()
}
