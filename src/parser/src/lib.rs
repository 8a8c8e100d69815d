use std::{
    ffi::OsStr,
    fs::File,
    path::{Path, PathBuf},
};

use located_error::*;

use clap::{Parser, Subcommand, Args};
use serde::{Serialize, Deserialize};
use log::debug;
use anyhow::Result;

mod error;
pub use error::ParserError;

#[derive(Parser, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[clap(name="vcfbox-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
/// vcfbox-rs: synthesize new samples from pairs of existing VCF samples
pub struct Cli {
    ///Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use The --quiet/-q to disable them
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emitted and redirected to the console, even when verbose mode is off.
    /// Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Logger verbosity level, as expected by `logger::Logger::init()`
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        if self.quiet {0} else {self.verbose.saturating_add(1)}
    }

    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-{module name}.yaml'. current time follows the format
    ///   `YYYY`-`MM`-`DD`T`hhmmss`
    /// - File is written next to the requested `--output` file. Modules without an output file are not serialized.
    ///
    /// # Errors
    /// - if `serde_yaml` fails to parse `Self` to a string.
    /// - if the `.yaml` file (or its parent directory) cannot be created.
    pub fn serialize(&self) -> Result<Option<PathBuf>> {
        use ParserError::{Serialize, WriteYaml};
        let serialized = serde_yaml::to_string(&self).map_err(Serialize).loc("While serializing arguments")?;
        debug!("\n---- Command line args ----\n{}\n---", serialized);

        let (output, module) = match &self.commands {
            Commands::Combine {combine} => (&combine.output, "combine"),
            Commands::Hapmap {hapmap}   => (&hapmap.output, "hapmap"),
            Commands::Count {..} | Commands::FromYaml {..} => return Ok(None),
        };

        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S").to_string();
        let output_dir   = output.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
        let output_file  = output_dir.join(format!("{current_time}-{module}.yaml"));

        let loc_msg = || format!("While serializing arguments into '{}'", output_file.display());
        std::fs::create_dir_all(output_dir).map_err(|e| WriteYaml(output_file.clone(), e)).with_loc(loc_msg)?;
        std::fs::write(&output_file, serialized).map_err(|e| WriteYaml(output_file.clone(), e)).with_loc(loc_msg)?;
        Ok(Some(output_file))
    }

    /// Deserialize a `.yaml` file into Command line arguments.
    ///
    /// # Errors
    /// - if the provided `.yaml` does not exist, or does not carry read permissions
    /// - if `serde_yaml` fails to parse the provided file to `Self`.
    pub fn deserialize(yaml: &Path) -> Result<Self> {
        use ParserError::{OpenYaml, Deserialize};
        let file = File::open(yaml).map_err(|e| OpenYaml(yaml.to_path_buf(), e)).loc("While deserializing arguments")?;
        serde_yaml::from_reader(file).map_err(|e| Deserialize(yaml.to_path_buf(), e)).loc("While deserializing arguments")
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Commands {
    /// Merge the genotypes of sample pairs into new, synthesized samples.
    ///
    /// Each pair 'A B' of the --paired-sample file produces a new sample named 'A_B'. At every
    /// bi-allelic site, 'A_B' is assigned the homozygous allele of 'A' and the homozygous allele of 'B'.
    /// Heterozygous or missing contributions yield a missing genotype ('./.'). Multi-allelic sites are skipped.
    Combine {
        #[clap(flatten)]
        combine: Combine,
    },

    /// Count the records of a VCF/BCF file.
    Count {
        #[clap(flatten)]
        count: Count,
    },

    /// Convert the genotypes of a VCF/BCF file into a HapMap table.
    Hapmap {
        #[clap(flatten)]
        hapmap: HapMap,
    },

    /// Run vcfbox-rs using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply a vcfbox-rs command using the exact same parameters
    /// and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combine {
    /// Input variant file (.vcf, .vcf.gz, .bcf)
    #[clap(short='i', long, parse(try_from_os_str=valid_input_file))]
    pub vcf: PathBuf,

    /// Sample pair definition file.
    ///
    /// One pair per line, as two whitespace-separated sample names. Empty lines and lines starting
    /// with '#' are ignored. Extra columns are ignored.
    #[clap(short='p', long, parse(try_from_os_str=valid_input_file))]
    pub paired_sample: PathBuf,

    /// Output variant file.
    ///
    /// The output format is inferred from the file extension: '.vcf' (plain), '.vcf.gz' (bgzipped)
    /// or '.bcf'. Any other extension defaults to plain VCF.
    #[clap(short='o', long, default_value("output.vcf"))]
    pub output: PathBuf,

    /// Keep the original samples within the output file.
    ///
    /// Heterozygous and missing genotypes of the original samples are set to missing ('./.').
    #[clap(short='k', long)]
    pub keep_old_samples: bool,

    /// Number of additional htslib (de)compression threads.
    #[clap(short='@', long, default_value("0"))]
    pub threads: usize,

    /// Overwrite existing output files.
    #[clap(short='w', long)]
    pub overwrite: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    /// Input variant file (.vcf, .vcf.gz, .bcf)
    #[clap(short='i', long, parse(try_from_os_str=valid_input_file))]
    pub vcf: PathBuf,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HapMap {
    /// Input variant file (.vcf, .vcf.gz, .bcf)
    #[clap(short='i', long, parse(try_from_os_str=valid_input_file))]
    pub vcf: PathBuf,

    /// Output HapMap table (tab-separated).
    #[clap(short='o', long, default_value("output.hmp.txt"))]
    pub output: PathBuf,

    /// Overwrite existing output files.
    #[clap(short='w', long)]
    pub overwrite: bool,
}

fn valid_input_file(s: &OsStr) -> Result<PathBuf, ParserError> {
    use ParserError::{MissingFile, NotAFile};
    let path = Path::new(s);
    if ! path.exists() {
        return Err(MissingFile(path.display().to_string()))
    }
    if ! path.is_file() {
        return Err(NotAFile(path.display().to_string()))
    }
    Ok(PathBuf::from(s))
}
