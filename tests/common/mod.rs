#[cfg(test)]
mod fixture;
pub use fixture::Fixture;

#[macro_export]
macro_rules! validate_file {
    ($ref_file:expr, $obtained_file:expr) => {
        let want = include_str!($ref_file);
        let got  = std::fs::read_to_string($obtained_file)
            .unwrap_or_else(|_| panic!("Failed to open {:?}", $obtained_file));
        assert_eq!(want, got)
    };
}

/// Run `vcfbox-rs` with a whitespace-separated list of arguments.
pub fn run_args(args: &str) -> anyhow::Result<()> {
    use clap::Parser;
    let cli = parser::Cli::try_parse_from(args.split_whitespace())?;
    vcfbox_rs::run(cli)
}

/// Every non-meta line of a VCF file (column header included).
pub fn data_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to open {path:?}"))
        .lines()
        .filter(|line| !line.starts_with("##"))
        .map(ToString::to_string)
        .collect()
}
