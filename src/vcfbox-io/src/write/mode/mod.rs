use std::{fmt::{self, Display, Formatter}, path::Path};

use log::warn;
use rust_htslib::bcf;

/// Output encoding, inferred from the extension of the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text VCF
    Vcf,
    /// BGZF-compressed VCF
    VcfGz,
    /// Compressed BCF
    Bcf,
}

impl OutputMode {
    /// - `.vcf`                → plain VCF
    /// - `.vcf.gz`             → bgzipped VCF
    /// - `.bcf` and `.bcf.gz`  → BCF
    /// - anything else         → plain VCF (a warning is emitted)
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let name = path.file_name().map(|name| name.to_string_lossy().to_lowercase()).unwrap_or_default();
        if name.ends_with(".vcf.gz") {
            Self::VcfGz
        } else if name.ends_with(".bcf") || name.ends_with(".bcf.gz") {
            Self::Bcf
        } else {
            if !name.ends_with(".vcf") {
                warn!("Unrecognized output file extension for '{}'. Defaulting to uncompressed VCF", path.display());
            }
            Self::Vcf
        }
    }

    /// htslib `hts_open()` mode string.
    #[must_use]
    pub fn mode_str(&self) -> &'static str {
        match self {
            Self::Vcf   => "w",
            Self::VcfGz => "wz",
            Self::Bcf   => "wb",
        }
    }

    /// `(uncompressed, format)` arguments expected by `bcf::Writer`, derived from `mode_str()`:
    /// `b` selects BCF, `z` or `b` select BGZF compression.
    pub(crate) fn htslib_args(self) -> (bool, bcf::Format) {
        let mode   = self.mode_str();
        let format = if mode.contains('b') { bcf::Format::Bcf } else { bcf::Format::Vcf };
        (!mode.contains(|c: char| c == 'b' || c == 'z'), format)
    }
}

impl Display for OutputMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Self::Vcf   => "VCF",
            Self::VcfGz => "bgzipped VCF",
            Self::Bcf   => "BCF",
        };
        write!(f, "{name}, mode '{}'", self.mode_str())
    }
}
