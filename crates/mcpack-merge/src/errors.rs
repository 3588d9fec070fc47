use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

fn format_paths(paths: &[Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|p: &Utf8PathBuf| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Pack paths do not exist: {}", format_paths(.paths))]
    #[diagnostic(
        code(merge::pack_paths_missing),
        help("Make sure every --packs path points at an existing pack directory")
    )]
    PackPathsMissing { paths: Vec<Utf8PathBuf> },

    #[error("No packs provided and none autodetected")]
    #[diagnostic(
        code(merge::no_packs),
        help("Provide pack directories with --packs or run inside a directory containing resource packs")
    )]
    NoPacksDetected,

    #[error("Invalid exclude pattern: {pattern}")]
    #[diagnostic(
        code(merge::invalid_exclude),
        help("Exclude patterns use glob syntax, e.g. '**/*.txt'")
    )]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Not a valid resource pack: {path}")]
    #[diagnostic(
        code(info::invalid_pack),
        help("A resource pack directory must contain a parseable pack.mcmeta with a top-level 'pack' object")
    )]
    InvalidPack { path: Utf8PathBuf },

    #[error("IO operation failed")]
    #[diagnostic(code(io::operation_failed))]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit code for this failure. Missing or empty inputs exit
    /// with 2; everything else exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PackPathsMissing { .. } | Self::NoPacksDetected => 2,
            _ => 1,
        }
    }
}
