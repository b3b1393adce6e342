use clap::ValueEnum;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Notices and digest paths for people
    #[default]
    Human,
    /// Machine-readable reports on stdout
    Json,
}
