use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ulid", version, about, disable_help_subcommand = true)]
pub struct Cli {
    /// Log what is being done to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate new ULIDs
    New(NewArgs),

    /// Describe each part of existing ULIDs as JSON
    Inspect(InspectArgs),

    /// Print an existing ULID in another representation
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    /// Number of ULIDs to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    #[arg(long, env = "ULID_PROVIDER", value_enum, default_value_t = ProviderKind::Default)]
    pub provider: ProviderKind,

    #[arg(long, env = "ULID_FORMAT", value_enum, default_value_t = Format::Str)]
    pub format: Format,

    /// Use this time instead of now: seconds since the UNIX epoch, an RFC 3339
    /// date, or a 10-character base32 timestamp
    #[arg(long, value_name = "TIME")]
    pub timestamp: Option<String>,

    /// Draw randomness from a generator seeded with this value, for
    /// reproducible output. The result is NOT suitable for secret identifiers.
    #[arg(long, env = "ULID_SEED")]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// ULIDs, UUIDs or integers
    #[arg(required = true)]
    pub values: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// ULID, UUID or integer
    pub value: String,

    #[arg(long, env = "ULID_FORMAT", value_enum)]
    pub to: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProviderKind {
    /// Fresh randomness for every ULID
    Default,
    /// Strictly increasing ULIDs, even within a millisecond
    Monotonic,
    /// Microsecond within the millisecond stored in the randomness
    Microsecond,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    /// Canonical 26-character base32
    Str,
    /// Decimal integer
    Int,
    /// 32 hexadecimal digits
    Hex,
    /// Hyphenated UUID
    Uuid,
    /// List of the 16 bytes
    Bytes,
}
