use crate::cli::{Command, ConvertArgs, Format, InspectArgs, NewArgs, ProviderKind};
use anyhow::Context;
use std::{io::Write, sync::Arc};
use ulid_core::{
    Api, DefaultProvider, EntropySource, MicrosecondProvider, MonotonicProvider, OsEntropy,
    Provider, Randomness, SeededEntropy, SystemClock, Timestamp, ToTimestamp, Ulid,
};

pub fn run(command: &Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::New(args) => new(args, out),
        Command::Inspect(args) => inspect(args, out),
        Command::Convert(args) => convert(args, out),
    }
}

impl Format {
    pub fn render(self, id: Ulid) -> String {
        match self {
            Format::Str => id.to_string(),
            Format::Int => id.as_u128().to_string(),
            Format::Hex => format!("{id:032x}"),
            Format::Uuid => id.to_uuid().to_string(),
            Format::Bytes => format!("{:?}", id.to_bytes()),
        }
    }
}

/// Read a time given as seconds since the epoch, RFC 3339 or base32
pub fn parse_timestamp(value: &str) -> anyhow::Result<Timestamp> {
    if let Ok(seconds) = value.parse::<f64>() {
        return Timestamp::from_seconds(seconds)
            .with_context(|| format!("{value:?} is not a valid number of seconds"));
    }
    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(value) {
        return date
            .to_timestamp()
            .with_context(|| format!("{value:?} cannot be held in a ULID timestamp"));
    }
    value
        .parse::<Timestamp>()
        .with_context(|| format!("{value:?} is neither seconds, RFC 3339 nor a base32 timestamp"))
}

fn new(args: &NewArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let timestamp = args
        .timestamp
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;
    let entropy: Arc<dyn EntropySource> = match args.seed {
        Some(seed) => {
            tracing::debug!(seed, "using seeded entropy");
            Arc::new(SeededEntropy::new(seed))
        }
        None => Arc::new(OsEntropy),
    };
    tracing::debug!(provider = ?args.provider, count = args.count, ?timestamp, "generating ULIDs");
    match args.provider {
        ProviderKind::Default => generate(
            &Api::new_with(DefaultProvider::new(SystemClock, entropy)),
            args,
            timestamp,
            out,
        ),
        ProviderKind::Monotonic => generate(
            &Api::new_with(MonotonicProvider::new(SystemClock, entropy)),
            args,
            timestamp,
            out,
        ),
        ProviderKind::Microsecond => generate(
            &Api::new_with(MicrosecondProvider::new(SystemClock, entropy)),
            args,
            timestamp,
            out,
        ),
    }
}

fn generate<P: Provider>(
    api: &Api<P>,
    args: &NewArgs,
    timestamp: Option<Timestamp>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for i in 0..args.count {
        let id = match &timestamp {
            Some(time) => api.from_timestamp(time),
            None => api.new(),
        }
        .with_context(|| format!("generating ULID number {}", i + 1))?;
        writeln!(out, "{}", args.format.render(id))?;
    }
    Ok(())
}

#[derive(Debug, serde::Serialize)]
pub struct Inspection {
    pub ulid: Ulid,
    pub timestamp: String,
    pub timestamp_ms: Timestamp,
    pub datetime: String,
    pub randomness: Randomness,
    pub int: String,
    pub hex: String,
    pub uuid: String,
}

impl From<Ulid> for Inspection {
    fn from(id: Ulid) -> Inspection {
        let time = id.timestamp();
        Inspection {
            ulid: id,
            timestamp: time.to_string(),
            timestamp_ms: time,
            datetime: time
                .datetime()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            randomness: id.randomness(),
            int: Format::Int.render(id),
            hex: Format::Hex.render(id),
            uuid: Format::Uuid.render(id),
        }
    }
}

fn inspect(args: &InspectArgs, out: &mut impl Write) -> anyhow::Result<()> {
    for value in &args.values {
        let id = ulid_core::parse(value).with_context(|| format!("reading {value:?}"))?;
        serde_json::to_writer(&mut *out, &Inspection::from(id))?;
        writeln!(out)?;
    }
    Ok(())
}

fn convert(args: &ConvertArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let id = ulid_core::parse(&args.value).with_context(|| format!("reading {:?}", args.value))?;
    writeln!(out, "{}", args.to.render(id))?;
    Ok(())
}
