use std::{io, num::NonZeroU8, panic};

use anyhow::Result;
use time::format_description::well_known::{iso8601, Iso8601};
use tracing::{error, Level};
use tracing_subscriber::{
    fmt::{time::LocalTime, writer::MakeWriterExt},
    prelude::__tracing_subscriber_SubscriberExt,
    EnvFilter, Layer,
};

const MY_CONFIG: iso8601::EncodedConfig = iso8601::Config::DEFAULT
    .set_time_precision(iso8601::TimePrecision::Second {
        decimal_digits: NonZeroU8::new(3),
    })
    .encode();

const DEFAULT_DIRECTIVES: &str = if cfg!(debug_assertions) {
    concat!(env!("CARGO_CRATE_NAME"), "=trace,spmwatch_lib=trace")
} else {
    concat!(env!("CARGO_CRATE_NAME"), "=info,spmwatch_lib=info")
};

/// Logs to stderr, and to `dir/file_name` at WARN and above when `dir` is
/// given. `RUST_LOG` overrides the default filter.
pub fn init_tracing(dir: Option<&str>, file_name: &str, ansi: bool) -> Result<()> {
    let default_layer = || {
        const WITH_FILE_PATH: bool = cfg!(debug_assertions);
        tracing_subscriber::fmt::layer()
            .compact()
            .with_file(WITH_FILE_PATH)
            .with_line_number(WITH_FILE_PATH)
            .with_target(!WITH_FILE_PATH)
            .with_timer(LocalTime::new(Iso8601::<MY_CONFIG>))
    };
    let make_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    };

    let console = default_layer()
        .with_ansi(ansi)
        .with_writer(io::stderr)
        .with_filter(make_filter());
    let file = dir.map(|dir| {
        let writer = tracing_appender::rolling::never(dir, file_name);
        let writer = writer.with_max_level(Level::WARN);
        default_layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(make_filter())
    });

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(console.and_then(file)),
    )?;

    panic::set_hook(Box::new(|panic| error!("{}", panic)));
    Ok(())
}
