use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

use humanize_time::time::{
    Clock, FixedClock, FixedOffsetConverter, LocalTimeConverter, SystemClock, SystemLocal,
};
use humanize_time::util::config::AppConfig;
use humanize_time::{Point, Timeval};

#[derive(Parser, Debug)]
#[command(name = "humanize-time", version, about = "Render timestamps as \"time ago\" phrases")]
struct Cli {
    /// Past instants, in seconds since the Unix epoch
    #[arg(required = true, value_parser = clap::value_parser!(i64).range(0..))]
    timestamps: Vec<i64>,

    /// Compare against this instant (epoch seconds) instead of the current time
    #[arg(long, allow_negative_numbers = true)]
    now: Option<i64>,

    /// Render second-resolution phrases for recent instants
    #[arg(short, long)]
    precise: bool,

    /// Convert the reference instant to local time before comparing
    #[arg(short, long)]
    local: bool,

    /// Fixed UTC offset in seconds used by --local instead of the host time zone
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<i32>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to file
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let _guard = setup_logging(&config, cli.debug)?;

    info!(count = cli.timestamps.len(), "humanize-time starting");

    let opts = RenderOptions {
        precise: cli.precise || config.display.precise,
        convert_to_local: cli.local || config.display.convert_to_local,
    };

    let offset = cli.utc_offset.or(config.local.utc_offset_secs);
    match (cli.now, offset) {
        (Some(now), Some(offset)) => render_all(
            &cli.timestamps,
            FixedClock(Timeval::from_secs(now)),
            FixedOffsetConverter::new(offset)?,
            opts,
        ),
        (Some(now), None) => render_all(
            &cli.timestamps,
            FixedClock(Timeval::from_secs(now)),
            SystemLocal,
            opts,
        ),
        (None, Some(offset)) => render_all(
            &cli.timestamps,
            SystemClock,
            FixedOffsetConverter::new(offset)?,
            opts,
        ),
        (None, None) => render_all(&cli.timestamps, SystemClock, SystemLocal, opts),
    }
}

#[derive(Debug, Clone, Copy)]
struct RenderOptions {
    precise: bool,
    convert_to_local: bool,
}

fn render_all<C, L>(timestamps: &[i64], clock: C, local: L, opts: RenderOptions) -> Result<()>
where
    C: Clock,
    L: LocalTimeConverter,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for &secs in timestamps {
        let point = Point::from_tv(Timeval::from_secs(secs))
            .with_clock(&clock)
            .with_local_converter(&local)
            .with_convert_to_local(opts.convert_to_local);

        let phrase = if opts.precise {
            point.precise_phrase()
        } else {
            point.coarse_phrase()
        };
        debug!(secs = secs, phrase = %phrase, "Rendered timestamp");

        writeln!(out, "{secs}\t{phrase}").context("Failed to write to stdout")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_timestamps() {
        assert!(Cli::try_parse_from(["humanize-time", "--", "-5"]).is_err());
    }

    #[test]
    fn accepts_epoch_and_later() {
        let args = ["humanize-time", "--now", "-60", "0", "1700000000"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.timestamps, vec![0, 1_700_000_000]);
        assert_eq!(cli.now, Some(-60));
    }
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "humanize-time.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("humanize_time=trace")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
