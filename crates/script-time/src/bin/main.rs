use anyhow::{Context, Result};
use script_time::{Session, SessionConfig, format_duration};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEMO_ITERATIONS: u64 = 1000;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return run_demo();
    }

    for arg in &args {
        let seconds: f64 = arg
            .parse()
            .with_context(|| format!("Expected a duration in seconds, got {arg:?}"))?;
        println!("{arg} -> {}", format_duration(seconds));
    }

    Ok(())
}

/// Profile two small functions and print every report
fn run_demo() -> Result<()> {
    let config = SessionConfig::from_env();
    tracing::info!("Running demo workload (profile = {})", config.profile);

    let mut session = Session::builder().config(config).build()?;
    session.print_start()?;

    let mut first = session.wrap("first", |x: u64| x + 100);
    let mut second = session.wrap("second", |x: u64| x.wrapping_mul(x) % 1_000_003);

    let mut value = 10;
    for _ in 0..DEMO_ITERATIONS {
        value = first(value);
        value = second(value);
    }
    tracing::debug!("Demo result: {}", value);

    session.print_end()?;
    session.print_per_iteration(DEMO_ITERATIONS)?;
    if session.is_profiling() {
        session.print_profiles()?;
    }

    Ok(())
}
