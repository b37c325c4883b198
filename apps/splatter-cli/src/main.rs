use clap::Parser;
use splatter_cli::Cli;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Stdout carries the result JSON, so logs go to stderr.
    env_logger::builder()
        .target(env_logger::Target::Stderr)
        .init();

    if cli.trace {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .finish();
        // Log records already go through env_logger, only spans are routed here.
        tracing::subscriber::set_global_default(subscriber)?;
    }

    splatter_cli::run(cli)
}
