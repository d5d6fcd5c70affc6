use clap::Parser;

#[derive(Parser, Clone)]
#[command(
    display_name = "Arena Processor",
    long_about = "Replays an arena match log and reports per-entity metrics, \
    tournament standings and Elo ratings"
)]
pub struct Args {
    /// Path to a JSON snapshot holding the entity tables, tournament
    /// participants and the ordered match list
    #[arg(short, long, env = "SNAPSHOT_PATH", help = "Snapshot file to replay")]
    pub snapshot: String,

    /// Restrict the report to a single tournament
    #[arg(short, long, help = "Tournament id to report on")]
    pub tournament: Option<i32>,

    /// Announce the replayed log on RabbitMQ when done
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub publish: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}
