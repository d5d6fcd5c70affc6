use arena_processor::{
    args::Args,
    messaging::{RabbitMqConfig, RabbitMqPublisher},
    model::{snapshot::Snapshot, structures::entity_kind::EntityKind, ArenaModel}
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log_level.clone()))
        .init();

    let snapshot = Snapshot::from_file(&args.snapshot).expect("Expected a readable snapshot file");
    let match_count = snapshot.matches.len();
    let model = snapshot.build_model().expect("Expected a consistent match log");

    let tournaments = match args.tournament {
        Some(id) => vec![id],
        None => model.tournament_ids()
    };

    for tournament_id in &tournaments {
        print_tournament(&model, *tournament_id);
    }

    if args.publish {
        publish_summary(&model, match_count).await;
    }
}

fn print_tournament(model: &ArenaModel, tournament_id: i32) {
    println!("Tournament {tournament_id}");

    for kind in [EntityKind::Competitor, EntityKind::Loadout] {
        let standings = model.standings(tournament_id, kind);
        if standings.is_empty() {
            continue;
        }

        println!("  {kind} standings:");
        for row in standings {
            let name = model
                .registry()
                .name(kind, row.participant_id)
                .unwrap_or("<unknown>");
            let rating = model
                .tracker()
                .rating(tournament_id, kind, row.participant_id)
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unrated".to_string());
            println!(
                "    {:<24} {} wins / {} matches  (rating {})",
                name, row.wins, row.matches, rating
            );
        }
    }

    if let Some(duration) = model.average_match_duration(tournament_id) {
        println!("  average match length: {}s", duration.num_seconds());
    }
}

async fn publish_summary(model: &ArenaModel, match_count: usize) {
    let config = RabbitMqConfig::from_env().expect("Expected RabbitMQ credentials in the environment");
    let mut publisher = RabbitMqPublisher::connect_from_config(&config)
        .await
        .expect("Expected a reachable RabbitMQ broker");

    publisher
        .publish_log_replayed(match_count, model.tournament_ids())
        .await
        .expect("Expected the replay summary to publish");
    publisher.close().await.expect("Expected a clean RabbitMQ shutdown");
}
