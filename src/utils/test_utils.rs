use crate::model::{
    records::{MatchRecord, MatchSide},
    registry::EntityRegistry,
    structures::{finish_condition::FinishCondition, side::Side}
};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A fixed instant plus an offset, so generated logs replay identically.
pub fn timestamp(offset_minutes: i64) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap().fixed_offset() + Duration::minutes(offset_minutes)
}

pub fn generate_side(competitor_id: i32, loadout_id: i32, launch_device_id: Option<i32>) -> MatchSide {
    MatchSide {
        competitor_id,
        loadout_id,
        launch_device_id
    }
}

/// A consistent record: `is_draw` and `started_at` are derived, the venue
/// is unset. Generated matches run 90 seconds.
pub fn generate_match(
    match_id: i32,
    tournament_id: Option<i32>,
    side_a: MatchSide,
    side_b: MatchSide,
    winner: Option<Side>,
    finish: FinishCondition,
    ended_at: Option<DateTime<FixedOffset>>
) -> MatchRecord {
    MatchRecord {
        match_id,
        tournament_id,
        side_a,
        side_b,
        venue_id: None,
        winner,
        is_draw: winner.is_none(),
        finish,
        started_at: ended_at.map(|t| t - Duration::seconds(90)),
        ended_at
    }
}

/// The registry shared by the test suite:
/// - competitors 1..=4
/// - loadouts 10..=13 over sub-parts 100..=103, each sharing one part with
///   its neighbour (10:{100,101}, 11:{101,102}, 12:{102,103}, 13:{103,100})
/// - venues 500 (class 600) and 501 (class 601)
/// - launch devices 300 and 301 (class 700), 302 (class 701)
pub fn generate_registry() -> EntityRegistry {
    let mut registry = EntityRegistry::new();

    registry.add_competitor(1, "Kai");
    registry.add_competitor(2, "Rin");
    registry.add_competitor(3, "Aiger");
    registry.add_competitor(4, "Valt");

    registry.add_sub_part(100, "Dran Sword");
    registry.add_sub_part(101, "Wizard Arrow");
    registry.add_sub_part(102, "Knight Shield");
    registry.add_sub_part(103, "Shark Edge");

    registry.add_loadout(10, "Sword Strike", &[100, 101]);
    registry.add_loadout(11, "Arrow Guard", &[101, 102]);
    registry.add_loadout(12, "Shield Bite", &[102, 103]);
    registry.add_loadout(13, "Edge Cross", &[103, 100]);

    registry.add_venue_class(600, "Standard Arena");
    registry.add_venue_class(601, "Wide Arena");
    registry.add_venue(500, "Center Stage", Some(600));
    registry.add_venue(501, "Side Hall", Some(601));

    registry.add_launch_device_class(700, "String Type");
    registry.add_launch_device_class(701, "Winder Type");
    registry.add_launch_device(300, "String Launcher Mk1", Some(700));
    registry.add_launch_device(301, "String Launcher Mk2", Some(700));
    registry.add_launch_device(302, "Long Winder", Some(701));

    registry
}

/// A reproducible pseudo-random log over the generated registry. Roughly
/// one match in eight is a draw; venues and devices rotate with the seed.
pub fn generate_match_sequence(n: i32, tournament_id: Option<i32>) -> Vec<MatchRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut records = Vec::with_capacity(n as usize);

    for i in 0..n {
        let a = rng.random_range(0..4);
        let b = loop {
            let candidate = rng.random_range(0..4);
            if candidate != a {
                break candidate;
            }
        };

        let side_a = generate_side(1 + a, 10 + a, Some(300 + rng.random_range(0..3)));
        let side_b = generate_side(1 + b, 10 + b, Some(300 + rng.random_range(0..3)));

        let (winner, finish) = if rng.random_range(0..8) == 0 {
            (None, FinishCondition::Draw)
        } else {
            let winner = if rng.random_range(0..2) == 0 { Side::A } else { Side::B };
            let finish = match rng.random_range(0..4) {
                0 => FinishCondition::Survivor,
                1 => FinishCondition::Knockout,
                2 => FinishCondition::Burst,
                _ => FinishCondition::Extreme
            };
            (Some(winner), finish)
        };

        let mut record = generate_match(
            i + 1,
            tournament_id,
            side_a,
            side_b,
            winner,
            finish,
            Some(timestamp(i as i64))
        );
        record.venue_id = Some(500 + rng.random_range(0..2));
        records.push(record);
    }

    records
}
