use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use returns_terminal::dataset::{FixtureReturns, LeagueDataset};
use returns_terminal::league::League;
use returns_terminal::store::SessionStore;
use returns_terminal::strategy::Strategy;
use returns_terminal::summary::build_summary;

fn season_csv(rows: usize) -> String {
    let header: Vec<&str> = Strategy::ALL.iter().map(|s| s.running_column()).collect();
    let mut out = header.join(",");
    out.push('\n');
    for i in 0..rows {
        let v = i as f64;
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            v,
            -v,
            v * 0.5,
            v * 1.5,
            -v * 0.5,
            v - 10.0,
            v * 0.1
        ));
    }
    out
}

fn loaded_store(rows: usize) -> SessionStore {
    let mut store = SessionStore::new();
    for league in League::ALL {
        let rows: Vec<FixtureReturns> = (0..rows)
            .map(|i| {
                let v = i as f64;
                FixtureReturns {
                    home_returns_running_total: v,
                    draw_returns_running_total: -v,
                    away_returns_running_total: v * 0.5,
                    first_choice_returns_running_total: v * 1.5,
                    second_choice_returns_running_total: -v * 0.5,
                    third_choice_returns_running_total: v - 10.0,
                    random_choice_1_running_balance: v * 0.1,
                }
            })
            .collect();
        store.insert(LeagueDataset {
            league,
            league_name: league.label().to_string(),
            season: "2023-2024".to_string(),
            rows,
        });
    }
    store
}

fn bench_csv_parse(c: &mut Criterion) {
    let body = season_csv(380);
    c.bench_function("csv_parse_season", |b| {
        b.iter(|| {
            let mut reader = csv::Reader::from_reader(black_box(body.as_bytes()));
            let rows: Vec<FixtureReturns> = reader
                .deserialize()
                .collect::<Result<_, _>>()
                .expect("valid fixture csv");
            black_box(rows.len())
        })
    });
}

fn bench_build_summary(c: &mut Criterion) {
    let store = loaded_store(380);
    let selection = League::ALL.to_vec();
    c.bench_function("build_summary_all_leagues", |b| {
        b.iter(|| {
            let records =
                build_summary(black_box(&store), black_box(&selection)).expect("summary");
            black_box(records.len())
        })
    });
}

criterion_group!(benches, bench_csv_parse, bench_build_summary);
criterion_main!(benches);
