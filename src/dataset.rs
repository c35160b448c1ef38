use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::league::{League, season_from_file};
use crate::strategy::Strategy;

/// One CSV row: the seven running balances after that fixture. The source
/// files carry a pile of raw match columns around these; header-based
/// deserialization drops everything we don't name.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FixtureReturns {
    pub home_returns_running_total: f64,
    pub draw_returns_running_total: f64,
    pub away_returns_running_total: f64,
    pub first_choice_returns_running_total: f64,
    pub second_choice_returns_running_total: f64,
    pub third_choice_returns_running_total: f64,
    pub random_choice_1_running_balance: f64,
}

impl FixtureReturns {
    pub fn value(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::HomeWin => self.home_returns_running_total,
            Strategy::Draw => self.draw_returns_running_total,
            Strategy::AwayWin => self.away_returns_running_total,
            Strategy::FirstChoice => self.first_choice_returns_running_total,
            Strategy::SecondChoice => self.second_choice_returns_running_total,
            Strategy::ThirdChoice => self.third_choice_returns_running_total,
            Strategy::RandomChoice => self.random_choice_1_running_balance,
        }
    }
}

/// A loaded league: one row per fixture, in CSV order, which is
/// chronological order within the season.
#[derive(Debug, Clone)]
pub struct LeagueDataset {
    pub league: League,
    pub league_name: String,
    pub season: String,
    pub rows: Vec<FixtureReturns>,
}

impl LeagueDataset {
    /// Closing balance of one strategy, i.e. the last row's running value.
    pub fn final_value(&self, strategy: Strategy) -> Result<f64> {
        let last = self
            .rows
            .last()
            .with_context(|| format!("{} dataset has no rows", self.league_name))?;
        Ok(last.value(strategy))
    }

    /// Extrema across all seven running series, used for plot bounds and the
    /// positive/negative region tint.
    pub fn extrema(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in &self.rows {
            for strategy in Strategy::ALL {
                let v = row.value(strategy);
                min = min.min(v);
                max = max.max(v);
            }
        }
        (min, max)
    }
}

/// Reads one league's returns file from `data_dir`. Missing file, a header
/// without the seven strategy columns, and an empty body all fail here with
/// the file name in the error.
pub fn load_league(data_dir: &Path, league: League) -> Result<LeagueDataset> {
    let file_name = league.file_name();
    let path = data_dir.join(file_name);
    let mut reader = csv::Reader::from_path(&path)
        .with_context(|| format!("open returns file {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: FixtureReturns =
            record.with_context(|| format!("parse returns row in {file_name}"))?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("{file_name} has no fixture rows");
    }

    Ok(LeagueDataset {
        league,
        league_name: league.label().to_string(),
        season: season_from_file(file_name),
        rows,
    })
}
