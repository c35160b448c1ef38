use std::collections::{HashSet, VecDeque};
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use rayon::prelude::*;

use crate::dataset::{LeagueDataset, load_league};
use crate::league::League;
use crate::store::SessionStore;
use crate::summary::{BestWorstRecord, build_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Select,
    Plots,
    Summary,
}

/// One user interaction. Every keypress maps to exactly one of these and is
/// applied through `apply_action`, so the whole flow is drivable from tests
/// without a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorNext,
    CursorPrev,
    ToggleCursorLeague,
    SelectAll,
    ClearSelection,
    LoadSelected,
    ShowPlots,
    ShowSummary,
    NextPlot,
    PrevPlot,
    Back,
    ToggleHelp,
}

pub struct AppState {
    pub screen: Screen,
    pub data_dir: PathBuf,
    pub store: SessionStore,
    pub selected: HashSet<League>,
    pub cursor: usize,
    pub plot_index: usize,
    pub summary: Vec<BestWorstRecord>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let data_dir = env::var("RETURNS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        Self::with_data_dir(data_dir)
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            screen: Screen::Select,
            data_dir,
            store: SessionStore::new(),
            selected: HashSet::new(),
            cursor: 0,
            plot_index: 0,
            summary: Vec::new(),
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    /// Selected leagues in declaration order. The selection set is unordered;
    /// every consumer (loader, plots, summary) walks it in this order.
    pub fn selection(&self) -> Vec<League> {
        League::ALL
            .into_iter()
            .filter(|league| self.selected.contains(league))
            .collect()
    }

    /// Leagues the plots screen can show: selected and loaded. Selected
    /// leagues that were never loaded are skipped without comment.
    pub fn plot_leagues(&self) -> Vec<League> {
        self.selection()
            .into_iter()
            .filter(|league| self.store.contains(*league))
            .collect()
    }

    pub fn current_plot(&self) -> Option<&LeagueDataset> {
        let leagues = self.plot_leagues();
        let league = leagues.get(self.plot_index)?;
        self.store.get(*league)
    }

    pub fn cursor_league(&self) -> League {
        League::ALL[self.cursor.min(League::ALL.len() - 1)]
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// Applies one interaction to the state. A returned error means the action
/// failed mid-flight (bad file, bad header, empty file); the store keeps
/// whatever committed before the failure and the session carries on.
pub fn apply_action(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::CursorNext => {
            state.cursor = (state.cursor + 1) % League::ALL.len();
        }
        Action::CursorPrev => {
            if state.cursor == 0 {
                state.cursor = League::ALL.len() - 1;
            } else {
                state.cursor -= 1;
            }
        }
        Action::ToggleCursorLeague => {
            let league = state.cursor_league();
            if !state.selected.remove(&league) {
                state.selected.insert(league);
            }
        }
        Action::SelectAll => {
            state.selected = League::ALL.into_iter().collect();
        }
        Action::ClearSelection => {
            state.selected.clear();
        }
        Action::LoadSelected => load_selected(state)?,
        Action::ShowPlots => {
            if state.plot_leagues().is_empty() {
                state.push_log("[WARN] No loaded league in the selection to plot");
            } else {
                state.plot_index = 0;
                state.screen = Screen::Plots;
            }
        }
        Action::ShowSummary => {
            let records = build_summary(&state.store, &state.selection())?;
            if records.is_empty() {
                state.push_log("[WARN] No loaded league in the selection to summarise");
            } else {
                state.summary = records;
                state.screen = Screen::Summary;
            }
        }
        Action::NextPlot => {
            let total = state.plot_leagues().len();
            if total > 0 {
                state.plot_index = (state.plot_index + 1) % total;
            }
        }
        Action::PrevPlot => {
            let total = state.plot_leagues().len();
            if total > 0 {
                state.plot_index = (state.plot_index + total - 1) % total;
            }
        }
        Action::Back => {
            state.screen = Screen::Select;
        }
        Action::ToggleHelp => {
            state.help_overlay = !state.help_overlay;
        }
    }
    Ok(())
}

fn load_selected(state: &mut AppState) -> Result<()> {
    let selection = state.selection();
    if selection.is_empty() {
        state.push_log("[WARN] Select at least one league before loading");
        return Ok(());
    }

    // Parse in parallel, commit in selection order. A failure stops the
    // commit walk; earlier leagues stay loaded.
    let results: Vec<(League, Result<LeagueDataset>)> = selection
        .par_iter()
        .map(|league| (*league, load_league(&state.data_dir, *league)))
        .collect();

    for (league, result) in results {
        let dataset = result?;
        state.push_log(format!(
            "[INFO] Loaded {} {} ({} fixtures)",
            league.label(),
            dataset.season,
            dataset.rows.len()
        ));
        state.store.insert(dataset);
    }
    state.push_log("[INFO] Data loaded, choose a view");
    Ok(())
}
