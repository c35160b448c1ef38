use std::fs;
use std::path::Path;

use returns_terminal::league::League;
use returns_terminal::state::{Action, AppState, Screen, apply_action};
use returns_terminal::strategy::Strategy;

fn write_league_csv(dir: &Path, league: League, rows: &[[f64; 7]]) {
    let mut out = String::new();
    for (idx, strategy) in Strategy::ALL.into_iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(strategy.running_column());
    }
    out.push('\n');
    for row in rows {
        let line: Vec<String> = row.iter().map(f64::to_string).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    fs::write(dir.join(league.file_name()), out).expect("write fixture csv");
}

fn state_with_dir(dir: &Path) -> AppState {
    AppState::with_data_dir(dir.to_path_buf())
}

#[test]
fn load_with_empty_selection_warns_and_leaves_store_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_with_dir(dir.path());

    apply_action(&mut state, Action::LoadSelected).expect("load");

    assert!(state.store.is_empty());
    let last = state.logs.back().expect("log line");
    assert!(last.starts_with("[WARN]"));
}

#[test]
fn load_then_summary_covers_every_loaded_selection() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_league_csv(dir.path(), League::PremierLeague, &[[1.0; 7], [2.0; 7]]);
    write_league_csv(dir.path(), League::SerieA, &[[3.0; 7]]);

    let mut state = state_with_dir(dir.path());
    state.selected.insert(League::PremierLeague);
    state.selected.insert(League::SerieA);

    apply_action(&mut state, Action::LoadSelected).expect("load");
    assert_eq!(state.store.len(), 2);

    apply_action(&mut state, Action::ShowSummary).expect("summary");
    assert_eq!(state.screen, Screen::Summary);
    assert_eq!(state.summary.len(), 2);
    assert_eq!(state.summary[0].league, League::PremierLeague);
    assert_eq!(state.summary[1].league, League::SerieA);
}

#[test]
fn load_failure_keeps_earlier_leagues_committed() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Premier League precedes Championship in declaration order, so it
    // commits before the missing Championship file fails the action.
    write_league_csv(dir.path(), League::PremierLeague, &[[1.0; 7]]);

    let mut state = state_with_dir(dir.path());
    state.selected.insert(League::PremierLeague);
    state.selected.insert(League::Championship);

    assert!(apply_action(&mut state, Action::LoadSelected).is_err());
    assert!(state.store.contains(League::PremierLeague));
    assert!(!state.store.contains(League::Championship));
}

#[test]
fn reload_replaces_rather_than_duplicates() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_league_csv(dir.path(), League::Ligue1, &[[1.0; 7]]);

    let mut state = state_with_dir(dir.path());
    state.selected.insert(League::Ligue1);
    apply_action(&mut state, Action::LoadSelected).expect("first load");
    apply_action(&mut state, Action::LoadSelected).expect("second load");

    assert_eq!(state.store.len(), 1);
}

#[test]
fn plots_view_warns_when_nothing_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_with_dir(dir.path());
    state.selected.insert(League::LaLiga);

    apply_action(&mut state, Action::ShowPlots).expect("plots");

    assert_eq!(state.screen, Screen::Select);
    let last = state.logs.back().expect("log line");
    assert!(last.starts_with("[WARN]"));
}

#[test]
fn summary_warns_when_nothing_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_with_dir(dir.path());
    state.selected.insert(League::LaLiga);

    apply_action(&mut state, Action::ShowSummary).expect("summary");

    assert_eq!(state.screen, Screen::Select);
    assert!(state.summary.is_empty());
    let last = state.logs.back().expect("log line");
    assert!(last.starts_with("[WARN]"));
}

#[test]
fn plot_cycling_skips_unloaded_selections_and_wraps() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_league_csv(dir.path(), League::PremierLeague, &[[1.0; 7]]);
    write_league_csv(dir.path(), League::SerieA, &[[2.0; 7]]);

    let mut state = state_with_dir(dir.path());
    state.selected.insert(League::PremierLeague);
    state.selected.insert(League::SerieA);
    apply_action(&mut state, Action::LoadSelected).expect("load");

    // A selection added after the load has no dataset and never plots.
    state.selected.insert(League::Ekstraklasa);
    apply_action(&mut state, Action::ShowPlots).expect("plots");
    assert_eq!(state.screen, Screen::Plots);
    assert_eq!(state.plot_leagues(), vec![League::PremierLeague, League::SerieA]);

    assert_eq!(state.current_plot().expect("plot").league, League::PremierLeague);
    apply_action(&mut state, Action::NextPlot).expect("next");
    assert_eq!(state.current_plot().expect("plot").league, League::SerieA);
    apply_action(&mut state, Action::NextPlot).expect("next");
    assert_eq!(state.current_plot().expect("plot").league, League::PremierLeague);
    apply_action(&mut state, Action::PrevPlot).expect("prev");
    assert_eq!(state.current_plot().expect("plot").league, League::SerieA);
}

#[test]
fn cursor_toggle_selects_and_deselects() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_with_dir(dir.path());

    apply_action(&mut state, Action::CursorNext).expect("move");
    assert_eq!(state.cursor_league(), League::Championship);

    apply_action(&mut state, Action::ToggleCursorLeague).expect("toggle");
    assert!(state.selected.contains(&League::Championship));
    apply_action(&mut state, Action::ToggleCursorLeague).expect("toggle");
    assert!(!state.selected.contains(&League::Championship));

    apply_action(&mut state, Action::CursorPrev).expect("move");
    apply_action(&mut state, Action::CursorPrev).expect("move");
    assert_eq!(state.cursor_league(), League::Ekstraklasa);
}

#[test]
fn select_all_then_clear() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = state_with_dir(dir.path());

    apply_action(&mut state, Action::SelectAll).expect("all");
    assert_eq!(state.selection().len(), League::ALL.len());
    assert_eq!(state.selection(), League::ALL.to_vec());

    apply_action(&mut state, Action::ClearSelection).expect("none");
    assert!(state.selection().is_empty());
}
