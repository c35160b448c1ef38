use std::collections::HashMap;

use once_cell::sync::Lazy;

/// The nine leagues the returns files were scraped for. Declaration order is
/// the fixed order shown in the selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    PremierLeague,
    Championship,
    LeagueOne,
    LeagueTwo,
    SerieA,
    LaLiga,
    LigaPortugal,
    Ligue1,
    Ekstraklasa,
}

impl League {
    pub const ALL: [League; 9] = [
        League::PremierLeague,
        League::Championship,
        League::LeagueOne,
        League::LeagueTwo,
        League::SerieA,
        League::LaLiga,
        League::LigaPortugal,
        League::Ligue1,
        League::Ekstraklasa,
    ];

    pub fn label(self) -> &'static str {
        match self {
            League::PremierLeague => "Premier League",
            League::Championship => "Championship",
            League::LeagueOne => "League One",
            League::LeagueTwo => "League Two",
            League::SerieA => "Serie A (Italy)",
            League::LaLiga => "La Liga (Spain)",
            League::LigaPortugal => "Liga Portugal",
            League::Ligue1 => "Ligue 1 (France)",
            League::Ekstraklasa => "Ekstraklasa (Poland)",
        }
    }

    /// Short tag used where a full label will not fit, e.g. bar chart labels.
    pub fn short_label(self) -> &'static str {
        match self {
            League::PremierLeague => "PL",
            League::Championship => "EFL-C",
            League::LeagueOne => "EFL-1",
            League::LeagueTwo => "EFL-2",
            League::SerieA => "SER-A",
            League::LaLiga => "LALIGA",
            League::LigaPortugal => "PRT",
            League::Ligue1 => "LIG-1",
            League::Ekstraklasa => "EKS",
        }
    }

    /// Fixed CSV file name this league's returns were scraped into.
    pub fn file_name(self) -> &'static str {
        LEAGUE_FILES[&self]
    }
}

static LEAGUE_FILES: Lazy<HashMap<League, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            League::PremierLeague,
            "england_premier-league-2023-2024_financial_returns.csv",
        ),
        (
            League::Championship,
            "england_championship-2023-2024_financial_returns.csv",
        ),
        (
            League::LeagueOne,
            "england_league-one-2023-2024_financial_returns.csv",
        ),
        (
            League::LeagueTwo,
            "england_league-two-2023-2024_financial_returns.csv",
        ),
        (League::SerieA, "italy_serie-a-2023-2024_financial_returns.csv"),
        (League::LaLiga, "spain_laliga-2023-2024_financial_returns.csv"),
        (
            League::LigaPortugal,
            "portugal_liga-portugal-2023-2024_financial_returns.csv",
        ),
        (League::Ligue1, "france_ligue-1-2023-2024_financial_returns.csv"),
        (
            League::Ekstraklasa,
            "poland_ekstraklasa-2023-2024_financial_returns.csv",
        ),
    ])
});

const FILE_SUFFIX: &str = "_financial_returns.csv";

/// Season label derived from the file name: the last two hyphen-delimited
/// segments, with the fixed suffix stripped from the last one. For
/// `england_premier-league-2023-2024_financial_returns.csv` this is
/// `2023-2024`.
pub fn season_from_file(file_name: &str) -> String {
    let mut parts = file_name.rsplit('-');
    let last = parts.next().unwrap_or_default();
    let second_last = parts.next().unwrap_or_default();
    let end = last.strip_suffix(FILE_SUFFIX).unwrap_or(last);
    format!("{second_last}-{end}")
}
