use ratatui::style::Color;

/// The seven precomputed £10 flat-stake strategies carried by every league
/// CSV. Declaration order is the fixed order used for iteration and for
/// best/worst tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    HomeWin,
    Draw,
    AwayWin,
    FirstChoice,
    SecondChoice,
    ThirdChoice,
    RandomChoice,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::HomeWin,
        Strategy::Draw,
        Strategy::AwayWin,
        Strategy::FirstChoice,
        Strategy::SecondChoice,
        Strategy::ThirdChoice,
        Strategy::RandomChoice,
    ];

    /// CSV header of the running-total series for this strategy.
    pub fn running_column(self) -> &'static str {
        match self {
            Strategy::HomeWin => "home_returns_running_total",
            Strategy::Draw => "draw_returns_running_total",
            Strategy::AwayWin => "away_returns_running_total",
            Strategy::FirstChoice => "first_choice_returns_running_total",
            Strategy::SecondChoice => "second_choice_returns_running_total",
            Strategy::ThirdChoice => "third_choice_returns_running_total",
            Strategy::RandomChoice => "random_choice_1_running_balance",
        }
    }

    /// The non-running `_total` column name the summary view reports.
    pub fn final_column(self) -> &'static str {
        match self {
            Strategy::HomeWin => "home_returns_total",
            Strategy::Draw => "draw_returns_total",
            Strategy::AwayWin => "away_returns_total",
            Strategy::FirstChoice => "first_choice_returns_total",
            Strategy::SecondChoice => "second_choice_returns_total",
            Strategy::ThirdChoice => "third_choice_returns_total",
            Strategy::RandomChoice => "random_choice_1_total",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Strategy::HomeWin => Color::Blue,
            Strategy::Draw => Color::Rgb(255, 165, 0),
            Strategy::AwayWin => Color::Green,
            Strategy::FirstChoice => Color::Rgb(160, 32, 240),
            Strategy::SecondChoice => Color::Red,
            Strategy::ThirdChoice => Color::Rgb(165, 42, 42),
            Strategy::RandomChoice => Color::Magenta,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Strategy::HomeWin => "£10 bet on every home win",
            Strategy::Draw => "£10 bet on every draw",
            Strategy::AwayWin => "£10 bet on every away win",
            Strategy::FirstChoice => "£10 on the favourite (lowest odds)",
            Strategy::SecondChoice => "£10 on second favourite",
            Strategy::ThirdChoice => "£10 on Le Underdog (highest odds)",
            Strategy::RandomChoice => "£10 random pick simulation",
        }
    }
}
