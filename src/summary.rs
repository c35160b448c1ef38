use anyhow::Result;

use crate::league::League;
use crate::store::SessionStore;
use crate::strategy::Strategy;

/// Best and worst closing balances for one league, recomputed on every
/// summary action from whatever is loaded at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct BestWorstRecord {
    pub league: League,
    pub league_name: String,
    pub best_return: f64,
    pub best_strategy: Strategy,
    pub worst_return: f64,
    pub worst_strategy: Strategy,
}

/// One record per selected league that has a loaded dataset, in selection
/// order. Selected-but-unloaded leagues are skipped without comment; an
/// empty selection or nothing loaded yields an empty summary, which the
/// caller is expected to warn about.
pub fn build_summary(store: &SessionStore, selected: &[League]) -> Result<Vec<BestWorstRecord>> {
    let mut records = Vec::new();
    for &league in selected {
        let Some(dataset) = store.get(league) else {
            continue;
        };

        // Strict comparisons keep the first strategy in declaration order on
        // a tie, matching max/min over an ordered mapping.
        let mut best = Strategy::ALL[0];
        let mut best_value = dataset.final_value(best)?;
        let mut worst = best;
        let mut worst_value = best_value;
        for strategy in &Strategy::ALL[1..] {
            let value = dataset.final_value(*strategy)?;
            if value > best_value {
                best = *strategy;
                best_value = value;
            }
            if value < worst_value {
                worst = *strategy;
                worst_value = value;
            }
        }

        records.push(BestWorstRecord {
            league,
            league_name: dataset.league_name.clone(),
            best_return: best_value,
            best_strategy: best,
            worst_return: worst_value,
            worst_strategy: worst,
        });
    }
    Ok(records)
}

/// `£` prefix, thousands separators, two decimals; the sign sits between the
/// `£` and the digits, as the source formatter printed it.
pub fn format_gbp(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("£-{grouped}.{frac:02}")
    } else {
        format!("£{grouped}.{frac:02}")
    }
}
