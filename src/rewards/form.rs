//! Reward tier form state and the tier list editor. Header numeric fields keep
//! their raw text so validation can distinguish "empty" from "not a number".

use serde::{Deserialize, Serialize};

use crate::rewards::label::{effective_end, parse_label, tier_amount};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRow {
    pub label: String,
    pub start_rank: i64,
    /// 0 is the single-rank sentinel: the effective end equals `start_rank`.
    pub end_rank: i64,
    /// Raw form input; parsed on demand.
    #[serde(default)]
    pub amount_per_user: String,
    /// Derived from the rank span and per-user amount, never set directly.
    #[serde(default)]
    pub total_amount: f64,
}

impl TierRow {
    pub fn effective_end(&self) -> i64 {
        effective_end(self.start_rank, self.end_rank)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTierForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_players: String,
    #[serde(default)]
    pub total_amount: String,
    #[serde(default)]
    pub tiers: Vec<TierRow>,
}

impl RewardTierForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total players as an integer, 0 when the field is empty or malformed.
    pub fn total_players_value(&self) -> i64 {
        self.total_players.trim().parse::<i64>().unwrap_or(0)
    }

    /// Budget as a decimal, 0.0 when the field is empty or malformed.
    pub fn total_amount_value(&self) -> f64 {
        crate::rewards::label::parse_decimal(&self.total_amount).unwrap_or(0.0)
    }

    /// Sum of all tiers' derived totals.
    pub fn distributed_total(&self) -> f64 {
        self.tiers.iter().map(|t| t.total_amount).sum()
    }

    /// The start rank the tier at `index` must have for the list to stay
    /// contiguous: 1 for the first row, previous effective end + 1 after that.
    pub fn expected_start(&self, index: usize) -> i64 {
        if index == 0 {
            return 1;
        }
        match self.tiers.get(index - 1) {
            Some(prev) => prev.effective_end() + 1,
            None => 1,
        }
    }

    fn previous_span(&self) -> i64 {
        match self.tiers.last() {
            Some(last) => (last.effective_end() - last.start_rank + 1).max(1),
            None => 1,
        }
    }

    /// Append a row whose range continues where the previous row left off,
    /// reusing the previous row's span and clamping the end to total players.
    /// When the computed start already exceeds total players the row is added
    /// empty so the validator surfaces the problem instead of blocking the add.
    pub fn add_tier(&mut self) {
        let start = self.expected_start(self.tiers.len());
        let span = self.previous_span();
        let total_players = self.total_players_value();
        let end = (start + span - 1).min(total_players);

        let row = if start <= total_players {
            let label = if end == start {
                start.to_string()
            } else {
                format!("{start}-{end}")
            };
            let end_rank = if end == start { 0 } else { end };
            TierRow {
                label,
                start_rank: start,
                end_rank,
                amount_per_user: String::new(),
                total_amount: tier_amount(start, end_rank, ""),
            }
        } else {
            TierRow {
                label: String::new(),
                start_rank: 0,
                end_rank: 0,
                amount_per_user: String::new(),
                total_amount: 0.0,
            }
        };
        self.tiers.push(row);
    }

    /// Re-parse the label and overwrite the row's ranks and derived total.
    pub fn update_label(&mut self, index: usize, label: &str) {
        if let Some(row) = self.tiers.get_mut(index) {
            let (start, end) = parse_label(label);
            row.label = label.to_string();
            row.start_rank = start;
            row.end_rank = end;
            row.total_amount = tier_amount(start, end, &row.amount_per_user);
        }
    }

    /// Store the raw per-user amount and recompute the row's derived total.
    pub fn set_amount_per_user(&mut self, index: usize, value: &str) {
        if let Some(row) = self.tiers.get_mut(index) {
            row.amount_per_user = value.to_string();
            row.total_amount = tier_amount(row.start_rank, row.end_rank, value);
        }
    }

    /// Delete a row. Later rows keep their stored ranks; a gap left behind is
    /// re-flagged by validation rather than silently renumbered.
    pub fn remove_tier(&mut self, index: usize) {
        if index < self.tiers.len() {
            self.tiers.remove(index);
        }
    }

    /// Recompute every row's derived total. Deserialized forms may carry stale
    /// totals; totals are never trusted from input.
    pub fn recalculate_totals(&mut self) {
        for row in &mut self.tiers {
            row.total_amount = tier_amount(row.start_rank, row.end_rank, &row.amount_per_user);
        }
    }
}
