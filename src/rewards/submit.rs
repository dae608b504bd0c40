//! Assembles a validated form into the backend's create-reward-tier request
//! shape: three scalar header fields plus four parallel, index-aligned
//! sequences, one entry per tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rewards::form::RewardTierForm;
use crate::rewards::label::parse_decimal;
use crate::rewards::validate::{validate, ValidationSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTierSubmission {
    pub name: String,
    pub total_players: i64,
    pub total_amount: f64,
    pub labels: Vec<String>,
    pub start_ranks: Vec<i64>,
    pub end_ranks: Vec<i64>,
    pub amounts_per_user: Vec<f64>,
}

impl RewardTierSubmission {
    /// Flatten into repeated form-encoded fields. The four tier sequences stay
    /// aligned by index; the backend re-assembles rows from their positions.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Name", self.name.clone()),
            ("TotalPlayers", self.total_players.to_string()),
            ("TotalAmount", format_decimal(self.total_amount)),
        ];
        for label in &self.labels {
            fields.push(("Labels", label.clone()));
        }
        for rank in &self.start_ranks {
            fields.push(("StartRanks", rank.to_string()));
        }
        for rank in &self.end_ranks {
            fields.push(("EndRanks", rank.to_string()));
        }
        for amount in &self.amounts_per_user {
            fields.push(("AmountsPerUser", format_decimal(*amount)));
        }
        fields
    }
}

/// Why a submission was blocked locally; no network call is made in any case.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBlock {
    /// Field or sequencing errors; the snapshot carries the per-field messages.
    Validation(ValidationSnapshot),
    /// The form has no tier rows at all.
    NoTiers,
    /// Distributed amount and budget differ; submit requires exact equality.
    BudgetMismatch { distributed: f64, total_amount: f64 },
}

impl fmt::Display for SubmitBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(_) => write!(f, "Validation failed"),
            Self::NoTiers => write!(f, "Add at least one tier before submitting."),
            Self::BudgetMismatch {
                distributed,
                total_amount,
            } => write!(
                f,
                "Total tier amount ({distributed:.2}) must equal Total Amount ({total_amount:.2})."
            ),
        }
    }
}

impl std::error::Error for SubmitBlock {}

/// Run the validator and, on a clean pass with an exactly-spent budget, build
/// the submission payload.
pub fn assemble(form: &RewardTierForm) -> Result<RewardTierSubmission, SubmitBlock> {
    let snapshot = validate(form);
    if !snapshot.valid {
        return Err(SubmitBlock::Validation(snapshot));
    }
    if form.tiers.is_empty() {
        return Err(SubmitBlock::NoTiers);
    }

    let distributed = snapshot.distributed;
    let total_amount = form.total_amount_value();
    if distributed != total_amount {
        return Err(SubmitBlock::BudgetMismatch {
            distributed,
            total_amount,
        });
    }

    Ok(RewardTierSubmission {
        name: form.name.clone(),
        total_players: form.total_players_value(),
        total_amount,
        labels: form.tiers.iter().map(|t| t.label.clone()).collect(),
        start_ranks: form.tiers.iter().map(|t| t.start_rank).collect(),
        end_ranks: form.tiers.iter().map(|t| t.end_rank).collect(),
        amounts_per_user: form
            .tiers
            .iter()
            .map(|t| parse_decimal(&t.amount_per_user).unwrap_or(0.0))
            .collect(),
    })
}

/// Render a decimal the way the form does: integral amounts without a trailing
/// ".0", fractional amounts as typed.
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::form::RewardTierForm;

    fn filled_form() -> RewardTierForm {
        let mut form = RewardTierForm {
            name: "Season Finale".to_string(),
            total_players: "100".to_string(),
            total_amount: "1000".to_string(),
            tiers: Vec::new(),
        };
        form.add_tier();
        form.update_label(0, "1-100");
        form.set_amount_per_user(0, "10");
        form
    }

    #[test]
    fn exactly_spent_budget_assembles() {
        let submission = assemble(&filled_form()).expect("form should assemble");
        assert_eq!(submission.name, "Season Finale");
        assert_eq!(submission.total_players, 100);
        assert_eq!(submission.total_amount, 1000.0);
        assert_eq!(submission.labels, vec!["1-100"]);
        assert_eq!(submission.start_ranks, vec![1]);
        assert_eq!(submission.end_ranks, vec![100]);
        assert_eq!(submission.amounts_per_user, vec![10.0]);
    }

    #[test]
    fn under_spent_budget_is_blocked_with_equality_message() {
        let mut form = filled_form();
        form.total_amount = "1500".to_string();
        let err = assemble(&form).expect_err("under-allocation must block");
        assert_eq!(
            err.to_string(),
            "Total tier amount (1000.00) must equal Total Amount (1500.00)."
        );
    }

    #[test]
    fn validation_errors_block_before_the_budget_check() {
        let mut form = filled_form();
        form.update_label(0, "2-100");
        match assemble(&form) {
            Err(SubmitBlock::Validation(snapshot)) => {
                assert_eq!(snapshot.errors.tiers[0].label, "Label must start at rank 1.");
            }
            other => panic!("expected validation block, got {other:?}"),
        }
    }

    #[test]
    fn empty_tier_list_is_blocked() {
        let mut form = filled_form();
        form.tiers.clear();
        assert_eq!(assemble(&form), Err(SubmitBlock::NoTiers));
    }

    #[test]
    fn form_fields_keep_tier_sequences_aligned() {
        let mut form = filled_form();
        form.total_players = "10".to_string();
        form.total_amount = "65".to_string();
        form.update_label(0, "1-5");
        form.set_amount_per_user(0, "10");
        form.add_tier();
        form.update_label(1, "6-10");
        form.set_amount_per_user(1, "3");
        let submission = assemble(&form).expect("two-tier form should assemble");
        let fields = submission.form_fields();

        let values = |key: &str| -> Vec<&str> {
            fields
                .iter()
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .collect()
        };
        assert_eq!(values("Name"), vec!["Season Finale"]);
        assert_eq!(values("TotalPlayers"), vec!["10"]);
        assert_eq!(values("TotalAmount"), vec!["65"]);
        assert_eq!(values("Labels"), vec!["1-5", "6-10"]);
        assert_eq!(values("StartRanks"), vec!["1", "6"]);
        assert_eq!(values("EndRanks"), vec!["5", "10"]);
        assert_eq!(values("AmountsPerUser"), vec!["10", "3"]);
    }

    #[test]
    fn single_rank_sentinel_survives_assembly() {
        let mut form = filled_form();
        form.total_players = "1".to_string();
        form.total_amount = "5".to_string();
        form.update_label(0, "1");
        form.set_amount_per_user(0, "5");
        let submission = assemble(&form).expect("single-rank form should assemble");
        assert_eq!(submission.start_ranks, vec![1]);
        assert_eq!(submission.end_ranks, vec![0]);
    }
}
