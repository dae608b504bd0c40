//! Sequential range validation for the reward tier form. A single pure pass
//! over the form returns a fresh snapshot mirroring the form shape; the caller
//! renders it, nothing is thrown.

use serde::{Deserialize, Serialize};

use crate::rewards::form::RewardTierForm;
use crate::rewards::label::parse_decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRowErrors {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub amount_per_user: String,
}

impl TierRowErrors {
    pub fn is_clean(&self) -> bool {
        self.label.is_empty() && self.amount_per_user.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_players: String,
    #[serde(default)]
    pub total_amount: String,
    #[serde(default)]
    pub tiers: Vec<TierRowErrors>,
}

impl FormErrors {
    pub fn is_clean(&self) -> bool {
        self.name.is_empty()
            && self.total_players.is_empty()
            && self.total_amount.is_empty()
            && self.tiers.iter().all(TierRowErrors::is_clean)
    }
}

/// Immutable result of one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSnapshot {
    pub valid: bool,
    pub errors: FormErrors,
    /// Sum of all tiers' derived totals at the time of the pass.
    pub distributed: f64,
    /// Form-level over-budget banner; empty while the budget covers the tiers.
    #[serde(default)]
    pub banner: String,
}

pub fn validate(form: &RewardTierForm) -> ValidationSnapshot {
    let mut errors = FormErrors::default();
    let total_players = form.total_players_value();

    let name = form.name.trim();
    if name.is_empty() {
        errors.name = "Reward Tier Name is required.".to_string();
    } else if name.chars().count() < 3 {
        errors.name = "Name must be at least 3 characters.".to_string();
    }

    let players_raw = form.total_players.trim();
    if players_raw.is_empty() {
        errors.total_players = "Total Players is required.".to_string();
    } else if !players_raw.bytes().all(|b| b.is_ascii_digit()) {
        errors.total_players = "Enter a whole number.".to_string();
    } else if total_players <= 0 {
        errors.total_players = "Must be at least 1.".to_string();
    }

    // one bad row keeps expected_start where it was, so every later row is
    // flagged too; true ranks are unknowable once a row is wrong
    let mut expected_start = 1i64;
    for tier in &form.tiers {
        let mut row = TierRowErrors::default();
        let start = tier.start_rank;
        let end = tier.effective_end();

        if tier.label.trim().is_empty() {
            row.label = "Label is required (e.g., 1 or 2-5).".to_string();
        } else if start <= 0 {
            row.label = "Invalid label. Use positive ranks (e.g., 1 or 2-5).".to_string();
        } else if start != expected_start {
            row.label = format!("Label must start at rank {expected_start}.");
        } else if end < start {
            row.label = "End rank must be ≥ start.".to_string();
        } else if end > total_players {
            row.label = format!("End rank cannot exceed Total Players ({total_players}).");
        }

        if tier.amount_per_user.trim().is_empty() {
            row.amount_per_user = "Amount per user is required.".to_string();
        } else {
            match parse_decimal(&tier.amount_per_user) {
                None => row.amount_per_user = "Enter a valid number.".to_string(),
                Some(amount) if amount < 0.0 => {
                    row.amount_per_user = "Cannot be negative.".to_string();
                }
                Some(_) => {}
            }
        }

        if row.label.is_empty() {
            expected_start = end + 1;
        }
        errors.tiers.push(row);
    }

    let distributed = form.distributed_total();
    let total_amount = form.total_amount_value();
    let amount_raw = form.total_amount.trim();
    if amount_raw.is_empty() {
        errors.total_amount = "Total Amount is required.".to_string();
    } else if parse_decimal(amount_raw).is_none() {
        errors.total_amount = "Enter a valid number.".to_string();
    } else if total_amount < 0.0 {
        errors.total_amount = "Cannot be negative.".to_string();
    } else if distributed > total_amount {
        errors.total_amount = format!("Increase Total Amount (distributed = {distributed:.2}).");
    }

    let banner = if distributed > total_amount {
        format!(
            "Total tier amount ({distributed:.2}) exceeds available total ({total_amount:.2})"
        )
    } else {
        String::new()
    };

    let valid = errors.is_clean();
    ValidationSnapshot {
        valid,
        errors,
        distributed,
        banner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::form::RewardTierForm;

    fn base_form() -> RewardTierForm {
        RewardTierForm {
            name: "Weekend League".to_string(),
            total_players: "100".to_string(),
            total_amount: "1000".to_string(),
            tiers: Vec::new(),
        }
    }

    fn with_tier(form: &mut RewardTierForm, label: &str, amount: &str) {
        form.add_tier();
        let index = form.tiers.len() - 1;
        form.update_label(index, label);
        form.set_amount_per_user(index, amount);
    }

    #[test]
    fn single_full_range_tier_validates() {
        let mut form = base_form();
        with_tier(&mut form, "1-100", "10");
        let snapshot = validate(&form);
        assert!(snapshot.valid, "{:?}", snapshot.errors);
        assert_eq!(snapshot.distributed, 1000.0);
        assert!(snapshot.banner.is_empty());
    }

    #[test]
    fn gap_between_tiers_reports_expected_start() {
        let mut form = base_form();
        form.total_players = "10".to_string();
        with_tier(&mut form, "1-5", "100");
        with_tier(&mut form, "7-10", "50");
        let snapshot = validate(&form);
        assert!(!snapshot.valid);
        assert_eq!(snapshot.errors.tiers[0].label, "");
        assert_eq!(snapshot.errors.tiers[1].label, "Label must start at rank 6.");
    }

    #[test]
    fn overlap_is_reported_the_same_way_as_a_gap() {
        let mut form = base_form();
        with_tier(&mut form, "1-5", "10");
        with_tier(&mut form, "4-8", "10");
        let snapshot = validate(&form);
        assert_eq!(snapshot.errors.tiers[1].label, "Label must start at rank 6.");
    }

    #[test]
    fn one_bad_row_cascades_to_every_later_row() {
        let mut form = base_form();
        form.total_players = "30".to_string();
        with_tier(&mut form, "1-10", "1");
        with_tier(&mut form, "12-20", "1");
        with_tier(&mut form, "21-30", "1");
        let snapshot = validate(&form);
        // expected start stays at 11 because row 1 never passed
        assert_eq!(snapshot.errors.tiers[1].label, "Label must start at rank 11.");
        assert_eq!(snapshot.errors.tiers[2].label, "Label must start at rank 11.");
    }

    #[test]
    fn malformed_label_fails_positive_rank_rule() {
        let mut form = base_form();
        with_tier(&mut form, "abc", "10");
        let snapshot = validate(&form);
        assert_eq!(
            snapshot.errors.tiers[0].label,
            "Invalid label. Use positive ranks (e.g., 1 or 2-5)."
        );
    }

    #[test]
    fn range_past_total_players_is_rejected() {
        let mut form = base_form();
        form.total_players = "50".to_string();
        with_tier(&mut form, "1-60", "1");
        let snapshot = validate(&form);
        assert_eq!(
            snapshot.errors.tiers[0].label,
            "End rank cannot exceed Total Players (50)."
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut form = base_form();
        with_tier(&mut form, "1-5", "1");
        with_tier(&mut form, "6-3", "1");
        let snapshot = validate(&form);
        assert_eq!(snapshot.errors.tiers[1].label, "End rank must be ≥ start.");
    }

    #[test]
    fn amount_errors_are_reported_per_row() {
        let mut form = base_form();
        with_tier(&mut form, "1-10", "");
        with_tier(&mut form, "11-20", "abc");
        with_tier(&mut form, "21-30", "-5");
        let snapshot = validate(&form);
        assert_eq!(
            snapshot.errors.tiers[0].amount_per_user,
            "Amount per user is required."
        );
        assert_eq!(snapshot.errors.tiers[1].amount_per_user, "Enter a valid number.");
        assert_eq!(snapshot.errors.tiers[2].amount_per_user, "Cannot be negative.");
    }

    #[test]
    fn over_distribution_flags_total_amount_and_banner() {
        let mut form = base_form();
        with_tier(&mut form, "1-10", "120");
        let snapshot = validate(&form);
        assert!(!snapshot.valid);
        assert_eq!(
            snapshot.errors.total_amount,
            "Increase Total Amount (distributed = 1200.00)."
        );
        assert_eq!(
            snapshot.banner,
            "Total tier amount (1200.00) exceeds available total (1000.00)"
        );
    }

    #[test]
    fn under_distribution_is_allowed_while_editing() {
        let mut form = base_form();
        with_tier(&mut form, "1-10", "1");
        let snapshot = validate(&form);
        assert!(snapshot.valid);
        assert_eq!(snapshot.distributed, 10.0);
    }

    #[test]
    fn name_and_header_field_rules() {
        let mut form = base_form();
        form.name = "  ab ".to_string();
        form.total_players = "12.5".to_string();
        form.total_amount = String::new();
        let snapshot = validate(&form);
        assert_eq!(snapshot.errors.name, "Name must be at least 3 characters.");
        assert_eq!(snapshot.errors.total_players, "Enter a whole number.");
        assert_eq!(snapshot.errors.total_amount, "Total Amount is required.");

        form.name = String::new();
        form.total_players = "0".to_string();
        let snapshot = validate(&form);
        assert_eq!(snapshot.errors.name, "Reward Tier Name is required.");
        assert_eq!(snapshot.errors.total_players, "Must be at least 1.");
    }

    #[test]
    fn revalidating_an_unchanged_form_is_idempotent() {
        let mut form = base_form();
        with_tier(&mut form, "1-5", "100");
        with_tier(&mut form, "7-10", "50");
        let first = validate(&form);
        let second = validate(&form);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_tier_list_validates_but_distributes_nothing() {
        let form = base_form();
        let snapshot = validate(&form);
        assert!(snapshot.valid);
        assert_eq!(snapshot.distributed, 0.0);
    }
}
