pub mod form;
pub mod label;
pub mod submit;
pub mod validate;

pub use form::{RewardTierForm, TierRow};
pub use label::{effective_end, parse_label, tier_amount};
pub use submit::{assemble, RewardTierSubmission, SubmitBlock};
pub use validate::{validate, FormErrors, TierRowErrors, ValidationSnapshot};
