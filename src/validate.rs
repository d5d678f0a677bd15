//! Targeting option checks.
//!
//! A command may target concrete hosts, application types, or all
//! application types, but never more than one of these at once.

use crate::error::{Result, TdsError};
use crate::params::ParameterBag;

/// Parameter keys of the mutually exclusive targeting options.
pub const TARGETING_OPTIONS: [&str; 3] = ["hosts", "apptypes", "all_apptypes"];

/// Enforce targeting exclusivity and record whether targeting is explicit.
///
/// Sets `explicit` on the bag to whether any targeting option is set and
/// returns the same value.
///
/// # Errors
///
/// Returns `ExclusiveOptions` naming all three options when more than one
/// of them is set. The bag is left untouched in that case.
pub fn validate(params: &mut ParameterBag) -> Result<bool> {
    tracing::debug!("Checking certain options are exclusive");

    let count = TARGETING_OPTIONS
        .iter()
        .filter(|option| params.is_truthy(option))
        .count();

    if count > 1 {
        return Err(TdsError::ExclusiveOptions {
            options: TARGETING_OPTIONS
                .iter()
                .map(|option| format!("--{}", option.replace('_', "-")))
                .collect(),
        });
    }

    let explicit = count > 0;
    params.replace("explicit", explicit);
    tracing::trace!("\"explicit\" parameter is: {}", explicit);

    Ok(explicit)
}
