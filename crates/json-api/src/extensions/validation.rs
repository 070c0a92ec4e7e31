//! Request validation helpers.

use garde::{Report, Validate};
use salvo::prelude::StatusError;

/// Validate a domain input, rejecting it with a 400 listing the failing fields.
pub(crate) trait ValidateExt: Sized {
    fn validate_or_400(self) -> Result<Self, StatusError>;
}

impl<T> ValidateExt for T
where
    T: Validate,
    T::Context: Default,
{
    fn validate_or_400(self) -> Result<Self, StatusError> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(report) => Err(StatusError::bad_request().brief(describe(&report))),
        }
    }
}

fn describe(report: &Report) -> String {
    report
        .iter()
        .map(|(path, error)| {
            let path = path.to_string();

            if path.is_empty() {
                error.to_string()
            } else {
                format!("{path}: {error}")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
