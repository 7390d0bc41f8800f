use thiserror::Error;
use validator::ValidationErrors;

pub mod todo;

#[cfg(test)]
pub mod test_util;

/// Describes why a model's fields were rejected. Issues are reported per field in the order
/// the model declares its fields, e.g. "Todo validation failed: done: Path `done` is required."
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{model} validation failed: {}", .issues.join(", "))]
pub struct ValidationFailure {
    model: &'static str,
    issues: Vec<String>,
}

impl ValidationFailure {
    /// Collects the first failure reported for each of [field_order] out of [errors].
    /// Fields the validator flagged that aren't listed in [field_order] are appended afterward.
    pub fn from_errors(
        model: &'static str,
        field_order: &[&'static str],
        errors: &ValidationErrors,
    ) -> Self {
        let field_errors = errors.field_errors();
        let mut unlisted_fields: Vec<&'static str> = field_errors
            .keys()
            .copied()
            .filter(|field| !field_order.contains(field))
            .collect();
        unlisted_fields.sort_unstable();

        let issues = field_order
            .iter()
            .copied()
            .chain(unlisted_fields)
            .filter_map(|field| {
                let first_error = field_errors.get(field)?.first()?;
                let description = first_error
                    .message
                    .as_deref()
                    .unwrap_or(first_error.code.as_ref());

                Some(format!("{field}: {description}"))
            })
            .collect();

        ValidationFailure { model, issues }
    }

    /// The individual "field: problem" entries of this failure
    pub fn issues(&self) -> &[String] {
        self.issues.as_slice()
    }
}
