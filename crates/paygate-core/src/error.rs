//! Error types for paygate normalization.

/// Result type for paygate normalization.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Errors that can occur while normalizing a gateway payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The input was neither an object nor an array of objects.
    #[error("unsupported payload shape: expected an object, found {found}{}", at_index(.position))]
    UnsupportedShape {
        /// JSON kind that was found instead (e.g. `"null"`, `"string"`).
        found: &'static str,
        /// Index of the offending element when the input was a list.
        position: Option<usize>,
    },
}

fn at_index(position: &Option<usize>) -> String {
    position.map(|index| format!(" at index {index}")).unwrap_or_default()
}
