//! Listener return value conversion.

use crate::error::BoxError;

/// Trait for converting a listener's return value into its outcome.
///
/// Listeners report status codes on the event itself; the return value only
/// says whether the listener faulted.
///
/// # Default Implementations
///
/// - `()` → no fault
/// - `Result<(), E>` → `Err` is a fault, propagated out of dispatch
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "missing `IntoOutcome` implementation",
    note = "Listeners must return `()` or `Result<(), E>`."
)]
pub trait IntoOutcome {
    /// Convert the value into a listener result.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
