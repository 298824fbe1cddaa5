//! Ports used by journal operations that need the user or the platform.

use sleepyhead_types::error::PrintError;

/// Yes/no gate shown before destructive operations.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// The platform print facility.
pub trait Printer: Send + Sync {
    /// Hand `document` to the printer.
    fn print(
        &self,
        document: &str,
    ) -> impl std::future::Future<Output = Result<(), PrintError>> + Send;
}
