//! Service application lifecycle: submission, review, and listing.
//!
//! An application starts `pending` and moves to `approved` or `rejected`
//! by office review; both end states are terminal. Submitting emits an
//! informational notification to the applicant.

pub mod errors;
pub mod manager;

pub use errors::{ApplicationError, ApplicationResult};
pub use manager::{ApplicationManager, ApplicationSummary, SubmitApplication};
