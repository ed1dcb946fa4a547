//! Response body consumption.
//!
//! # Components
//!
//! - [`BodyCopier`]: buffered copy of a body stream into any [`Write`](std::io::Write)
//!   sink, with progress notifications and a [`TruncationPolicy`]
//! - [`ResponseBody`]: header accessors, stream access and downloads of a completed
//!   response
//! - [`file_name_from_disposition`]: file name lookup in `Content-Disposition`
//!
//! # Downloads
//!
//! A download moves through `Init → TempWriteInProgress → {Committed | RolledBack}`.
//! The target is resolved first, then the body streams into `<name><suffix>` beside the
//! final file. Only a successful copy renames that file onto the final path; any other
//! exit deletes it. Deletion failures are logged and never replace the error that caused the rollback.

mod copier;
mod disposition;
mod progress;
mod response_body;
mod target;

pub use copier::{BodyCopier, CopyOutcome, DEFAULT_BUFFER_SIZE, TruncationPolicy};
pub use disposition::{DEFAULT_FILE_NAME_PARAM, file_name_from_disposition};
pub use progress::{NoProgress, StreamProgress};
pub use response_body::ResponseBody;
pub use target::DEFAULT_TEMP_SUFFIX;
