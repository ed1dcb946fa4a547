//! Collaborator abstractions and error types.
//!
//! The body pipeline does not open connections or parse headers itself. It consumes a
//! completed exchange through the [`Response`] trait, implemented for
//! `http::Response<B>` with any readable body.
//!
//! # Error Handling
//!
//! [`BodyError`] covers every failure of the pipeline:
//!
//! - `MissingFileName`: a directory target without a derivable file name
//! - `InvalidTarget`: a target path that has no file name to write to
//! - `TransportTruncation`: the body ended early and truncation is not tolerated
//! - `Io`: any other read or write fault
//! - `RenameFailure`: the downloaded temporary file could not be committed

mod response;
pub use response::Response;

mod error;
pub use error::BodyError;
