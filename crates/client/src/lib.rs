//! Response body handling for the micro http client
//!
//! This crate takes over once a response has been received: it streams the body into a
//! sink or onto disk, reports progress on the way and makes sure a failed download never
//! leaves a half-written file where the complete one is expected.
//!
//! # Features
//!
//! - Buffered streaming copy with progress notifications
//! - Optional tolerance for bodies cut off before their end
//! - Downloads through a temporary file committed by an atomic rename
//! - File name resolution from `Content-Disposition`, including RFC 5987 names
//! - Charset and mime type from `Content-Type`
//!
//! # Example
//!
//! ```
//! use micro_client::body::{ResponseBody, TruncationPolicy};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let response = http::Response::builder()
//!     .header("content-disposition", r#"attachment; filename="report.pdf""#)
//!     .header("content-length", "11")
//!     .body(&b"%PDF-1.7..."[..])
//!     .unwrap();
//!
//! let path = ResponseBody::new(response, TruncationPolicy::Fail)
//!     .write_file_with_progress(dir.path(), |transferred: u64, total: Option<u64>| {
//!         println!("{transferred} of {total:?} bytes");
//!     })
//!     .unwrap();
//!
//! assert_eq!(path, dir.path().join("report.pdf"));
//! assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7...");
//! ```
//!
//! # Architecture
//!
//! - [`body`]: the copier, progress reporting and [`ResponseBody`](body::ResponseBody)
//! - [`protocol`]: the [`Response`](protocol::Response) collaborator and [`BodyError`](protocol::BodyError)
//! - [`fs`]: the file system operations a download depends on
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber. Buffer-level copy
//! progress is logged at `trace`, target resolution and commits at `debug`, ignored
//! truncations and failed cleanups at `warn`.

pub mod body;
pub mod fs;
pub mod protocol;
