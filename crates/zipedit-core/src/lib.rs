//! Edit single members of a ZIP archive with an external editor.
//!
//! `zipedit-core` extracts one member into a working directory, waits
//! until the user's editor has finished with it, and writes the edited
//! bytes back into the archive without ever exposing a half-written
//! archive.
//!
//! The crate has three layers:
//!
//! - [`ArchiveStore`]: create, list, extract one member, replace one member
//!   (rebuild into a temporary file, then rename over the original).
//! - The completion detector ([`WatchSession`], [`watch`]): a two-state
//!   machine fed by filesystem events that decides when the editor let go
//!   of the file.
//! - [`EditCycle`]: the interactive extract, wait, recompress loop.
//!
//! # Examples
//!
//! ```no_run
//! use zipedit_core::ArchiveStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ArchiveStore::open("a.zip");
//! store.create(&["x.txt", "y.txt"])?;
//! assert_eq!(store.list(), ["x.txt", "y.txt"]);
//!
//! let copy = store.extract_one("x.txt", "temp_extracted".as_ref())?;
//! std::fs::write(&copy, "HELLO")?;
//! let report = store.replace_one("x.txt", &copy)?;
//! println!("rewrote {} ({} bytes)", report.member, report.bytes_written);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod cycle;
pub mod detector;
pub mod error;
pub mod report;
pub mod store;
pub mod testdata;

#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;

// Re-export main API types
pub use api::create_archive;
pub use api::extract_member;
pub use api::list_members;
pub use api::replace_member;
pub use config::StoreConfig;
pub use error::CycleError;
pub use error::DetectorError;
pub use error::Result;
pub use error::StoreError;
pub use report::CreationReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::ReplaceReport;
pub use store::ArchiveStore;

pub use detector::AppendProbe;
pub use detector::CancellationToken;
pub use detector::CompletionCallback;
pub use detector::DetectorConfig;
pub use detector::EventSource;
pub use detector::FsEvent;
pub use detector::FsEventKind;
pub use detector::NotifySource;
pub use detector::ReleaseProbe;
pub use detector::SessionState;
pub use detector::WatchOutcome;
pub use detector::WatchSession;
pub use detector::wait_for_confirmation;
pub use detector::watch;

pub use cycle::AutomaticWait;
pub use cycle::CompletionWait;
pub use cycle::CycleConfig;
pub use cycle::CycleOutcome;
pub use cycle::EditCycle;
pub use cycle::ExitReason;
pub use cycle::ManualWait;
pub use cycle::MemberSelector;
pub use cycle::PromptSelector;
pub use cycle::Selection;
pub use cycle::SessionReport;
pub use cycle::Terminal;
pub use cycle::WaitMode;
pub use cycle::WorkingDir;

pub use testdata::GeneratorConfig;
