//! Fluent configuration and invocation layer over the 7-Zip command line.
//!
//! `sevex-core` does not compress anything itself. It turns high-level
//! intents ("compress this directory to this archive, encrypted, excluding
//! these patterns, reporting progress") into correctly ordered switch
//! vectors for an external 7-Zip binary, drives that binary as a subprocess
//! (including transparent tar staging for `tar.*` formats), and parses its
//! textual output back into progress events and structured metadata.
//!
//! # Examples
//!
//! ```no_run
//! use sevex_core::Session;
//!
//! # fn main() -> sevex_core::Result<()> {
//! let mut session = Session::new()?;
//! session
//!     .set_format("tar.zst")
//!     .set_source_path("./photos")
//!     .set_target_path("./photos.tar.zst")
//!     .max_compression()
//!     .set_progress_fn(|percent| eprintln!("{percent}%"));
//! session.compress()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod capability;
pub mod error;
pub mod flags;
pub mod format;
pub mod listing;
pub mod locate;
pub mod pipeline;
pub mod process;
pub mod progress;
pub mod session;

// Re-export main API types
pub use capability::CapabilityReport;
pub use error::Error;
pub use error::Result;
pub use error::TimeoutKind;
pub use flags::FlagSet;
pub use format::FormatProfile;
pub use listing::ArchiveListing;
pub use locate::DefaultLocator;
pub use locate::ExecutableLocator;
pub use process::ProcessRunner;
pub use session::Recursion;
pub use session::Session;
