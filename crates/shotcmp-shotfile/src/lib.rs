#![warn(missing_docs)]

//! Recorded shotline file import/export for shotcmp.
//!
//! The shotfile format is a line-oriented text format. Every record is
//! a keyword, a format version, and a comma-separated payload:
//!
//! ```text
//! # comments run to end of line
//! RAY,1,0,0,0,1,0,0
//! HIT,1,1,0,0,1,2,0,0,2,1,1,0,0,r.hull,/all/r.hull,1001
//! GAP,1,2,0,0,3,0,0,1
//! OVERLAP,1,r.a,r.b,1,2,3,0,0,4,0,0,1
//! MISS,1
//! ```
//!
//! A `RAY` record opens a new ray context; the segment records that
//! follow belong to it until the next `RAY`. String fields are
//! backslash-escaped so they may contain commas, whitespace, and `#`.
//!
//! Loading is all-or-nothing: any malformed line fails the whole read
//! and no rays are returned.

mod error;
mod lexer;
mod reader;
mod writer;

pub use error::{Result, ShotfileError};
pub use reader::{read_shotfile, read_shotfile_from_str};
pub use writer::{write_shotfile, write_shotfile_to_path};

/// The only record version this crate reads and writes.
pub const RECORD_VERSION: u32 = 1;
