//! StarDict binary dictionary format.
//!
//! A dictionary is a set of sibling files sharing one stem:
//!
//! ```text
//! name.ifo            key=value metadata (required)
//! name.idx[.gz]       sorted headword index (required)
//! name.dict[.dz]      concatenated definitions (required)
//! name.syn            synonym index (optional)
//! ```
//!
//! Only `sametypesequence=h` with 32-bit offsets is supported.

mod files;
mod format;
mod reader;
mod writer;


pub use files::{gunzip, Component, StarDictFiles};
pub use format::*;
pub use reader::StarDictReader;
pub use writer::{StarDictOutput, StarDictWriter};
