//! GLS text dictionary format.
//!
//! A GLS file opens with a directive zone of `### Key: value` lines, then a
//! blank-line-separated sequence of two-line articles:
//!
//! ```text
//! ### Glossary title:Example
//! ### Glossary section:
//!
//! headword|synonym|synonym
//! definition
//!
//! next headword
//! next definition
//! ```

pub mod format;
pub mod parser;
pub mod writer;

pub use format::*;
pub use parser::GlsParser;
pub use writer::GlsWriter;
