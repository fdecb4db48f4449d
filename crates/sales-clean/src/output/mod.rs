//! Writing tables back out as delimited text.

mod writer;

pub use writer::{Writer, WriterConfig};
