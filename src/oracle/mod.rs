//! Word-validity orchestration

mod builder;
mod engine;

pub use builder::{OracleBuilder, load_lexicon};
pub use engine::Oracle;
