pub mod board;
pub mod query;
pub mod result_record;

pub use board::*;
pub use query::*;
pub use result_record::*;
