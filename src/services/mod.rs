pub mod browser;
pub mod droid;
pub mod extractor;
pub mod result_fetcher;

pub use browser::*;
pub use droid::*;
pub use extractor::*;
pub use result_fetcher::*;
