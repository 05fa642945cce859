pub mod args;
pub mod payload;
pub mod report;
pub mod runtime;

pub use args::*;
pub use payload::*;
pub use report::*;
pub use runtime::*;
