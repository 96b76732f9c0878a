mod types;
mod flatten;

pub use types::{CallTrace, FlatCall};
pub use flatten::flatten;
