pub mod dispatcher;
pub mod resolver;
pub mod types;

pub use dispatcher::{Dispatcher, Request};
pub use resolver::{Detection, Evidence, Resolver};
pub use types::{CommandOutput, OperationResult, ResolvedOperation};
