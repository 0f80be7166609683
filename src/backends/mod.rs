//! # Backend Descriptors and Catalog
//!
//! Every supported Python package manager is described by a static
//! [`BackendDescriptor`] rather than by custom Rust code. A descriptor
//! carries everything uvstart needs to know about a tool:
//!
//! - **Detection**: files whose presence identifies the backend
//!   (`uv.lock`, `poetry.lock`, ...) and weaker markers searched for in
//!   `pyproject.toml` (`[tool.uv]`, `[tool.hatch`, ...)
//! - **Command templates**: how each generic operation (add, remove, sync,
//!   run, list, version and their dev variants) is spelled in the tool's CLI
//! - **Cleanup paths**: generated files and directories `clean` may delete
//! - **Install hint**: how to get the tool itself
//!
//! ## Module Structure
//!
//! ### [`config`] - Descriptor types
//!
//! `BackendDescriptor`, `CommandTemplate` and the `Operation` enum.
//! Templates are a list of literal tokens plus an argument policy; they are
//! rendered into an argv, never into a shell string.
//!
//! ### [`registry`] - Built-in Catalog
//!
//! `BackendCatalog::builtin()` returns the fixed table for pdm, uv, poetry,
//! rye and hatch. The catalog is immutable once built and its declaration
//! order is the order detection checks backends in.
//!
//! ### [`command_exec`] - Process Execution
//!
//! `SystemRunner`, the real `CommandRunner`: spawns the program, captures
//! stdout and stderr, and optionally enforces a timeout.
//!
//! ## Adding a Backend
//!
//! Append a descriptor to `registry::get_builtin_backends()`. Its position
//! decides precedence when a project carries markers for several tools.
//!
//! ```rust
//! use uvstart::backends::BackendCatalog;
//! use uvstart::backends::config::Operation;
//!
//! let catalog = BackendCatalog::builtin();
//! let uv = catalog.get("uv").unwrap();
//! let op = uv
//!     .template(Operation::AddDev)
//!     .render("uv", Operation::AddDev, &["pytest".to_string()])
//!     .unwrap();
//! assert_eq!(op.argv(), vec!["uv", "add", "--group", "dev", "pytest"]);
//! ```

pub mod command_exec;
pub mod config;
pub mod registry;

pub use command_exec::SystemRunner;
pub use config::{ArgPolicy, BackendDescriptor, CommandTemplate, CommandTemplates, Operation};
pub use registry::{BackendCatalog, get_builtin_backends};
