use super::{effective_hint, report};
use crate::config::Settings;
use crate::core::{Dispatcher, OperationResult, Request};
use crate::error::{Result, UvstartError};
use crate::ui as output;

/// Per-invocation state shared by the command handlers
pub(super) struct Session<'a> {
    pub dispatcher: &'a Dispatcher,
    pub settings: &'a Settings,
    pub dry_run: bool,
}

impl Session<'_> {
    pub fn detect(&self) -> i32 {
        match self.dispatcher.detect() {
            Some(id) => {
                println!("{}", id);
                0
            }
            None => {
                println!("none");
                1
            }
        }
    }

    pub fn backends(&self) -> i32 {
        for id in self.dispatcher.backend_ids() {
            println!("{}", id);
        }
        0
    }

    pub fn operation(&self, request: Request, flag: Option<&str>) -> Result<i32> {
        let hint = effective_hint(self.dispatcher, self.settings, flag);

        if self.dry_run {
            return Ok(match self.dispatcher.prepare(&request, hint.as_deref()) {
                Ok(resolved) => {
                    println!("{}", resolved.display_line());
                    0
                }
                Err(e) => report(&OperationResult::from_error(&e)),
            });
        }

        let result = self.dispatcher.dispatch(&request, hint.as_deref());
        Ok(report(&result))
    }

    pub fn clean(&self, flag: Option<&str>) -> Result<i32> {
        let hint = effective_hint(self.dispatcher, self.settings, flag);

        if self.dry_run {
            return Ok(match self.dispatcher.pending_cleanup(hint.as_deref()) {
                Ok(paths) if paths.is_empty() => {
                    output::info("Nothing to remove");
                    0
                }
                Ok(paths) => {
                    for path in paths {
                        println!("Would remove: {}", path);
                    }
                    0
                }
                Err(e) => report(&OperationResult::from_error(&e)),
            });
        }

        let result = self.dispatcher.clean(hint.as_deref());
        if result.success && result.output.is_empty() {
            output::info("Nothing to remove");
        }
        Ok(report(&result))
    }

    pub fn install_cmd(&self, backend: &str) -> Result<i32> {
        let hint = self.dispatcher.install_hint(backend);
        if hint.is_empty() {
            return Err(UvstartError::UnknownBackend(backend.to_string()));
        }

        println!("{}", hint);
        Ok(0)
    }

    pub fn clean_files(&self, backend: &str) -> i32 {
        for path in self.dispatcher.cleanup_paths(backend) {
            println!("{}", path);
        }
        0
    }
}
