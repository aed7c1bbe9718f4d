// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Program handler registry.
//!
//! Schedule entries name a handler; the registry maps that name to a
//! factory that builds the program's adapter. Factories are registered at
//! startup and an unregistered name is an error for that program only.

use crate::error::EngineError;
use crate::log_paths::job_log_path;
use crate::Settings;
use pm_adapters::{CommandProgram, ProgramAdapter, ProgramError, SystemProcessControl};
use pm_schedule::ProgramSpec;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Name of the built-in shell command handler
pub const COMMAND_HANDLER: &str = "command";

/// Runtime values a handler may need besides the program's spec
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub log_path: PathBuf,
    pub log_max_bytes: u64,
    pub stop_grace: Duration,
}

impl HandlerContext {
    /// Context for `program` with its job log under the configured log dir.
    pub fn from_settings(settings: &Settings, program: &str) -> Self {
        Self {
            log_path: job_log_path(&settings.log_dir, program),
            log_max_bytes: settings.log_max_bytes,
            stop_grace: settings.stop_grace,
        }
    }
}

pub type HandlerFactory = Arc<
    dyn Fn(&ProgramSpec, &HandlerContext) -> Result<Arc<dyn ProgramAdapter>, ProgramError>
        + Send
        + Sync,
>;

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    factories: BTreeMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    /// Registry with no handlers at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in handlers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(COMMAND_HANDLER, Arc::new(build_command));
        registry
    }

    /// Register (or replace) a handler factory.
    pub fn register(&mut self, name: impl Into<String>, factory: HandlerFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the adapter for `spec`.
    pub fn build(
        &self,
        spec: &ProgramSpec,
        ctx: &HandlerContext,
    ) -> Result<Arc<dyn ProgramAdapter>, EngineError> {
        let factory =
            self.factories
                .get(&spec.handler)
                .ok_or_else(|| EngineError::UnknownHandler {
                    program: spec.name.clone(),
                    handler: spec.handler.clone(),
                })?;
        factory(spec, ctx).map_err(|source| EngineError::HandlerBuild {
            program: spec.name.clone(),
            source,
        })
    }
}

fn build_command(
    spec: &ProgramSpec,
    ctx: &HandlerContext,
) -> Result<Arc<dyn ProgramAdapter>, ProgramError> {
    let command = spec.command.clone().ok_or(ProgramError::MissingOption {
        handler: COMMAND_HANDLER,
        field: "command",
    })?;
    let program = CommandProgram::new(
        spec.name.clone(),
        command,
        ctx.log_path.clone(),
        SystemProcessControl::new(),
    )
    .cwd(spec.cwd.clone())
    .log_max_bytes(ctx.log_max_bytes)
    .stop_grace(spec.stop_grace.unwrap_or(ctx.stop_grace));
    Ok(Arc::new(program))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
