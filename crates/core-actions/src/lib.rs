//! Console-wrap command layer: scope resolution, dispatch to the per-language
//! wrappers, and the two host commands built on top.
//!
//! `Context` bundles the read-only tables every command consults (the merged
//! `FileTypeMap` and the `WrapperRegistry`). It is constructed once at
//! startup and shared by reference.

use core_config::{Config, FileTypeMap};
use core_wrap::{ActionParseError, WrapError, WrapperRegistry};
use thiserror::Error;

pub mod commands;
pub mod dispatcher;
pub mod resolver;

pub use commands::{ConsoleActionCommand, ConsoleWrapCommand};
pub use dispatcher::{DispatchResult, dispatch, ensure_cursor, supported_file};
pub use resolver::{JS_SELECTOR, PHP_SELECTOR, Resolution, resolve};

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{language} wrapper failed on cursor {index}")]
    Wrapper {
        index: usize,
        language: String,
        #[source]
        source: WrapError,
    },

    #[error(transparent)]
    UnknownAction(#[from] ActionParseError),
}

#[derive(Debug, Clone)]
pub struct Context {
    file_types: FileTypeMap,
    registry: WrapperRegistry,
}

impl Context {
    pub fn new(file_types: FileTypeMap, registry: WrapperRegistry) -> Self {
        Self {
            file_types,
            registry,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, WrapError> {
        let file_types = config.file_type_map();
        let registry = WrapperRegistry::from_config(config)?;
        tracing::info!(
            target: "actions",
            file_types = file_types.len(),
            wrappers = registry.len(),
            "context_ready"
        );
        Ok(Self::new(file_types, registry))
    }

    pub fn file_types(&self) -> &FileTypeMap {
        &self.file_types
    }

    pub fn registry(&self) -> &WrapperRegistry {
        &self.registry
    }
}
