//! Service container for dependency injection
//!
//! Wires up the session service with settings and I/O.

use std::sync::Arc;

use crate::application::services::SessionService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and I/O dependencies.
pub struct ServiceContainer {
    /// Effective settings (defaults, config file, env and flags applied)
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Start a session on the initial split described by the settings.
    pub fn session(&self) -> SessionService {
        SessionService::new(self.settings.initial_split())
    }
}
