//! Plugin registry
//!
//! Hosts look authenticators up by name and build them from the parsed
//! [`AuthenticatorArgs`].

use std::collections::BTreeMap;

use crate::args::AuthenticatorArgs;
use crate::authenticator::{AliyunAuthenticator, Authenticator, PLUGIN_NAME};

/// Builds an authenticator from its command-line options.
pub type AuthenticatorFactory = fn(AuthenticatorArgs) -> Box<dyn Authenticator>;

/// Name → factory table of available authenticators.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    factories: BTreeMap<String, AuthenticatorFactory>,
}

impl PluginRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `dns-aliyun` plugin.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(PLUGIN_NAME, |args| Box::new(AliyunAuthenticator::new(args)));
        registry
    }

    /// Register `factory` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, factory: AuthenticatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn get(&self, name: &str) -> Option<AuthenticatorFactory> {
        self.factories.get(name).copied()
    }

    /// Build the authenticator registered as `name`.
    pub fn create(&self, name: &str, args: AuthenticatorArgs) -> Option<Box<dyn Authenticator>> {
        self.get(name).map(|factory| factory(args))
    }

    /// Registered plugin names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}
