use super::adapter::ToolkitAdapter;
use super::canonical::CanonicalToolkit;
use super::native::NativeToolkit;
use std::fmt;
use thiserror::Error;

/// A name-keyed registry of interchangeable pattern-parsing backends.
///
/// Selection fails closed: resolving an unknown name is a configuration
/// error, never a silent fallback to some default adapter.
pub struct ToolkitRegistry {
    adapters: Vec<Box<dyn ToolkitAdapter>>,
}

impl ToolkitRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Creates a registry holding the built-in adapters, `native` first.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NativeToolkit));
        registry.register(Box::new(CanonicalToolkit));
        registry
    }

    /// Registers an adapter, replacing any previously registered adapter of
    /// the same name.
    pub fn register(&mut self, adapter: Box<dyn ToolkitAdapter>) {
        self.adapters
            .retain(|existing| existing.name() != adapter.name());
        self.adapters.push(adapter);
    }

    /// Resolves an adapter by name.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolkitSelectionError`] when no adapter is registered
    /// under `name`.
    pub fn resolve(&self, name: &str) -> Result<&dyn ToolkitAdapter, ToolkitSelectionError> {
        self.adapters
            .iter()
            .map(|adapter| &**adapter)
            .find(|adapter| adapter.name() == name)
            .ok_or_else(|| ToolkitSelectionError {
                name: name.to_string(),
            })
    }

    /// The first registered adapter, if any.
    pub fn default_adapter(&self) -> Option<&dyn ToolkitAdapter> {
        self.adapters.first().map(|adapter| &**adapter)
    }

    /// The names of all registered adapters, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|adapter| adapter.name()).collect()
    }
}

impl Default for ToolkitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolkitRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolkitRegistry")
            .field("adapters", &self.names())
            .finish()
    }
}

/// Raised when an adapter selector names a toolkit nobody registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no toolkit adapter is registered under the name '{name}'")]
pub struct ToolkitSelectionError {
    pub name: String,
}
