//! Errors produced while loading plugins.

/// Reason a [PluginLoader](crate::plugin::PluginLoader) could not provide a plugin.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    /// The loader does not know any plugin with this name.
    #[error("plugin \"{name}\" not found")]
    NotFound {
        name: String,
    },

    /// The plugin was found but could not be instantiated.
    #[error("failed to load plugin \"{name}\": {reason}")]
    Load {
        name: String,
        reason: String,
    },
}

impl PluginError {
    pub fn not_found<S: Into<String>>(name: S) -> PluginError {
        PluginError::NotFound { name: name.into() }
    }

    pub fn load<S, R>(name: S, reason: R) -> PluginError
    where
        S: Into<String>,
        R: Into<String>,
    {
        PluginError::Load {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Name of the plugin that failed to load.
    pub fn name(&self) -> &str {
        match self {
            PluginError::NotFound { name } => name.as_str(),
            PluginError::Load { name, .. } => name.as_str(),
        }
    }
}
