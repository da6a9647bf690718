//! Plugins and their resolution.
//!
//! A project refers to plugins either directly ([PluginRef::Loaded]) or by name
//! ([PluginRef::Named]). Names are turned into plugins by a [PluginResolutions] table, which is
//! usually filled by a [PluginLoader] before [bootstrapping](crate::bootstrap::bootstrap).

use std::cmp;
use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::bootstrap::{Project, ProjectSettings, SettingsPatch};
use crate::error::PluginError;

/// An extension that can adjust the settings of a project and inspect the result.
pub trait Plugin: Send + Sync {
    /// Unique name of the plugin. Plugins with the same name are included only once.
    fn name(&self) -> &str;

    /// Called with the settings accumulated so far. The returned patch is applied on top of
    /// them before the next plugin is consulted.
    fn settings(&self, _settings: &ProjectSettings) -> Option<SettingsPatch> {
        None
    }

    /// Called once the project has been created, in plugin order.
    fn project(&self, _project: &mut Project) {}
}

/// The plugin every project includes before any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPlugin;

impl DefaultPlugin {
    pub const NAME: &'static str = "core/default";
}

impl Plugin for DefaultPlugin {
    fn name(&self) -> &str {
        DefaultPlugin::NAME
    }
}

/// Either a plugin instance or the name of one that still has to be resolved.
#[derive(Clone)]
pub enum PluginRef {
    Named(String),
    Loaded(Arc<dyn Plugin>),
}

impl PluginRef {
    pub fn named<S: Into<String>>(name: S) -> PluginRef {
        PluginRef::Named(name.into())
    }

    pub fn loaded<P: Plugin + 'static>(plugin: P) -> PluginRef {
        PluginRef::Loaded(Arc::new(plugin))
    }

    /// Returns the name if the plugin still has to be resolved.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            PluginRef::Named(name) => Some(name.as_str()),
            PluginRef::Loaded(_) => None,
        }
    }
}

impl fmt::Debug for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PluginRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            PluginRef::Loaded(plugin) => f.debug_tuple("Loaded").field(&plugin.name()).finish(),
        }
    }
}

impl From<&str> for PluginRef {
    fn from(name: &str) -> PluginRef {
        PluginRef::named(name)
    }
}

impl From<Arc<dyn Plugin>> for PluginRef {
    fn from(plugin: Arc<dyn Plugin>) -> PluginRef {
        PluginRef::Loaded(plugin)
    }
}

/// Mapping from plugin names into plugin instances.
#[derive(Clone, Default)]
pub struct PluginResolutions {
    inner: HashMap<String, Arc<dyn Plugin>>,
}

impl FromIterator<(String, Arc<dyn Plugin>)> for PluginResolutions {
    fn from_iter<I>(iter: I) -> Self
        where I: IntoIterator<Item = (String, Arc<dyn Plugin>)>
    {
        PluginResolutions {
            inner: HashMap::from_iter(iter),
        }
    }
}

impl PluginResolutions {
    pub fn new() -> PluginResolutions {
        PluginResolutions::default()
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, plugin: Arc<dyn Plugin>) {
        self.inner.insert(name.into(), plugin);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Plugin>> {
        self.inner.get(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the plugin `plugin` refers to, or `None` if it is a name with no resolution.
    pub fn resolve(&self, plugin: &PluginRef) -> Option<Arc<dyn Plugin>> {
        match plugin {
            PluginRef::Loaded(plugin) => Some(plugin.clone()),
            PluginRef::Named(name) => self.get(name).cloned(),
        }
    }

    /// Returns the known name closest to `name`, if any is close enough to be a likely typo.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let threshold = cmp::max(1, name.chars().count() / 3);

        self.inner.keys()
            .map(|known| (edit_distance::edit_distance(name, known), known))
            .filter(|(distance, _)| *distance <= threshold)
            .min()
            .map(|(_, known)| known.as_str())
    }
}

/// Trait for turning plugin names into plugin instances.
///
/// A blanket implementation is provided for all `Fn(&str) -> Result<Arc<dyn Plugin>, PluginError>`.
pub trait PluginLoader {
    fn load(&self, name: &str) -> Result<Arc<dyn Plugin>, PluginError>;
}

impl<F> PluginLoader for F where F: Fn(&str) -> Result<Arc<dyn Plugin>, PluginError> {
    fn load(&self, name: &str) -> Result<Arc<dyn Plugin>, PluginError> {
        self(name)
    }
}
