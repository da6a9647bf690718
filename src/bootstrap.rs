//! Creating a [Project] from its settings and plugins.
//!
//! Plugins can come from three places: the project settings, the settings of each scene, and
//! an extra list given to [bootstrap]. They are resolved, de-duplicated by name and consulted in
//! that order, always after the [DefaultPlugin].
//!
//! ```
//! use coderange::{
//!     bootstrap::{bootstrap, ProjectSettings, Versions},
//!     plugin::PluginResolutions,
//! };
//!
//! let project = bootstrap(
//!     "walkthrough",
//!     Versions::default(),
//!     &[],
//!     ProjectSettings::default(),
//!     &PluginResolutions::new(),
//!     None,
//! );
//!
//! assert_eq!(project.plugin_names(), vec!["core/default"]);
//! assert!(!project.experimental_features);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use slog::{debug, error, o, warn, Discard, Logger};

use crate::plugin::{DefaultPlugin, Plugin, PluginLoader, PluginRef, PluginResolutions};

/// Versions of the packages the project was built with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Versions {
    pub core: Option<String>,
    pub two_d: Option<String>,
    pub ui: Option<String>,
    pub vite_plugin: Option<String>,
}

/// A scene of the project and the plugins it asks for.
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    pub name: String,
    pub plugins: Vec<PluginRef>,
}

impl SceneDescription {
    pub fn new<S: Into<String>>(name: S) -> SceneDescription {
        SceneDescription {
            name: name.into(),
            plugins: Vec::new(),
        }
    }

    pub fn with_plugins<I, P>(mut self, plugins: I) -> SceneDescription
    where
        I: IntoIterator<Item = P>,
        P: Into<PluginRef>,
    {
        self.plugins.extend(plugins.into_iter().map(Into::into));
        self
    }
}

/// Configuration of a project before plugins have been applied.
#[derive(Clone, Default)]
pub struct ProjectSettings {
    pub scenes: Vec<SceneDescription>,
    pub plugins: Vec<PluginRef>,
    /// Logger used when none is passed to [bootstrap] explicitly.
    pub logger: Option<Logger>,
    pub audio: Option<String>,
    /// Offset of the audio track in seconds.
    pub audio_offset: Option<f64>,
    pub variables: BTreeMap<String, String>,
    pub experimental_features: Option<bool>,
}

impl ProjectSettings {
    /// Replaces every setting the patch provides.
    ///
    /// Fields are replaced as a whole, so a patch with `variables` discards the previous map.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(audio) = patch.audio {
            self.audio = Some(audio);
        }

        if let Some(offset) = patch.audio_offset {
            self.audio_offset = Some(offset);
        }

        if let Some(variables) = patch.variables {
            self.variables = variables;
        }

        if let Some(enabled) = patch.experimental_features {
            self.experimental_features = Some(enabled);
        }
    }
}

impl fmt::Debug for ProjectSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProjectSettings")
            .field("scenes", &self.scenes)
            .field("plugins", &self.plugins)
            .field("audio", &self.audio)
            .field("audio_offset", &self.audio_offset)
            .field("variables", &self.variables)
            .field("experimental_features", &self.experimental_features)
            .finish()
    }
}

/// Partial [ProjectSettings] returned by [Plugin::settings].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub audio: Option<String>,
    pub audio_offset: Option<f64>,
    pub variables: Option<BTreeMap<String, String>>,
    pub experimental_features: Option<bool>,
}

/// A bootstrapped project.
#[derive(Clone)]
pub struct Project {
    pub name: String,
    pub scenes: Vec<SceneDescription>,
    /// The included plugins, in the order they were consulted.
    pub plugins: Vec<Arc<dyn Plugin>>,
    pub versions: Versions,
    pub audio: Option<String>,
    pub audio_offset: Option<f64>,
    pub variables: BTreeMap<String, String>,
    pub experimental_features: bool,
    pub logger: Logger,
}

impl Project {
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Project")
            .field("name", &self.name)
            .field("scenes", &self.scenes)
            .field("plugins", &self.plugin_names())
            .field("versions", &self.versions)
            .field("audio", &self.audio)
            .field("audio_offset", &self.audio_offset)
            .field("variables", &self.variables)
            .field("experimental_features", &self.experimental_features)
            .finish()
    }
}

/// Every plugin reference of the project, in the order plugins are consulted.
fn requested_plugins<'a>(
    settings: &'a ProjectSettings,
    extra: &'a [PluginRef],
) -> impl Iterator<Item = &'a PluginRef> + 'a {
    settings.plugins.iter()
        .chain(settings.scenes.iter().flat_map(|scene| scene.plugins.iter()))
        .chain(extra.iter())
}

/// Creates a project from its settings.
///
/// Named plugins are looked up in `resolutions`; names without a resolution are skipped with a
/// warning. Each plugin name is included once, the first occurrence winning. Every included
/// plugin may patch the settings, seeing the patches of the plugins before it, and is then
/// notified of the finished project in the same order. The project is built from the patched
/// settings, so a patch from any plugin is visible in the returned [Project].
///
/// The explicit `logger` takes precedence over [ProjectSettings::logger]. Without either,
/// nothing is logged.
pub fn bootstrap<L>(
    name: &str,
    versions: Versions,
    plugins: &[PluginRef],
    settings: ProjectSettings,
    resolutions: &PluginResolutions,
    logger: L,
) -> Project
where
    L: Into<Option<Logger>>,
{
    let logger = logger
        .into()
        .or_else(|| settings.logger.clone())
        .unwrap_or(Logger::root(Discard, o!()));

    let log = logger.new(o!("project" => name.to_string()));

    let mut candidates = vec![Arc::new(DefaultPlugin) as Arc<dyn Plugin>];

    for plugin in requested_plugins(&settings, plugins) {
        match resolutions.resolve(plugin) {
            Some(resolved) => candidates.push(resolved),
            None => {
                let missing = plugin.as_named().unwrap_or_default();

                match resolutions.suggest(missing) {
                    Some(suggestion) => warn!(log, "skip unresolved plugin";
                        "plugin" => missing, "suggestion" => suggestion),
                    None => warn!(log, "skip unresolved plugin"; "plugin" => missing),
                }
            },
        }
    }

    let mut seen = HashSet::new();
    let mut included = Vec::new();
    let mut settings = settings;

    for plugin in candidates {
        if !seen.insert(plugin.name().to_string()) {
            debug!(log, "skip duplicate plugin"; "plugin" => plugin.name());
            continue;
        }

        debug!(log, "include plugin"; "plugin" => plugin.name());

        if let Some(patch) = plugin.settings(&settings) {
            settings.apply(patch);
        }

        included.push(plugin);
    }

    let mut project = Project {
        name: name.to_string(),
        scenes: settings.scenes,
        plugins: included,
        versions,
        audio: settings.audio,
        audio_offset: settings.audio_offset,
        variables: settings.variables,
        experimental_features: settings.experimental_features.unwrap_or(false),
        logger,
    };

    for plugin in project.plugins.clone() {
        plugin.project(&mut project);
    }

    project
}

/// Loads every named plugin with `loader` and then [bootstraps](bootstrap) the project.
///
/// Each distinct name is loaded once. Plugins that fail to load are logged and left out of the
/// project; they never make bootstrapping fail.
pub fn editor_bootstrap<P>(
    name: &str,
    versions: Versions,
    plugins: &[PluginRef],
    settings: ProjectSettings,
    loader: &P,
) -> Project
where
    P: PluginLoader + ?Sized,
{
    let logger = settings.logger
        .clone()
        .unwrap_or(Logger::root(Discard, o!()));

    let names = requested_plugins(&settings, plugins)
        .filter_map(PluginRef::as_named)
        .unique()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut resolutions = PluginResolutions::new();

    for plugin in names {
        match loader.load(&plugin) {
            Ok(loaded) => {
                debug!(logger, "loaded plugin"; "plugin" => &plugin);
                resolutions.insert(plugin, loaded);
            },
            Err(err) => {
                error!(logger, "failed to load plugin"; "plugin" => &plugin, "error" => %err);
            },
        }
    }

    bootstrap(name, versions, plugins, settings, &resolutions, logger)
}
