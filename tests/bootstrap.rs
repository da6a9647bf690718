use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use coderange::{
    bootstrap::{
        bootstrap, editor_bootstrap, Project, ProjectSettings, SceneDescription, SettingsPatch,
        Versions,
    },
    error::PluginError,
    plugin::{Plugin, PluginRef, PluginResolutions},
};

use slog::{o, Drain, Level, Logger, Never, OwnedKVList, Record};
use slog_term::{FullFormat, PlainSyncDecorator};

/// Drain that keeps the level and message of every record.
#[derive(Clone, Default)]
struct Capture {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl Drain for Capture {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record, _values: &OwnedKVList) -> Result<(), Never> {
        self.records.lock()
            .unwrap()
            .push((record.level(), record.msg().to_string()));
        Ok(())
    }
}

impl Capture {
    fn logger(&self) -> Logger {
        Logger::root(self.clone(), o!())
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.records.lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

/// Writer sharing its output with the test.
#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Plugin that turns on experimental features and records the settings it saw.
struct Experimental {
    seen_audio: Mutex<Option<String>>,
}

impl Plugin for Experimental {
    fn name(&self) -> &str {
        "experimental"
    }

    fn settings(&self, settings: &ProjectSettings) -> Option<SettingsPatch> {
        *self.seen_audio.lock().unwrap() = settings.audio.clone();

        Some(SettingsPatch {
            experimental_features: Some(true),
            ..SettingsPatch::default()
        })
    }
}

/// Plugin that sets the audio track and a variable, and renames the project.
struct Audio(&'static str);

impl Plugin for Audio {
    fn name(&self) -> &str {
        "audio"
    }

    fn settings(&self, _settings: &ProjectSettings) -> Option<SettingsPatch> {
        let mut variables = BTreeMap::new();
        variables.insert("track".to_string(), self.0.to_string());

        Some(SettingsPatch {
            audio: Some(self.0.to_string()),
            variables: Some(variables),
            ..SettingsPatch::default()
        })
    }

    fn project(&self, project: &mut Project) {
        project.name = format!("{} (with audio)", project.name);
    }
}

struct Plain(&'static str);

impl Plugin for Plain {
    fn name(&self) -> &str {
        self.0
    }
}

fn resolutions() -> PluginResolutions {
    let mut resolutions = PluginResolutions::new();
    resolutions.insert("audio", Arc::new(Audio("voice.mp3")));
    resolutions.insert("highlight", Arc::new(Plain("highlight")));
    resolutions
}

#[test]
fn test_plugin_order_and_duplicates() {
    let settings = ProjectSettings {
        plugins: vec!["highlight".into()],
        scenes: vec![
            SceneDescription::new("intro").with_plugins(vec!["audio", "highlight"]),
            SceneDescription::new("outro").with_plugins(vec![
                PluginRef::loaded(Plain("transitions")),
            ]),
        ],
        ..ProjectSettings::default()
    };

    let project = bootstrap(
        "walkthrough",
        Versions::default(),
        &[PluginRef::named("audio"), PluginRef::loaded(Plain("core/default"))],
        settings,
        &resolutions(),
        None,
    );

    assert_eq!(
        project.plugin_names(),
        vec!["core/default", "highlight", "audio", "transitions"],
    );
}

#[test]
fn test_settings_patches_are_folded_in_order() {
    let experimental = Arc::new(Experimental { seen_audio: Mutex::new(None) });

    let settings = ProjectSettings {
        plugins: vec!["audio".into(), PluginRef::Loaded(experimental.clone())],
        audio_offset: Some(1.5),
        ..ProjectSettings::default()
    };

    let project = bootstrap("walkthrough", Versions::default(), &[], settings, &resolutions(), None);

    assert_eq!(experimental.seen_audio.lock().unwrap().as_deref(), Some("voice.mp3"));
    assert_eq!(project.audio.as_deref(), Some("voice.mp3"));
    assert_eq!(project.audio_offset, Some(1.5));
    assert_eq!(project.variables.get("track").map(String::as_str), Some("voice.mp3"));
    assert!(project.experimental_features);
    assert_eq!(project.name, "walkthrough (with audio)");
}

#[test]
fn test_experimental_features_default_to_false() {
    let project = bootstrap(
        "walkthrough",
        Versions { core: Some("3.0.0".into()), ..Versions::default() },
        &[],
        ProjectSettings::default(),
        &PluginResolutions::new(),
        None,
    );

    assert!(!project.experimental_features);
    assert_eq!(project.versions.core.as_deref(), Some("3.0.0"));
}

#[test]
fn test_unresolved_plugins_are_skipped() {
    let capture = Capture::default();

    let project = bootstrap(
        "walkthrough",
        Versions::default(),
        &[PluginRef::named("higlight"), PluginRef::named("physics")],
        ProjectSettings::default(),
        &resolutions(),
        capture.logger(),
    );

    assert_eq!(project.plugin_names(), vec!["core/default"]);
    assert_eq!(capture.messages(Level::Warning).len(), 2);
}

#[test]
fn test_unresolved_plugin_warning_names_suggestion() {
    let buffer = Buffer::default();

    let decorator = PlainSyncDecorator::new(buffer.clone());
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = Logger::root(drain, o!());

    let project = bootstrap(
        "walkthrough",
        Versions::default(),
        &[PluginRef::named("higlight")],
        ProjectSettings::default(),
        &resolutions(),
        logger,
    );

    // Dropping the last logger handle flushes the async drain.
    drop(project);

    let output = buffer.contents();
    assert!(output.contains("skip unresolved plugin"), "{}", output);
    assert!(output.contains("higlight"), "{}", output);
    assert!(output.contains("highlight"), "{}", output);
    assert!(output.contains("walkthrough"), "{}", output);
}

#[test]
fn test_settings_logger_is_used() {
    let capture = Capture::default();

    let settings = ProjectSettings {
        logger: Some(capture.logger()),
        ..ProjectSettings::default()
    };

    bootstrap(
        "walkthrough",
        Versions::default(),
        &[PluginRef::named("missing")],
        settings,
        &resolutions(),
        None,
    );

    assert_eq!(capture.messages(Level::Warning), vec!["skip unresolved plugin"]);
}

#[test]
fn test_editor_bootstrap_loads_named_plugins() {
    let capture = Capture::default();
    let loads = Mutex::new(Vec::new());

    let loader = |name: &str| -> Result<Arc<dyn Plugin>, PluginError> {
        loads.lock().unwrap().push(name.to_string());

        match name {
            "audio" => Ok(Arc::new(Audio("music.ogg"))),
            "highlight" => Ok(Arc::new(Plain("highlight"))),
            "broken" => Err(PluginError::load(name, "module has no default export")),
            _ => Err(PluginError::not_found(name)),
        }
    };

    let settings = ProjectSettings {
        plugins: vec!["highlight".into(), "broken".into()],
        scenes: vec![SceneDescription::new("intro").with_plugins(vec!["audio", "unknown"])],
        logger: Some(capture.logger()),
        ..ProjectSettings::default()
    };

    let project = editor_bootstrap(
        "walkthrough",
        Versions::default(),
        &[PluginRef::named("highlight")],
        settings,
        &loader,
    );

    assert_eq!(project.plugin_names(), vec!["core/default", "highlight", "audio"]);
    assert_eq!(project.audio.as_deref(), Some("music.ogg"));
    assert_eq!(*loads.lock().unwrap(), vec!["highlight", "broken", "audio", "unknown"]);
    assert_eq!(
        capture.messages(Level::Error),
        vec!["failed to load plugin", "failed to load plugin"],
    );
}
