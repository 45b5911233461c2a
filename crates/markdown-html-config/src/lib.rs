//! Configuration primitives and loader for the markdown-html toolkit.
//!
//! Settings are resolved from a precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Each layer is parsed from TOML into a partial config, merged field by
//! field, then validated into typed settings so callers never touch raw TOML.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use markdown_html::{HeadingOverflow, ParseOptions};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub const CONFIG_FILE_NAME: &str = ".markdown-html.toml";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub render: RenderSettings,
    pub log: LogSettings,
    pub sources: ConfigSources,
}

/// Settings forwarded to the renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RenderSettings {
    pub heading_overflow: HeadingOverflow,
}

impl RenderSettings {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_heading_overflow(self.heading_overflow)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

impl ConfigSource {
    fn builtin() -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource {
            kind,
            path: Some(path),
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::builtin();
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_root = find_git_root(&working_dir);
        let git_config_path = git_root.as_ref().map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            render: resolved.render,
            log: resolved.log,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }

    /// Built-in defaults only, without looking at the filesystem.
    pub fn builtin(working_directory: impl Into<PathBuf>) -> Self {
        Config {
            render: RenderSettings {
                heading_overflow: HeadingOverflow::default(),
            },
            log: LogSettings {
                level: LevelFilter::WARN,
            },
            sources: ConfigSources {
                working_directory: working_directory.into(),
                layers: vec![ConfigSource::builtin()],
            },
        }
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    parse_layer(&contents, source).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })
}

fn parse_layer(contents: &str, source: ConfigSource) -> Result<PartialConfig, toml::de::Error> {
    let raw: RawConfig = toml::from_str(contents)?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    PartialConfig {
        heading_overflow: Some(Located::new(
            HeadingOverflow::default().as_str().to_owned(),
            source.clone(),
        )),
        log_level: Some(Located::new(LevelFilter::WARN.to_string(), source)),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// One layer's worth of settings, flattened from the TOML tables. Values stay
/// as raw strings until every layer is merged so errors can name their file.
#[derive(Clone, Debug, Default)]
struct PartialConfig {
    heading_overflow: Option<Located<String>>,
    log_level: Option<Located<String>>,
}

impl PartialConfig {
    fn merge(&mut self, other: PartialConfig) {
        overlay(&mut self.heading_overflow, other.heading_overflow);
        overlay(&mut self.log_level, other.log_level);
    }

    fn finalize(self) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();

        let heading_overflow = self
            .heading_overflow
            .and_then(|located| {
                HeadingOverflow::from_str(&located.value)
                    .map_err(|err| {
                        errors.push(
                            ConfigValidationError::new(Some(located.source.clone()), err.to_string())
                                .with_context("render.heading_overflow"),
                        )
                    })
                    .ok()
            })
            .unwrap_or_default();

        let level = self
            .log_level
            .and_then(|located| {
                LevelFilter::from_str(located.value.trim())
                    .map_err(|_| {
                        errors.push(
                            ConfigValidationError::new(
                                Some(located.source.clone()),
                                format!(
                                    "unknown log level '{}' (expected off, error, warn, info, debug or trace)",
                                    located.value
                                ),
                            )
                            .with_context("log.level"),
                        )
                    })
                    .ok()
            })
            .unwrap_or(LevelFilter::WARN);

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(ResolvedConfig {
            render: RenderSettings { heading_overflow },
            log: LogSettings { level },
        })
    }
}

#[derive(Clone, Debug)]
struct ResolvedConfig {
    render: RenderSettings,
    log: LogSettings,
}

/// A later layer wins for every field it sets.
fn overlay<T>(slot: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    render: Option<RawRender>,
    #[serde(default)]
    log: Option<RawLog>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        PartialConfig {
            heading_overflow: self
                .render
                .and_then(|render| render.heading_overflow)
                .map(|value| Located::new(value, source.clone())),
            log_level: self
                .log
                .and_then(|log| log.level)
                .map(|value| Located::new(value, source)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRender {
    #[serde(default)]
    heading_overflow: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLog {
    #[serde(default)]
    level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_layers_override_earlier_fields() {
        let mut merged = defaults_layer(ConfigSource::builtin());
        let local = parse_layer(
            "[render]\nheading_overflow = \"clamp\"\n",
            ConfigSource::for_file(ConfigSourceKind::Local, PathBuf::from("local.toml")),
        )
        .unwrap();
        merged.merge(local);

        let resolved = merged.finalize().unwrap();
        assert_eq!(resolved.render.heading_overflow, HeadingOverflow::Clamp);
        assert_eq!(resolved.log.level, LevelFilter::WARN);
    }

    #[test]
    fn collects_every_validation_problem() {
        let mut merged = defaults_layer(ConfigSource::builtin());
        let layer = parse_layer(
            "[render]\nheading_overflow = \"cap\"\n[log]\nlevel = \"loud\"\n",
            ConfigSource::for_file(ConfigSourceKind::Override, PathBuf::from("o.toml")),
        )
        .unwrap();
        merged.merge(layer);

        let errors = merged.finalize().unwrap_err();
        assert_eq!(errors.iter().count(), 2);
        let rendered = errors.to_string();
        assert!(rendered.contains("render.heading_overflow"));
        assert!(rendered.contains("log.level: unknown log level 'loud'"));
        assert!(rendered.contains("override config at o.toml"));
    }

    #[test]
    fn unset_fields_keep_earlier_layer_values() {
        let mut merged = defaults_layer(ConfigSource::builtin());
        let git = parse_layer(
            "[log]\nlevel = \"debug\"\n",
            ConfigSource::for_file(ConfigSourceKind::GitRoot, PathBuf::from("git.toml")),
        )
        .unwrap();
        let local = parse_layer(
            "[render]\nheading_overflow = \"clamp\"\n",
            ConfigSource::for_file(ConfigSourceKind::Local, PathBuf::from("local.toml")),
        )
        .unwrap();
        merged.merge(git);
        merged.merge(local);

        let resolved = merged.finalize().unwrap();
        assert_eq!(resolved.render.heading_overflow, HeadingOverflow::Clamp);
        assert_eq!(resolved.log.level, LevelFilter::DEBUG);
    }

    #[test]
    fn unknown_tables_leave_settings_untouched() {
        let mut merged = defaults_layer(ConfigSource::builtin());
        let layer = parse_layer(
            "[output]\ntrailing_newline = true\n",
            ConfigSource::for_file(ConfigSourceKind::Local, PathBuf::from("local.toml")),
        )
        .unwrap();
        assert!(layer.heading_overflow.is_none());
        assert!(layer.log_level.is_none());
        merged.merge(layer);

        let resolved = merged.finalize().unwrap();
        assert_eq!(resolved.render.heading_overflow, HeadingOverflow::Paragraph);
        assert_eq!(resolved.log.level, LevelFilter::WARN);
    }

    #[test]
    fn builtin_matches_loaded_defaults() {
        let builtin = Config::builtin(".");
        assert_eq!(builtin.render.parse_options(), ParseOptions::default());
        assert_eq!(builtin.log.level, LevelFilter::WARN);
        assert_eq!(builtin.sources.layers, vec![ConfigSource::builtin()]);
    }
}
