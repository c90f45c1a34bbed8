pub mod types;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use include_dir::{Dir, DirEntry, include_dir};

use types::{Preset, Settings};

static BUILTIN: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/presets");

/// Returns the embedded TOML content for a preset, if it exists.
/// `relative_path` should be like `classic/pwwkew.toml`.
pub fn get_embedded_preset(relative_path: &Path) -> Option<&'static str> {
    BUILTIN.get_file(relative_path)?.contents_utf8()
}

/// Build default search dirs in priority order:
/// 1. `.lsw/` (repo-local, resolved from CWD)
/// 2. `{config_dir}/lsw/` (user-level, platform-native)
///
/// Each dir may hold a `config.toml` and a `presets/` tree. Built-in presets are
/// appended by `discover_all_presets`.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".lsw"));
    }

    if let Some(config) = dirs::config_dir() {
        dirs.push(config.join("lsw"));
    }

    dirs
}

fn read_optional(path: &Path, what: &str) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("failed to read {what} file: {}", path.display()))),
    }
}

/// Try to load a preset from `path`. Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or contains invalid TOML.
pub fn try_load_preset(path: &Path) -> anyhow::Result<Option<Preset>> {
    let Some(content) = read_optional(path, "preset")? else {
        return Ok(None);
    };
    let preset: Preset = toml::from_str(&content)
        .with_context(|| format!("failed to parse preset file: {}", path.display()))?;
    Ok(Some(preset))
}

/// Try to load settings from `path`. Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or contains invalid TOML.
pub fn try_load_settings(path: &Path) -> anyhow::Result<Option<Settings>> {
    let Some(content) = read_optional(path, "settings")? else {
        return Ok(None);
    };
    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("failed to parse settings file: {}", path.display()))?;
    Ok(Some(settings))
}

/// Load `config.toml` from the first search dir that has one.
///
/// Returns the settings together with the file they came from, or the defaults
/// and `None` when no search dir holds a `config.toml`.
///
/// # Errors
///
/// A `config.toml` that exists but does not parse is an error; later dirs are not
/// consulted in that case.
pub fn load_settings(search_dirs: &[PathBuf]) -> anyhow::Result<(Settings, Option<PathBuf>)> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if let Some(settings) = try_load_settings(&path)? {
            return Ok((settings, Some(path)));
        }
    }
    Ok((Settings::default(), None))
}

/// Recursively find all `.toml` files under `dir`, sorted by path.
/// Skips hidden entries (names starting with `.`).
///
/// Silently returns an empty vec if the directory doesn't exist or can't be read.
pub fn discover_preset_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_preset_files(dir, &mut files);
    files.sort();
    files
}

fn collect_preset_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        if path.is_dir() {
            collect_preset_files(&path, files);
        } else if path.extension().is_some_and(|e| e == "toml") {
            files.push(path);
        }
    }
}

/// A discovered preset with its source path and priority level.
#[derive(Debug, Clone)]
pub struct ResolvedPreset {
    pub preset: Preset,
    /// Absolute path to the preset file (or `<built-in>/…` for embedded presets).
    pub source_path: PathBuf,
    /// Path relative to its `presets/` dir.
    pub relative_path: PathBuf,
    /// 0 = repo-local, 1 = user-level, `u8::MAX` = built-in.
    pub priority: u8,
}

impl ResolvedPreset {
    /// Lookup name: the relative path without `.toml`, `/`-separated.
    pub fn name(&self) -> String {
        self.relative_path
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub const fn is_builtin(&self) -> bool {
        self.priority == u8::MAX
    }

    /// Human-readable priority label.
    pub const fn priority_label(&self) -> &'static str {
        match self.priority {
            0 => "local",
            1 => "user",
            _ => "built-in",
        }
    }
}

/// Discover all presets under `<dir>/presets` for each of `search_dirs`, plus the
/// built-in set, sorted by `(priority ASC, name ASC)`.
///
/// When the same name appears at several levels the first (highest priority) wins.
///
/// # Errors
///
/// Missing directories and invalid preset files are skipped, not reported.
/// Returns `Err` only on unexpected failures.
pub fn discover_all_presets(search_dirs: &[PathBuf]) -> anyhow::Result<Vec<ResolvedPreset>> {
    let mut all: Vec<ResolvedPreset> = Vec::new();

    for (priority, dir) in search_dirs.iter().enumerate() {
        let presets_dir = dir.join("presets");
        for path in discover_preset_files(&presets_dir) {
            let Ok(Some(preset)) = try_load_preset(&path) else {
                continue;
            };
            let relative_path = path
                .strip_prefix(&presets_dir)
                .unwrap_or(&path)
                .to_path_buf();
            all.push(ResolvedPreset {
                preset,
                source_path: path,
                relative_path,
                priority: u8::try_from(priority).unwrap_or(u8::MAX - 1),
            });
        }
    }

    if let Ok(entries) = BUILTIN.find("**/*.toml") {
        for entry in entries {
            if let DirEntry::File(file) = entry {
                let content = file.contents_utf8().unwrap_or("");
                let Ok(preset) = toml::from_str::<Preset>(content) else {
                    continue;
                };
                let rel = file.path().to_path_buf();
                all.push(ResolvedPreset {
                    preset,
                    source_path: PathBuf::from("<built-in>").join(&rel),
                    relative_path: rel,
                    priority: u8::MAX,
                });
            }
        }
    }

    all.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });

    let mut seen: HashSet<String> = HashSet::new();
    all.retain(|p| seen.insert(p.name()));

    Ok(all)
}

/// Find a preset by name (`classic/pwwkew`); a trailing `.toml` is ignored.
///
/// # Errors
///
/// A preset file in a search dir that exists under `name` but fails to read or
/// parse is an error; it does not fall through to a lower-priority preset.
pub fn find_preset(search_dirs: &[PathBuf], name: &str) -> anyhow::Result<Option<ResolvedPreset>> {
    let name = name.strip_suffix(".toml").unwrap_or(name);
    let relative_path = PathBuf::from(format!("{name}.toml"));

    for (priority, dir) in search_dirs.iter().enumerate() {
        let path = dir.join("presets").join(&relative_path);
        if let Some(preset) = try_load_preset(&path)? {
            return Ok(Some(ResolvedPreset {
                preset,
                source_path: path,
                relative_path,
                priority: u8::try_from(priority).unwrap_or(u8::MAX - 1),
            }));
        }
    }

    Ok(discover_all_presets(search_dirs)?
        .into_iter()
        .find(|p| p.name() == name))
}

/// Raw TOML of a resolved preset, from disk or from the embedded set.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn preset_source(resolved: &ResolvedPreset) -> anyhow::Result<String> {
    if resolved.is_builtin() {
        return get_embedded_preset(&resolved.relative_path)
            .map(ToString::to_string)
            .ok_or_else(|| anyhow::anyhow!("embedded preset not readable"));
    }
    std::fs::read_to_string(&resolved.source_path)
        .with_context(|| format!("failed to read {}", resolved.source_path.display()))
}
