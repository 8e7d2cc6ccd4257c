//! Load collector configuration.
//!
//! Every field is optional; anything left out falls back to the built-in
//! front-end manifest and `collected_files.txt`.

use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::types::WriteMode;

pub const CONFIG_ENV: &str = "COLLECTOR_CONFIG";
pub const CONFIG_FILENAME: &str = "collector.yaml";

/// Files collected when no configuration names any.
pub const DEFAULT_FILES: &[&str] = &[
    "package.json",
    "index.html",
    "tsconfig.json",
    "vercel.json",
    "vite.config.ts",
    "src/config.ts",
    "src/index.tsx",
];

pub const DEFAULT_OUTPUT: &str = "collected_files.txt";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorConfig {
    /// Directory the manifest entries are resolved against.
    pub root: PathBuf,
    /// Ordered manifest; duplicates are collected once per occurrence.
    pub files: Vec<String>,
    pub output: PathBuf,
    pub write_mode: WriteMode,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            files: DEFAULT_FILES.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            write_mode: WriteMode::Streaming,
        }
    }
}

impl CollectorConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml(&s).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_yaml(s: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a map.
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Self = serde_yaml::from_str(s)?;
        Ok(cfg)
    }

    /// Pick the first config source that applies:
    /// `$COLLECTOR_CONFIG`, `./collector.yaml`, the per-user config dir,
    /// then the built-in defaults.
    pub fn discover() -> anyhow::Result<(Self, Option<PathBuf>)> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let user_path = ProjectDirs::from("", "", "collector")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME));

        match pick_source(env_path, Path::new(CONFIG_FILENAME), user_path) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }
}

/// An explicit path always wins, even when it does not exist, so that a
/// typo surfaces as a load error instead of silently using defaults.
fn pick_source(
    explicit: Option<PathBuf>,
    local: &Path,
    user: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p);
    }
    if local.is_file() {
        return Some(local.to_path_buf());
    }
    user.filter(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_builtin_manifest() {
        let cfg = CollectorConfig::default();
        assert_eq!(cfg.files.len(), 7);
        assert_eq!(cfg.files[0], "package.json");
        assert_eq!(cfg.files[6], "src/index.tsx");
        assert_eq!(cfg.output, PathBuf::from("collected_files.txt"));
        assert_eq!(cfg.root, PathBuf::from("."));
        assert_eq!(cfg.write_mode, WriteMode::Streaming);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg = CollectorConfig::from_yaml("output: bundle.txt\n").unwrap();
        assert_eq!(cfg.output, PathBuf::from("bundle.txt"));
        assert_eq!(cfg.files, CollectorConfig::default().files);
    }

    #[test]
    fn full_yaml() {
        let yaml = r#"
root: web
files:
  - a.txt
  - src/b.ts
  - a.txt
output: out/all.txt
write_mode: atomic
"#;
        let cfg = CollectorConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.root, PathBuf::from("web"));
        assert_eq!(cfg.files, vec!["a.txt", "src/b.ts", "a.txt"]);
        assert_eq!(cfg.output, PathBuf::from("out/all.txt"));
        assert_eq!(cfg.write_mode, WriteMode::Atomic);
    }

    #[test]
    fn empty_files_list_is_allowed() {
        let cfg = CollectorConfig::from_yaml("files: []\n").unwrap();
        assert!(cfg.files.is_empty());
    }

    #[test]
    fn empty_document_is_defaults() {
        assert_eq!(
            CollectorConfig::from_yaml("  \n").unwrap(),
            CollectorConfig::default()
        );
    }

    #[test]
    fn unknown_write_mode_rejected() {
        assert!(CollectorConfig::from_yaml("write_mode: fast\n").is_err());
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(CollectorConfig::from_yaml("ouptut: x.txt\n").is_err());
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = CollectorConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "files: [x.txt]\n").unwrap();
        let cfg = CollectorConfig::load(&path).unwrap();
        assert_eq!(cfg.files, vec!["x.txt"]);
    }

    #[test]
    fn explicit_source_wins_even_if_missing() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join(CONFIG_FILENAME);
        fs::write(&local, "").unwrap();
        let picked = pick_source(Some(PathBuf::from("nope.yaml")), &local, None);
        assert_eq!(picked, Some(PathBuf::from("nope.yaml")));
    }

    #[test]
    fn local_then_user_then_none() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join(CONFIG_FILENAME);
        let user = dir.path().join("user.yaml");

        assert_eq!(pick_source(None, &local, Some(user.clone())), None);

        fs::write(&user, "").unwrap();
        assert_eq!(
            pick_source(None, &local, Some(user.clone())),
            Some(user.clone())
        );

        fs::write(&local, "").unwrap();
        assert_eq!(pick_source(None, &local, Some(user)), Some(local));
    }
}
