// ============================================================
// Layer 6 — Prompt Configuration
// ============================================================
// Reads the scoring prompts from a YAML file:
//
//   system_prompt: "You are a helpful assistant."   # optional
//   user_prompt: |                                  # required
//     Rate the physical plausibility of this video from 1 to 5...
//
// A missing user prompt is fatal and is reported before any
// model or video is touched.
//
// A relative prompt path is looked up in the working directory
// first, then next to the executable and in each of its parent
// directories, so `prompts/...` resolves from a checkout even
// when the binary is run from elsewhere.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// System prompt used when the file does not provide one
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Error)]
pub enum PromptConfigError {
    #[error("No user_prompt found in {path}")]
    MissingUserPrompt { path: PathBuf },
}

#[derive(Debug, Default, Deserialize)]
struct PromptFile {
    #[serde(default)]
    system_prompt: Option<String>,
    #[serde(default)]
    user_prompt: Option<String>,
}

/// System and user instructions for the scoring model
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub system_prompt: String,
    pub user_prompt:   String,
}

impl PromptConfig {
    /// Load and validate a prompt file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read prompt config '{}'", path.display()))?;
        Self::from_yaml_str(&text, path)
    }

    /// Parse prompt YAML; `origin` is only used in error messages.
    pub fn from_yaml_str(text: &str, origin: &Path) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)
            .with_context(|| format!("Malformed prompt config '{}'", origin.display()))?;

        let file: PromptFile = if value.is_null() {
            PromptFile::default()
        } else {
            serde_yaml::from_value(value)
                .with_context(|| format!("Malformed prompt config '{}'", origin.display()))?
        };

        let user_prompt = file
            .user_prompt
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PromptConfigError::MissingUserPrompt { path: origin.to_path_buf() })?;

        Ok(Self {
            system_prompt: file
                .system_prompt
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            user_prompt,
        })
    }
}

/// Resolve a prompt path for reading.
///
/// Absolute paths and paths that exist relative to the working
/// directory are returned unchanged. Otherwise the first ancestor of
/// `exe_dir` containing `path` wins. If nothing matches, `path` is
/// returned as given so the read error names it.
pub fn resolve_prompt_path(path: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }

    exe_dir
        .into_iter()
        .flat_map(Path::ancestors)
        .map(|dir| dir.join(path))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Directory of the running executable, if it can be determined
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_both_prompts() {
        let tmp  = TempDir::new().unwrap();
        let path = tmp.path().join("reward.yaml");
        fs::write(&path, "system_prompt: Be strict.\nuser_prompt: Rate it.\n").unwrap();

        let cfg = PromptConfig::load(&path).unwrap();
        assert_eq!(cfg.system_prompt, "Be strict.");
        assert_eq!(cfg.user_prompt, "Rate it.");
    }

    #[test]
    fn test_default_system_prompt() {
        let cfg = PromptConfig::from_yaml_str("user_prompt: Rate it.", Path::new("p.yaml")).unwrap();
        assert_eq!(cfg.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_missing_user_prompt_is_fatal() {
        let err = PromptConfig::from_yaml_str("system_prompt: hi", Path::new("p.yaml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PromptConfigError>(),
            Some(PromptConfigError::MissingUserPrompt { .. })
        ));
    }

    #[test]
    fn test_empty_user_prompt_is_fatal() {
        let err = PromptConfig::from_yaml_str("user_prompt: \"\"", Path::new("p.yaml")).unwrap_err();
        assert!(err.to_string().contains("No user_prompt found"));
    }

    #[test]
    fn test_relative_path_found_above_executable() {
        let tmp     = TempDir::new().unwrap();
        let exe_dir = tmp.path().join("target").join("release");
        fs::create_dir_all(&exe_dir).unwrap();
        fs::create_dir_all(tmp.path().join("reward_lookup")).unwrap();
        fs::write(tmp.path().join("reward_lookup/p.yaml"), "user_prompt: Rate it.").unwrap();

        let resolved = resolve_prompt_path(Path::new("reward_lookup/p.yaml"), Some(&exe_dir));
        assert_eq!(resolved, tmp.path().join("reward_lookup/p.yaml"));
        assert_eq!(PromptConfig::load(&resolved).unwrap().user_prompt, "Rate it.");
    }

    #[test]
    fn test_unresolved_path_returned_as_given() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolve_prompt_path(Path::new("reward_lookup/none.yaml"), Some(tmp.path()));
        assert_eq!(resolved, PathBuf::from("reward_lookup/none.yaml"));
        assert_eq!(resolve_prompt_path(Path::new("x.yaml"), None), PathBuf::from("x.yaml"));
    }

    #[test]
    fn test_absolute_path_unchanged() {
        let tmp  = TempDir::new().unwrap();
        let path = tmp.path().join("p.yaml");
        assert_eq!(resolve_prompt_path(&path, Some(Path::new("/elsewhere"))), path);
    }

    #[test]
    fn test_missing_file() {
        assert!(PromptConfig::load(Path::new("/definitely/not/here.yaml")).is_err());
    }
}
