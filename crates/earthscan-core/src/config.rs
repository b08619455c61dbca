use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE_NAME: &str = "Earthfile";

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Base name that marks a file as an Earthfile
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Maximum walk depth below each root; unlimited when absent
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

impl ScanConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            file_name: lookup("EARTHSCAN_FILE_NAME")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.file_name),
            follow_symlinks: lookup("EARTHSCAN_FOLLOW_SYMLINKS")
                .map_or(defaults.follow_symlinks, |v| {
                    v == "1" || v.eq_ignore_ascii_case("true")
                }),
            max_depth: lookup("EARTHSCAN_MAX_DEPTH")
                .and_then(|v| v.parse().ok())
                .or(defaults.max_depth),
        }
    }

    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.file_name, "Earthfile");
        assert!(!config.follow_symlinks);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn env_overrides() {
        let config = ScanConfig::from_lookup(lookup(&[
            ("EARTHSCAN_FILE_NAME", "Earthfile.ci"),
            ("EARTHSCAN_FOLLOW_SYMLINKS", "TRUE"),
            ("EARTHSCAN_MAX_DEPTH", "3"),
        ]));
        assert_eq!(config.file_name, "Earthfile.ci");
        assert!(config.follow_symlinks);
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn invalid_env_values_fall_back() {
        let config = ScanConfig::from_lookup(lookup(&[
            ("EARTHSCAN_FILE_NAME", ""),
            ("EARTHSCAN_FOLLOW_SYMLINKS", "yes please"),
            ("EARTHSCAN_MAX_DEPTH", "deep"),
        ]));
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn builders_override() {
        let config = ScanConfig::default()
            .with_file_name("Earthfile.dev")
            .with_follow_symlinks(true)
            .with_max_depth(Some(4));
        assert_eq!(config.file_name, "Earthfile.dev");
        assert!(config.follow_symlinks);
        assert_eq!(config.max_depth, Some(4));
    }

    #[test]
    fn deserializes_partial_document() {
        let config: ScanConfig = serde_json::from_str(r#"{"max_depth": 2}"#).unwrap();
        assert_eq!(config.file_name, "Earthfile");
        assert_eq!(config.max_depth, Some(2));
    }
}
