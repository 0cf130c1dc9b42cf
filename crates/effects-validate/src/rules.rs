//! Rule set configuration.
//!
//! Several rules changed between revisions of the dataset conventions. A
//! [`RuleSet`] pins one revision explicitly so that runs are reproducible:
//! the `strict` profile is the default, `legacy` reproduces the earlier
//! conventions. A TOML rules file can start from either profile and override
//! individual settings.

use std::fs;
use std::path::{Path, PathBuf};

use effects_model::PRIVILEGED_MOD;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Description cap used by the legacy conventions (markup excluded).
pub const LEGACY_DESCRIPTION_MAX_CHARS: usize = 125;

/// Scope inside which two records may not share an `effect` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateScope {
    /// Names are unique across the whole dataset.
    #[default]
    Global,
    /// Names are unique within one `mod` partition.
    PerMod,
}

/// How the `scaling` tag relates to `maxLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingTagRule {
    /// Present if and only if `maxLevel` is not I.
    #[default]
    Exact,
    /// Present whenever `maxLevel` is not I; not checked otherwise.
    RequiredWhenScaling,
}

/// Named starting points for a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    #[default]
    Strict,
    Legacy,
}

/// Authoritative rule settings for one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Origin whose records must head the dataset.
    pub privileged_mod: String,
    pub duplicate_scope: DuplicateScope,
    pub scaling_tag: ScalingTagRule,
    /// Maximum description length in characters, markup excluded.
    pub description_max_chars: Option<usize>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::strict()
    }
}

impl RuleSet {
    pub fn strict() -> Self {
        Self {
            privileged_mod: PRIVILEGED_MOD.to_string(),
            duplicate_scope: DuplicateScope::Global,
            scaling_tag: ScalingTagRule::Exact,
            description_max_chars: None,
        }
    }

    pub fn legacy() -> Self {
        Self {
            privileged_mod: PRIVILEGED_MOD.to_string(),
            duplicate_scope: DuplicateScope::Global,
            scaling_tag: ScalingTagRule::RequiredWhenScaling,
            description_max_chars: Some(LEGACY_DESCRIPTION_MAX_CHARS),
        }
    }

    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Strict => Self::strict(),
            Profile::Legacy => Self::legacy(),
        }
    }

    #[must_use]
    pub fn with_duplicate_scope(mut self, scope: DuplicateScope) -> Self {
        self.duplicate_scope = scope;
        self
    }

    /// Apply overrides from a rules file on top of this rule set.
    #[must_use]
    pub fn apply(mut self, overrides: &RuleOverrides) -> Self {
        if let Some(privileged_mod) = &overrides.privileged_mod {
            self.privileged_mod.clone_from(privileged_mod);
        }
        if let Some(scope) = overrides.duplicate_scope {
            self.duplicate_scope = scope;
        }
        if let Some(rule) = overrides.scaling_tag {
            self.scaling_tag = rule;
        }
        if let Some(max) = overrides.description_max_chars {
            // 0 disables the cap
            self.description_max_chars = (max > 0).then_some(max);
        }
        self
    }

    /// Build a rule set from rules-file text. The file's `profile` wins over
    /// `default_profile`.
    pub fn from_toml_str(text: &str, default_profile: Profile) -> Result<Self, RulesError> {
        let overrides: RuleOverrides = toml::from_str(text).map_err(|err| RulesError::Parse {
            path: None,
            message: err.to_string(),
        })?;
        Ok(Self::from_overrides(&overrides, default_profile))
    }

    /// Read a TOML rules file.
    pub fn load(path: &Path, default_profile: Profile) -> Result<Self, RulesError> {
        let text = fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, default_profile).map_err(|err| err.with_path(path))
    }

    fn from_overrides(overrides: &RuleOverrides, default_profile: Profile) -> Self {
        let profile = overrides.profile.unwrap_or(default_profile);
        Self::for_profile(profile).apply(overrides)
    }
}

/// Optional settings read from a rules file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleOverrides {
    pub profile: Option<Profile>,
    pub privileged_mod: Option<String>,
    pub duplicate_scope: Option<DuplicateScope>,
    pub scaling_tag: Option<ScalingTagRule>,
    pub description_max_chars: Option<usize>,
}

/// Errors raised while reading a rules file.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules{}: {message}", location(.path.as_ref()))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

fn location(path: Option<&PathBuf>) -> String {
    path.map(|p| format!(" file {}", p.display()))
        .unwrap_or_default()
}

impl RulesError {
    fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let rules = RuleSet::default();
        assert_eq!(rules, RuleSet::strict());
        assert_eq!(rules.privileged_mod, "Minecraft");
        assert_eq!(rules.scaling_tag, ScalingTagRule::Exact);
        assert_eq!(rules.description_max_chars, None);
    }

    #[test]
    fn test_legacy_profile() {
        let rules = RuleSet::for_profile(Profile::Legacy);
        assert_eq!(rules.scaling_tag, ScalingTagRule::RequiredWhenScaling);
        assert_eq!(rules.description_max_chars, Some(125));
        assert_eq!(rules.duplicate_scope, DuplicateScope::Global);
    }

    #[test]
    fn test_toml_overrides() {
        let rules = RuleSet::from_toml_str(
            "profile = \"legacy\"\nduplicate-scope = \"per-mod\"\ndescription-max-chars = 0\n",
            Profile::Strict,
        )
        .unwrap();
        assert_eq!(rules.duplicate_scope, DuplicateScope::PerMod);
        assert_eq!(rules.scaling_tag, ScalingTagRule::RequiredWhenScaling);
        assert_eq!(rules.description_max_chars, None);
    }

    #[test]
    fn test_toml_uses_default_profile() {
        let rules = RuleSet::from_toml_str("scaling-tag = \"exact\"", Profile::Legacy).unwrap();
        assert_eq!(rules.scaling_tag, ScalingTagRule::Exact);
        assert_eq!(rules.description_max_chars, Some(125));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = RuleSet::from_toml_str("max-length = 10", Profile::Strict).unwrap_err();
        assert!(matches!(err, RulesError::Parse { path: None, .. }));
    }
}
