//! Page configuration audit.
//!
//! # Responsibilities
//! - Report referential gaps (assets naming unknown fragments or dependencies)
//! - Report duplicate fragment and dependency names
//!
//! # Design Decisions
//! - Advisory only: a configuration with warnings is still accepted
//! - Returns all warnings, not just the first
//! - Pure function: PageConfig → Vec<ConfigWarning>

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::PageConfig;

/// A structural oddity found in a page configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Asset owned by a fragment that is not declared.
    UnknownFragment { asset: String, fragment: String },
    /// Asset names a dependency that is not declared.
    DanglingDependency { asset: String, dependency: String },
    /// Fragment name declared more than once; the first declaration wins.
    DuplicateFragment(String),
    /// Dependency name declared more than once; the first declaration wins.
    DuplicateDependency(String),
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::UnknownFragment { asset, fragment } => {
                write!(f, "asset '{}' belongs to undeclared fragment '{}'", asset, fragment)
            }
            ConfigWarning::DanglingDependency { asset, dependency } => {
                write!(f, "asset '{}' depends on undeclared dependency '{}'", asset, dependency)
            }
            ConfigWarning::DuplicateFragment(name) => {
                write!(f, "fragment '{}' declared twice", name)
            }
            ConfigWarning::DuplicateDependency(name) => {
                write!(f, "dependency '{}' declared twice", name)
            }
        }
    }
}

/// Collect every warning for `config`.
pub fn audit(config: &PageConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let mut fragments = HashSet::new();
    for fragment in &config.fragments {
        if !fragments.insert(fragment.name.as_str()) {
            warnings.push(ConfigWarning::DuplicateFragment(fragment.name.clone()));
        }
    }

    let mut dependencies = HashSet::new();
    for dependency in &config.dependencies {
        if !dependencies.insert(dependency.name.as_str()) {
            warnings.push(ConfigWarning::DuplicateDependency(dependency.name.clone()));
        }
    }

    for asset in &config.assets {
        if !fragments.contains(asset.fragment.as_str()) {
            warnings.push(ConfigWarning::UnknownFragment {
                asset: asset.name.clone(),
                fragment: asset.fragment.clone(),
            });
        }
        for name in &asset.dependent {
            if !dependencies.contains(name.as_str()) {
                warnings.push(ConfigWarning::DanglingDependency {
                    asset: asset.name.clone(),
                    dependency: name.clone(),
                });
            }
        }
    }

    warnings
}
