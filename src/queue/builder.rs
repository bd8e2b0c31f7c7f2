//! Load queue construction.
//!
//! # Responsibilities
//! - Exclude assets of client-async, conditional and unknown fragments
//! - Place each dependency once, right before the first asset needing it
//! - Mark queued resources as loaded and derive `defer` for JS assets
//!
//! # Design Decisions
//! - A builder is one resolution pass: dependency preload state starts from
//!   the declared values and is carried across every queue the builder
//!   produces, so the conditional pass never repeats an eager dependency
//! - Order follows first use in the input asset sequence
//! - Nothing is signalled to the caller; skips are logged and counted

use std::collections::HashMap;

use crate::config::schema::{Asset, Dependency, FragmentConfig, PageConfig};
use crate::lifecycle::conditions::ConditionEvaluator;
use crate::observability::metrics;
use crate::queue::entry::{QueuedAsset, QueueEntry};

/// How a fragment's assets take part in page loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentGate<'a> {
    /// Loaded with the page.
    Eager,
    /// Renders itself on the client.
    ClientAsync,
    /// Rendered only when the expression holds.
    Conditional(&'a str),
    /// Not declared in the configuration.
    Unknown,
}

impl FragmentGate<'_> {
    fn skip_reason(&self) -> &'static str {
        match self {
            FragmentGate::Eager => "eager",
            FragmentGate::ClientAsync => "client_async",
            FragmentGate::Conditional(_) => "conditional",
            FragmentGate::Unknown => "unknown_fragment",
        }
    }
}

/// Builds ordered, deduplicated load queues for one page configuration.
#[derive(Debug, Clone)]
pub struct LoadQueueBuilder<'a> {
    fragments: HashMap<&'a str, &'a FragmentConfig>,
    dependency_index: HashMap<&'a str, usize>,
    dependencies: Vec<Dependency>,
}

impl<'a> LoadQueueBuilder<'a> {
    /// Start a fresh resolution pass over `config`.
    pub fn new(config: &'a PageConfig) -> Self {
        let mut fragments = HashMap::with_capacity(config.fragments.len());
        for fragment in &config.fragments {
            fragments.entry(fragment.name.as_str()).or_insert(fragment);
        }

        let mut dependency_index = HashMap::with_capacity(config.dependencies.len());
        for (i, dependency) in config.dependencies.iter().enumerate() {
            dependency_index.entry(dependency.name.as_str()).or_insert(i);
        }

        Self {
            fragments,
            dependency_index,
            dependencies: config.dependencies.clone(),
        }
    }

    /// Gating rule for the named fragment.
    pub fn gate(&self, fragment: &str) -> FragmentGate<'a> {
        match self.fragments.get(fragment).copied() {
            None => FragmentGate::Unknown,
            Some(f) if f.client_async => FragmentGate::ClientAsync,
            Some(f) => match f.condition() {
                Some(expression) => FragmentGate::Conditional(expression),
                None => FragmentGate::Eager,
            },
        }
    }

    /// Dependency records with their preload state in this pass.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Build the eager queue: every asset whose fragment is neither
    /// client-async nor conditional, preceded by its pending dependencies.
    pub fn build(&mut self, assets: &[Asset]) -> Vec<QueueEntry> {
        let mut queue = Vec::new();

        for asset in assets {
            let gate = self.gate(&asset.fragment);
            if gate != FragmentGate::Eager {
                // Unknown fragments are dropped like gated ones. This mirrors the
                // permissive behavior hosts already rely on; it is not a guarantee.
                tracing::debug!(
                    asset = %asset.name,
                    fragment = %asset.fragment,
                    reason = gate.skip_reason(),
                    "Asset excluded from eager queue"
                );
                metrics::record_asset_skipped(gate.skip_reason());
                continue;
            }
            self.enqueue(asset, &mut queue);
        }

        record("eager", &queue);
        queue
    }

    /// Build the conditional queue: assets of gated fragments whose
    /// expression evaluates true. Client-async fragments stay excluded even
    /// when they also carry a condition.
    pub fn build_conditional<E>(&mut self, assets: &[Asset], conditions: &E) -> Vec<QueueEntry>
    where
        E: ConditionEvaluator + ?Sized,
    {
        let mut verdicts: HashMap<&str, bool> = HashMap::new();
        let mut queue = Vec::new();

        for asset in assets {
            let FragmentGate::Conditional(expression) = self.gate(&asset.fragment) else {
                continue;
            };

            let fragment = asset.fragment.as_str();
            let render = *verdicts.entry(fragment).or_insert_with(|| {
                let render = conditions.evaluate(fragment, expression);
                tracing::debug!(fragment, expression, render, "Evaluated fragment condition");
                render
            });

            if render {
                self.enqueue(asset, &mut queue);
            } else {
                metrics::record_asset_skipped("condition_false");
            }
        }

        record("conditional", &queue);
        queue
    }

    fn enqueue(&mut self, asset: &Asset, queue: &mut Vec<QueueEntry>) {
        for name in &asset.dependent {
            let Some(&index) = self.dependency_index.get(name.as_str()) else {
                // Dangling names are skipped rather than rejected, matching the
                // permissive policy for unknown fragments.
                tracing::warn!(
                    asset = %asset.name,
                    dependency = %name,
                    "Asset depends on undeclared dependency, skipping it"
                );
                continue;
            };

            let dependency = &mut self.dependencies[index];
            if dependency.pre_loaded {
                continue;
            }
            dependency.pre_loaded = true;
            queue.push(QueueEntry::Dependency(dependency.clone()));
        }

        queue.push(QueueEntry::Asset(QueuedAsset::new(asset.clone())));
    }
}

fn record(pass: &'static str, queue: &[QueueEntry]) {
    let dependencies = queue.iter().filter(|e| e.is_dependency()).count();
    let assets = queue.len() - dependencies;
    metrics::record_queue_built(pass, dependencies, assets);
    tracing::debug!(pass, dependencies, assets, "Load queue built");
}

/// Eager queue for `assets` in a fresh resolution pass over `config`.
pub fn build_queue(config: &PageConfig, assets: &[Asset]) -> Vec<QueueEntry> {
    LoadQueueBuilder::new(config).build(assets)
}
