//! On-demand population across modules
//!
//! Every module name maps to one shared population future. The first caller
//! creates it; later callers, including ones racing with the first, await
//! the same future. Each population resolves its own references back
//! through this discovery.
//!
//! Populations waiting on each other form a waits-for graph. A new wait
//! that would close a cycle in that graph is refused and the reference is
//! answered as absent, so two populations never await each other, whatever
//! order they were started or polled in.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{self, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::features::catalog::{build_catalog, ModuleCatalog, ModuleResolver};
use crate::features::discovery::domain::{DiscoveryReport, ModuleFailure, ModuleOutcome};
use crate::features::discovery::ports::ModuleSource;
use crate::shared::models::{CatalogError, ErrorKind, Result};

type Population = Shared<BoxFuture<'static, ModuleOutcome>>;

/// `waiter → targets` edges between in-flight populations
#[derive(Debug, Default)]
struct WaitGraph {
    edges: Mutex<FxHashMap<String, FxHashSet<String>>>,
}

impl WaitGraph {
    /// Record `waiter → target` unless `target` already (transitively) waits on `waiter`
    fn try_wait(&self, waiter: &str, target: &str) -> bool {
        let mut edges = self.edges.lock();
        if Self::reaches(&edges, target, waiter) {
            return false;
        }
        edges
            .entry(waiter.to_string())
            .or_default()
            .insert(target.to_string());
        true
    }

    fn release(&self, waiter: &str, target: &str) {
        let mut edges = self.edges.lock();
        if let Some(targets) = edges.get_mut(waiter) {
            targets.remove(target);
            if targets.is_empty() {
                edges.remove(waiter);
            }
        }
    }

    fn reaches(edges: &FxHashMap<String, FxHashSet<String>>, from: &str, to: &str) -> bool {
        let mut stack = vec![from];
        let mut seen = FxHashSet::default();
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            if let Some(targets) = edges.get(node) {
                stack.extend(targets.iter().map(String::as_str));
            }
        }
        false
    }

    fn len(&self) -> usize {
        self.edges.lock().values().map(|targets| targets.len()).sum()
    }
}

/// Removes its edge when the wait ends, including when a timeout drops it
struct WaitEdge<'a> {
    graph: &'a WaitGraph,
    waiter: &'a str,
    target: &'a str,
}

impl Drop for WaitEdge<'_> {
    fn drop(&mut self) {
        self.graph.release(self.waiter, self.target);
    }
}

struct DiscoveryInner {
    source: Arc<dyn ModuleSource>,
    config: CatalogConfig,
    populations: DashMap<String, Population>,
    waits: WaitGraph,
}

impl DiscoveryInner {
    fn population(inner: &Arc<Self>, module_name: &str) -> Population {
        if let Some(existing) = inner.populations.get(module_name) {
            return existing.value().clone();
        }

        match inner.populations.entry(module_name.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let future = Self::populate(Arc::clone(inner), module_name.to_string())
                    .boxed()
                    .shared();
                entry.insert(future.clone());
                future
            }
        }
    }

    async fn populate(inner: Arc<Self>, module_name: String) -> ModuleOutcome {
        let reader = match inner.source.load(&module_name).await {
            Ok(Some(reader)) => reader,
            Ok(None) => {
                debug!(module = %module_name, "module not found");
                return ModuleOutcome::NotFound;
            }
            Err(err) => {
                warn!(module = %module_name, error = %err, "module failed to load");
                return ModuleOutcome::Failed(ModuleFailure::from(&err));
            }
        };

        let config = inner.config.clone();
        let resolver = ScopedResolver { inner, module_name };
        match build_catalog(reader, Arc::new(resolver), config).await {
            Ok(catalog) => ModuleOutcome::Populated(Arc::new(catalog)),
            Err(err) => ModuleOutcome::Failed(ModuleFailure::from(&err)),
        }
    }
}

/// Resolver handed to the population of one module
struct ScopedResolver {
    inner: Arc<DiscoveryInner>,
    module_name: String,
}

#[async_trait]
impl ModuleResolver for ScopedResolver {
    async fn resolve(&self, module_name: &str) -> Result<Option<Arc<ModuleCatalog>>> {
        let waits = &self.inner.waits;
        if !waits.try_wait(&self.module_name, module_name) {
            debug!(
                module = %self.module_name,
                reference = %module_name,
                "cyclic reference, answering absent"
            );
            return Ok(None);
        }
        let _edge = WaitEdge {
            graph: waits,
            waiter: &self.module_name,
            target: module_name,
        };

        let outcome = DiscoveryInner::population(&self.inner, module_name).await;
        outcome_to_resolution(module_name, outcome)
    }
}

/// Failed modules look absent to dependents; only load failures surface as errors.
fn outcome_to_resolution(
    module_name: &str,
    outcome: ModuleOutcome,
) -> Result<Option<Arc<ModuleCatalog>>> {
    match outcome {
        ModuleOutcome::Populated(catalog) => Ok(Some(catalog)),
        ModuleOutcome::NotFound => Ok(None),
        ModuleOutcome::Failed(failure) => match failure.kind {
            ErrorKind::IO | ErrorKind::Resolution => {
                Err(CatalogError::resolution(failure.message).with_module(module_name))
            }
            _ => Ok(None),
        },
    }
}

/// Populates modules from a [`ModuleSource`], each at most once
#[derive(Clone)]
pub struct Discovery {
    inner: Arc<DiscoveryInner>,
}

impl Discovery {
    pub fn new(source: Arc<dyn ModuleSource>, config: CatalogConfig) -> Self {
        Self {
            inner: Arc::new(DiscoveryInner {
                source,
                config,
                populations: DashMap::new(),
                waits: WaitGraph::default(),
            }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Populate `module_name` (or join the population already in flight)
    pub async fn module(&self, module_name: &str) -> ModuleOutcome {
        DiscoveryInner::population(&self.inner, module_name).await
    }

    /// Populate every named module concurrently and group the outcomes
    pub async fn discover<I, S>(&self, module_names: I) -> DiscoveryReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in module_names {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        let outcomes = future::join_all(names.iter().map(|name| self.module(name))).await;

        let mut report = DiscoveryReport::default();
        for (name, outcome) in names.into_iter().zip(outcomes) {
            report.record(name, outcome);
        }
        info!(
            with_types = report.with_types.len(),
            without_types = report.without_types.len(),
            failed = report.failed.len(),
            not_found = report.not_found.len(),
            "discovery finished"
        );
        report
    }

    /// Outcome of a population that already finished, without starting one
    pub fn finished(&self, module_name: &str) -> Option<ModuleOutcome> {
        self.inner
            .populations
            .get(module_name)
            .and_then(|population| population.value().peek().cloned())
    }

    /// Number of modules whose population has been started
    pub fn started(&self) -> usize {
        self.inner.populations.len()
    }

    /// Waits between populations currently in flight
    pub fn pending_waits(&self) -> usize {
        self.inner.waits.len()
    }
}

#[async_trait]
impl ModuleResolver for Discovery {
    async fn resolve(&self, module_name: &str) -> Result<Option<Arc<ModuleCatalog>>> {
        let outcome = self.module(module_name).await;
        outcome_to_resolution(module_name, outcome)
    }
}
