use crate::error::{Error, Result};
use graphnorm_api::{NodeId, Value};
use std::fmt;
use std::sync::Arc;

/// Host hook for observing merge diagnostics without failing the merge.
///
/// A handful of severity methods with no-op defaults, so a host only
/// overrides what it cares about.
pub trait CacheLogger: fmt::Debug + Send + Sync {
    fn warn(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}

/// Engine configuration, built once per [`crate::Editor`] lifetime.
///
/// `entity_id_for_node` is the one required hook (spec.md §4.7): given a
/// mapping value encountered anywhere in a payload or a node's current
/// value, return `Some(id)` if it identifies an entity, `None` otherwise.
#[derive(Clone)]
pub struct Config {
    pub(crate) entity_id_for_node: Arc<dyn Fn(&Value) -> Option<NodeId> + Send + Sync>,
    pub(crate) strict: bool,
    pub(crate) freeze_snapshots: bool,
    pub(crate) logger: Option<Arc<dyn CacheLogger>>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("strict", &self.strict)
            .field("freeze_snapshots", &self.freeze_snapshots)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub(crate) fn entity_id_for_node(&self, value: &crate::value::NodeValue) -> Option<NodeId> {
        let json: Value = value.into();
        (self.entity_id_for_node)(&json)
    }
}

#[derive(Default)]
pub struct ConfigBuilder {
    entity_id_for_node: Option<Arc<dyn Fn(&Value) -> Option<NodeId> + Send + Sync>>,
    strict: bool,
    freeze_snapshots: bool,
    logger: Option<Arc<dyn CacheLogger>>,
}

impl ConfigBuilder {
    /// Required. Called with every mapping value the payload walker visits;
    /// returning `Some(id)` marks that position as an entity reference
    /// (spec.md §4.2 rule 2).
    pub fn entity_id_for_node(
        mut self,
        f: impl Fn(&Value) -> Option<NodeId> + Send + Sync + 'static,
    ) -> Self {
        self.entity_id_for_node = Some(Arc::new(f));
        self
    }

    /// When set, edge-symmetry corruption and identity violations become
    /// errors instead of best-effort logged warnings (spec.md §7).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Deliberately inert: every `NodeValue` is already an immutable `im`
    /// structure regardless of this flag. Stored and round-tripped for
    /// parity with hosts ported from a mutable-by-default runtime where
    /// freezing was an explicit opt-in; never branched on internally.
    pub fn freeze_snapshots(mut self, freeze: bool) -> Self {
        self.freeze_snapshots = freeze;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn CacheLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> Result<Config> {
        let entity_id_for_node = self.entity_id_for_node.ok_or(Error::MissingEntityId)?;
        Ok(Config {
            entity_id_for_node,
            strict: self.strict,
            freeze_snapshots: self.freeze_snapshots,
            logger: self.logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_entity_id_for_node() {
        let err = Config::builder().build().unwrap_err();
        assert_eq!(err, Error::MissingEntityId);
    }

    #[test]
    fn build_succeeds_with_entity_id_for_node() {
        let cfg = Config::builder()
            .entity_id_for_node(|v| v.get("id").and_then(|i| i.as_str()).map(str::to_string))
            .build();
        assert!(cfg.is_ok());
    }
}
