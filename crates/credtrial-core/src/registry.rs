//! Protocol to probe mapping.
//!
//! Concrete wire implementations are registered by the embedding
//! application; this crate ships none.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use credtrial_engine::AuthProbe;

use crate::error::ConfigError;
use crate::protocol::Protocol;

#[derive(Clone, Default)]
pub struct ProbeRegistry {
    probes: BTreeMap<Protocol, Arc<dyn AuthProbe>>,
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `probe` for `protocol`, returning the probe it replaced.
    pub fn register(&mut self, protocol: Protocol, probe: Arc<dyn AuthProbe>) -> Option<Arc<dyn AuthProbe>> {
        self.probes.insert(protocol, probe)
    }

    pub fn with(mut self, protocol: Protocol, probe: Arc<dyn AuthProbe>) -> Self {
        self.register(protocol, probe);
        self
    }

    pub fn get(&self, protocol: Protocol) -> Result<Arc<dyn AuthProbe>, ConfigError> {
        self.probes
            .get(&protocol)
            .cloned()
            .ok_or(ConfigError::ProbeUnavailable(protocol))
    }

    pub fn contains(&self, protocol: Protocol) -> bool {
        self.probes.contains_key(&protocol)
    }

    pub fn protocols(&self) -> impl Iterator<Item = Protocol> + '_ {
        self.probes.keys().copied()
    }
}

impl fmt::Debug for ProbeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.probes.iter().map(|(p, probe)| (p, probe.name())))
            .finish()
    }
}
