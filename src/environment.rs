use std::collections::HashMap;

use log::debug;

use crate::modulator::Modulator;

/// Named collection of uniquely named modulators. Inserting a modulator
/// under a name already present replaces the previous one. Iteration
/// order is unspecified.
#[derive(Debug, Clone)]
pub struct Environment {
    name: String,
    modulators: HashMap<String, Modulator>,
}

impl Environment {
    pub fn new(name: &str) -> Environment {
        Environment {
            name: name.to_string(),
            modulators: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, modulator: Modulator) {
        let key = modulator.name().to_string();
        if self.modulators.insert(key, modulator).is_some() {
            debug!("environment \"{}\" replaced a modulator", self.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Modulator> {
        self.modulators.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Modulator> {
        self.modulators.get_mut(name)
    }

    /// Removes and returns the named modulator.
    pub fn take(&mut self, name: &str) -> Option<Modulator> {
        self.modulators.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modulators.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modulators.is_empty()
    }

    pub fn modulators(&self) -> impl Iterator<Item = &Modulator> {
        self.modulators.values()
    }

    pub fn modulators_mut(&mut self) -> impl Iterator<Item = &mut Modulator> {
        self.modulators.values_mut()
    }
}

/// Explicit registry of environments. Owned by the consumer and passed
/// around by reference; there is no process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    environments: HashMap<String, Environment>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            environments: HashMap::new(),
        }
    }

    /// Inserts `modulator` into the named environment, creating the
    /// environment on first use.
    pub fn add_modulator(&mut self, env_name: &str, modulator: Modulator) {
        let env = self.environments.entry(env_name.to_string()).or_insert_with(|| {
            debug!("creating environment \"{}\"", env_name);
            Environment::new(env_name)
        });
        debug!(
            "environment \"{}\": adding {} \"{}\"",
            env_name,
            modulator.kind(),
            modulator.name()
        );
        env.insert(modulator);
    }

    pub fn lookup(&self, env_name: &str, mod_name: &str) -> Option<&Modulator> {
        self.environments.get(env_name)?.get(mod_name)
    }

    pub fn lookup_mut(&mut self, env_name: &str, mod_name: &str) -> Option<&mut Modulator> {
        self.environments.get_mut(env_name)?.get_mut(mod_name)
    }

    /// Removes and returns a modulator; empty environments stay
    /// registered.
    pub fn remove_modulator(&mut self, env_name: &str, mod_name: &str) -> Option<Modulator> {
        self.environments.get_mut(env_name)?.take(mod_name)
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    pub fn environment_mut(&mut self, name: &str) -> Option<&mut Environment> {
        self.environments.get_mut(name)
    }

    pub fn environments(&self) -> impl Iterator<Item = &Environment> {
        self.environments.values()
    }

    pub fn environments_mut(&mut self) -> impl Iterator<Item = &mut Environment> {
        self.environments.values_mut()
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}
