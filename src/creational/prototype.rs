//! # Prototype: molecular simulation
//!
//! Building a [`MolecularSimulation`] precomputes a large table of states.
//! Cloning skips that work: clones share the table through an `Arc` and get
//! their own copy of the parameters to tweak.

use std::sync::Arc;

use rand::Rng;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_TEMPERATURE: f64 = 298.15;
pub const DEFAULT_PRESSURE: f64 = 1.0;
pub const DEFAULT_DURATION: f64 = 100.0;

const KELVIN_AT_ZERO_CELSIUS: f64 = 273.15;
const SAMPLED_STATES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("simulation '{0}' has no precomputed states")]
    NoStates(String),

    #[error("parameter '{name}' must be a number, got {value}")]
    InvalidParameter { name: String, value: Value },

    #[error("pressure must be non-zero")]
    ZeroPressure,
}

#[derive(Debug)]
pub struct MolecularSimulation {
    molecule_name: String,
    parameters: Map<String, Value>,
    precomputed_states: Arc<[f64]>,
}

impl MolecularSimulation {
    /// Runs the expensive setup: `state_count` random states in `[0, 100)`.
    pub fn new(molecule_name: impl Into<String>, parameters: Map<String, Value>, state_count: usize) -> Self {
        let molecule_name = molecule_name.into();
        info!(molecule = %molecule_name, state_count, "performing expensive precomputation");

        let mut rng = rand::thread_rng();
        let precomputed_states: Arc<[f64]> = (0..state_count).map(|_| rng.gen::<f64>() * 100.0).collect();

        info!(molecule = %molecule_name, "setup complete");
        Self {
            molecule_name,
            parameters,
            precomputed_states,
        }
    }

    pub fn molecule_name(&self) -> &str {
        &self.molecule_name
    }

    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    pub fn state_count(&self) -> usize {
        self.precomputed_states.len()
    }

    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        debug!(molecule = %self.molecule_name, %key, %value, "setting parameter");
        self.parameters.insert(key, value);
    }

    pub fn shares_states_with(&self, other: &MolecularSimulation) -> bool {
        Arc::ptr_eq(&self.precomputed_states, &other.precomputed_states)
    }

    /// `sum(first 1000 states) * (temperature / 273.15) / pressure * (duration / 10)`
    pub fn run(&self) -> Result<f64, SimulationError> {
        if self.precomputed_states.is_empty() {
            return Err(SimulationError::NoStates(self.molecule_name.clone()));
        }

        let temperature = self.numeric_parameter("temperature", DEFAULT_TEMPERATURE)?;
        let pressure = self.numeric_parameter("pressure", DEFAULT_PRESSURE)?;
        let duration = self.numeric_parameter("duration", DEFAULT_DURATION)?;
        if pressure == 0.0 {
            return Err(SimulationError::ZeroPressure);
        }

        let sampled: f64 = self.precomputed_states.iter().take(SAMPLED_STATES).sum();
        let metric = sampled * (temperature / KELVIN_AT_ZERO_CELSIUS) / pressure * (duration / 10.0);
        info!(
            molecule = %self.molecule_name,
            metric = %format!("{metric:.2}"),
            states = self.precomputed_states.len(),
            "simulation complete"
        );
        Ok(metric)
    }

    fn numeric_parameter(&self, name: &str, default: f64) -> Result<f64, SimulationError> {
        match self.parameters.get(name) {
            None => Ok(default),
            Some(value) => value.as_f64().ok_or_else(|| SimulationError::InvalidParameter {
                name: name.to_string(),
                value: value.clone(),
            }),
        }
    }
}

impl Clone for MolecularSimulation {
    /// Skips the setup. The state table is shared, parameters are copied.
    fn clone(&self) -> Self {
        debug!(molecule = %self.molecule_name, "cloning simulation, setup skipped");
        Self {
            molecule_name: self.molecule_name.clone(),
            parameters: self.parameters.clone(),
            precomputed_states: Arc::clone(&self.precomputed_states),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_params() -> Map<String, Value> {
        match json!({"temperature": 298.15, "pressure": 1.0, "duration": 1000}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_new_precomputes_states_in_range() {
        let sim = MolecularSimulation::new("Water", base_params(), 5000);
        assert_eq!(sim.state_count(), 5000);
        assert!(sim.precomputed_states.iter().all(|s| (0.0..100.0).contains(s)));
    }

    #[test]
    fn test_clone_shares_states_but_not_parameters() {
        let original = MolecularSimulation::new("Water", base_params(), 100);
        let mut clone = original.clone();
        clone.set_parameter("temperature", 350.0);

        assert!(clone.shares_states_with(&original));
        assert_eq!(original.parameters()["temperature"], json!(298.15));
        assert_eq!(clone.parameters()["temperature"], json!(350.0));
    }

    #[test]
    fn test_separate_setups_do_not_share() {
        let a = MolecularSimulation::new("A", Map::new(), 10);
        let b = MolecularSimulation::new("B", Map::new(), 10);
        assert!(!a.shares_states_with(&b));
    }

    #[test]
    fn test_run_formula() {
        let original = MolecularSimulation::new("Water", base_params(), 2000);
        let sum: f64 = original.precomputed_states.iter().take(1000).sum();

        let expected = sum * (298.15 / 273.15) / 1.0 * (1000.0 / 10.0);
        assert!((original.run().unwrap() - expected).abs() < 1e-6);

        let mut high_pressure = original.clone();
        high_pressure.set_parameter("pressure", 5.0);
        let expected = sum * (298.15 / 273.15) / 5.0 * 100.0;
        assert!((high_pressure.run().unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_run_uses_defaults() {
        let sim = MolecularSimulation::new("Defaults", Map::new(), 10);
        let sum: f64 = sim.precomputed_states.iter().sum();
        let expected = sum * (DEFAULT_TEMPERATURE / 273.15) * (DEFAULT_DURATION / 10.0);
        assert!((sim.run().unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_run_errors() {
        let empty = MolecularSimulation::new("Empty", Map::new(), 0);
        assert_eq!(empty.run(), Err(SimulationError::NoStates("Empty".to_string())));

        let mut sim = MolecularSimulation::new("Bad", Map::new(), 10);
        sim.set_parameter("pressure", 0);
        assert_eq!(sim.run(), Err(SimulationError::ZeroPressure));

        sim.set_parameter("duration", "long");
        assert!(matches!(sim.run(), Err(SimulationError::InvalidParameter { .. })));
    }
}
