//! Exercise catalog
//!
//! The catalog maps stable identifiers to exercises. It is built once, either
//! from the course's built-in table or from a JSON document, and handed to the
//! grader by reference.

use std::collections::BTreeMap;
use std::path::Path;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Exercise;
use crate::device::DeviceSpec;
use crate::error::{GradeError, Result};
use crate::output::Output;

/// Identifiers of the built-in course exercises
pub mod ids {
    pub const BELL_PAIR: &str = "bell_pair";
    pub const PSI_MOINS: &str = "psi_moins";
    pub const PHI_PLUS: &str = "phi_plus";
    pub const PHI_MOINS: &str = "phi_moins";
    pub const PREPARE_WITH_GATE: &str = "prepare_with_gate";
    pub const PREPARE_WITH_MOTTONEN: &str = "prepare_with_mottonen";
    pub const EXPVAL: &str = "expval";
    pub const ECHANTILLONAGE: &str = "echantillonage";
}

/// Backend every course exercise runs on
pub const DEFAULT_DEVICE: &str = "default.qubit";

/// Table of exercises keyed by identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    exercises: BTreeMap<String, Exercise>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Catalog::default()
    }

    /// The exercises used in the course notebooks
    pub fn builtin() -> Self {
        let re = |x: f64| Complex64::new(x, 0.0);
        let im = |y: f64| Complex64::new(0.0, y);
        let two_wires = || DeviceSpec::new(DEFAULT_DEVICE, 2);
        let one_wire = || DeviceSpec::new(DEFAULT_DEVICE, 1);

        let mut catalog = Catalog::new();
        catalog.insert(
            ids::BELL_PAIR,
            Exercise::new(
                "Bell Pair",
                two_wires(),
                vec![re(0.70710678), re(0.0), re(0.0), re(0.70710678)],
            ),
        );
        catalog.insert(
            ids::PSI_MOINS,
            Exercise::new(
                "psi_moins",
                two_wires(),
                vec![re(0.70710678), re(0.0), re(0.0), re(-0.70710678)],
            ),
        );
        catalog.insert(
            ids::PHI_PLUS,
            Exercise::new(
                "phi_plus",
                two_wires(),
                vec![re(0.0), re(0.70710678), re(0.70710678), re(0.0)],
            ),
        );
        catalog.insert(
            ids::PHI_MOINS,
            Exercise::new(
                "phi_moins",
                two_wires(),
                vec![re(0.0), re(0.70710678), re(-0.70710678), re(0.0)],
            ),
        );
        catalog.insert(
            ids::PREPARE_WITH_GATE,
            Exercise::new("prepare with gate", one_wire(), vec![re(0.8660254), im(-0.5)]),
        );
        catalog.insert(
            ids::PREPARE_WITH_MOTTONEN,
            Exercise::new(
                "prepare with Mottonen",
                one_wire(),
                vec![re(3.0_f64.sqrt() / 2.0), im(0.5)],
            ),
        );
        catalog.insert(
            ids::EXPVAL,
            Exercise::new("Expectation Value", one_wire(), Output::scalar(0.0)),
        );
        catalog.insert(
            ids::ECHANTILLONAGE,
            Exercise::new(
                "Échantillonage",
                one_wire(),
                vec![-1.0, 0.08, -0.026, 0.0036, 0.00326],
            ),
        );
        catalog
    }

    /// Parse a catalog from a JSON object of `id -> exercise`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        debug!(exercises = catalog.len(), "loaded exercise catalog");
        Ok(catalog)
    }

    /// Read and parse a catalog file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize the catalog to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add or replace an exercise, returning the previous entry
    pub fn insert(&mut self, id: impl Into<String>, exercise: Exercise) -> Option<Exercise> {
        self.exercises.insert(id.into(), exercise)
    }

    /// Look up an exercise by identifier
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.get(id)
    }

    /// Look up an exercise, failing on unknown identifiers
    pub fn exercise(&self, id: &str) -> Result<&Exercise> {
        self.get(id)
            .ok_or_else(|| GradeError::catalog(format!("unknown exercise '{}'", id)))
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.exercises.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Exercise)> {
        self.exercises.iter().map(|(id, ex)| (id.as_str(), ex))
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    fn validate(&self) -> Result<()> {
        for (id, exercise) in &self.exercises {
            if id.trim().is_empty() {
                return Err(GradeError::catalog("exercise identifier must not be empty"));
            }
            if exercise.name().trim().is_empty() {
                return Err(GradeError::catalog(format!("exercise '{}' has an empty name", id)));
            }
            if exercise.expected_device().name.trim().is_empty() {
                return Err(GradeError::catalog(format!("exercise '{}' has an empty device name", id)));
            }
        }
        Ok(())
    }
}
