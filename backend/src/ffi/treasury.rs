//! PyO3 wrapper for TreasuryLedger
//!
//! This module provides the Python interface to one project's ledger.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::types::{
    ledger_error_to_py, milestones_to_py, parse_project_request, receipt_to_py, summary_to_py,
    ProjectRequest,
};
use crate::ledger::{ReleaseOutcome, TreasuryLedger};

/// Python wrapper for a treasury ledger
///
/// # Example (from Python)
///
/// ```python
/// from milestone_treasury_core_rs import Treasury
///
/// treasury = Treasury({
///     "name": "Orbital Relay",
///     "duration_days": 90,
///     "budget": 900_000,
///     "start_date": "2024-01-01",
/// })
/// receipt = treasury.release_next_tranche()
/// print(treasury.summary()["paid_amount"])  # 300000
/// ```
#[pyclass(name = "Treasury")]
pub struct PyTreasury {
    inner: TreasuryLedger,
}

#[pymethods]
impl PyTreasury {
    /// Create and schedule a project
    ///
    /// Raises ValueError for missing fields, a blank name (setup form),
    /// a zero duration or a negative budget.
    #[new]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let inner = match parse_project_request(config)? {
            ProjectRequest::Direct(project) => TreasuryLedger::new(project),
            ProjectRequest::Setup(setup, start_date) => {
                TreasuryLedger::from_setup(setup, start_date)
            }
        }
        .map_err(ledger_error_to_py)?;

        Ok(PyTreasury { inner })
    }

    /// Restore from checkpoint JSON
    #[staticmethod]
    fn load_checkpoint(json: &str) -> PyResult<Self> {
        let inner = TreasuryLedger::load_checkpoint(json).map_err(ledger_error_to_py)?;
        Ok(PyTreasury { inner })
    }

    /// Release the current tranche
    ///
    /// Returns a receipt dict, or None when nothing is left to release.
    fn release_next_tranche(&mut self, py: Python<'_>) -> PyResult<Option<Py<PyDict>>> {
        match self
            .inner
            .release_next_tranche()
            .map_err(ledger_error_to_py)?
        {
            ReleaseOutcome::Released(receipt) => Ok(Some(receipt_to_py(py, &receipt)?)),
            ReleaseOutcome::NothingToRelease => Ok(None),
        }
    }

    fn summary(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        summary_to_py(py, &self.inner.summary())
    }

    fn milestones(&self, py: Python<'_>) -> PyResult<Py<PyList>> {
        milestones_to_py(py, self.inner.milestones())
    }

    fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }

    fn project_id(&self) -> String {
        self.inner.project().id().to_string()
    }

    /// "Standard" or "LargeProject"
    fn policy(&self) -> String {
        format!("{:?}", self.inner.project().policy())
    }

    /// Badge shown next to the roadmap, e.g. "Decensat Smart Escrow"
    fn policy_badge(&self) -> &'static str {
        self.inner.project().policy().badge()
    }

    fn policy_description(&self) -> &'static str {
        self.inner.project().policy().description()
    }

    /// Settlement history as a JSON array
    fn history_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.event_log().events())
            .map_err(|e| PyRuntimeError::new_err(format!("History serialization failed: {}", e)))
    }

    fn save_checkpoint(&self) -> PyResult<String> {
        self.inner.save_checkpoint().map_err(ledger_error_to_py)
    }
}
