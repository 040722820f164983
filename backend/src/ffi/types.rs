//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use chrono::NaiveDate;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::ledger::LedgerError;
use crate::models::milestone::Milestone;
use crate::models::project::Project;
use crate::models::setup::ProjectSetup;
use crate::settlement::TrancheReceipt;
use crate::treasury::TreasurySummary;

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing or has the wrong type
pub(crate) fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional field from a Python dict.
pub(crate) fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.extract()?)),
        None => Ok(None),
    }
}

pub(crate) fn parse_date(raw: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| PyValueError::new_err(format!("Invalid date '{}': {}", raw, e)))
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Parsed project request: either a raw budget or a setup form
pub(crate) enum ProjectRequest {
    Direct(Project),
    Setup(ProjectSetup, NaiveDate),
}

/// Convert a Python dict into a project request
///
/// Required: `name`, `duration_days`, `start_date`. Then either
/// `daily_rate` (cents, goes through setup-form validation) or `budget`
/// (cents, used as is).
pub(crate) fn parse_project_request(py_config: &Bound<'_, PyDict>) -> PyResult<ProjectRequest> {
    let name: String = extract_required(py_config, "name")?;
    let duration_days: u32 = extract_required(py_config, "duration_days")?;
    let start_date = parse_date(&extract_required::<String>(py_config, "start_date")?)?;

    if let Some(daily_rate) = extract_optional::<i64>(py_config, "daily_rate")? {
        return Ok(ProjectRequest::Setup(
            ProjectSetup {
                name,
                duration_days,
                daily_rate,
            },
            start_date,
        ));
    }

    let budget: i64 = extract_required(py_config, "budget")?;
    Ok(ProjectRequest::Direct(Project::new(
        name,
        duration_days,
        budget,
        start_date,
    )))
}

// ========================================================================
// Result Converters
// ========================================================================

pub(crate) fn ledger_error_to_py(error: LedgerError) -> PyErr {
    match error {
        LedgerError::Schedule(_) | LedgerError::Setup(_) => PyValueError::new_err(error.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

pub(crate) fn milestone_to_py<'py>(
    py: Python<'py>,
    milestone: &Milestone,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("id", milestone.id())?;
    dict.set_item("label", milestone.label())?;
    dict.set_item("status", milestone.status().as_str())?;
    dict.set_item("due_date", milestone.due_date().format("%Y-%m-%d").to_string())?;
    dict.set_item("payment_amount", milestone.payment_amount())?;
    Ok(dict)
}

pub(crate) fn milestones_to_py(py: Python<'_>, milestones: &[Milestone]) -> PyResult<Py<PyList>> {
    let list = PyList::empty(py);
    for milestone in milestones {
        list.append(milestone_to_py(py, milestone)?)?;
    }
    Ok(list.unbind())
}

pub(crate) fn receipt_to_py(py: Python<'_>, receipt: &TrancheReceipt) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("milestone_id", receipt.milestone_id)?;
    dict.set_item("amount", receipt.amount)?;
    dict.set_item("promoted", receipt.promoted)?;
    Ok(dict.unbind())
}

pub(crate) fn summary_to_py(py: Python<'_>, summary: &TreasurySummary) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("paid_amount", summary.paid_amount)?;
    dict.set_item("remaining_balance", summary.remaining_balance)?;
    dict.set_item("progress_percentage", summary.progress_percentage)?;
    dict.set_item("completed_count", summary.completed_count)?;
    dict.set_item("milestone_count", summary.milestone_count)?;
    dict.set_item("current_milestone_id", summary.current_milestone_id)?;

    let series = PyList::empty(py);
    for point in &summary.disbursement_series {
        let entry = PyDict::new(py);
        entry.set_item("label", &point.label)?;
        entry.set_item("cumulative_paid", point.cumulative_paid)?;
        entry.set_item("total_budget", point.total_budget)?;
        series.append(entry)?;
    }
    dict.set_item("disbursement_series", series)?;

    Ok(dict.unbind())
}
