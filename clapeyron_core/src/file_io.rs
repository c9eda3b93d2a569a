//! # File I/O Module
//!
//! Reads analysis requests and writes reports:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent truncated reports
//! - **Version validation**: Requests must match the schema major version
//!
//! ## Example
//!
//! ```rust,no_run
//! use clapeyron_core::calculations::analyze;
//! use clapeyron_core::file_io::{read_request, save_report};
//! use std::path::Path;
//!
//! let request = read_request(Path::new("beam.json"))?;
//! let report = analyze(&request)?;
//! save_report(&report, Path::new("beam.report.json"))?;
//! # Ok::<(), clapeyron_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use semver::Version;

use crate::calculations::analysis::{AnalysisReport, AnalysisRequest};
use crate::errors::{CalcError, CalcResult};

/// Current request/report schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Parse a request from a JSON string and check its version.
pub fn parse_request(json: &str) -> CalcResult<AnalysisRequest> {
    let request: AnalysisRequest = serde_json::from_str(json)?;
    validate_version(&request.version)?;
    Ok(request)
}

/// Read a request from a JSON file.
///
/// # Returns
///
/// * `Ok(AnalysisRequest)` - Parsed request
/// * `Err(CalcError::VersionMismatch)` - Request version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn read_request(path: &Path) -> CalcResult<AnalysisRequest> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let request: AnalysisRequest =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&request.version)?;
    log::debug!("read request '{}' with {} load(s)", request.label, request.loads.len());

    Ok(request)
}

/// Serialize a report to pretty JSON
pub fn report_to_json(report: &AnalysisReport) -> CalcResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Save a report with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_report(report: &AnalysisReport, path: &Path) -> CalcResult<()> {
    let json = report_to_json(report)?;
    write_atomic(path, json.as_bytes())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let result = write_synced(tmp_path, bytes).and_then(|()| {
        fs::rename(tmp_path, path).map_err(|e| {
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}

fn write_synced(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let temp_error = |op: &str, e: std::io::Error| {
        CalcError::file_error(op, path.display().to_string(), e.to_string())
    };

    let mut file = File::create(path).map_err(|e| temp_error("create temp file", e))?;
    file.write_all(bytes).map_err(|e| temp_error("write temp file", e))?;
    file.sync_all().map_err(|e| temp_error("sync temp file", e))?;
    Ok(())
}

/// Check that a request version is compatible with [`SCHEMA_VERSION`].
///
/// Major versions must match; while the schema is 0.x a newer minor
/// version is rejected as well.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|e| CalcError::Internal {
        message: format!("bad schema version constant: {}", e),
    })?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }

    Ok(())
}
