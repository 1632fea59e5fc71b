//! Excel出力（CLI版）

use crate::error::{CostReportError, Result};
use cost_report_common::ReportData;
use std::path::Path;

pub fn write_excel(report: &ReportData, output_path: &Path) -> Result<()> {
    let buffer = report
        .to_excel()
        .map_err(|e| CostReportError::ExcelGeneration(e.to_string()))?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
