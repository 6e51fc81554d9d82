//! `/export` endpoints.
//!
//! Export bodies are opaque; they are relayed to the user as downloads.

use bytes::Bytes;
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use saiv_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::segment;
use crate::error;
use crate::session::ClientSession;

/// File format accepted by the export endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// JSON document.
    Json,
    /// Excel workbook.
    Xlsx,
}

impl ExportFormat {
    /// Return the format as a lowercase string, also used as file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }

    /// MIME type used when the backend sends none.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(AppError::validation(format!(
                "Invalid export format: '{s}'. Expected one of: csv, json, xlsx"
            ))),
        }
    }
}

/// A downloaded export.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Suggested file name.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Raw body.
    pub data: Bytes,
}

/// `{course_code}_attendance_{YYYYMMDD}.{ext}`
pub fn course_export_filename(course_code: &str, date: NaiveDate, format: ExportFormat) -> String {
    let code = if course_code.trim().is_empty() {
        "course"
    } else {
        course_code.trim()
    };
    format!("{code}_attendance_{}.{}", date.format("%Y%m%d"), format.as_str())
}

/// `session_{id}_{YYYYMMDD}.{ext}`
pub fn session_export_filename(session_id: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!("session_{session_id}_{}.{}", date.format("%Y%m%d"), format.as_str())
}

impl ClientSession {
    async fn export(&self, path: &str, format: ExportFormat, filename: String) -> AppResult<ExportFile> {
        let response = self
            .get_raw(path, &[("format", format.as_str().to_string())])
            .await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(format.mime_type())
            .to_string();
        let data = response.bytes().await.map_err(error::from_transport)?;
        Ok(ExportFile {
            filename,
            content_type,
            data,
        })
    }

    /// `GET /export/attendance/{course_id}?format=`
    pub async fn export_course_attendance(
        &self,
        course_id: &str,
        course_code: &str,
        format: ExportFormat,
    ) -> AppResult<ExportFile> {
        let filename = course_export_filename(course_code, chrono::Utc::now().date_naive(), format);
        self.export(&format!("/export/attendance/{}", segment(course_id)?), format, filename)
            .await
    }

    /// `GET /export/session/{session_id}?format=`
    pub async fn export_session(
        &self,
        session_id: &str,
        format: ExportFormat,
    ) -> AppResult<ExportFile> {
        let filename = session_export_filename(session_id, chrono::Utc::now().date_naive(), format);
        self.export(&format!("/export/session/{}", segment(session_id)?), format, filename)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            course_export_filename("CS3099", date, ExportFormat::Csv),
            "CS3099_attendance_20240309.csv"
        );
        assert_eq!(
            course_export_filename("", date, ExportFormat::Json),
            "course_attendance_20240309.json"
        );
        assert_eq!(
            session_export_filename("abc", date, ExportFormat::Xlsx),
            "session_abc_20240309.xlsx"
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
