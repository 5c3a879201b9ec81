//! CSV and spreadsheet (HTML table) export of a transaction list.
//!
//! Encoders are pure: they turn a list into an [`ExportArtifact`] or refuse with
//! [`ExportError::Empty`]. Saving the artifact is left to a [`Downloader`].

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::format::{format_export_date, format_plain_amount, format_query_date};
use crate::notice::Notice;
use crate::Transaction;

pub const EXPORT_HEADERS: [&str; 6] = ["Title", "Type", "Category", "Amount", "Date", "Note"];
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
pub const NOTHING_TO_EXPORT: &str = "No data to export";

pub const TRANSACTIONS_EXPORT_PREFIX: &str = "transactions";
pub const RECENT_EXPORT_PREFIX: &str = "recent_transactions";

const UTF8_BOM: &str = "\u{FEFF}";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("No data to export")]
    Empty,
    #[error("Failed to encode export: {0}")]
    Encoding(String),
    #[error("Failed to download export: {0}")]
    Download(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Spreadsheet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Spreadsheet => "xls",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Spreadsheet => "application/vnd.ms-excel;charset=utf-8;",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Spreadsheet => "Excel",
        }
    }
}

/// An encoded export, ready to be saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Saves an artifact on the user's side, e.g. as a browser download
pub trait Downloader {
    fn download(&self, artifact: &ExportArtifact) -> Result<(), ExportError>;
}

/// `<prefix>_<yyyy-MM-dd>.<ext>`
pub fn export_filename(prefix: &str, today: NaiveDate, format: ExportFormat) -> String {
    format!("{prefix}_{}.{}", format_query_date(today), format.extension())
}

/// Cell values of one exported row, in [`EXPORT_HEADERS`] order
pub fn export_row(tx: &Transaction) -> [String; 6] {
    [
        tx.title.clone(),
        tx.kind.label().to_string(),
        tx.category_name().unwrap_or(UNCATEGORIZED_LABEL).to_string(),
        format_plain_amount(tx.amount),
        format_export_date(tx.date),
        tx.note_text().to_string(),
    ]
}

/// BOM-prefixed CSV, every field quoted, rows separated by `\n`
pub fn encode_csv(transactions: &[Transaction]) -> Result<String, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.as_bytes().to_vec());

    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    for tx in transactions {
        writer
            .write_record(export_row(tx))
            .map_err(|e| ExportError::Encoding(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    let mut csv = String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))?;
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

/// HTML table with the Office namespaces so spreadsheet tools open it as a sheet
pub fn encode_spreadsheet(transactions: &[Transaction]) -> Result<String, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::Empty);
    }

    let header: String = EXPORT_HEADERS
        .iter()
        .map(|title| format!("<th>{}</th>", escape_html(title)))
        .collect();
    let rows: String = transactions
        .iter()
        .map(|tx| {
            let cells: String = export_row(tx)
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    Ok(format!(
        concat!(
            r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:x="urn:schemas-microsoft-com:office:excel">"#,
            r#"<head><meta charset="UTF-8"></head>"#,
            r#"<body><table border="1"><thead><tr>{}</tr></thead><tbody>{}</tbody></table></body></html>"#
        ),
        header, rows
    ))
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Encode `transactions` in `format` with a dated filename
pub fn export(
    format: ExportFormat,
    transactions: &[Transaction],
    prefix: &str,
    today: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let content = match format {
        ExportFormat::Csv => encode_csv(transactions)?,
        ExportFormat::Spreadsheet => encode_spreadsheet(transactions)?,
    };
    Ok(ExportArtifact {
        filename: export_filename(prefix, today, format),
        mime_type: format.mime_type(),
        content,
    })
}

/// Encode and hand over to `downloader`, reporting the outcome as a notice.
/// An empty list never reaches the downloader.
pub fn run_export(
    format: ExportFormat,
    transactions: &[Transaction],
    prefix: &str,
    today: NaiveDate,
    downloader: &dyn Downloader,
) -> Notice {
    let result = export(format, transactions, prefix, today)
        .and_then(|artifact| downloader.download(&artifact).map(|_| artifact));

    match result {
        Ok(artifact) => {
            log::info!("Exported {} transactions to {}", transactions.len(), artifact.filename);
            Notice::success(format!("Exported {} file successfully", format.label()))
        }
        Err(ExportError::Empty) => Notice::warning(NOTHING_TO_EXPORT),
        Err(err) => {
            log::error!("Export failed: {err}");
            Notice::error(err.to_string())
        }
    }
}
