//! Evaluation log to HTML report conversion.

use std::path::Path;

use gaucho_core::report::{organize_logs, render_report};
use gaucho_types::error::ReportError;

/// Summary of a written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub prompts: usize,
    pub cases: usize,
}

/// Convert the NDJSON evaluation log at `input` into an HTML page at `output`.
///
/// `output` is overwritten if it exists.
pub async fn transform_log_to_html(
    input: &Path,
    output: &Path,
) -> Result<ReportSummary, ReportError> {
    let content = tokio::fs::read_to_string(input).await?;
    let logs = organize_logs(content.as_bytes())?;
    let summary = ReportSummary {
        prompts: logs.prompts().count(),
        cases: logs.cases().len(),
    };

    tokio::fs::write(output, render_report(&logs)).await?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        prompts = summary.prompts,
        cases = summary.cases,
        "wrote opener report"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn transform_writes_html() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("openers.log");
        let output = tmp.path().join("report.html");
        tokio::fs::write(
            &input,
            "{\"Opener_prompt\": \"Be fun.\", \"text\": \"hi\", \"response\": \"Teleport where?\"}\n\
             {\"Opener_prompt\": \"Be kind.\", \"text\": \"\", \"response\": \"How are you?\"}\n",
        )
        .await
        .unwrap();

        let summary = transform_log_to_html(&input, &output).await.unwrap();
        assert_eq!(summary, ReportSummary { prompts: 2, cases: 2 });

        let html = tokio::fs::read_to_string(&output).await.unwrap();
        assert!(html.contains("Prompt 1: Teleport where?"));
        assert!(html.contains("<h3>Test Case 2:  </h3>"));
    }

    #[tokio::test]
    async fn transform_missing_input_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = transform_log_to_html(&tmp.path().join("nope.log"), &tmp.path().join("out.html"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[tokio::test]
    async fn transform_invalid_record_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("openers.log");
        let output = tmp.path().join("report.html");
        tokio::fs::write(&input, "{\"text\": \"missing fields\"}\n")
            .await
            .unwrap();

        let err = transform_log_to_html(&input, &output).await.unwrap_err();
        assert!(matches!(err, ReportError::InvalidRecord { line: 1, .. }));
        assert!(!output.exists());
    }
}
