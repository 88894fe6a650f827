//! Evaluation report command.

use std::path::Path;

use anyhow::Result;
use console::style;

use gaucho_infra::report::transform_log_to_html;

/// Convert an evaluation log into an HTML report.
pub async fn report(input: &Path, output: &Path, json: bool, quiet: bool) -> Result<()> {
    let summary = transform_log_to_html(input, output).await?;

    if json {
        let out = serde_json::json!({
            "output": output.display().to_string(),
            "prompts": summary.prompts,
            "cases": summary.cases,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if !quiet {
        println!(
            "  {} Wrote {} ({} prompts, {} test cases)",
            style("✓").green(),
            style(output.display()).cyan(),
            summary.prompts,
            summary.cases
        );
    }
    Ok(())
}
