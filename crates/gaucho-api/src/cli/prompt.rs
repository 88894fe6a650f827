//! Prompt preview command.

use anyhow::Result;

use gaucho_infra::state::load_state_snapshot;

use crate::cli::ConversationArgs;
use crate::state::AppState;

/// Print the prompt the opener pipeline would send for a conversation.
pub async fn prompt(state: &AppState, args: ConversationArgs, json: bool) -> Result<()> {
    let snapshot = load_state_snapshot(&args.state).await?;
    let service = state.opener_service(None)?;
    let template = service.build_template(&snapshot)?;
    let prompt = template.prompt(args.continued);

    if json {
        let out = serde_json::json!({
            "prompt": prompt,
            "stop": template.stop_token(),
            "model": state.config.model_name,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{prompt}");
    }
    Ok(())
}
