//! Opener generation command.

use anyhow::Result;
use console::style;

use gaucho_core::opener::service::OpenerOutcome;
use gaucho_infra::state::load_state_snapshot;
use gaucho_types::error::OpenerError;

use crate::cli::OpenerArgs;
use crate::state::AppState;

/// Generate one opener and print it.
///
/// Pipeline failures are not command errors: the fallback opener is printed
/// and the cause goes to stderr. Only an unreadable state file fails the
/// command.
pub async fn opener(state: &mut AppState, args: OpenerArgs, json: bool, quiet: bool) -> Result<()> {
    state.apply_overrides(args.overrides());
    let snapshot = load_state_snapshot(&args.conversation.state).await?;
    let service = state.opener_service(args.seed)?;

    let outcome = service.run(&snapshot, args.conversation.continued).await;

    if let OpenerOutcome::Fallback { reason, .. } = &outcome {
        if !quiet && !json {
            eprintln!("  {} {}", style("!").yellow().bold(), fallback_notice(reason));
        }
    }

    let result = outcome.into_result();
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.dialogue_response);
    }
    Ok(())
}

/// One-line explanation of why a fallback opener was printed.
fn fallback_notice(reason: &OpenerError) -> String {
    let stage = match reason {
        OpenerError::History(_) => "could not read the conversation",
        OpenerError::Prompt(_) => "could not build the prompt",
        OpenerError::Llm(_) => "backend unavailable",
        OpenerError::Filter(_) => "model reply was unusable",
    };
    format!("{stage}, using a fallback opener ({reason})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use gaucho_types::config::OpenerConfig;
    use gaucho_types::error::{FilterError, HistoryError, PromptError};
    use gaucho_types::llm::LlmError;

    use crate::cli::ConversationArgs;

    #[test]
    fn fallback_notice_names_the_failing_stage() {
        let notice = fallback_notice(&HistoryError::Unavailable("offline".to_string()).into());
        assert!(notice.starts_with("could not read the conversation"));
        assert!(!notice.contains("backend"));

        let notice = fallback_notice(&PromptError::PendingTurnNotLast { index: 0 }.into());
        assert!(notice.starts_with("could not build the prompt"));

        let notice = fallback_notice(&FilterError::EmptyCompletion.into());
        assert!(notice.starts_with("model reply was unusable"));

        let notice = fallback_notice(&LlmError::NoWorker("vicuna-13b".to_string()).into());
        assert!(notice.starts_with("backend unavailable"));
        assert!(notice.contains("vicuna-13b"));
    }

    #[tokio::test]
    async fn unreadable_state_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut state = AppState {
            data_dir: tmp.path().to_path_buf(),
            config: OpenerConfig::default(),
        };
        let args = OpenerArgs {
            conversation: ConversationArgs {
                state: tmp.path().join("missing.json"),
                continued: false,
            },
            controller: None,
            worker: None,
            model: None,
            max_new_tokens: None,
            seed: Some(1),
        };
        assert!(opener(&mut state, args, true, true).await.is_err());
    }

    #[tokio::test]
    async fn unreachable_backend_still_succeeds() {
        let tmp = tempfile::TempDir::new().unwrap();
        let state_path: PathBuf = tmp.path().join("state.json");
        tokio::fs::write(&state_path, r#"{"history": [{"user": "hi"}]}"#)
            .await
            .unwrap();

        let mut state = AppState {
            data_dir: tmp.path().to_path_buf(),
            config: OpenerConfig {
                request_timeout_secs: 2,
                ..OpenerConfig::default()
            },
        };
        let args = OpenerArgs {
            conversation: ConversationArgs {
                state: state_path,
                continued: false,
            },
            controller: None,
            worker: Some("http://127.0.0.1:9".to_string()),
            model: None,
            max_new_tokens: None,
            seed: Some(1),
        };
        opener(&mut state, args, true, true).await.unwrap();
        assert_eq!(
            state.config.worker_address.as_deref(),
            Some("http://127.0.0.1:9")
        );
    }
}
