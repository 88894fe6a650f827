//! OpenerService -- the opener pipeline.
//!
//! History -> prompt -> backend call -> filter, in strict sequence. Any
//! failure along the way is logged and replaced by a fallback opener, so
//! `generate_opener` always answers.

use tracing::{Instrument, info_span};

use gaucho_types::chat::GenerationResult;
use gaucho_types::config::OpenerConfig;
use gaucho_types::error::OpenerError;
use gaucho_types::llm::GenerationRequest;

use crate::llm::box_provider::BoxLlmProvider;

use super::fallback::FallbackSelector;
use super::filter::ResponseFilter;
use super::history::{ConversationStateSource, read_history};
use super::template::ConversationTemplate;

/// How an opener request ended.
#[derive(Debug)]
pub enum OpenerOutcome {
    /// The model produced a usable opener.
    Success { response: String },
    /// Generation failed; `response` is a canned opener.
    Fallback { response: String, reason: OpenerError },
}

impl OpenerOutcome {
    pub fn response(&self) -> &str {
        match self {
            OpenerOutcome::Success { response } | OpenerOutcome::Fallback { response, .. } => {
                response
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, OpenerOutcome::Fallback { .. })
    }

    /// Collapse to the caller-facing result.
    pub fn into_result(self) -> GenerationResult {
        let dialogue_response = match self {
            OpenerOutcome::Success { response } | OpenerOutcome::Fallback { response, .. } => {
                response
            }
        };
        GenerationResult { dialogue_response }
    }
}

/// Generates conversation openers against a text-generation backend.
pub struct OpenerService {
    config: OpenerConfig,
    provider: BoxLlmProvider,
    filter: ResponseFilter,
    fallback: FallbackSelector,
}

impl OpenerService {
    pub fn new(
        config: OpenerConfig,
        provider: BoxLlmProvider,
        filter: ResponseFilter,
        fallback: FallbackSelector,
    ) -> Self {
        Self {
            config,
            provider,
            filter,
            fallback,
        }
    }

    pub fn config(&self) -> &OpenerConfig {
        &self.config
    }

    pub fn fallback(&self) -> &FallbackSelector {
        &self.fallback
    }

    /// Generate an opener for the conversation held by `source`.
    ///
    /// Never fails: on any error the response is a fallback opener.
    pub async fn generate_opener(
        &self,
        source: &dyn ConversationStateSource,
        continued: bool,
    ) -> GenerationResult {
        self.run(source, continued).await.into_result()
    }

    /// Like [`Self::generate_opener`] but keeps the failure cause.
    pub async fn run(&self, source: &dyn ConversationStateSource, continued: bool) -> OpenerOutcome {
        match self.try_generate(source, continued).await {
            Ok(response) => OpenerOutcome::Success { response },
            Err(reason) => {
                tracing::error!(error = %reason, "opener generation failed, using fallback");
                OpenerOutcome::Fallback {
                    response: self.fallback.select(),
                    reason,
                }
            }
        }
    }

    /// Build the template for `source` with topical knowledge applied.
    pub fn build_template(
        &self,
        source: &dyn ConversationStateSource,
    ) -> Result<ConversationTemplate, OpenerError> {
        let history = read_history(source)?;
        let mut template =
            ConversationTemplate::from_history(self.config.system_prompt.as_str(), &history.turns)?;
        template.add_knowledge(history.knowledge.as_deref());
        Ok(template)
    }

    /// Render the prompt that would be sent for `source`.
    pub fn build_prompt(
        &self,
        source: &dyn ConversationStateSource,
        continued: bool,
    ) -> Result<String, OpenerError> {
        Ok(self.build_template(source)?.prompt(continued))
    }

    async fn try_generate(
        &self,
        source: &dyn ConversationStateSource,
        continued: bool,
    ) -> Result<String, OpenerError> {
        let template = self.build_template(source)?;
        let prompt = template.prompt(continued);

        let request = GenerationRequest {
            prompt: prompt.clone(),
            stop_token: template.stop_token(),
            controller_address: self.config.controller_address.clone(),
            worker_address: self.config.worker_address.clone(),
            model_name: self.config.model_name.clone(),
            max_new_tokens: self.config.max_new_tokens,
        };

        let span = info_span!(
            "gen_ai.opener",
            gen_ai.operation.name = "generate_opener",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %request.model_name,
            gen_ai.request.max_tokens = request.max_new_tokens,
            continued,
        );
        let raw = self.provider.generate(&request).instrument(span).await?;

        tracing::debug!(prompt = %prompt, "opener response prompt");

        let response = self.filter.filter(&raw, &prompt, &template, continued)?;
        Ok(response)
    }
}
