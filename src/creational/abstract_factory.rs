//! # Abstract Factory: LLM providers
//!
//! Each provider factory builds a matching family of products: a
//! configuration and a client that uses it. Client code only sees the
//! [`LlmProviderFactory`] trait and never mixes one provider's configuration
//! with another provider's client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const PROMPT_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown LLM provider '{0}' (expected openai, anthropic, gemini or ollama)")]
pub struct UnknownProvider(pub String);

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfiguration {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl LlmConfiguration {
    fn new(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.to_string(),
        }
    }
}

pub trait LlmClient {
    fn provider(&self) -> Provider;
    fn config(&self) -> &LlmConfiguration;

    fn generate(&self, prompt: &str) -> String {
        let config = self.config();
        info!(
            provider = %self.provider(),
            url = %config.base_url,
            model = %config.model,
            "calling completion endpoint"
        );
        let preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
        format!("{} completion for: \"{preview}...\"", self.provider())
    }
}

/// Every provider's client behaves the same in this demo, so one struct
/// serves all four families.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    provider: Provider,
    config: LlmConfiguration,
}

impl ProviderClient {
    fn new(provider: Provider, config: LlmConfiguration) -> Self {
        debug!(%provider, model = %config.model, "client initialized");
        Self { provider, config }
    }
}

impl LlmClient for ProviderClient {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn config(&self) -> &LlmConfiguration {
        &self.config
    }
}

// =============================================================================
// Factories
// =============================================================================

pub trait LlmProviderFactory {
    fn create_configuration(&self) -> LlmConfiguration;
    fn create_client(&self) -> Box<dyn LlmClient>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAiFactory;

#[derive(Debug, Default, Clone, Copy)]
pub struct AnthropicFactory;

#[derive(Debug, Default, Clone, Copy)]
pub struct GeminiFactory;

#[derive(Debug, Default, Clone, Copy)]
pub struct OllamaFactory;

impl LlmProviderFactory for OpenAiFactory {
    fn create_configuration(&self) -> LlmConfiguration {
        LlmConfiguration::new("DUMMY_OPENAI_KEY_12345", "gpt-4o", "https://api.openai.com/v1")
    }

    fn create_client(&self) -> Box<dyn LlmClient> {
        Box::new(ProviderClient::new(Provider::OpenAi, self.create_configuration()))
    }
}

impl LlmProviderFactory for AnthropicFactory {
    fn create_configuration(&self) -> LlmConfiguration {
        LlmConfiguration::new(
            "DUMMY_ANTHROPIC_KEY_67890",
            "claude-3.7-sonnet",
            "https://api.anthropic.com/v1",
        )
    }

    fn create_client(&self) -> Box<dyn LlmClient> {
        Box::new(ProviderClient::new(Provider::Anthropic, self.create_configuration()))
    }
}

impl LlmProviderFactory for GeminiFactory {
    fn create_configuration(&self) -> LlmConfiguration {
        LlmConfiguration::new(
            "DUMMY_GEMINI_KEY_ABCDE",
            "gemini-2.5-pro",
            "https://generativelanguage.googleapis.com/v1beta",
        )
    }

    fn create_client(&self) -> Box<dyn LlmClient> {
        Box::new(ProviderClient::new(Provider::Gemini, self.create_configuration()))
    }
}

impl LlmProviderFactory for OllamaFactory {
    fn create_configuration(&self) -> LlmConfiguration {
        LlmConfiguration::new("N/A", "llama4", "http://localhost:11434/api")
    }

    fn create_client(&self) -> Box<dyn LlmClient> {
        Box::new(ProviderClient::new(Provider::Ollama, self.create_configuration()))
    }
}

// =============================================================================
// Provider selection
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Gemini,
    Ollama,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::Gemini,
        Provider::Ollama,
    ];

    pub fn factory(self) -> Box<dyn LlmProviderFactory> {
        match self {
            Provider::OpenAi => Box::new(OpenAiFactory),
            Provider::Anthropic => Box::new(AnthropicFactory),
            Provider::Gemini => Box::new(GeminiFactory),
            Provider::Ollama => Box::new(OllamaFactory),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Gemini => "Gemini",
            Provider::Ollama => "Ollama",
        };
        f.write_str(name)
    }
}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "gemini" => Ok(Provider::Gemini),
            "ollama" => Ok(Provider::Ollama),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_factory_builds_matching_family() {
        for provider in Provider::ALL {
            let factory = provider.factory();
            let client = factory.create_client();
            assert_eq!(client.provider(), provider);
            assert_eq!(client.config(), &factory.create_configuration());
        }
    }

    #[test]
    fn test_configurations() {
        let openai = OpenAiFactory.create_configuration();
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.base_url, "https://api.openai.com/v1");

        let ollama = OllamaFactory.create_configuration();
        assert_eq!(ollama.api_key, "N/A");
        assert_eq!(ollama.base_url, "http://localhost:11434/api");

        assert_eq!(AnthropicFactory.create_configuration().model, "claude-3.7-sonnet");
        assert_eq!(GeminiFactory.create_configuration().model, "gemini-2.5-pro");
    }

    #[test]
    fn test_generate_truncates_prompt() {
        let client = AnthropicFactory.create_client();
        let response = client.generate("Explain the abstract factory pattern in detail please");
        assert_eq!(
            response,
            "Anthropic completion for: \"Explain the abstract factory p...\""
        );
    }

    #[test]
    fn test_generate_short_prompt() {
        let client = OllamaFactory.create_client();
        assert_eq!(client.generate("Hi"), "Ollama completion for: \"Hi...\"");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OpenAI".parse::<Provider>(), Ok(Provider::OpenAi));
        assert_eq!(" gemini ".parse::<Provider>(), Ok(Provider::Gemini));
        assert_eq!(
            "mistral".parse::<Provider>(),
            Err(UnknownProvider("mistral".to_string()))
        );
    }
}
