//! Generative-assistant relay.
//!
//! Forwards user questions with a fixed persona prefix to the Gemini
//! `generateContent` endpoint. The relay is stateless: nothing is kept
//! between calls beyond the context string the caller echoes back.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Shown when the model responds without any text.
pub const EMPTY_REPLY_FALLBACK: &str =
    "Desculpe, não consegui processar sua solicitação no momento.";

/// Shown on any transport or API failure.
pub const ERROR_FALLBACK: &str = "Ocorreu um erro ao conectar com a IA de Spinoza.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client for the external generative-model endpoint.
#[derive(Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl AssistantClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string(), api_key, model)
    }

    /// Endpoint override, used by tests to point at a local stub.
    pub fn with_endpoint(endpoint: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
        }
    }

    /// Ask the assistant a question. Always yields a sentence: failures
    /// collapse to the fixed fallback rather than an error.
    pub async fn ask(&self, prompt: &str, context: &str) -> String {
        match self.generate(prompt, context).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Assistant call failed: {}", e);
                ERROR_FALLBACK.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str, context: &str) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Internal("Assistant API key not configured".to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, api_key
        );

        let body = build_request(prompt, context);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Assistant request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "Assistant endpoint returned {}",
                response.status()
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Assistant response unreadable: {}", e)))?;

        Ok(extract_reply(&parsed))
    }
}

/// The fixed academic persona, with the caller's context and question
/// appended.
fn build_prompt(prompt: &str, context: &str) -> String {
    format!(
        "Você é um assistente acadêmico especialista no pensamento de Baruch Spinoza \
         para o Grupo de Estudos Spinoza do Prof. Divino Viana. \
         Ajude o usuário com revisões, dicas de leitura ou esclarecendo conceitos de \
         Ética, Ontologia, Política, etc. \
         Contexto opcional: {}. \
         Pergunta do usuário: {}",
        context, prompt
    )
}

fn build_request(prompt: &str, context: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: build_prompt(prompt, context),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: 0.7,
            top_p: 0.9,
        },
    }
}

fn extract_reply(response: &GenerateContentResponse) -> String {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        EMPTY_REPLY_FALLBACK.to_string()
    } else {
        text
    }
}
