/// Gateway — the single point of entry for all generative-AI calls.
///
/// ARCHITECTURAL RULE: no other module may call the external AI API directly.
/// All intelligence (career suggestions, roadmaps, skill extraction, coach
/// chat) goes through this module; it constructs prompts and shapes responses,
/// and a malformed or unparseable response shapes to empty results rather than
/// an error.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CareerPath, ChatMessage, ChatRole, ResourceItem, RoadmapStep};

pub mod prompts;

const GATEWAY_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all gateway calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Gateway returned empty content")]
    EmptyContent,

    #[error("Document extraction failed: {0}")]
    Document(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    output_tokens: u32,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()))
    }
}

/// The detail payload for one career: bridge roadmap, resources, overview.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    #[serde(default)]
    pub role_overview: Vec<String>,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub roadmap: Vec<RoadmapStep>,
    #[serde(default)]
    pub resources: Vec<ResourceItem>,
}

/// The gateway client. Wraps the generateContent API with retry logic and
/// response shaping.
#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
    api_key: String,
}

impl Gateway {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw generateContent call.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn call(
        &self,
        prompt_parts: Vec<Content<'_>>,
        system: Option<&str>,
        json_mode: bool,
    ) -> Result<String, GatewayError> {
        let request_body = GenerateRequest {
            system_instruction: system.map(|s| Content {
                role: None,
                parts: vec![Part { text: s }],
            }),
            contents: prompt_parts,
            generation_config: json_mode.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let url = format!(
            "{GATEWAY_API_URL}/{MODEL}:generateContent?key={}",
            self.api_key
        );

        let mut last_error: Option<GatewayError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "gateway call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self.client.post(&url).json(&request_body).send().await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GatewayError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("gateway API returned {}: {}", status, body);
                last_error = Some(GatewayError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GatewayError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let parsed: GenerateResponse = response.json().await?;

            if let Some(usage) = &parsed.usage {
                debug!(
                    "gateway call succeeded: prompt_tokens={}, output_tokens={}",
                    usage.prompt_tokens, usage.output_tokens
                );
            }

            return parsed
                .text()
                .map(str::to_string)
                .ok_or(GatewayError::EmptyContent);
        }

        Err(last_error.unwrap_or(GatewayError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    async fn call_text(
        &self,
        prompt: &str,
        system: Option<&str>,
        json_mode: bool,
    ) -> Result<String, GatewayError> {
        self.call(
            vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system,
            json_mode,
        )
        .await
    }

    /// Career suggestions for a skill set. Response-shape failures yield an
    /// empty list, never an error.
    pub async fn recommend_careers(
        &self,
        skills: &[String],
    ) -> Result<Vec<CareerPath>, GatewayError> {
        let prompt = prompts::RECOMMEND_PROMPT.replace("{skills}", &skills.join(", "));
        let text = self
            .call_text(&prompt, Some(prompts::RECOMMEND_SYSTEM), true)
            .await?;
        Ok(shape_careers(&text))
    }

    /// Career suggestions for a directly searched role string.
    pub async fn search_by_role(&self, role: &str) -> Result<Vec<CareerPath>, GatewayError> {
        let prompt = prompts::SEARCH_BY_ROLE_PROMPT.replace("{role}", role);
        let text = self
            .call_text(&prompt, Some(prompts::RECOMMEND_SYSTEM), true)
            .await?;
        Ok(shape_careers(&text))
    }

    /// Bridge roadmap, resources, overview, and salary for one career.
    pub async fn detailed_plan(
        &self,
        career_title: &str,
        user_skills: &[String],
    ) -> Result<PlanDetails, GatewayError> {
        let prompt = prompts::DETAILED_PLAN_PROMPT
            .replace("{career_title}", career_title)
            .replace("{user_skills}", &user_skills.join(", "));
        let text = self
            .call_text(&prompt, Some(prompts::RECOMMEND_SYSTEM), true)
            .await?;
        Ok(shape_plan(&text))
    }

    /// Extracts a professional skill list from an uploaded resume.
    /// PDF documents are text-extracted locally; anything else is treated as
    /// plain text.
    pub async fn extract_skills(
        &self,
        document: &[u8],
        mime_type: &str,
    ) -> Result<Vec<String>, GatewayError> {
        let document_text = if mime_type == "application/pdf" {
            pdf_extract::extract_text_from_mem(document)
                .map_err(|e| GatewayError::Document(e.to_string()))?
        } else {
            String::from_utf8_lossy(document).into_owned()
        };

        let prompt = prompts::EXTRACT_SKILLS_PROMPT.replace("{document_text}", &document_text);
        let text = self
            .call_text(&prompt, Some(prompts::RECOMMEND_SYSTEM), true)
            .await?;
        Ok(shape_skills(&text))
    }

    /// One coach-chat turn against the running conversation history.
    pub async fn coach_chat(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, GatewayError> {
        let mut contents: Vec<Content<'_>> = history
            .iter()
            .map(|m| Content {
                role: Some(match m.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                }),
                parts: vec![Part { text: &m.text }],
            })
            .collect();
        contents.push(Content {
            role: Some("user"),
            parts: vec![Part { text: message }],
        });

        self.call(contents, Some(prompts::COACH_SYSTEM), false).await
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from gateway output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Suggestion shape minted by the gateway; `id` is the semantic slug.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestedCareer {
    id: String,
    title: String,
    description: String,
    #[serde(default)]
    match_percentage: Option<i32>,
    #[serde(default)]
    required_skills: Vec<String>,
    #[serde(default)]
    salary_range: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CareersWire {
    #[serde(default)]
    careers: Vec<SuggestedCareer>,
}

fn shape_careers(text: &str) -> Vec<CareerPath> {
    match serde_json::from_str::<CareersWire>(strip_json_fences(text)) {
        Ok(wire) => wire
            .careers
            .into_iter()
            .map(|c| CareerPath {
                id: None,
                slug: c.id,
                title: c.title,
                description: c.description,
                match_percentage: c.match_percentage,
                role_overview: Vec::new(),
                salary_range: c.salary_range,
                required_skills: c.required_skills,
                roadmap: Vec::new(),
                resources: Vec::new(),
            })
            .collect(),
        Err(e) => {
            warn!("failed to shape careers response: {e}");
            Vec::new()
        }
    }
}

fn shape_plan(text: &str) -> PlanDetails {
    match serde_json::from_str::<PlanDetails>(strip_json_fences(text)) {
        Ok(details) => details,
        Err(e) => {
            warn!("failed to shape plan response: {e}");
            PlanDetails::default()
        }
    }
}

fn shape_skills(text: &str) -> Vec<String> {
    #[derive(Deserialize)]
    struct SkillsWire {
        #[serde(default)]
        skills: Vec<String>,
    }
    match serde_json::from_str::<SkillsWire>(strip_json_fences(text)) {
        Ok(wire) => wire.skills,
        Err(e) => {
            warn!("failed to shape skills response: {e}");
            Vec::new()
        }
    }
}
