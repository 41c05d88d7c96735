use crate::domain::model::FruitQueryResult;
use crate::domain::ports::GenerativeModel;
use crate::utils::error::EtlError;
use std::fmt;

/// Stage at which a retrieval gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Model,
    Parse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalFailure {
    pub kind: FailureKind,
    pub reason: String,
}

impl fmt::Display for RetrievalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} failure: {}", self.kind, self.reason)
    }
}

impl From<EtlError> for RetrievalFailure {
    fn from(err: EtlError) -> Self {
        let kind = match err {
            EtlError::ModelError { .. } => FailureKind::Model,
            EtlError::SerializationError(_) | EtlError::ParseError { .. } => FailureKind::Parse,
            _ => FailureKind::Transport,
        };
        Self {
            kind,
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalOutcome {
    Found(FruitQueryResult),
    Failed(RetrievalFailure),
}

impl RetrievalOutcome {
    pub fn into_option(self) -> Option<FruitQueryResult> {
        match self {
            RetrievalOutcome::Found(result) => Some(result),
            RetrievalOutcome::Failed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RetrievalOutcome::Found(_))
    }
}

/// Asks a generative model about one fruit and parses the JSON it answers with.
pub struct InformationRetriever<M: GenerativeModel> {
    model: M,
    include_references: bool,
}

impl<M: GenerativeModel> InformationRetriever<M> {
    pub fn new(model: M, include_references: bool) -> Self {
        Self {
            model,
            include_references,
        }
    }

    pub fn build_prompt(&self, scientific_name: &str, common_name: &str) -> String {
        build_prompt(scientific_name, common_name, self.include_references)
    }

    /// One model call, no retry. Every failure is logged and reported as `Failed`.
    pub async fn retrieve(&self, scientific_name: &str, common_name: &str) -> RetrievalOutcome {
        let prompt = self.build_prompt(scientific_name, common_name);
        tracing::debug!("Prompt for '{}' is {} chars", common_name, prompt.len());

        let raw = match self.model.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                let failure = RetrievalFailure::from(e);
                tracing::warn!("⚠️ Error researching '{}': {}", common_name, failure);
                return RetrievalOutcome::Failed(failure);
            }
        };

        match parse_response(&raw) {
            Ok(result) => RetrievalOutcome::Found(result),
            Err(failure) => {
                tracing::warn!("⚠️ Error researching '{}': {}", common_name, failure);
                tracing::debug!("Unparseable response for '{}': {}", common_name, raw);
                RetrievalOutcome::Failed(failure)
            }
        }
    }
}

pub fn build_prompt(scientific_name: &str, common_name: &str, include_references: bool) -> String {
    let mut p = String::new();

    p.push_str(&format!(
        "Research the Wikipedia article on the species \"{}\" (a fruit known as \"{}\").\n",
        scientific_name, common_name
    ));
    p.push_str("Extract the following information and present it as a well-structured JSON object:\n");
    p.push_str("{\n");
    p.push_str(&format!("    \"fruit\": \"{}\",\n", common_name));
    p.push_str(&format!("    \"scientific_name\": \"{}\",\n", scientific_name));
    p.push_str("    \"etymology\": \"...\",\n");
    p.push_str("    \"origin\": \"...\",\n");
    if include_references {
        p.push_str("    \"cultivation_practices\": \"...\",\n");
        p.push_str("    \"references\": [\n");
        p.push_str("        {\"1\": \"citation supporting the etymology\"},\n");
        p.push_str("        {\"2\": \"citation supporting the origin\"},\n");
        p.push_str("        {\"3\": \"citation supporting the cultivation practices\"}\n");
        p.push_str("    ]\n");
    } else {
        p.push_str("    \"cultivation_practices\": \"...\"\n");
    }
    p.push_str("}\n");
    p.push_str("Return ONLY the JSON object, with no text outside it and no ```json blocks.");

    p
}

/// Trims the response and drops every markdown code-fence marker.
pub fn clean_response(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

pub fn parse_response(raw: &str) -> Result<FruitQueryResult, RetrievalFailure> {
    let cleaned = clean_response(raw);
    serde_json::from_str(&cleaned).map_err(|e| RetrievalFailure {
        kind: FailureKind::Parse,
        reason: format!("could not parse response as a JSON object: {}", e),
    })
}
