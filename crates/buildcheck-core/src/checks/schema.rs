//! Static schema check: the server source mentions what it must implement.
//!
//! This is a plain substring search over the source text. Nothing is parsed
//! or compiled, so the check works without the project's toolchain.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::check::{Check, Project};
use crate::result::CheckResult;
use crate::util::files;
use crate::Result;

/// Settings for [`SchemaCheck`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    /// Project-relative source file to scan.
    pub source: String,
    /// Tokens that must each appear somewhere in the source.
    pub required_identifiers: Vec<String>,
    /// Helper name that counts as MIME-type handling.
    pub mime_helper: String,
    /// Content-type literals that also count as MIME-type handling.
    pub mime_literals: Vec<String>,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            source: "src/index.ts".to_string(),
            required_identifiers: [
                "generate_image",
                "edit_image",
                "@google/genai",
                "gemini-2.5-flash-image-preview",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            mime_helper: "getMimeType".to_string(),
            mime_literals: vec!["image/png".to_string(), "image/jpeg".to_string()],
        }
    }
}

impl SchemaSettings {
    /// True when the helper or any content-type literal appears in `text`.
    pub fn has_mime_evidence(&self, text: &str) -> bool {
        let helper = !self.mime_helper.is_empty() && text.contains(&self.mime_helper);
        helper || self.mime_literals.iter().any(|lit| text.contains(lit.as_str()))
    }
}

/// One result per required identifier, plus one for MIME-type handling.
#[derive(Clone, Debug, Default)]
pub struct SchemaCheck {
    settings: SchemaSettings,
}

impl SchemaCheck {
    pub fn new(settings: SchemaSettings) -> Self {
        Self { settings }
    }

    /// Judge already-loaded source text.
    pub fn scan(&self, text: &str) -> Vec<CheckResult> {
        let source = &self.settings.source;
        let mut results: Vec<CheckResult> = self
            .settings
            .required_identifiers
            .iter()
            .map(|ident| {
                CheckResult::from_condition(
                    format!("schema:{ident}"),
                    text.contains(ident.as_str()),
                    format!("{source} references {ident}"),
                    format!("{source} does not reference {ident}"),
                )
            })
            .collect();

        results.push(CheckResult::from_condition(
            "schema:mime-types",
            self.settings.has_mime_evidence(text),
            format!("{source} handles image MIME types"),
            format!("{source} shows no MIME type handling"),
        ));
        results
    }
}

#[async_trait]
impl Check for SchemaCheck {
    fn name(&self) -> &str {
        "schema"
    }

    async fn evaluate(&self, project: &Project) -> Result<Vec<CheckResult>> {
        let text = files::read_file(&project.resolve(&self.settings.source)).await?;
        Ok(self.scan(&text))
    }
}
