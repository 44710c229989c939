//! Prompt library for advice generation
//!
//! Prompts are loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pfc/prompts/overrides/)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Users can tune the advisor's instructions without rebuilding, and still
//! pick up new defaults on upgrade.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default prompts (compiled into binary)
mod defaults {
    pub const FINANCIAL_ADVICE: &str = include_str!("../../../prompts/financial_advice.md");
}

/// Known prompt IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// Monthly review and investment advice
    FinancialAdvice,
}

impl PromptId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FinancialAdvice => "financial_advice",
        }
    }

    pub fn all() -> &'static [PromptId] {
        &[Self::FinancialAdvice]
    }

    /// File name an override must use
    pub fn file_name(&self) -> String {
        format!("{}.md", self.as_str())
    }

    fn default_content(&self) -> &'static str {
        match self {
            Self::FinancialAdvice => defaults::FINANCIAL_ADVICE,
        }
    }
}

impl std::str::FromStr for PromptId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches(".md");
        Self::all()
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown prompt ID: {}", s))
    }
}

/// Prompt frontmatter metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    pub id: String,
    /// Bumped whenever the wording changes
    pub version: u32,
    #[serde(default)]
    pub description: String,
}

/// A loaded prompt with metadata and content
#[derive(Debug, Clone)]
pub struct Prompt {
    pub metadata: PromptMetadata,
    /// Body after the frontmatter
    pub content: String,
    /// Whether this came from an override file
    pub is_override: bool,
    pub override_path: Option<PathBuf>,
}

impl Prompt {
    /// The `# System` section, if the prompt has one
    pub fn system_section(&self) -> Option<&str> {
        extract_section(&self.content, "# System")
    }

    /// Render the whole body with `{{var}}` placeholders replaced
    pub fn render(&self, vars: &HashMap<&str, &str>) -> String {
        substitute(&self.content, vars)
    }

    /// Render the system section, or the whole body when there is none
    pub fn render_system(&self, vars: &HashMap<&str, &str>) -> String {
        match self.system_section() {
            Some(system) => substitute(system, vars),
            None => self.render(vars),
        }
    }
}

/// Prompt library for loading and caching prompts
pub struct PromptLibrary {
    override_dir: Option<PathBuf>,
    cache: HashMap<PromptId, Prompt>,
}

impl PromptLibrary {
    /// Create a prompt library with the default override directory
    pub fn new() -> Self {
        Self {
            override_dir: default_prompts_dir(),
            cache: HashMap::new(),
        }
    }

    pub fn with_override_dir(path: PathBuf) -> Self {
        Self {
            override_dir: Some(path),
            cache: HashMap::new(),
        }
    }

    /// Embedded prompts only, overrides are ignored
    pub fn embedded_only() -> Self {
        Self {
            override_dir: None,
            cache: HashMap::new(),
        }
    }

    /// Get a prompt by ID, loading from override or default
    pub fn get(&mut self, id: PromptId) -> Result<&Prompt> {
        let prompt = match self.cache.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let loaded = load(self.override_dir.as_ref(), id)?;
                entry.insert(loaded)
            }
        };
        Ok(prompt)
    }

    /// List all prompts with their override status
    pub fn list(&mut self) -> Vec<PromptInfo> {
        PromptId::all()
            .iter()
            .map(|&id| {
                let has_override = self.has_override(id);
                let (version, description) = match self.get(id) {
                    Ok(p) => (p.metadata.version, p.metadata.description.clone()),
                    Err(e) => {
                        tracing::warn!(prompt = id.as_str(), error = %e, "Unreadable prompt");
                        (0, String::new())
                    }
                };
                PromptInfo {
                    id: id.as_str().to_string(),
                    version,
                    description,
                    has_override,
                    override_path: self.override_path(id).filter(|_| has_override),
                }
            })
            .collect()
    }

    pub fn has_override(&self, id: PromptId) -> bool {
        self.override_path(id).is_some_and(|p| p.exists())
    }

    pub fn override_dir(&self) -> Option<&PathBuf> {
        self.override_dir.as_ref()
    }

    fn override_path(&self, id: PromptId) -> Option<PathBuf> {
        self.override_dir
            .as_ref()
            .map(|d| d.join(id.file_name()))
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Information about a prompt for listing
#[derive(Debug, Clone)]
pub struct PromptInfo {
    pub id: String,
    pub version: u32,
    pub description: String,
    pub has_override: bool,
    pub override_path: Option<PathBuf>,
}

/// Default prompts override directory
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pfc").join("prompts").join("overrides"))
}

fn load(override_dir: Option<&PathBuf>, id: PromptId) -> Result<Prompt> {
    if let Some(dir) = override_dir {
        let path = dir.join(id.file_name());
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Prompt(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let (metadata, body) = parse_prompt(&content)?;
            tracing::debug!(prompt = id.as_str(), path = %path.display(), "Using prompt override");
            return Ok(Prompt {
                metadata,
                content: body,
                is_override: true,
                override_path: Some(path),
            });
        }
    }

    let (metadata, body) = parse_prompt(id.default_content())?;
    Ok(Prompt {
        metadata,
        content: body,
        is_override: false,
        override_path: None,
    })
}

/// Split a prompt file into frontmatter metadata and body
fn parse_prompt(content: &str) -> Result<(PromptMetadata, String)> {
    let content = content.trim();

    let rest = content
        .strip_prefix("---")
        .ok_or_else(|| Error::Prompt("Prompt must start with YAML frontmatter (---)".into()))?;

    let end = rest.find("---").ok_or_else(|| {
        Error::Prompt("Prompt frontmatter not closed (missing second ---)".into())
    })?;

    let frontmatter = rest[..end].trim();
    let body = rest[end + 3..].trim();

    let metadata: PromptMetadata = serde_yaml::from_str(frontmatter)
        .map_err(|e| Error::Prompt(format!("Invalid prompt frontmatter: {}", e)))?;

    Ok((metadata, body.to_string()))
}

/// Text under `header`, up to the next top-level heading
fn extract_section<'a>(content: &'a str, header: &str) -> Option<&'a str> {
    let start = content.find(header)?;
    let after_header = &content[start + header.len()..];
    let end = after_header.find("\n# ").unwrap_or(after_header.len());
    Some(after_header[..end].trim())
}

fn substitute(template: &str, vars: &HashMap<&str, &str>) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{}}}}}", key), value)
    })
}
