//! Project records and the form that edits them.
//!
//! A [`ProjectRecord`] is a flat string-keyed map: `id` plus ten optional
//! free-form fields. Field names on the wire use camelCase (`imageSrc`,
//! `linkHref`, ...), the same names the admin form binds to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// One portfolio project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Primary key. Unique within the stored collection.
    #[serde(default)]
    pub id: String,
    /// Card heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    /// Image alternative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    /// Technologies used, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    /// Action link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_href: Option<String>,
    /// Action link text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_label: Option<String>,
    /// Date or date range, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Role on the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Comma separated keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl ProjectRecord {
    /// Create a record with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the title, builder style.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Values submitted through the admin create/update form.
///
/// Every field is a plain string and may be empty. Serialized names match
/// the form's input names exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectForm {
    /// `id` input. Required for every submission.
    pub id: String,
    /// `title` input.
    pub title: String,
    /// `description` input.
    pub description: String,
    /// `imageSrc` input.
    pub image_src: String,
    /// `imageAlt` input.
    pub image_alt: String,
    /// `tech` input.
    pub tech: String,
    /// `linkHref` input.
    pub link_href: String,
    /// `linkLabel` input.
    pub link_label: String,
    /// `date` input.
    pub date: String,
    /// `role` input.
    pub role: String,
    /// `keywords` input.
    pub keywords: String,
}

impl ProjectForm {
    /// Fill a form from a stored record (load-for-edit).
    #[must_use]
    pub fn from_record(record: &ProjectRecord) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            id: record.id.clone(),
            title: text(&record.title),
            description: text(&record.description),
            image_src: text(&record.image_src),
            image_alt: text(&record.image_alt),
            tech: text(&record.tech),
            link_href: text(&record.link_href),
            link_label: text(&record.link_label),
            date: text(&record.date),
            role: text(&record.role),
            keywords: text(&record.keywords),
        }
    }

    /// The submitted id with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_id(&self) -> &str {
        self.id.trim()
    }

    /// Copy every non-empty submitted field onto `record`.
    ///
    /// Empty fields leave the record's existing value untouched.
    pub fn apply_to(&self, record: &mut ProjectRecord) {
        merge(&mut record.title, &self.title);
        merge(&mut record.description, &self.description);
        merge(&mut record.image_src, &self.image_src);
        merge(&mut record.image_alt, &self.image_alt);
        merge(&mut record.tech, &self.tech);
        merge(&mut record.link_href, &self.link_href);
        merge(&mut record.link_label, &self.link_label);
        merge(&mut record.date, &self.date);
        merge(&mut record.role, &self.role);
        merge(&mut record.keywords, &self.keywords);
    }

    /// Build a fresh record from the submitted fields, empty ones omitted.
    #[must_use]
    pub fn to_record(&self) -> ProjectRecord {
        let mut record = ProjectRecord::new(self.trimmed_id());
        self.apply_to(&mut record);
        record
    }
}

fn merge(slot: &mut Option<String>, submitted: &str) {
    let value = submitted.trim();
    if !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

/// Decode a JSON array of records, skipping elements that are not objects.
///
/// Anything other than an array decodes to an empty list.
#[must_use]
pub fn records_from_value(value: Value) -> Vec<ProjectRecord> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let Value::Object(fields) = item else {
                warn!("Skipping project entry {} (not an object)", index);
                return None;
            };
            match serde_json::from_value(Value::Object(stringify_fields(fields))) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping project entry {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Decode a remote payload: either a bare array of records or an object
/// whose `projects` field holds one. Any other shape yields an empty list.
#[must_use]
pub fn records_from_payload(payload: Value) -> Vec<ProjectRecord> {
    match payload {
        Value::Array(_) => records_from_value(payload),
        Value::Object(mut fields) => match fields.remove("projects") {
            Some(projects @ Value::Array(_)) => records_from_value(projects),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Numbers and booleans become strings; nulls and nested values are dropped.
fn stringify_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(_) => Some((key, value)),
            Value::Number(n) => Some((key, Value::String(n.to_string()))),
            Value::Bool(b) => Some((key, Value::String(b.to_string()))),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}

/// Seed rows: id, title, imageSrc, imageAlt, description, tech, linkHref,
/// linkLabel, date, role, keywords.
const SEED_ROWS: [[&str; 11]; 4] = [
    [
        "foodflip",
        "FoodFlip - Restaurant Recommendation App",
        "assets/images/foodflip.png",
        "FoodFlip app interface showing restaurant cards to swipe through restaurants",
        "FoodFlip lets users swipe through nearby restaurants like a deck of cards, quickly saving favorites into personalized collections for date nights, group dinners, and solo food adventures.",
        "JavaScript",
        "https://cse110-sp25-group25.github.io/cse110-sp25-group25/",
        "Visit FoodFlip →",
        "Spring 2025",
        "Frontend engineer, UX design",
        "restaurant discovery, swipe UI, class project",
    ],
    [
        "podcaist",
        "Podcaist - AI\u{2011}Generated Podcast Platform",
        "assets/images/podcaist.svg",
        "Waveform illustration representing AI-generated podcast audio",
        "Podcaist generates fully scripted podcast episodes from a single topic prompt using language models, then stitches narration and background audio into a shareable listening experience.",
        "TypeScript, Next.js, OpenAI",
        "https://podcaist.vercel.app/",
        "Visit Podcaist →",
        "2024",
        "Full\u{2011}stack developer",
        "AI, content generation, web app",
    ],
    [
        "qa-testing-system",
        "QA Testing System - AI\u{2011}Driven Testing Agent",
        "assets/images/github.png",
        "Dashboard mockup showing automated test runs",
        "An AI agent that explores web apps, writes natural\u{2011}language test plans, and executes them automatically, helping developers catch regressions without writing every test case by hand.",
        "Python, Playwright, OpenAI",
        "https://github.com/evanedreo/qa_testing_system",
        "View QA agent on GitHub →",
        "2024",
        "Creator",
        "QA automation, AI agents, testing",
    ],
    [
        "slide-generator",
        "Slide Generator - AI\u{2011}Powered Presentations",
        "assets/images/github.png",
        "Slide deck preview generated from a short topic prompt",
        "Given a lesson outline, Slide Generator produces a full, visually\u{2011}balanced slide deck with speaker notes, examples, and call\u{2011}to\u{2011}action sections tailored for educators.",
        "TypeScript, Next.js, AWS S3, OpenAI",
        "https://github.com/evanedreo/slide-generator",
        "View Slide Generator on GitHub →",
        "2023",
        "Full\u{2011}stack engineer",
        "education, AI, presentations",
    ],
];

/// The fixed records a fresh store is seeded with, in display order.
#[must_use]
pub fn default_projects() -> Vec<ProjectRecord> {
    SEED_ROWS
        .iter()
        .map(
            |&[id, title, image_src, image_alt, description, tech, link_href, link_label, date, role, keywords]| {
                let text = |value: &str| Some(value.to_string());
                ProjectRecord {
                    id: id.to_string(),
                    title: text(title),
                    description: text(description),
                    image_src: text(image_src),
                    image_alt: text(image_alt),
                    tech: text(tech),
                    link_href: text(link_href),
                    link_label: text(link_label),
                    date: text(date),
                    role: text(role),
                    keywords: text(keywords),
                }
            },
        )
        .collect()
}
