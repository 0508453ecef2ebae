//! Retrieval-grounded tutor.

use std::sync::Arc;

use database::{chat_log, course, material, student, Database, SourceCitation, UsageFeature};
use llm_core::{GenerationOptions, Generator};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MentorError, Result};
use crate::prompt;
use crate::scorer::{self, EVIDENCE_LIMIT};
use crate::usage::record_usage;

/// Materials scanned when a question is not scoped to a course.
pub const UNFILTERED_MATERIAL_CAP: i64 = 50;

/// Answer returned when there is nothing to search.
pub const NO_MATERIALS_ANSWER: &str =
    "No course materials have been registered yet. Please ask an administrator to upload them.";

/// Answer returned when no material mentions the question's keywords.
pub const NO_RELEVANT_ANSWER: &str =
    "No course material related to your question was found. Please try rephrasing it.";

const EMPTY_GENERATION_ANSWER: &str = "An answer could not be generated.";

/// A student's question, optionally scoped to one course.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorQuestion {
    #[serde(default)]
    pub student_id: String,
    /// Course row ID. Accepts a number or a numeric string.
    #[serde(default, deserialize_with = "lenient_id")]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub question: String,
}

/// A cited material with a short preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceExcerpt {
    pub title: String,
    pub excerpt: String,
}

/// The tutor's reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorAnswer {
    pub answer: String,
    pub sources: Vec<SourceExcerpt>,
    /// Percentage of evidence slots filled, rounded.
    pub confidence: u32,
}

impl TutorAnswer {
    fn insufficient(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            sources: Vec::new(),
            confidence: 0,
        }
    }
}

/// Answers questions from course materials through a text generator.
#[derive(Clone)]
pub struct Tutor {
    db: Database,
    generator: Arc<dyn Generator>,
    cost_per_1k_tokens: f64,
}

impl Tutor {
    pub fn new(db: Database, generator: Arc<dyn Generator>) -> Self {
        Self {
            db,
            generator,
            cost_per_1k_tokens: 0.0,
        }
    }

    /// Set the rate used for estimated cost in usage stats.
    pub fn with_cost_per_1k_tokens(mut self, cost: f64) -> Self {
        self.cost_per_1k_tokens = cost;
        self
    }

    /// Answer a question from the best-matching materials.
    ///
    /// When no material matches, a fixed answer with confidence 0 is returned
    /// and the generator is never called.
    pub async fn answer(&self, request: &TutorQuestion) -> Result<TutorAnswer> {
        let student_id = request.student_id.trim();
        let question = request.question.trim();
        if student_id.is_empty() || question.is_empty() {
            return Err(MentorError::Validation(
                "Student ID and question are required".to_string(),
            ));
        }

        let pool = self.db.pool();
        let student = match student::get_student(pool, student_id).await {
            Ok(student) => student,
            Err(e) if e.is_not_found() => {
                return Err(MentorError::StudentNotFound(student_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        // A zero course id searches every course
        let materials = match request.course_id.filter(|&id| id != 0) {
            Some(course_id) => {
                if let Err(e) = course::get_course(pool, course_id).await {
                    if e.is_not_found() {
                        return Err(MentorError::CourseNotFound(course_id));
                    }
                    return Err(e.into());
                }
                material::list_for_course(pool, course_id).await?
            }
            None => material::list_all(pool, UNFILTERED_MATERIAL_CAP).await?,
        };

        if materials.is_empty() {
            tracing::info!("No materials to search for student {}", student_id);
            return Ok(TutorAnswer::insufficient(NO_MATERIALS_ANSWER));
        }

        let mut evidence = scorer::rank_documents(question, &materials);
        evidence.truncate(EVIDENCE_LIMIT);
        if evidence.is_empty() {
            tracing::info!(
                "No relevant material among {} for student {}",
                materials.len(),
                student_id
            );
            return Ok(TutorAnswer::insufficient(NO_RELEVANT_ANSWER));
        }

        if !self.generator.is_available().await {
            tracing::warn!("{} is not available", self.generator.name());
            return Err(MentorError::Unavailable(format!(
                "{} is not available",
                self.generator.name()
            )));
        }

        let context = scorer::build_context(&evidence);
        tracing::debug!("Tutor context: {} chars", context.chars().count());

        let generation = self
            .generator
            .generate(
                &prompt::tutor_messages(&context, question),
                GenerationOptions::new(0.3, 800),
            )
            .await
            .map_err(|e| {
                tracing::warn!("Tutor generation failed: {}", e);
                MentorError::Unavailable(e.to_string())
            })?;

        record_usage(
            &self.db,
            UsageFeature::Chat,
            generation.usage,
            self.cost_per_1k_tokens,
        )
        .await;

        let answer = if generation.content.trim().is_empty() {
            EMPTY_GENERATION_ANSWER.to_string()
        } else {
            generation.content
        };
        let confidence = scorer::confidence(evidence.len());

        let citations: Vec<SourceCitation> = evidence
            .iter()
            .map(|scored| SourceCitation {
                title: scored.document.title.clone(),
                score: scored.score as u64,
            })
            .collect();
        chat_log::insert_chat_log(
            pool,
            student.id,
            request.course_id,
            question,
            &answer,
            &citations,
            confidence,
        )
        .await?;

        tracing::info!(
            "Answered student {} from {} sources (confidence {:.0})",
            student_id,
            evidence.len(),
            confidence
        );

        Ok(TutorAnswer {
            answer,
            sources: evidence
                .iter()
                .map(|scored| SourceExcerpt {
                    title: scored.document.title.clone(),
                    excerpt: scorer::excerpt(&scored.document.content),
                })
                .collect(),
            confidence: confidence.round() as u32,
        })
    }
}

/// Deserialize an optional row ID given as a number, a numeric string, an
/// empty string or null.
pub fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("courseId must be an integer")),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid courseId: {}", s))),
        Some(other) => Err(D::Error::custom(format!("invalid courseId: {}", other))),
    }
}
