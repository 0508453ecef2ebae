//! Competency-based course advisor.

use std::collections::HashMap;
use std::sync::Arc;

use database::{
    course, recommendation, student, CompetencyVector, Course, Database, NewRecommendation,
    Student, UsageFeature,
};
use llm_core::{GenerationOptions, Generator};
use serde::Serialize;

use crate::error::{MentorError, Result};
use crate::prompt;
use crate::ranker::{self, RankedCourse, TOP_COURSES};
use crate::usage::record_usage;

/// Note attached to a report whose reasons are all templated.
pub const DEGRADED_NOTE: &str =
    "The text generator is unavailable, so default recommendation reasons are shown.";

/// The student a report was built for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub name: String,
    pub student_id: String,
    pub competencies: CompetencyVector,
}

/// Course fields shown with a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: Option<i64>,
    pub department: Option<String>,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            description: course.description.clone(),
            credits: course.credits,
            department: course.department.clone(),
        }
    }
}

/// One ranked course with its reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendation {
    /// 1-based.
    pub rank: usize,
    pub course: CourseSummary,
    pub match_score: f64,
    pub reason: String,
}

/// Result of one recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub student: StudentSummary,
    pub recommendations: Vec<CourseRecommendation>,
    /// Present only when the generator could not be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Ranks courses for a student and asks a text generator to justify them.
#[derive(Clone)]
pub struct Advisor {
    db: Database,
    generator: Arc<dyn Generator>,
    cost_per_1k_tokens: f64,
}

impl Advisor {
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

    /// Rank the catalogue for `student_id` and store the top courses as
    /// pending recommendations.
    ///
    /// Ranking never depends on the generator. Without it every course gets a
    /// templated reason and the report carries a note.
    pub async fn recommend(&self, student_id: &str) -> Result<RecommendationReport> {
        let student_id = student_id.trim();
        if student_id.is_empty() {
            return Err(MentorError::Validation("Student ID is required".to_string()));
        }

        let pool = self.db.pool();
        let student = match student::get_student(pool, student_id).await {
            Ok(student) => student,
            Err(e) if e.is_not_found() => {
                return Err(MentorError::StudentNotFound(student_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let courses = course::list_courses(pool).await?;
        if courses.is_empty() {
            return Err(MentorError::NoCourses);
        }

        let ranked = ranker::rank_courses(&student.competencies, &courses, TOP_COURSES);
        let (reasons, note) = self.generate_reasons(&student, &ranked).await;

        let recommendations: Vec<CourseRecommendation> = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| CourseRecommendation {
                rank: i + 1,
                course: CourseSummary::from(r.course),
                match_score: r.match_score,
                reason: reasons
                    .get(&r.course.code)
                    .cloned()
                    .unwrap_or_else(|| ranker::fallback_reason(r.match_score)),
            })
            .collect();

        let rows: Vec<NewRecommendation> = ranked
            .iter()
            .zip(&recommendations)
            .map(|(r, rec)| NewRecommendation {
                student_id: student.id,
                course_id: r.course.id,
                rank: rec.rank as i64,
                score: r.match_score / 100.0,
                reason: rec.reason.clone(),
            })
            .collect();
        recommendation::insert_run(pool, &rows).await?;

        tracing::info!(
            "Recommended {} courses to student {}{}",
            recommendations.len(),
            student_id,
            if note.is_some() { " (degraded)" } else { "" }
        );

        Ok(RecommendationReport {
            student: StudentSummary {
                name: student.name,
                student_id: student.student_id,
                competencies: student.competencies,
            },
            recommendations,
            note,
        })
    }

    /// Generated reasons by course code, plus a note when the generator could
    /// not be used. Unparseable output yields an empty map without a note.
    async fn generate_reasons(
        &self,
        student: &Student,
        ranked: &[RankedCourse<'_>],
    ) -> (HashMap<String, String>, Option<String>) {
        if !self.generator.is_available().await {
            tracing::warn!(
                "{} is not available, using default reasons",
                self.generator.name()
            );
            return (HashMap::new(), Some(DEGRADED_NOTE.to_string()));
        }

        let generation = match self
            .generator
            .generate(
                &prompt::advisor_messages(student, ranked),
                GenerationOptions::new(0.7, 800),
            )
            .await
        {
            Ok(generation) => generation,
            Err(e) => {
                tracing::warn!("Reason generation failed, using default reasons: {}", e);
                return (HashMap::new(), Some(DEGRADED_NOTE.to_string()));
            }
        };

        record_usage(
            &self.db,
            UsageFeature::Recommend,
            generation.usage,
            self.cost_per_1k_tokens,
        )
        .await;

        match ranker::parse_reasons(&generation.content) {
            Ok(reasons) => (reasons, None),
            Err(e) => {
                tracing::warn!("Failed to parse generated reasons: {}", e);
                tracing::debug!("Raw generated reasons: {}", generation.content);
                (HashMap::new(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{seed, NewStudent, RecommendationStatus};
    use mock_llm::{OfflineGenerator, ScriptedGenerator};

    async fn setup() -> Database {
        let db = Database::in_memory().await.unwrap();
        seed::seed_courses(db.pool()).await.unwrap();
        student::upsert_student(
            db.pool(),
            &NewStudent {
                student_id: "2024001".to_string(),
                name: "Kim Minji".to_string(),
                email: None,
                department: Some("Computer Science".to_string()),
                grade: Some(2),
                competencies: CompetencyVector::new(75.0, 82.0, 68.0),
            },
        )
        .await
        .unwrap();
        db
    }

    async fn stored(db: &Database) -> Vec<database::Recommendation> {
        let student = student::get_student(db.pool(), "2024001").await.unwrap();
        let mut rows = recommendation::list_for_student(db.pool(), student.id, 50)
            .await
            .unwrap();
        rows.sort_by_key(|row| row.rank);
        rows
    }

    #[tokio::test]
    async fn test_degraded_mode_uses_templates() {
        let db = setup().await;
        let offline = Arc::new(OfflineGenerator::new());
        let advisor = Advisor::new(db.clone(), offline.clone());

        let report = advisor.recommend("2024001").await.unwrap();

        assert_eq!(report.recommendations.len(), TOP_COURSES);
        assert_eq!(report.note.as_deref(), Some(DEGRADED_NOTE));
        for rec in &report.recommendations {
            assert_eq!(rec.reason, ranker::fallback_reason(rec.match_score));
        }
        assert_eq!(offline.calls(), 0);

        // Degraded runs are persisted too
        let rows = stored(&db).await;
        assert_eq!(rows.len(), TOP_COURSES);
        assert!(rows
            .iter()
            .all(|row| row.status == RecommendationStatus::Pending));
    }

    #[tokio::test]
    async fn test_failed_generation_degrades() {
        let db = setup().await;
        let dropping = Arc::new(OfflineGenerator::passing_health_check());
        let advisor = Advisor::new(db, dropping.clone());

        let report = advisor.recommend("2024001").await.unwrap();
        assert!(report.note.is_some());
        assert_eq!(report.recommendations.len(), TOP_COURSES);
        assert_eq!(dropping.calls(), 1);
    }

    #[tokio::test]
    async fn test_generated_reasons_with_fallback_per_course() {
        let db = setup().await;
        let courses = course::list_courses(db.pool()).await.unwrap();
        let student = student::get_student(db.pool(), "2024001").await.unwrap();
        let ranked = ranker::rank_courses(&student.competencies, &courses, TOP_COURSES);
        let top = ranked[0].course.code.clone();

        let reply = format!(
            "```json\n{{\"recommendations\":[{{\"courseCode\":\"{}\",\"reason\":\"Strong fit for your problem solving.\"}}]}}\n```",
            top
        );
        let generator = Arc::new(ScriptedGenerator::new(reply));
        let advisor = Advisor::new(db.clone(), generator.clone());

        let report = advisor.recommend("2024001").await.unwrap();

        assert!(report.note.is_none());
        assert_eq!(report.recommendations[0].course.code, top);
        assert_eq!(
            report.recommendations[0].reason,
            "Strong fit for your problem solving."
        );
        for rec in &report.recommendations[1..] {
            assert_eq!(rec.reason, ranker::fallback_reason(rec.match_score));
        }

        let options = generator.last_options().unwrap();
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.max_output_tokens, 800);

        let usage = database::usage_stats::get(db.pool(), &crate::usage::today())
            .await
            .unwrap();
        assert_eq!(usage.recommend_count, 1);
    }

    #[tokio::test]
    async fn test_unparseable_reasons_fall_back_without_note() {
        let db = setup().await;
        let advisor = Advisor::new(db, Arc::new(ScriptedGenerator::new("I recommend all of them!")));

        let report = advisor.recommend("2024001").await.unwrap();
        assert!(report.note.is_none());
        assert!(report
            .recommendations
            .iter()
            .all(|rec| rec.reason == ranker::fallback_reason(rec.match_score)));
    }

    #[tokio::test]
    async fn test_ranking_and_score_round_trip() {
        let db = setup().await;
        let advisor = Advisor::new(db.clone(), Arc::new(OfflineGenerator::new()));

        let report = advisor.recommend("2024001").await.unwrap();

        let scores: Vec<f64> = report.recommendations.iter().map(|r| r.match_score).collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
        let ranks: Vec<usize> = report.recommendations.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);

        let rows = stored(&db).await;
        for (row, rec) in rows.iter().zip(&report.recommendations) {
            assert_eq!(row.rank as usize, rec.rank);
            assert_eq!(
                (row.score * 10000.0).round() / 100.0,
                rec.match_score,
                "stored score should be matchScore / 100"
            );
        }
    }

    #[tokio::test]
    async fn test_cs101_worked_example() {
        let db = setup().await;
        let student = student::get_student(db.pool(), "2024001").await.unwrap();
        let cs101 = course::get_course_by_code(db.pool(), "CS101").await.unwrap();
        assert_eq!(
            ranker::match_score(&student.competencies, &cs101.weights),
            130.8
        );

        let advisor = Advisor::new(db, Arc::new(OfflineGenerator::new()));
        let report = advisor.recommend("2024001").await.unwrap();
        assert_eq!(report.student.student_id, "2024001");
        assert_eq!(report.student.competencies.collaboration, 82.0);
    }

    #[tokio::test]
    async fn test_errors() {
        let db = Database::in_memory().await.unwrap();
        let advisor = Advisor::new(db.clone(), Arc::new(OfflineGenerator::new()));

        assert!(matches!(
            advisor.recommend("  ").await,
            Err(MentorError::Validation(_))
        ));
        assert!(matches!(
            advisor.recommend("2024001").await,
            Err(MentorError::StudentNotFound(_))
        ));

        // Student exists but the catalogue was never seeded
        student::upsert_student(
            db.pool(),
            &NewStudent {
                student_id: "2024001".to_string(),
                name: "Kim Minji".to_string(),
                email: None,
                department: None,
                grade: None,
                competencies: CompetencyVector::new(50.0, 50.0, 50.0),
            },
        )
        .await
        .unwrap();
        assert!(matches!(
            advisor.recommend("2024001").await,
            Err(MentorError::NoCourses)
        ));
    }

    #[test]
    fn test_report_json_shape() {
        let report = RecommendationReport {
            student: StudentSummary {
                name: "Kim Minji".to_string(),
                student_id: "2024001".to_string(),
                competencies: CompetencyVector::new(75.0, 82.0, 68.0),
            },
            recommendations: vec![CourseRecommendation {
                rank: 1,
                course: CourseSummary {
                    code: "CS101".to_string(),
                    name: "Introduction to Programming".to_string(),
                    description: None,
                    credits: Some(3),
                    department: None,
                },
                match_score: 130.8,
                reason: ranker::fallback_reason(130.8),
            }],
            note: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["student"]["studentId"], "2024001");
        assert_eq!(json["student"]["competencies"]["problemSolving"], 68.0);
        assert_eq!(json["recommendations"][0]["matchScore"], 130.8);
        assert!(json.get("note").is_none());
    }
}
