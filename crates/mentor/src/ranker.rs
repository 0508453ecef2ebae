//! Competency match ranking and recommendation reasons.

use std::collections::HashMap;

use database::{CompetencyVector, Course};
use serde::Deserialize;

/// How many courses a recommendation run returns.
pub const TOP_COURSES: usize = 5;

/// A course with its match score for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCourse<'a> {
    pub course: &'a Course,
    pub match_score: f64,
}

/// Weighted sum of competencies and course weights, rounded to two decimals.
///
/// Weights are not normalized, so the result can exceed 100.
pub fn match_score(student: &CompetencyVector, weights: &CompetencyVector) -> f64 {
    round2(
        student.creativity * weights.creativity
            + student.collaboration * weights.collaboration
            + student.problem_solving * weights.problem_solving,
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score every course, sort by descending match score and keep the first
/// `limit`. Equal scores keep their input order.
pub fn rank_courses<'a>(
    student: &CompetencyVector,
    courses: &'a [Course],
    limit: usize,
) -> Vec<RankedCourse<'a>> {
    let mut ranked: Vec<RankedCourse<'a>> = courses
        .iter()
        .map(|course| RankedCourse {
            course,
            match_score: match_score(student, &course.weights),
        })
        .collect();

    ranked.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    ranked.truncate(limit);
    ranked
}

/// Templated reason used when no generated reason is available.
pub fn fallback_reason(match_score: f64) -> String {
    format!(
        "This course matches your competencies at {:.1}%.",
        match_score
    )
}

#[derive(Debug, Deserialize)]
struct ReasonsPayload {
    #[serde(default)]
    recommendations: Vec<ReasonEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReasonEntry {
    #[serde(default)]
    course_code: String,
    #[serde(default)]
    reason: String,
}

/// Remove a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse generated reasons into a course code to reason map.
///
/// Models sometimes wrap the object in prose, so when the fenced text is not
/// valid JSON the outermost `{...}` slice is tried as well. Blank reasons are
/// skipped so that the caller falls back for those courses.
pub fn parse_reasons(raw: &str) -> Result<HashMap<String, String>, serde_json::Error> {
    let cleaned = strip_code_fence(raw);
    let payload: ReasonsPayload = match serde_json::from_str(cleaned) {
        Ok(payload) => payload,
        Err(e) => match outer_object(cleaned) {
            Some(object) => serde_json::from_str(object)?,
            None => return Err(e),
        },
    };

    // The first usable entry for a code wins
    let mut reasons = HashMap::new();
    for entry in payload.recommendations {
        if entry.course_code.is_empty() || entry.reason.trim().is_empty() {
            continue;
        }
        reasons
            .entry(entry.course_code)
            .or_insert_with(|| entry.reason.trim().to_string());
    }
    Ok(reasons)
}

fn outer_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, code: &str, weights: CompetencyVector) -> Course {
        Course {
            id,
            code: code.to_string(),
            name: format!("Course {}", code),
            description: None,
            credits: Some(3),
            department: None,
            weights,
        }
    }

    #[test]
    fn test_worked_example() {
        let student = CompetencyVector::new(75.0, 82.0, 68.0);
        let weights = CompetencyVector::new(0.6, 0.3, 0.9);
        assert_eq!(match_score(&student, &weights), 130.8);
    }

    #[test]
    fn test_match_score_rounds_to_two_decimals() {
        let student = CompetencyVector::new(33.333, 0.0, 0.0);
        let weights = CompetencyVector::new(1.0, 0.5, 0.5);
        assert_eq!(match_score(&student, &weights), 33.33);
    }

    #[test]
    fn test_rank_sorted_and_limited() {
        let student = CompetencyVector::new(80.0, 50.0, 20.0);
        let courses: Vec<Course> = (1..=7)
            .map(|i| {
                let w = i as f64 / 10.0;
                course(i, &format!("C{}", i), CompetencyVector::new(w, 0.1, 0.1))
            })
            .collect();

        let ranked = rank_courses(&student, &courses, TOP_COURSES);
        assert_eq!(ranked.len(), TOP_COURSES);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].match_score >= pair[1].match_score));
        assert_eq!(ranked[0].course.code, "C7");
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let student = CompetencyVector::new(50.0, 50.0, 50.0);
        let same = CompetencyVector::new(0.3, 0.3, 0.4);
        let courses = vec![
            course(1, "B", same),
            course(2, "TOP", CompetencyVector::new(1.0, 1.0, 1.0)),
            course(3, "A", same),
            course(4, "C", same),
        ];

        let ranked = rank_courses(&student, &courses, TOP_COURSES);
        let codes: Vec<_> = ranked.iter().map(|r| r.course.code.as_str()).collect();
        assert_eq!(codes, vec!["TOP", "B", "A", "C"]);
    }

    #[test]
    fn test_rank_fewer_courses_than_limit() {
        let student = CompetencyVector::new(10.0, 10.0, 10.0);
        let courses = vec![course(1, "ONLY", CompetencyVector::new(1.0, 0.0, 0.0))];
        assert_eq!(rank_courses(&student, &courses, TOP_COURSES).len(), 1);
        assert!(rank_courses(&student, &[], TOP_COURSES).is_empty());
    }

    #[test]
    fn test_fallback_reason() {
        assert_eq!(
            fallback_reason(130.8),
            "This course matches your competencies at 130.8%."
        );
        assert_eq!(
            fallback_reason(72.0),
            "This course matches your competencies at 72.0%."
        );
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {} "), "{}");
    }

    #[test]
    fn test_parse_reasons() {
        let raw = r#"```json
{
  "recommendations": [
    {"courseCode": "CS101", "reason": "Builds on your problem solving."},
    {"courseCode": "DS201", "reason": "   "},
    {"reason": "no code"}
  ]
}
```"#;

        let reasons = parse_reasons(raw).unwrap();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons["CS101"], "Builds on your problem solving.");
    }

    #[test]
    fn test_parse_reasons_keeps_first_duplicate() {
        let raw = r#"{"recommendations":[
            {"courseCode":"CS101","reason":"first"},
            {"courseCode":"CS101","reason":"second"},
            {"courseCode":"CS201","reason":" "},
            {"courseCode":"CS201","reason":"usable"}
        ]}"#;

        let reasons = parse_reasons(raw).unwrap();
        assert_eq!(reasons["CS101"], "first");
        assert_eq!(reasons["CS201"], "usable");
    }

    #[test]
    fn test_parse_reasons_rejects_prose() {
        assert!(parse_reasons("Sure! Here are some reasons.").is_err());
        assert!(parse_reasons("").is_err());
    }

    #[test]
    fn test_parse_reasons_inside_prose() {
        let raw = "Here you go:\n{\"recommendations\":[{\"courseCode\":\"AI301\",\"reason\":\"Fits.\"}]}\nGood luck!";
        assert_eq!(parse_reasons(raw).unwrap()["AI301"], "Fits.");
    }

    #[test]
    fn test_parse_reasons_missing_list() {
        assert!(parse_reasons("{}").unwrap().is_empty());
    }
}
