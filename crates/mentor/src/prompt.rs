//! Prompt text for the tutor and the advisor.

use database::Student;
use llm_core::ChatMessage;

use crate::ranker::RankedCourse;

const TUTOR_SYSTEM_PROMPT: &str = "You are a university AI tutor. Answer the student's question using only the provided course materials.
Rules:
1. Do not answer with anything that is not in the materials.
2. Cite your sources (for example \"[see Source 1]\").
3. Explain concisely and clearly.
4. If the materials do not cover the question, answer \"The course materials do not cover this topic.\"";

const ADVISOR_SYSTEM_PROMPT: &str = "You are an academic advisor who recommends courses that fit a student's competencies. Explain each recommendation concisely and clearly.";

/// Messages for a grounded tutor answer.
pub fn tutor_messages(context: &str, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(TUTOR_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Here are the relevant course materials:\n\n{}\n\nQuestion: {}",
            context, question
        )),
    ]
}

/// Messages asking for one short reason per ranked course, as JSON.
pub fn advisor_messages(student: &Student, ranked: &[RankedCourse<'_>]) -> Vec<ChatMessage> {
    let courses = ranked
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {} ({}) - match score: {}",
                i + 1,
                r.course.name,
                r.course.code,
                r.match_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let competencies = &student.competencies;
    let prompt = format!(
        r#"You are a university learning advisor. Read the student profile below and write a short reason for each recommended course.

Student:
- Name: {name}
- Competencies:
  * Creativity: {creativity}
  * Collaboration: {collaboration}
  * Problem solving: {problem_solving}

Recommended courses:
{courses}

Write one or two sentences per course. Respond in JSON:
{{
  "recommendations": [
    {{
      "courseCode": "CS101",
      "reason": "..."
    }}
  ]
}}"#,
        name = student.name,
        creativity = competencies.creativity,
        collaboration = competencies.collaboration,
        problem_solving = competencies.problem_solving,
        courses = courses,
    );

    vec![
        ChatMessage::system(ADVISOR_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::{CompetencyVector, Course};
    use llm_core::Role;

    #[test]
    fn test_tutor_messages() {
        let messages = tutor_messages("[Source 1: Stacks]\nLIFO", "What is a stack?");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[1].content.contains("[Source 1: Stacks]"));
        assert!(messages[1].content.ends_with("Question: What is a stack?"));
    }

    #[test]
    fn test_advisor_messages_list_courses() {
        let student = Student {
            id: 1,
            student_id: "2024001".to_string(),
            name: "Kim Minji".to_string(),
            email: None,
            department: None,
            grade: Some(2),
            competencies: CompetencyVector::new(75.0, 82.0, 68.0),
            created_at: String::new(),
        };
        let course = Course {
            id: 1,
            code: "CS101".to_string(),
            name: "Intro to Programming".to_string(),
            description: None,
            credits: Some(3),
            department: None,
            weights: CompetencyVector::new(0.6, 0.3, 0.9),
        };
        let ranked = vec![RankedCourse {
            course: &course,
            match_score: 130.8,
        }];

        let messages = advisor_messages(&student, &ranked);
        let user = &messages[1].content;
        assert!(user.contains("Name: Kim Minji"));
        assert!(user.contains("Collaboration: 82"));
        assert!(user.contains("1. Intro to Programming (CS101) - match score: 130.8"));
        assert!(user.contains("\"courseCode\": \"CS101\""));
    }
}
