use crate::rest::{RestQuery, RestRequest};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Upper-case initials of first and last name, `?` when both are blank.
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

/// A `parent_students` row with the student embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLink {
    pub student: Student,
}

// Requests

#[derive(Debug, Clone)]
pub struct ListLinkedStudents {
    parent_id: Uuid,
}

impl ListLinkedStudents {
    pub fn new(parent_id: Uuid) -> Self {
        Self { parent_id }
    }
}

impl RestRequest for ListLinkedStudents {
    type Row = StudentLink;
    type Body = ();

    fn table(&self) -> &'static str {
        "parent_students"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select("student:students(*)")
            .eq("parent_id", self.parent_id)
    }
}

#[derive(Debug, Clone)]
pub struct FindStudent {
    registration_number: String,
}

impl FindStudent {
    pub fn new(registration_number: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
        }
    }
}

impl RestRequest for FindStudent {
    type Row = Student;
    type Body = ();

    fn table(&self) -> &'static str {
        "students"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select("*")
            .eq("registration_number", self.registration_number.trim())
            .limit(1)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkStudent {
    parent_id: Uuid,
    student_id: Uuid,
}

impl LinkStudent {
    pub fn new(parent_id: Uuid, student_id: Uuid) -> Self {
        Self {
            parent_id,
            student_id,
        }
    }
}

impl RestRequest for LinkStudent {
    type Row = ();
    type Body = Self;
    const METHOD: Method = Method::POST;

    fn table(&self) -> &'static str {
        "parent_students"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }

    fn prefer(&self) -> Option<&'static str> {
        Some("return=minimal")
    }
}

#[derive(Debug, Clone)]
pub struct UnlinkStudent {
    parent_id: Uuid,
    student_id: Uuid,
}

impl UnlinkStudent {
    pub fn new(parent_id: Uuid, student_id: Uuid) -> Self {
        Self {
            parent_id,
            student_id,
        }
    }
}

impl RestRequest for UnlinkStudent {
    type Row = ();
    type Body = ();
    const METHOD: Method = Method::DELETE;

    fn table(&self) -> &'static str {
        "parent_students"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .eq("parent_id", self.parent_id)
            .eq("student_id", self.student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(first: &str, last: &str) -> Student {
        Student {
            id: Uuid::nil(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            grade_level: None,
            school_name: None,
            registration_number: None,
        }
    }

    #[test]
    fn initials_fall_back_to_question_mark() {
        assert_eq!(student("grace", "mbuyi").initials(), "GM");
        assert_eq!(student("Élodie", "").initials(), "É");
        assert_eq!(student(" ", "").initials(), "?");
    }

    #[test]
    fn decodes_embedded_student() {
        let json = r#"[{"student":{
            "id":"2b0c1a8e-7c55-4c0f-8a9d-3e4b5c6d7e8f",
            "first_name":"Grace","last_name":"Mbuyi",
            "grade_level":"5th","school_name":"Ecole Lumiere"}}]"#;
        let rows: Vec<StudentLink> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].student.full_name(), "Grace Mbuyi");
        assert_eq!(rows[0].student.registration_number, None);
    }

    #[test]
    fn unlink_filters_on_both_columns() {
        let request = UnlinkStudent::new(Uuid::nil(), Uuid::max());
        let pairs = request.query().pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "parent_id");
        assert_eq!(pairs[1], ("student_id".to_string(), format!("eq.{}", Uuid::max())));
    }
}
