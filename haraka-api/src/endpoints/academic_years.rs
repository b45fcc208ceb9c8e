use crate::rest::{RestQuery, RestRequest};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Common

/// Exactly one row is expected to be active at a time. Nothing here enforces it;
/// the first active row wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

// Requests

#[derive(Debug, Clone, Default)]
pub struct GetActiveAcademicYear;

impl RestRequest for GetActiveAcademicYear {
    type Row = AcademicYear;
    type Body = ();

    fn table(&self) -> &'static str {
        "academic_years"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select("*")
            .eq("is_active", true)
            .limit(1)
    }
}
