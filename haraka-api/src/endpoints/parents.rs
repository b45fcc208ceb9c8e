use crate::macros::setter;
use crate::rest::{RestQuery, RestRequest};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Common

/// One row per authenticated user, created by a backend trigger on signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Parent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetParent {
    user_id: Uuid,
}

impl GetParent {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

impl RestRequest for GetParent {
    type Row = Parent;
    type Body = ();

    fn table(&self) -> &'static str {
        "parents"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new()
            .select("*")
            .eq("user_id", self.user_id)
            .limit(1)
    }
}

/// Partial update of the parent's own profile. Unset fields are left alone.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateParent {
    #[serde(skip)]
    parent_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl UpdateParent {
    pub fn new(parent_id: Uuid) -> Self {
        Self {
            parent_id,
            first_name: None,
            last_name: None,
            phone: None,
        }
    }

    setter!(opt first_name: String);
    setter!(opt last_name: String);
    setter!(opt phone: String);
}

impl RestRequest for UpdateParent {
    type Row = Parent;
    type Body = Self;
    const METHOD: Method = Method::PATCH;

    fn table(&self) -> &'static str {
        "parents"
    }

    fn query(&self) -> RestQuery {
        RestQuery::new().eq("id", self.parent_id)
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(self)
    }

    fn prefer(&self) -> Option<&'static str> {
        Some("return=representation")
    }
}
