use haraka_api::{HarakaApiError, Request, SupabaseClient};
use secrecy::SecretString;
use uuid::Uuid;

#[tokio::main]
pub async fn main() -> Result<(), HarakaApiError> {
    let client = SupabaseClient::new(
        "https://project.supabase.co",
        SecretString::from("anon_key"),
        SecretString::from("access_token"),
    )?;

    let parent = client
        .fetch_one(Request::parents().for_user(Uuid::nil()))
        .await?
        .ok_or_else(|| HarakaApiError::NotFound("parent profile".to_string()))?;

    let students = client.fetch(Request::students().linked(parent.id)).await?;
    let year = client.fetch_one(Request::academic_years().active()).await?;

    if let Some(year) = year {
        let ids = students.iter().map(|link| link.student.id).collect();
        let _assignments = client
            .fetch(Request::fee_assignments().for_students(ids, year.id))
            .await?;
    }
    Ok(())
}
