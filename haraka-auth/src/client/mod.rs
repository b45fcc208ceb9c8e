pub mod auth_client;
mod config;
mod session_storage;

pub use auth_client::SupabaseAuthClient;
pub use config::Settings;
pub use session_storage::SessionStore;

use crate::common::StoredSession;
use crate::error::AuthError;
use secrecy::SecretString;
use std::io::Write;

/// Load and validate settings, explaining what is missing on failure.
pub fn load_settings() -> Result<Settings, AuthError> {
    let settings = Settings::new().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        AuthError::Configuration(e.to_string())
    })?;

    settings.validate().map_err(|e| {
        eprintln!("Configuration validation failed: {}", e);
        eprintln!("\nSet SUPABASE_URL and SUPABASE_ANON_KEY (or the EXPO_PUBLIC_ variants),");
        eprintln!("or create a config.toml file with the following content:");
        eprintln!("\nsupabase_url = \"https://your-project.supabase.co\"");
        eprintln!("supabase_anon_key = \"your-anon-key\"");
        eprintln!("api_base_url = \"https://your-payments-api.example.com\"");
        AuthError::Configuration(e)
    })?;

    Ok(settings)
}

/// Authenticate the parent before starting the TUI.
/// Returns a valid session or an error.
pub async fn authenticate(settings: &Settings) -> Result<StoredSession, AuthError> {
    let auth_client =
        SupabaseAuthClient::new(&settings.supabase_url, settings.supabase_anon_key.clone())?;
    let session_store = SessionStore::new()?;

    // Check for existing session
    if let Some(session) = session_store.load_session()? {
        if !session_store.is_session_expired(&session) {
            return Ok(session);
        }

        println!("Session expired, attempting to refresh...");
        match auth_client.refresh_session(&session.refresh_token).await {
            Ok(new_session) => {
                session_store.save_session(&new_session)?;
                println!("✓ Session refreshed");
                return Ok(new_session);
            }
            Err(e) => {
                eprintln!("Failed to refresh session: {}", e);
                session_store.delete_session()?;
            }
        }
    }

    println!("\n=== HarakaPay sign-in ===\n");
    let email = prompt("Email: ")?;
    if email.is_empty() {
        return Err(AuthError::Cancelled);
    }
    let password = secret_or_cancel(rpassword::prompt_password("Password: ")?)?;

    let session = auth_client.sign_in_with_password(&email, &password).await?;

    session_store.save_session(&session)?;
    println!("✓ Signed in as {}\n", session.user.email.as_deref().unwrap_or(&email));

    Ok(session)
}

/// Sign out on the server and forget the stored session.
pub async fn logout(settings: &Settings) -> Result<(), AuthError> {
    let session_store = SessionStore::new()?;

    if let Some(session) = session_store.load_session()? {
        let auth_client =
            SupabaseAuthClient::new(&settings.supabase_url, settings.supabase_anon_key.clone())?;
        // The local session is removed even if the server call fails
        if let Err(e) = auth_client.sign_out(&session.access_token).await {
            tracing::warn!("Server sign-out failed: {}", e);
            eprintln!("Server sign-out failed: {}", e);
        }
    }

    session_store.delete_session()
}

fn prompt(label: &str) -> Result<String, AuthError> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Passwords are taken as typed, only an empty one cancels.
fn secret_or_cancel(password: String) -> Result<SecretString, AuthError> {
    if password.is_empty() {
        return Err(AuthError::Cancelled);
    }
    Ok(SecretString::from(password))
}
