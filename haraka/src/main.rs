use anyhow::Result;

use haraka::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = haraka_auth::load_settings()?;

    if std::env::args().skip(1).any(|arg| arg == "--logout") {
        haraka_auth::logout(&settings).await?;
        println!("Signed out.");
        return Ok(());
    }

    let session = haraka_auth::authenticate(&settings).await?;

    // Logging is initialized in App::run() with buffer support
    App::new(settings, session).run().await?;

    Ok(())
}
