use std::net::SocketAddr;
use std::path::Path;
use std::process;
use std::sync::Arc;

use alexa::Alexa;
use alexa_skill::audio::AudioSkill;
use alexa_skill::config::Setup;
use alexa_skill::skill::DeploymentSkill;
use alexa_skill::version::VERSION;
use alexa_skill::web::skill_route;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(err) = app().await {
        // Logging might not have been set up yet if loading the config failed
        let _ = tracing_subscriber::fmt().try_init();

        error!("Error: {err}");
        let mut cause = err.source();
        while let Some(c) = cause {
            error!("Cause: {c}");
            cause = c.source();
        }
        process::exit(1);
    }
}

async fn app() -> anyhow::Result<()> {
    let setup = Setup::load(Path::new(&format!(
        "{}.toml",
        std::env!("CARGO_PKG_NAME")
    )))?;

    let logger = setup.logger()?;
    tracing::dispatcher::set_global_default(logger.clone())?;

    info!(version = VERSION, "alexa_skill");

    if setup.application_id.is_none() {
        info!("No application id configured, accepting requests for any skill");
    }

    let alexa = Arc::new(Alexa::new(setup.application_id.as_deref()).with_logger(logger));

    let mut app = Router::new().route(
        "/skill",
        skill_route(alexa.clone(), DeploymentSkill::new(&setup.skill.name), ()),
    );

    if let Some(audio) = setup.audio {
        info!(title = %audio.title, tracks = audio.tracks.len(), "Serving audio skill");
        app = app.route(
            "/audio",
            skill_route(alexa, AudioSkill::new(&audio.title, audio.tracks)?, ()),
        );
    }

    // Start the web server
    let addr: SocketAddr = setup.fulfillment.into();
    info!("Server started on http://{addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
