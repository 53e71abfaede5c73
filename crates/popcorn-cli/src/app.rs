use std::io::Write as _;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use popcorn_api::{TmdbClient, TmdbError};
use popcorn_core::config::{AppConfig, API_KEY_ENV};
use popcorn_core::connectivity::{Connectivity, TcpProbe};
use popcorn_core::controller::{Completion, DisplayState, ListController};
use popcorn_core::error::CoreError;
use popcorn_core::locale;
use popcorn_core::saved_state::SavedState;
use popcorn_core::session::Session;

use crate::cli::Args;
use crate::render::Renderer;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn run(args: Args) -> Result<(), AppError> {
    if args.init_config {
        // Only file values are written; keys from the environment or flags stay out.
        AppConfig::load_file()?.save()?;
        println!("Wrote {}", AppConfig::config_path().display());
        return Ok(());
    }

    let mut config = AppConfig::load()?;
    apply_overrides(&mut config, &args);

    if config.tmdb.api_key.as_deref().unwrap_or_default().is_empty() {
        warn!("No TMDB API key configured");
        eprintln!(
            "popcorn: no API key; set {API_KEY_ENV}, pass --api-key, or edit {}",
            AppConfig::config_path().display()
        );
    }

    let language = locale::resolve_language(&config.general.language);
    let client = TmdbClient::from_config(&config.tmdb)?;
    let online = probe_connectivity(&client).await;

    let state_path = AppConfig::state_path();
    let saved = if args.fresh {
        SavedState::clear(&state_path)?;
        None
    } else {
        SavedState::load(&state_path).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable saved list");
            None
        })
    };
    info!(%language, online, restored = saved.is_some(), "Starting");

    let mut renderer = Renderer::new();
    if args.posters {
        renderer = renderer.with_posters(&config.tmdb.image_base_url, &config.tmdb.poster_size);
    }

    let controller = ListController::from_config(language.clone(), &config.general);
    let mut session = Session::new(client, controller);
    session.start(&online, saved);
    session.resumed(&language);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(renderer.frame(session.controller(), None).as_bytes())?;
    scroll_if_wanted(&mut session, args.pages);

    while let Some(completion) = session.next_completion().await {
        if completion == Completion::Stale {
            continue;
        }
        stdout.write_all(renderer.frame(session.controller(), Some(completion)).as_bytes())?;
        stdout.flush()?;
        scroll_if_wanted(&mut session, args.pages);
    }

    match session.controller().saved_state() {
        Some(snapshot) => snapshot.save(&state_path)?,
        None => SavedState::clear(&state_path)?,
    }
    Ok(())
}

/// Command-line values win over the file and the environment.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    config.apply_api_key(args.api_key.clone());
    if let Some(language) = args.language.clone() {
        config.general.language = language;
    }
}

/// Scroll to the last loaded item until `pages` pages are on screen.
fn scroll_if_wanted(session: &mut Session<TmdbClient>, pages: u32) {
    let controller = session.controller();
    if controller.state() != DisplayState::Content || session.pending() > 0 {
        return;
    }
    if controller.page() >= pages {
        return;
    }
    let last_visible = controller.movies().len().saturating_sub(1);
    session.scrolled(last_visible);
}

/// The connectivity check is a blocking TCP connect; keep it off the runtime.
async fn probe_connectivity(client: &TmdbClient) -> bool {
    let (Some(host), Some(port)) = (client.host(), client.port()) else {
        return false;
    };
    let probe = TcpProbe::new(host, port, PROBE_TIMEOUT);
    tokio::task::spawn_blocking(move || probe.is_online())
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err = AppError::from(CoreError::Config("bad value".into()));
        assert_eq!(err.to_string(), "config error: bad value");
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["popcorn", "--api-key", "from-flag", "--language", "ru"]);
        let mut config = AppConfig::default();
        config.apply_api_key(Some("from-env".into()));

        apply_overrides(&mut config, &args);
        assert_eq!(config.tmdb.api_key.as_deref(), Some("from-flag"));
        assert_eq!(config.general.language, "ru");
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = Args::parse_from(["popcorn"]);
        let mut config = AppConfig::default();
        config.apply_api_key(Some("from-env".into()));

        apply_overrides(&mut config, &args);
        assert_eq!(config.tmdb.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.general.language, "auto");
    }
}
