use anyhow::Context;
use clap::Parser;
use tickview_core::client::http::HttpMarketApi;
use tickview_core::lookup::{FetchOrchestrator, RequestState, SubmitOutcome};
use tickview_core::suggest::Suggester;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "tickview_cli")]
struct Args {
    /// Ticker symbol to look up (case-insensitive).
    symbol: Option<String>,

    /// Print autocomplete matches for this prefix instead of running a lookup.
    #[arg(long)]
    suggest: Option<String>,

    /// Backend origin serving /history and /predict. Overrides TICKVIEW_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Autocomplete is offline and needs no settings.
    if let Some(prefix) = args.suggest.as_deref() {
        let suggester = Suggester::default();
        print!("{}", render::suggestions_text(&suggester.matches(prefix)));
        return Ok(());
    }

    let mut settings = tickview_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    if let Some(base_url) = args.base_url {
        settings.base_url = Some(base_url);
    }

    let api = HttpMarketApi::from_settings(&settings).context("market api setup failed")?;
    let orchestrator = FetchOrchestrator::new(api, render::TerminalView::default());

    let outcome = orchestrator
        .submit(args.symbol.as_deref().unwrap_or_default())
        .await;
    print!("{}", orchestrator.view().report());

    match outcome {
        SubmitOutcome::Settled(RequestState::Ready) => Ok(()),
        SubmitOutcome::Settled(RequestState::Failed(failure)) => {
            let err = anyhow::Error::new(failure.error)
                .context(format!("{} stage failed", failure.stage));
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %format!("{err:#}"), "lookup failed");
            Err(err)
        }
        SubmitOutcome::Rejected(err) => Err(err.into()),
        other => anyhow::bail!("lookup ended without a result: {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_parses_without_symbol() {
        let args = Args::try_parse_from(["tickview_cli", "--suggest", "tc"]).unwrap();
        assert_eq!(args.suggest.as_deref(), Some("tc"));
        assert!(args.symbol.is_none());
    }

    #[test]
    fn lookup_args_parse_symbol_and_base_url() {
        let args =
            Args::try_parse_from(["tickview_cli", "TCS", "--base-url", "http://127.0.0.1:5000"])
                .unwrap();
        assert_eq!(args.symbol.as_deref(), Some("TCS"));
        assert_eq!(args.base_url.as_deref(), Some("http://127.0.0.1:5000"));
    }
}

fn init_sentry(settings: &tickview_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
