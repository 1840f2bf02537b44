//! CLI entrypoint for ai-arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use arena_application::{BattleConfig, ChatGateway, ProbeProviderUseCase};
use arena_domain::{ConfigIssue, SessionMode, Severity};
use arena_infrastructure::{
    ConfigLoader, FileConfig, GeminiAdapter, OpenAiAdapter, ProviderAdapter, RoutingGateway,
};
use arena_presentation::{
    ArenaServer, ChatArgs, ChatRepl, Cli, Command, ConsoleFormatter, ProgressReporter, ServeArgs,
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    check_config(&config)?;

    info!("Starting ai-arena");

    // === Dependency Injection ===
    let gateway = Arc::new(build_gateway(&config)?);
    for (provider, env_var) in gateway.missing_credentials() {
        warn!(provider = %provider, "{} is not set; calls to {} will fail", env_var, provider);
        eprintln!(
            "{}",
            ConsoleFormatter::format_error(&format!(
                "{} is not set; {} is unavailable",
                env_var,
                provider.display_name()
            ))
        );
    }

    match cli.command {
        Some(Command::Serve(args)) => serve(&config, args, gateway).await,
        Some(Command::Probe { provider }) => {
            let use_case = ProbeProviderUseCase::new(gateway);
            let spinner = ProgressReporter::spinner(
                provider.display_name(),
                "sending test greeting...",
            );
            let result = use_case.execute(provider).await;
            spinner.finish_and_clear();

            let report = result.with_context(|| format!("Probe of {} failed", provider))?;
            println!("{}", ConsoleFormatter::format_probe(&report));
            Ok(())
        }
        Some(Command::Chat(args)) => chat(&config, args, gateway).await,
        None => chat(&config, ChatArgs::default(), gateway).await,
    }
}

/// Route logs to stderr, or to `--log-file` through a background writer.
///
/// `RUST_LOG` wins over the `-v` count when set.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(path) = cli.log_file.as_ref() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Print every issue; refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => eprintln!("warning: {}", issue.message),
            Severity::Error => eprintln!("error: {}", issue.message),
        }
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }
    Ok(())
}

fn build_gateway(config: &FileConfig) -> Result<RoutingGateway> {
    let openai = OpenAiAdapter::new(&config.providers.openai)
        .context("Failed to initialize OpenAI provider")?;
    let gemini = GeminiAdapter::new(&config.providers.gemini)
        .context("Failed to initialize Gemini provider")?;
    let providers: Vec<Arc<dyn ProviderAdapter>> = vec![Arc::new(openai), Arc::new(gemini)];
    Ok(RoutingGateway::new(providers))
}

async fn serve(config: &FileConfig, args: ServeArgs, gateway: Arc<RoutingGateway>) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }
    let address = server_config.bind_address();

    let (battle, _) = config.battle.to_battle_config();
    let gateway: Arc<dyn ChatGateway> = gateway;
    println!("AI Arena relay listening on http://{}", address);
    ArenaServer::new(gateway, battle.system_instruction)
        .serve(&address)
        .await
        .with_context(|| format!("Server on {} failed", address))
}

async fn chat(config: &FileConfig, args: ChatArgs, gateway: Arc<RoutingGateway>) -> Result<()> {
    let battle = apply_chat_overrides(config.battle.to_battle_config().0, &args)?;
    let mode = if args.battle {
        SessionMode::Battle
    } else {
        SessionMode::Manual
    };

    ChatRepl::new(gateway, battle)
        .with_mode(mode)
        .with_progress(!args.no_progress)
        .run()
        .await?;
    Ok(())
}

fn apply_chat_overrides(mut battle: BattleConfig, args: &ChatArgs) -> Result<BattleConfig> {
    if let Some(provider) = args.slot_a {
        battle.participants.a = provider;
    }
    if let Some(provider) = args.slot_b {
        battle.participants.b = provider;
    }
    if let Some(secs) = args.pacing_secs {
        battle.pacing = Duration::from_secs(secs);
    }
    if let Some(max) = args.max_turns {
        if max == 0 {
            bail!("--max-turns must be at least 1");
        }
        battle.max_turns = Some(max);
    }
    Ok(battle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::ProviderKind;

    #[test]
    fn test_chat_overrides() {
        let args = ChatArgs {
            slot_a: Some(ProviderKind::Gemini),
            pacing_secs: Some(0),
            max_turns: Some(6),
            ..ChatArgs::default()
        };
        let battle = apply_chat_overrides(BattleConfig::default(), &args).unwrap();
        assert_eq!(battle.participants.a, ProviderKind::Gemini);
        assert_eq!(battle.participants.b, ProviderKind::Gemini);
        assert_eq!(battle.pacing, Duration::ZERO);
        assert_eq!(battle.max_turns, Some(6));
    }

    #[test]
    fn test_zero_max_turns_rejected() {
        let args = ChatArgs {
            max_turns: Some(0),
            ..ChatArgs::default()
        };
        assert!(apply_chat_overrides(BattleConfig::default(), &args).is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(check_config(&FileConfig::default()).is_ok());
    }
}
