use anyhow::Context;
use clap::Parser;
use moodle_notify::utils::{logger, validation::Validate};
use moodle_notify::{Cli, ConfigProvider, DigestEngine, MoodleClient, MoodleConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting moodle-notify");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    let config = MoodleConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let mut client = MoodleClient::from_config(&config)?;

    if !client.login(config.username(), config.password()).await? {
        tracing::error!("login rejected for user {}", config.username());
        eprintln!("❌ Login rejected for {}", config.username());
        std::process::exit(1);
    }

    let site_info = client.get_site_info().await?;
    if let Some(name) = site_info.fullname.as_deref() {
        tracing::info!("logged in as {}", name);
    }

    let user_id = cli
        .user_id
        .or_else(|| client.session().user_id())
        .context("no target user id available")?;

    let engine = DigestEngine::new(client);
    let digest = engine.run(user_id).await?;

    println!("You have {} unread notifications.", digest.unread);

    match digest.newest {
        Some(newest) => {
            println!();
            if let Some(subject) = newest.subject.as_deref() {
                println!("Subject: {}", subject);
            }
            if let Some(time) = newest.time_created {
                println!("Received: {}", time.format("%Y-%m-%d %H:%M UTC"));
            }
            println!("--------");
            println!("{}", newest.body);
        }
        None => println!("No notifications."),
    }

    Ok(())
}
