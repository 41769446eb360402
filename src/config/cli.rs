use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "moodle-notify")]
#[command(about = "Fetch Moodle popup notifications and print the newest as plain text")]
pub struct Cli {
    /// Path to the TOML configuration file carrying the [moodle] table.
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Fetch notifications for this user id instead of the logged-in user.
    #[arg(long)]
    pub user_id: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
