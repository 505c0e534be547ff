use clap::Parser;

#[derive(Parser)]
#[command(name = "clip-relay")]
#[command(author, version)]
#[command(about = "Announces a Twitch channel's new clips on a Discord webhook.")]
pub struct Cli {
    #[arg(short = 'i', long = "client-id", env = "TWITCH_CLIENT_ID")]
    pub client_id: String,
    #[arg(
        short = 's',
        long = "client-secret",
        env = "TWITCH_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: String,
    #[arg(short = 'u', long, env = "TWITCH_USERNAME")]
    pub username: String,
    #[arg(
        short = 'w',
        long,
        env = "DISCORD_WEBHOOK",
        hide_env_values = true
    )]
    pub webhook: String,
    #[arg(long)]
    pub store: Option<String>,
    #[arg(short = 'o', long = "options-file")]
    pub options_file: Option<String>,
    #[arg(long)]
    pub debug: bool,
}
