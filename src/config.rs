//! Configuration and CLI argument handling

use clap::Parser;
use url::Url;

use crate::{dispatch::DispatchSettings, services::AnalyticsSettings};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "prayer-cloud")]
#[command(about = "A prayer timer that hands finished reflections off to a messaging app")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20553")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Messaging recipient that receives reflections (phone number without '+')
    #[arg(short, long)]
    pub recipient: String,

    /// Base of the messaging deep link
    #[arg(long, default_value = "https://wa.me")]
    pub deep_link_base: String,

    /// Form-ingestion endpoint for anonymous stats; stats are skipped when unset
    #[arg(long)]
    pub analytics_url: Option<Url>,

    /// Form field that receives the prayer duration
    #[arg(long, default_value = "entry.123456789")]
    pub duration_field: String,

    /// Form field that receives the reflection snippet
    #[arg(long, default_value = "entry.987654321")]
    pub reflection_field: String,

    /// Link copied by the invite button (defaults to this server's address)
    #[arg(long)]
    pub invite_url: Option<String>,

    /// Clipboard program and arguments, fed the text on stdin
    #[arg(long)]
    pub clipboard_command: Option<String>,

    /// Log deep links instead of opening them
    #[arg(long)]
    pub no_open: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Link shared by the invite button
    pub fn invite_url(&self) -> String {
        match &self.invite_url {
            Some(url) => url.clone(),
            None => {
                let host = if self.host == "0.0.0.0" { "localhost" } else { self.host.as_str() };
                format!("http://{}:{}/", host, self.port)
            }
        }
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            recipient: self.recipient.clone(),
            deep_link_base: self.deep_link_base.clone(),
            invite_url: self.invite_url(),
        }
    }

    /// Analytics settings, or `None` when no endpoint is configured
    pub fn analytics_settings(&self) -> Option<AnalyticsSettings> {
        self.analytics_url.as_ref().map(|endpoint| AnalyticsSettings {
            endpoint: endpoint.clone(),
            duration_field: self.duration_field.clone(),
            reflection_field: self.reflection_field.clone(),
        })
    }
}
