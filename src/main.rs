use clap::Parser;
use tracing_subscriber::EnvFilter;

use netguardian::app::Application;
use netguardian::cli::Args;
use netguardian::commands::dispatcher::create_command_registry;
use netguardian::config::ConnectionSettings;
use netguardian::core::error::AgentError;
use netguardian::fleet::mock::mock_snapshot;

fn merge_settings(mut settings: ConnectionSettings, args: &Args) -> ConnectionSettings {
    if args.model.is_some() || args.base_url.is_some() || args.api_key.is_some() {
        settings.use_custom_endpoint = true;
    }
    if let Some(model) = &args.model {
        settings.model_name = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(api_key) = &args.api_key {
        settings.api_key = api_key.clone();
    }
    settings
}

#[tokio::main]
async fn main() -> Result<(), AgentError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let settings = merge_settings(ConnectionSettings::load(), &args);
    let snapshot = mock_snapshot();

    let mut app = Application::new(args, &snapshot, create_command_registry());
    app.run(settings, snapshot).await
}
