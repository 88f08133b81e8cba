use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// One-shot operator request; omit to start an interactive session
    pub query: Option<String>,

    /// Model to use (implies custom endpoint settings)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Endpoint base URL (implies custom endpoint settings)
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key for the custom endpoint
    #[arg(long)]
    pub api_key: Option<String>,
}
