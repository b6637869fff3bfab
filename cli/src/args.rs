use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nutriscan_core::domain::common::{
    DEFAULT_LLM_ENDPOINT, DEFAULT_LLM_MAX_TOKENS, DEFAULT_LLM_MODEL, LLMConfig, NutriScanConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutriscan", version, about = "Estimate nutrition from food photos")]
pub struct Args {
    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Analyze a single image and print the result
    Analyze {
        image: PathBuf,

        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start an interactive session (default)
    Shell,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    /// Without a key the offline demo analysis is used
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = DEFAULT_LLM_MODEL)]
    pub model: String,

    #[arg(long = "openai-api-url", env = "OPENAI_API_URL", default_value = DEFAULT_LLM_ENDPOINT)]
    pub endpoint: String,

    #[arg(long = "openai-max-tokens", env = "OPENAI_MAX_TOKENS", default_value_t = DEFAULT_LLM_MAX_TOKENS)]
    pub max_tokens: u32,

    #[arg(long = "openai-timeout-secs", env = "OPENAI_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for NutriScanConfig {
    fn from(args: Args) -> Self {
        let llm = args
            .llm
            .api_key
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| LLMConfig {
                api_key,
                model: args.llm.model,
                endpoint: args.llm.endpoint,
                max_tokens: args.llm.max_tokens,
                timeout_secs: args.llm.timeout_secs,
            });

        NutriScanConfig { llm }
    }
}
