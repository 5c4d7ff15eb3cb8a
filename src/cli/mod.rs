//! Command-line front end for the content platform API
//!
//! Every service operation is available as `content-api <group> <operation>`,
//! and `content-api token ...` manages the token kept in the local store.
//!
//! ## Environment Variables
//!
//! - `API_BASE_URL` - API root (overridden by `--base-url`)
//! - `CONTENT_API_STORE` - Token store path (overridden by `--store`)
//! - `RUST_LOG` - Log filter
//!
//! These can be set in a `.env` file in the working directory.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;

use crate::auth::{LocalStore, StoredToken};
use crate::client::ApiClient;
use crate::config::{self, ENV_STORE_PATH};
use crate::protocol::ApiResponse;

#[derive(Parser, Debug)]
#[command(name = "content-api")]
#[command(about = "Call the AI content platform REST API", long_about = None)]
pub struct Cli {
    /// API root address (defaults to $API_BASE_URL, then http://localhost:8080/api/v1)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Token store path (defaults to $CONTENT_API_STORE, then the user data directory)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Request timeout in milliseconds (no timeout when omitted)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Content localization
    #[command(subcommand)]
    Content(ContentCommand),

    /// Competitor analysis
    #[command(subcommand)]
    Competitor(CompetitorCommand),

    /// Industry strategy
    #[command(subcommand)]
    Strategy(StrategyCommand),

    /// Trend analysis
    #[command(subcommand)]
    Trend(TrendCommand),

    /// Manage the stored bearer token
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(Subcommand, Debug)]
pub enum ContentCommand {
    /// Localize content for target regions
    Localize {
        /// Content as JSON (e.g. '{"text":"hi"}')
        #[arg(long)]
        content: String,

        /// Target region (repeatable)
        #[arg(long = "region", required = true)]
        regions: Vec<String>,
    },

    /// Performance of a content item across regions
    Performance {
        content_id: String,

        /// Region (repeatable)
        #[arg(long = "region", required = true)]
        regions: Vec<String>,
    },

    /// Localization strategy for a region
    Strategy {
        region: String,

        #[arg(long)]
        industry: String,
    },

    /// Engagement analytics for a region
    Engagement { region: String },

    /// Effectiveness of a content item in a region
    Effectiveness {
        content_id: String,

        #[arg(long)]
        region: String,
    },

    /// Optimization recommendations for a content item in a region
    Recommendations {
        content_id: String,

        #[arg(long)]
        region: String,
    },

    /// Start real-time monitoring of a content item
    Monitor {
        content_id: String,

        /// Region (repeatable)
        #[arg(long = "region", required = true)]
        regions: Vec<String>,
    },

    /// Suggested update timing for a content item in a region
    Timing {
        content_id: String,

        #[arg(long)]
        region: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CompetitorCommand {
    /// Analyze a list of competitors within an industry
    Analyze {
        #[arg(long)]
        industry: String,

        #[arg(required = true)]
        competitors: Vec<String>,
    },

    /// Competitive advantage summary for an industry
    Advantage { industry: String },

    /// Predict a competitor's next moves
    Predict {
        competitor: String,

        #[arg(long)]
        industry: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum StrategyCommand {
    /// Generate a strategy for an industry
    Generate { industry: String },

    /// Strategy for a niche within an industry
    Niche {
        #[arg(long)]
        industry: String,

        #[arg(long)]
        niche: String,
    },

    /// Optimize content for an industry
    Optimize {
        #[arg(long)]
        industry: String,

        /// Content as JSON
        #[arg(long)]
        content: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrendCommand {
    /// Trends for an industry
    Industry { industry: String },

    /// Trends for a region
    Region { region: String },

    /// Predicted trends for an industry and timeframe
    Predicted {
        #[arg(long)]
        industry: String,

        #[arg(long)]
        timeframe: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Save a bearer token
    Set { token: String },

    /// Print the saved token
    Show,

    /// Remove the saved token
    Clear,
}

/// Execute a parsed command line
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let store = open_store(cli.store.clone())?;

    match cli.command {
        Command::Token(command) => cmd_token(&store, command),
        command => {
            let client = build_client(cli.base_url.as_deref(), cli.timeout_ms, store)?;
            let response = dispatch(&client, command).await?;
            print_response(&response, cli.pretty)
        }
    }
}

fn open_store(path: Option<PathBuf>) -> anyhow::Result<LocalStore> {
    let path = path
        .or_else(|| std::env::var_os(ENV_STORE_PATH).map(PathBuf::from))
        .unwrap_or_else(config::default_store_path);
    LocalStore::open(&path)
        .with_context(|| format!("Failed to open token store at {}", path.display()))
}

fn build_client(
    base_url: Option<&str>,
    timeout_ms: Option<u64>,
    store: LocalStore,
) -> anyhow::Result<ApiClient> {
    let mut builder = ApiClient::builder().token_provider(StoredToken::new(store));
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    if let Some(ms) = timeout_ms {
        builder = builder.timeout_ms(ms);
    }
    Ok(builder.build()?)
}

/// Run one service operation
pub async fn dispatch(client: &ApiClient, command: Command) -> anyhow::Result<ApiResponse> {
    let response = match command {
        Command::Content(command) => {
            let service = client.content();
            match command {
                ContentCommand::Localize { content, regions } => {
                    let content = parse_json_arg(&content)?;
                    service
                        .localize_content(&content, &as_strs(&regions))
                        .await?
                }
                ContentCommand::Performance {
                    content_id,
                    regions,
                } => {
                    service
                        .regional_performance(&content_id, &as_strs(&regions))
                        .await?
                }
                ContentCommand::Strategy { region, industry } => {
                    service.regional_strategy(&region, &industry).await?
                }
                ContentCommand::Engagement { region } => {
                    service.engagement_analytics(&region).await?
                }
                ContentCommand::Effectiveness { content_id, region } => {
                    service.content_effectiveness(&content_id, &region).await?
                }
                ContentCommand::Recommendations { content_id, region } => {
                    service
                        .optimization_recommendations(&content_id, &region)
                        .await?
                }
                ContentCommand::Monitor {
                    content_id,
                    regions,
                } => {
                    service
                        .start_monitoring(&content_id, &as_strs(&regions))
                        .await?
                }
                ContentCommand::Timing { content_id, region } => {
                    service.update_timing(&content_id, &region).await?
                }
            }
        }
        Command::Competitor(command) => {
            let service = client.competitor();
            match command {
                CompetitorCommand::Analyze {
                    industry,
                    competitors,
                } => {
                    service
                        .analyze_competitors(&industry, &as_strs(&competitors))
                        .await?
                }
                CompetitorCommand::Advantage { industry } => {
                    service.competitive_advantage(&industry).await?
                }
                CompetitorCommand::Predict {
                    competitor,
                    industry,
                } => {
                    service
                        .predict_competitor_moves(&competitor, &industry)
                        .await?
                }
            }
        }
        Command::Strategy(command) => {
            let service = client.strategy();
            match command {
                StrategyCommand::Generate { industry } => {
                    service.generate_strategy(&industry).await?
                }
                StrategyCommand::Niche { industry, niche } => {
                    service.niche_strategy(&industry, &niche).await?
                }
                StrategyCommand::Optimize { industry, content } => {
                    let content = parse_json_arg(&content)?;
                    service.optimize_content(&industry, &content).await?
                }
            }
        }
        Command::Trend(command) => {
            let service = client.trend();
            match command {
                TrendCommand::Industry { industry } => service.industry_trends(&industry).await?,
                TrendCommand::Region { region } => service.regional_trends(&region).await?,
                TrendCommand::Predicted {
                    industry,
                    timeframe,
                } => service.predicted_trends(&industry, &timeframe).await?,
            }
        }
        Command::Token(_) => anyhow::bail!("token commands do not call the API"),
    };

    Ok(response)
}

fn cmd_token(store: &LocalStore, command: TokenCommand) -> anyhow::Result<()> {
    match command {
        TokenCommand::Set { token } => {
            store.set_token(&token)?;
            println!("{} Token saved", "✓".green());
        }
        TokenCommand::Show => match store.token()? {
            Some(token) => println!("{}", token),
            None => println!("{} No token saved", "!".yellow()),
        },
        TokenCommand::Clear => {
            if store.clear_token()? {
                println!("{} Token removed", "✓".green());
            } else {
                println!("{} No token saved", "!".yellow());
            }
        }
    }
    Ok(())
}

fn parse_json_arg(raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("Content must be valid JSON: {}", raw))
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn print_response(response: &ApiResponse, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(&response.data)?
    } else {
        serde_json::to_string(&response.data)?
    };
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_localize() {
        let cli = Cli::try_parse_from([
            "content-api",
            "content",
            "localize",
            "--content",
            r#"{"text":"hi"}"#,
            "--region",
            "US",
            "--region",
            "EU",
        ])
        .unwrap();

        match cli.command {
            Command::Content(ContentCommand::Localize { content, regions }) => {
                assert_eq!(content, r#"{"text":"hi"}"#);
                assert_eq!(regions, vec!["US", "EU"]);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "content-api",
            "trend",
            "predicted",
            "--industry",
            "retail",
            "--timeframe",
            "Q1",
            "--base-url",
            "http://api.test/v1",
            "--pretty",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://api.test/v1"));
        assert!(cli.pretty);
        assert!(matches!(
            cli.command,
            Command::Trend(TrendCommand::Predicted { .. })
        ));
    }

    #[test]
    fn test_analyze_requires_competitors() {
        let result = Cli::try_parse_from([
            "content-api",
            "competitor",
            "analyze",
            "--industry",
            "retail",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_token_set() {
        let cli = Cli::try_parse_from(["content-api", "token", "set", "abc"]).unwrap();
        match cli.command {
            Command::Token(TokenCommand::Set { token }) => assert_eq!(token, "abc"),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_json_arg() {
        assert_eq!(
            parse_json_arg(r#"{"text":"hi"}"#).unwrap(),
            serde_json::json!({"text": "hi"})
        );
        assert!(parse_json_arg("not json").is_err());
    }

    #[test]
    fn test_token_commands_against_store() {
        let store = LocalStore::open_in_memory().unwrap();
        cmd_token(&store, TokenCommand::Set { token: "abc".to_string() }).unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc"));

        cmd_token(&store, TokenCommand::Clear).unwrap();
        assert_eq!(store.token().unwrap(), None);
    }
}
