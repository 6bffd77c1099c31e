mod render;

use clap::{Parser, Subcommand};
use prodlens_core::{
    categorize_deal, normalize_specifications, parse_discount_percent, proxied_image_url,
    AnalyzeRequest, DealInput, ProductView, Specification,
};
use prodlens_extract::Extractor;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prodlens-cli")]
#[command(about = "Amazon product analysis from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract and display a product page
    Analyze {
        /// Amazon product URL
        url: String,
        /// ZIP code for location-specific pricing
        #[arg(long)]
        zipcode: Option<String>,
        /// Print the raw extracted record as JSON instead of the summary
        #[arg(long)]
        json: bool,
        /// Route image links through the image proxy at this base URL
        #[arg(long)]
        proxy_base: Option<String>,
    },
    /// Rate a price reduction
    Deal {
        /// Discount as displayed, e.g. "-19%"
        #[arg(long, allow_hyphen_values = true)]
        discount: String,
        /// Absolute amount saved
        #[arg(long, default_value_t = 0.0)]
        savings: f64,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long)]
        initial_price: Option<f64>,
    },
    /// Rewrite an Amazon CDN image URL to go through the image proxy
    ProxyUrl {
        image_url: String,
        /// Server base URL
        #[arg(long, env = "MCP_URL", default_value = "http://localhost:3000")]
        base: String,
    },
    /// Deduplicate and order specification rows given as TYPE=VALUE
    Specs {
        #[arg(value_parser = parse_spec, required = true)]
        specs: Vec<Specification>,
    },
}

fn parse_spec(raw: &str) -> Result<Specification, String> {
    raw.split_once('=')
        .map(|(kind, value)| Specification::new(kind.trim(), value.trim()))
        .ok_or_else(|| format!("expected TYPE=VALUE, got '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            url,
            zipcode,
            json,
            proxy_base,
        } => run_analyze(url, zipcode, json, proxy_base.as_deref()).await?,
        Commands::Deal {
            discount,
            savings,
            currency,
            initial_price,
        } => {
            let info = categorize_deal(&DealInput {
                discount_percent: parse_discount_percent(&discount),
                savings,
                initial_price: initial_price.unwrap_or(0.0),
                currency,
            });
            println!("{}", render::deal_line(&info));
        }
        Commands::ProxyUrl { image_url, base } => {
            let rewritten =
                proxied_image_url(Some(&image_url), Some(&base)).unwrap_or(image_url);
            println!("{rewritten}");
        }
        Commands::Specs { specs } => {
            for spec in normalize_specifications(&specs) {
                println!("{}: {}", spec.kind, spec.value);
            }
        }
    }

    Ok(())
}

async fn run_analyze(
    url: String,
    zipcode: Option<String>,
    json: bool,
    proxy_base: Option<&str>,
) -> anyhow::Result<()> {
    let config = prodlens_core::load_app_config()?;
    let extractor = Extractor::from_config(&config)?;
    tracing::info!(url = %url, zipcode = ?zipcode, model = %config.openai_model, "analyzing product");
    let data = extractor
        .analyze(&AnalyzeRequest { url, zipcode })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "product analysis failed"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let view = ProductView::build(&data, proxy_base);
    if view.is_empty() {
        tracing::warn!("extracted record has no displayable sections");
        println!("No product data could be extracted.");
    } else {
        println!("{}", render::render(&view));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
