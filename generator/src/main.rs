//! Landing page generator binary entry point

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args as ClapArgs, Parser, Subcommand};

use generator::{
    core::{write_artifacts, LandingPageGenerator},
    CredentialStore, GeminiProvider, GenerationClient, GenerationForm, GeneratorConfig, ProductBrief,
    ProductCategory, PromptBuilder, RealContentScraper, RealHistoryStore, SessionContext, Tone,
};
use shared::{logging, CredentialList, ModelCandidates, ModelId};

const COMPONENT: &str = "landing-generator";

/// AI landing page and copywriting generator
#[derive(Parser)]
#[command(name = "landing-generator")]
#[command(about = "Generates a landing page and its copywriting with Gemini")]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// API key; repeat for rotation (max 10). Overrides GOOGLE_API_KEY
    #[arg(long = "api-key", global = true)]
    api_keys: Vec<String>,

    /// Primary model, overrides GEMINI_PRIMARY_MODEL
    #[arg(long, global = true)]
    primary_model: Option<String>,

    /// Fallback model, overrides GEMINI_FALLBACK_MODEL
    #[arg(long, global = true)]
    fallback_model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a landing page and copy draft
    Generate(GenerateArgs),
    /// Suggest target audience, CTA and description for a product
    Suggest {
        /// Product name
        #[arg(long)]
        name: String,
    },
    /// Show stored competitor URLs
    History {
        /// History file, overrides COMPETITOR_HISTORY_FILE
        #[arg(long)]
        history_file: Option<PathBuf>,
    },
    /// List models that support content generation
    Models,
    /// Probe every configured API key
    Check,
}

#[derive(ClapArgs)]
struct GenerateArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Product description; inferred by the model when omitted
    #[arg(long, default_value = "")]
    description: String,

    /// Target audience; inferred by the model when omitted
    #[arg(long, default_value = "")]
    audience: String,

    /// Call to action text; inferred by the model when omitted
    #[arg(long, default_value = "")]
    cta: String,

    #[arg(long, value_enum, default_value_t = Tone::Personal)]
    tone: Tone,

    #[arg(long, value_enum, default_value_t = ProductCategory::Digital)]
    category: ProductCategory,

    /// Competitor page to observe, extract and modify
    #[arg(long)]
    competitor_url: Option<String>,

    /// Leave out sticky CTA, countdown, FAQ and trust badges
    #[arg(long)]
    no_boosters: bool,

    /// Ask the model to fill blank marketing fields before generating
    #[arg(long)]
    magic_fill: bool,

    /// Output directory, overrides LANDING_OUTPUT_DIR
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// History file, overrides COMPETITOR_HISTORY_FILE
    #[arg(long)]
    history_file: Option<PathBuf>,
}

type Generator = LandingPageGenerator<GeminiProvider, RealContentScraper, RealHistoryStore>;

fn build_generator(config: &GeneratorConfig) -> anyhow::Result<Generator> {
    let provider = GeminiProvider::from_config(config).context("building Gemini client")?;
    let scraper = RealContentScraper::new().context("building scraper client")?;

    Ok(LandingPageGenerator::new(
        GenerationClient::new(provider, config.models.clone()),
        scraper,
        RealHistoryStore::new(config.history_path.clone()),
        CredentialStore::new(config.default_credentials.clone()),
        PromptBuilder::new(config.language.clone()),
        config.scrape_timeout,
    ))
}

fn apply_overrides(config: &mut GeneratorConfig, args: &Args) -> anyhow::Result<()> {
    if args.primary_model.is_some() || args.fallback_model.is_some() {
        let primary = match &args.primary_model {
            Some(value) => ModelId::parse(value)?,
            None => config.models.primary.clone(),
        };
        let fallback = match &args.fallback_model {
            Some(value) => ModelId::parse(value)?,
            None => config.models.fallback.clone(),
        };
        config.models = ModelCandidates::new(primary, fallback);
    }

    match &args.command {
        Command::Generate(generate) => {
            if let Some(dir) = &generate.out_dir {
                config.output_dir = dir.clone();
            }
            if let Some(path) = &generate.history_file {
                config.history_path = path.clone();
            }
        }
        Command::History { history_file: Some(path) } => config.history_path = path.clone(),
        _ => {}
    }

    Ok(())
}

async fn run_generate(
    generator: &Generator,
    config: &GeneratorConfig,
    session: &mut SessionContext,
    api_keys: &[String],
    args: GenerateArgs,
) -> anyhow::Result<()> {
    if args.magic_fill {
        logging::log_progress(COMPONENT, "Magic fill", &args.name);
        let suggestions = generator.suggest_fields(session, &args.name, api_keys).await?;
        println!("Target audience: {}", suggestions.target_audience);
        println!("CTA: {}", suggestions.cta_text);
        println!("Description: {}", suggestions.product_desc);
    }

    let form = GenerationForm {
        brief: ProductBrief {
            name: args.name,
            description: args.description,
            target_audience: args.audience,
            cta_text: args.cta,
        },
        tone: args.tone,
        category: args.category,
        boosters: !args.no_boosters,
        competitor_url: args.competitor_url,
        api_keys: api_keys.to_vec(),
    };

    logging::log_progress(COMPONENT, "Generating", &form.brief.name);
    let page = generator.generate_page(session, form).await?;

    if page.parsed.decode_failed {
        eprintln!("Warning: copywriting could not be separated from the page; the raw response was saved as the page");
    }

    let written = write_artifacts(&page, &config.output_dir)
        .await
        .with_context(|| format!("writing output to {}", config.output_dir.display()))?;

    logging::log_success(
        COMPONENT,
        &format!(
            "Page generated with {} (key #{}, {} attempt(s))",
            page.model_used, page.credential_position, page.attempts
        ),
    );
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = GeneratorConfig::from_env()?;
    apply_overrides(&mut config, &args)?;

    let typed = CredentialList::try_from_input(&args.api_keys)?;
    let api_keys: Vec<String> = typed.iter().map(|credential| credential.expose().to_string()).collect();

    let generator = build_generator(&config)?;
    let mut session = SessionContext::new();

    match args.command {
        Command::Generate(generate) => run_generate(&generator, &config, &mut session, &api_keys, generate).await?,
        Command::Suggest { name } => {
            let suggestions = generator.suggest_fields(&mut session, &name, &api_keys).await?;
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        Command::History { .. } => {
            let urls = generator.competitor_history().await;
            if urls.is_empty() {
                println!("No competitor history yet");
            }
            for url in urls {
                println!("{url}");
            }
        }
        Command::Models => {
            let models = generator.list_models(&mut session, &api_keys).await?;
            for model in models.iter().filter(|model| model.supports_generate_content()) {
                match &model.display_name {
                    Some(display) => println!("{} ({display})", model.name),
                    None => println!("{}", model.name),
                }
            }
        }
        Command::Check => {
            let checks = generator.check_credentials(&mut session, &api_keys).await?;
            let mut working = 0usize;
            for check in &checks {
                match &check.result {
                    Ok(reply) => {
                        working += 1;
                        println!("#{} {}: OK ({reply})", check.position, check.masked);
                    }
                    Err(failure) => println!("#{} {}: FAILED ({failure})", check.position, check.masked),
                }
            }
            if working == 0 {
                bail!("none of the {} key(s) are working", checks.len());
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init_tracing_with_level(Some(args.log_level.as_str()));
    logging::log_startup(COMPONENT, "landing page generator");

    if let Err(e) = run(args).await {
        logging::log_error(COMPONENT, "Run", &e);
        return Err(e);
    }
    Ok(())
}
