use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use seo_editorial_planner::{
    logging,
    planner::{IdeaSource, Stage},
    Credentials, Error, EditorialPlan, EditorialPlanner, PlanRequest, PlannerConfig, SiteInfo,
};

#[derive(Debug, Parser)]
#[command(name = "seo-planner", version, about = "SEO editorial plan generator")]
struct Cli {
    /// Config file (defaults to planner.toml or config/planner.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build an editorial plan and save it as a spreadsheet
    Generate(GenerateArgs),
    /// Write a commented sample config file
    SampleConfig {
        #[arg(long, default_value = "planner.toml.example")]
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Site name
    #[arg(long)]
    site_name: String,
    /// Site URL
    #[arg(long)]
    site_url: String,
    /// "About us" description: company, values, tone of voice
    #[arg(long)]
    about: String,
    /// Goals for the articles (organic traffic, leads, ...)
    #[arg(long)]
    goals: String,
    /// Topics the articles must not cover
    #[arg(long, default_value = "")]
    avoid: String,
    /// Competitor URL (repeat up to three times)
    #[arg(long = "competitor")]
    competitors: Vec<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_key: Option<String>,
    #[arg(long, env = "SEMRUSH_API_KEY", hide_env_values = true)]
    semrush_key: Option<String>,
    #[arg(long, env = "SERPER_API_KEY", hide_env_values = true)]
    serper_key: Option<String>,

    /// Directory the spreadsheet is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Skip the language model and use the template idea generator
    #[arg(long)]
    fallback_ideas: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}", failure_message(&e));
        std::process::exit(1);
    }
}

/// One-line message for a failed command
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<Error>() {
        Some(input) if input.is_input_error() => format!("⚠️  {}", input),
        _ => format!("❌ {:#}", err),
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::SampleConfig { path } => {
            PlannerConfig::write_sample(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("📝 Sample config written to {}", path.display());
            println!("💡 Copy it to planner.toml and edit as needed");
            Ok(())
        }
        Command::Generate(args) => {
            let mut config = PlannerConfig::load(cli.config.as_deref())?;
            if args.fallback_ideas {
                config.plan.prefer_fallback = true;
            }
            let _log_guard = logging::init(&config.log)?;
            generate(config, args).await
        }
    }
}

async fn generate(config: PlannerConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let request = PlanRequest {
        site: SiteInfo {
            name: args.site_name,
            url: args.site_url,
            about: args.about,
            goals: args.goals,
            avoid_topics: args.avoid,
        },
        competitors: args.competitors,
    };
    request.validate()?;

    let credentials = Credentials::new(args.openai_key, args.semrush_key, args.serper_key);
    let planner = EditorialPlanner::new(&config, &credentials)?;

    let plan = planner
        .run(&request, |stage| {
            println!("[{:>3}%] {}", stage.percent(), stage.label());
            if stage == Stage::Done {
                println!();
            }
        })
        .await
        .context("editorial plan generation failed")?;

    print_plan(&plan);

    let path = plan.save(&args.output_dir)?;
    println!("📥 Editorial plan saved to {}", path.display());
    Ok(())
}

fn print_plan(plan: &EditorialPlan) {
    println!("📋 Editorial plan preview");
    for (i, row) in plan.rows.iter().enumerate() {
        println!(
            "{:>2}. [{:<6}] {}  {}",
            i + 1,
            row.priority.label(),
            row.suggested_date,
            row.title
        );
    }
    println!();
    println!("Articles generated:   {}", plan.articles());
    println!("Keywords analyzed:    {}", plan.keywords_analyzed());
    println!("Competitors analyzed: {}", plan.competitors_analyzed);
    println!("High priority:        {}", plan.high_priority());
    if let IdeaSource::Fallback { reason } = &plan.idea_source {
        println!("Ideas source:         templates ({})", reason);
    }

    if !plan.warnings.is_empty() {
        println!();
        for warning in &plan.warnings {
            println!("⚠️  {}", warning);
        }
    }
    println!();
}
