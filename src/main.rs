//! `browser-search` command-line entry point

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use browser_search::config::SearchDefaults;
use browser_search::output;
use browser_search::utils::CONTENT_EXTRACTION_LIMIT;
use browser_search::{
    BrowserManager, EngineRegistry, ExtractOptions, RecencyFilter, aggregate, build_plan,
    enrich_with_content, execute_plan, extract_content, parse_engines, summarize, validation,
};

/// Web search through a real Chromium browser.
#[derive(Parser)]
#[command(name = "browser-search", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search one or more engines for a query.
    Search(SearchArgs),

    /// Extract the main text of a web page.
    Extract(ExtractArgs),

    /// Build (and optionally run) a multi-keyword search plan for a topic.
    Plan(PlanArgs),
}

impl Command {
    fn common(&self) -> &CommonArgs {
        match self {
            Self::Search(a) => &a.common,
            Self::Extract(a) => &a.common,
            Self::Plan(a) => &a.common,
        }
    }
}

/// Flags shared by every command
#[derive(Args, Clone)]
struct CommonArgs {
    /// Per-search timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Run the browser headless
    #[arg(long, overrides_with = "no_headless")]
    headless: bool,

    /// Show the browser window
    #[arg(long = "no-headless", overrides_with = "headless")]
    no_headless: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl CommonArgs {
    fn headless_override(&self) -> Option<bool> {
        match (self.headless, self.no_headless) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Environment defaults with these flags applied on top
    fn defaults(&self) -> Result<SearchDefaults> {
        let base = SearchDefaults::from_env()?;
        let mut builder = base.to_builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout_secs(timeout);
        }
        if let Some(headless) = self.headless_override() {
            builder = builder.headless(headless);
        }
        Ok(builder.build()?)
    }
}

#[derive(Args)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Number of results per engine
    #[arg(short = 'n', long = "num-results")]
    num_results: Option<usize>,

    /// Engine: google, bing, duckduckgo (ddg), all, or a comma-separated list
    #[arg(short, long, default_value = "google")]
    engine: String,

    /// Fetch full-page text for the top results
    #[arg(short = 'c', long)]
    extract_content: bool,

    /// Keep only results dated within the last --months months
    #[arg(short = 'r', long)]
    recent_only: bool,

    /// Recency window in months
    #[arg(long)]
    months: Option<u32>,

    /// Newest results first, undated last
    #[arg(short = 's', long)]
    sort_by_date: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct ExtractArgs {
    /// Page URL
    url: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct PlanArgs {
    /// Topic to research
    topic: String,

    /// Plan type: comprehensive, technology, research, news, comparison, tutorial
    #[arg(long = "type", default_value = "comprehensive")]
    plan_type: String,

    /// Explicit keywords (comma-separated), replacing the plan type's templates
    #[arg(long, value_delimiter = ',')]
    keywords: Option<Vec<String>>,

    /// Engines to search (comma-separated, or "all")
    #[arg(long, default_value = "google,bing")]
    engines: String,

    /// Searches in flight at once
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Results per search
    #[arg(long)]
    num_results: Option<usize>,

    /// Recency window in months
    #[arg(long)]
    months: Option<u32>,

    /// Keep only results dated within the recency window
    #[arg(long)]
    recent_only: bool,

    /// Newest results first, undated last
    #[arg(long)]
    sort_by_date: bool,

    /// Run the plan instead of only printing it
    #[arg(long)]
    execute: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level))
        .add_directive("chromiumoxide::handler=off".parse()?)
        .add_directive("chromiumoxide::conn=off".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let common = cli.command.common();
    init_tracing(common.verbose)?;

    // CDP requests share the per-search timeout
    let manager = BrowserManager::with_request_timeout(common.defaults()?.timeout());
    let result = match cli.command {
        Command::Search(args) => run_search(&manager, args).await,
        Command::Extract(args) => run_extract(&manager, args).await,
        Command::Plan(args) => run_plan(&manager, args).await,
    };

    if let Err(e) = manager.shutdown().await {
        warn!("Browser shutdown failed: {e:#}");
    }
    result
}

fn recency(
    recent_only: bool,
    months: Option<u32>,
    defaults: &SearchDefaults,
) -> Result<Option<RecencyFilter>> {
    let months = validation::validate_months(months.unwrap_or(defaults.recent_months()))?;
    Ok(recent_only.then_some(RecencyFilter::months(months)))
}

async fn run_search(manager: &BrowserManager, args: SearchArgs) -> Result<()> {
    let defaults = args.common.defaults()?;
    let query = validation::validate_query(&args.query)?.to_string();
    let engines = parse_engines(&args.engine)?;
    let num_results = args.num_results.unwrap_or(defaults.num_results());
    let filter = recency(args.recent_only, args.months, &defaults)?;

    let plan = build_plan(
        &query,
        "comprehensive",
        Some(std::slice::from_ref(&query)),
        &engines,
        &defaults.task_options(filter),
        num_results,
    )?;

    manager.warm_up(defaults.headless()).await?;
    let registry = EngineRegistry::chromium(manager.clone());
    let report = execute_plan(&plan, defaults.max_concurrent(), &registry).await?;
    let mut set = aggregate(&report.outcomes, filter, args.sort_by_date);

    if report.success_count == 0 {
        let reasons: Vec<String> = set
            .failures
            .iter()
            .map(|f| format!("{}: {}", f.engine, f.error))
            .collect();
        bail!("Search failed on every engine ({})", reasons.join("; "));
    }

    if args.extract_content {
        let options = ExtractOptions {
            timeout: defaults.timeout(),
            headless: defaults.headless(),
        };
        info!("Extracting content for top {} results", CONTENT_EXTRACTION_LIMIT);
        set.results = enrich_with_content(
            &set.results,
            |url| {
                let manager = manager.clone();
                async move { extract_content(&manager, &url, options).await }
            },
            CONTENT_EXTRACTION_LIMIT,
        )
        .await;
    }

    if args.common.json {
        println!("{}", output::render_json(&set.results)?);
        for failure in &set.failures {
            warn!(engine = %failure.engine, keyword = %failure.keyword, "{}", failure.error);
        }
    } else {
        print!("{}", output::render_aggregated_text(&set));
    }
    Ok(())
}

async fn run_extract(manager: &BrowserManager, args: ExtractArgs) -> Result<()> {
    let defaults = args.common.defaults()?;
    let options = ExtractOptions {
        timeout: defaults.timeout(),
        headless: defaults.headless(),
    };

    let content = extract_content(manager, &args.url, options).await;

    if args.common.json {
        println!("{}", output::render_json(&content)?);
    } else {
        print!("{}", output::render_content_text(&content));
    }

    if let Some(error) = &content.error {
        bail!("Failed to extract content from {}: {error}", content.url);
    }
    Ok(())
}

async fn run_plan(manager: &BrowserManager, args: PlanArgs) -> Result<()> {
    let defaults = args.common.defaults()?;
    let engines = parse_engines(&args.engines)?;
    let max_concurrent = validation::validate_max_concurrent(
        args.max_concurrent.unwrap_or(defaults.max_concurrent()),
    )?;
    let num_results = args
        .num_results
        .unwrap_or(defaults.plan_results_per_search());
    let filter = recency(args.recent_only, args.months, &defaults)?;

    let plan = build_plan(
        &args.topic,
        &args.plan_type,
        args.keywords.as_deref(),
        &engines,
        &defaults.task_options(filter),
        num_results,
    )?;

    if !args.execute {
        if args.common.json {
            println!("{}", output::render_json(&plan)?);
        } else {
            print!("{}", output::render_plan_text(&plan));
        }
        return Ok(());
    }

    manager
        .warm_up(defaults.headless())
        .await
        .context("Browser unavailable")?;
    let registry = EngineRegistry::chromium(manager.clone());
    let report = execute_plan(&plan, max_concurrent, &registry)
        .await
        .context("Plan execution failed")?;
    let set = aggregate(&report.outcomes, filter, args.sort_by_date);
    let summary = summarize(&plan, &report, &set);

    if args.common.json {
        let doc = json!({
            "plan": plan,
            "summary": summary,
            "results": set.results,
            "failures": set.failures,
        });
        println!("{}", output::render_json(&doc)?);
    } else {
        print!("{}", output::render_summary_text(&summary));
        println!();
        print!("{}", output::render_aggregated_text(&set));
    }

    info!(elapsed = ?summary.elapsed, "Plan complete");
    Ok(())
}
