use campaign_planner::audience::Predicate;
use campaign_planner::prelude::*;
use campaign_planner::session::{DEFAULT_BRIEFING, DEFAULT_INSIGHTS, DEFAULT_ROSTER};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Plan CRM campaigns: export BPMN, render graphs and select target audiences
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a planner config YAML file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Campaign identifier, overriding the config
    #[arg(long, global = true)]
    campaign: Option<String>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a process document as BPMN 2.0 XML
    Export {
        /// Path to the process document YAML
        process: String,
        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
        /// Diagram layout
        #[arg(long, value_enum)]
        layout: Option<LayoutCli>,
    },
    /// Render a process document as a Graphviz or JSON graph
    Render {
        process: String,
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Dot)]
        format: RenderFormat,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Apply a refinement command, e.g. "rename the task 'task_app' to 'Send Push'"
    Rename {
        process: String,
        command: String,
        /// Write the result back to the process file
        #[arg(long)]
        in_place: bool,
    },
    /// Select the target audience from a roster CSV
    Filter {
        roster: String,
        /// Regions to keep (repeatable); all regions when omitted
        #[arg(long)]
        region: Vec<String>,
        /// Tiers to keep (repeatable); all tiers when omitted
        #[arg(long)]
        tier: Vec<String>,
        #[arg(long)]
        min_sales: Option<f64>,
        #[arg(long)]
        max_sales: Option<f64>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the context and data summaries
    Summarize {
        #[arg(long)]
        roster: Option<String>,
        #[arg(long)]
        briefing: Option<String>,
        #[arg(long)]
        insights: Option<String>,
    },
    /// Convert a START/STEP/DECISION/END/LINK outline into a process document
    Outline {
        input: String,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report every structural problem in a process document
    Check { process: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutCli {
    Empty,
    Placeholder,
}

impl From<LayoutCli> for LayoutMode {
    fn from(layout: LayoutCli) -> Self {
        match layout {
            LayoutCli::Empty => LayoutMode::Empty,
            LayoutCli::Placeholder => LayoutMode::Placeholder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RenderFormat {
    Dot,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => PlannerConfig::default(),
    };
    if let Some(campaign) = cli.campaign {
        config.campaign_id = campaign;
    }

    let start = Instant::now();
    match cli.command {
        Commands::Export {
            process,
            output,
            layout,
        } => {
            let document = load_document(&process);
            let layout = layout.map(LayoutMode::from).unwrap_or(config.export.layout);
            let xml = BpmnExporter::builder(&document, config.campaign_id.as_str())
                .with_layout(layout)
                .build()
                .export()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            emit(output.as_deref(), &xml);
        }
        Commands::Render {
            process,
            format,
            output,
        } => {
            let document = load_document(&process);
            let graph = render_graph(&document, &config.campaign_id, &config.render);
            let text = match format {
                RenderFormat::Dot => graph.to_dot(),
                RenderFormat::Json => graph
                    .to_json()
                    .unwrap_or_else(|e| exit_with_error(&format!("JSON serialization failed: {}", e))),
            };
            emit(output.as_deref(), &text);
        }
        Commands::Rename {
            process,
            command,
            in_place,
        } => {
            let text = read_file(&process);
            let outcome = apply_command(&command, &text);
            eprintln!("{}", outcome.status);
            if !outcome.status.is_success() {
                std::process::exit(2);
            }
            let target = in_place.then_some(process.as_str());
            emit(target, &outcome.text);
        }
        Commands::Filter {
            roster,
            region,
            tier,
            min_sales,
            max_sales,
            output,
        } => {
            let roster = Roster::from_file(&roster)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            let filter = build_filter(&roster, &config.columns, region, tier, min_sales, max_sales);
            let audience = filter
                .apply(&roster)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            eprintln!("Selected {} of {} agents", audience.count(), roster.len());
            let csv = audience
                .to_csv()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            emit(output.as_deref(), &String::from_utf8_lossy(&csv));
        }
        Commands::Summarize {
            roster,
            briefing,
            insights,
        } => {
            let roster = match roster {
                Some(path) => Roster::from_file(&path),
                None => Roster::from_csv_str(DEFAULT_ROSTER),
            }
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            let briefing = briefing.map_or_else(|| DEFAULT_BRIEFING.to_string(), |p| read_file(&p));
            let insights = insights.map_or_else(|| DEFAULT_INSIGHTS.to_string(), |p| read_file(&p));

            println!("{}\n", summarize_context(&briefing, &insights));
            println!("{}", summarize_data(&roster, &config.columns));
        }
        Commands::Outline { input, output } => {
            let text = read_file(&input);
            let yaml = Outline::parse(&text, config.campaign_id.as_str())
                .into_process()
                .map_err(|e| e.to_string())
                .and_then(|doc| doc.to_yaml().map_err(|e| e.to_string()))
                .unwrap_or_else(|e| exit_with_error(&e));
            emit(output.as_deref(), &yaml);
        }
        Commands::Check { process } => {
            let document = load_document(&process);
            let issues = document.diagnostics();
            if issues.is_empty() {
                println!(
                    "OK: {} pools, {} elements, {} flows",
                    document.pools.len(),
                    document.elements.len(),
                    document.flows.len()
                );
            } else {
                for issue in &issues {
                    println!("  -> {}", issue);
                }
                exit_with_error(&format!("{} problem(s) found", issues.len()));
            }
        }
    }
    tracing::debug!(elapsed = ?start.elapsed(), "done");
}

/// Starts from the filter that keeps everyone and narrows the columns given on the command
/// line.
fn build_filter(
    roster: &Roster,
    columns: &RosterColumns,
    regions: Vec<String>,
    tiers: Vec<String>,
    min_sales: Option<f64>,
    max_sales: Option<f64>,
) -> AudienceFilter {
    let mut filter = AudienceFilter::defaults_for(roster, columns)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    for predicate in &mut filter.predicates {
        match predicate {
            Predicate::OneOf { column, values } if *column == columns.region && !regions.is_empty() => {
                *values = regions.iter().cloned().collect();
            }
            Predicate::OneOf { column, values } if *column == columns.tier && !tiers.is_empty() => {
                *values = tiers.iter().cloned().collect();
            }
            Predicate::Between { min, max, .. } => {
                *min = min_sales.unwrap_or(*min);
                *max = max_sales.unwrap_or(*max);
            }
            _ => {}
        }
    }
    if !filter
        .predicates
        .iter()
        .any(|p| matches!(p, Predicate::Between { .. }))
        && (min_sales.is_some() || max_sales.is_some())
    {
        filter = filter.between(
            columns.sales.as_str(),
            min_sales.unwrap_or(f64::NEG_INFINITY),
            max_sales.unwrap_or(f64::INFINITY),
        );
    }
    filter
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)))
}

fn load_document(path: &str) -> ProcessDocument {
    ProcessDocument::from_yaml(&read_file(path))
        .unwrap_or_else(|e| exit_with_error(&format!("{} ({})", e, path)))
}

fn emit(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, text)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
            eprintln!("  -> Wrote '{}'", path);
        }
        None => print!("{}", text),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
