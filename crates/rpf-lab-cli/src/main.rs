mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rpf_lab_core::{
    render_page, Metric, MetricsTable, OutputFormat, Page, PageRequest, RpfLabConfig, Selection,
    TableView,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rpf-lab")]
#[command(about = "RPF Lab - Point Cloud Registration Metrics Dashboard", long_about = None)]
struct Cli {
    /// JSON config file (falls back to RPF_LAB_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct FilterArgs {
    /// Dataset to include (repeatable, default: all)
    #[arg(short = 'd', long = "dataset")]
    datasets: Vec<String>,

    /// Method to include (repeatable, default: RPF variants, DCPNet, RPMNet)
    #[arg(short = 'm', long = "method")]
    methods: Vec<String>,

    /// Include every method
    #[arg(long, conflicts_with = "methods")]
    all_methods: bool,

    /// Output format (table, json, csv)
    #[arg(short, long)]
    output: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Metric comparison dashboard
    Compare {
        #[command(flatten)]
        filter: FilterArgs,

        /// Metric to chart (repeatable: RE, TE, Recall@5, Recall@1cm)
        #[arg(short = 'k', long = "metric")]
        metrics: Vec<Metric>,
    },

    /// Rigidity preservation analysis (RMSE, overlap ratio, 3D scene)
    Rigidity {
        #[command(flatten)]
        filter: FilterArgs,

        /// Leave out the conceptual 3D scene
        #[arg(long)]
        no_scene: bool,
    },

    /// Print the benchmark table
    Table {
        /// Columns to show (pairwise, rigidity)
        #[arg(long, default_value = "rigidity")]
        view: TableView,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        output: Option<OutputFormat>,
    },

    /// List datasets
    Datasets,

    /// List methods
    Methods,
}

fn get_config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var("RPF_LAB_CONFIG").ok().map(PathBuf::from))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RpfLabConfig::load_or_default(get_config_path(cli.config).as_deref())?;
    let table = MetricsTable::builtin()?;

    match cli.command {
        Some(Commands::Compare { filter, metrics }) => {
            cmd_page(&table, &config, Page::MetricComparison, filter, metrics, true)?
        }
        Some(Commands::Rigidity { filter, no_scene }) => cmd_page(
            &table,
            &config,
            Page::RigidityPreservation,
            filter,
            Vec::new(),
            !no_scene,
        )?,
        Some(Commands::Table { view, output }) => {
            let format = output.unwrap_or(config.output.format);
            print!(
                "{}",
                render::render_table(&table, view, format, config.output.precision)?
            );
        }
        Some(Commands::Datasets) => print!("{}", render::render_names("Datasets", &table.datasets())),
        Some(Commands::Methods) => print!("{}", render::render_names("Methods", &table.methods())),
        None => run_interactive(&table, &config)?,
    }

    Ok(())
}

fn selection_from_args(
    table: &MetricsTable,
    config: &RpfLabConfig,
    filter: &FilterArgs,
    metrics: Vec<Metric>,
) -> Selection {
    let mut selection = config.defaults.selection();
    if !filter.datasets.is_empty() {
        selection.set_datasets(filter.datasets.clone());
    }
    if filter.all_methods {
        selection.set_methods(table.methods().into_iter().map(String::from).collect());
    } else if !filter.methods.is_empty() {
        selection.set_methods(filter.methods.clone());
    }
    if !metrics.is_empty() {
        selection.set_metrics(metrics);
    }
    selection
}

fn cmd_page(
    table: &MetricsTable,
    config: &RpfLabConfig,
    page: Page,
    filter: FilterArgs,
    metrics: Vec<Metric>,
    with_scene: bool,
) -> Result<()> {
    let selection = selection_from_args(table, config, &filter, metrics);
    let scene = with_scene.then(|| config.scene.clone());
    let request = PageRequest::new(page, selection).with_scene(scene);

    let view = render_page(&request, table);
    if let Some(notice) = view.notice {
        tracing::info!(?notice, "Nothing to chart");
    }

    let format = filter.output.unwrap_or(config.output.format);
    println!("{}", render::render_view(&view, format, &config.output)?);
    Ok(())
}

fn run_interactive(table: &MetricsTable, config: &RpfLabConfig) -> Result<()> {
    display_welcome();

    let mut request = PageRequest::new(config.defaults.page, config.defaults.selection())
        .with_scene(Some(config.scene.clone()));
    let mut format = config.output.format;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "help" | "h" | "?" => display_help(),
            "show" | "s" => show(table, &request, format, config)?,
            "page" | "p" => match rest.parse::<Page>() {
                Ok(page) => {
                    request.page = page;
                    show(table, &request, format, config)?;
                }
                Err(e) => println!("Error: {}", e),
            },
            "datasets" | "ds" => {
                let names = parse_names(rest, &table.datasets());
                warn_unknown(&names, &table.datasets());
                request.selection.set_datasets(names);
                display_selection(&request.selection);
            }
            "methods" | "mt" => {
                let names = parse_names(rest, &table.methods());
                warn_unknown(&names, &table.methods());
                request.selection.set_methods(names);
                display_selection(&request.selection);
            }
            "metrics" | "mx" => match parse_metrics(rest) {
                Ok(metrics) => {
                    request.selection.set_metrics(metrics);
                    display_selection(&request.selection);
                }
                Err(e) => println!("Error: {}", e),
            },
            "format" | "f" => match rest.parse::<OutputFormat>() {
                Ok(f) => {
                    format = f;
                    println!("  Output format: {}", format);
                }
                Err(e) => println!("Error: {}", e),
            },
            "table" | "t" => {
                let view = if rest.is_empty() {
                    Ok(TableView::Rigidity)
                } else {
                    rest.parse::<TableView>()
                };
                match view {
                    Ok(view) => print!(
                        "{}",
                        render::render_table(table, view, format, config.output.precision)?
                    ),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "list" | "ls" => {
                print!("{}", render::render_names("Datasets", &table.datasets()));
                print!("{}", render::render_names("Methods", &table.methods()));
                let metrics: Vec<&str> = Metric::all().iter().map(|m| m.column_name()).collect();
                print!("{}", render::render_names("Metrics", &metrics));
            }
            "reset" => {
                request.selection = config.defaults.selection();
                display_selection(&request.selection);
            }
            "clear" | "cls" => {
                print!("\x1B[2J\x1B[1;1H");
                stdout.flush()?;
            }
            "exit" | "quit" | "q" => break,
            _ => {
                println!("Unknown command: {}. Type 'help' for available commands.", cmd);
            }
        }
    }

    Ok(())
}

fn show(
    table: &MetricsTable,
    request: &PageRequest,
    format: OutputFormat,
    config: &RpfLabConfig,
) -> Result<()> {
    let view = render_page(request, table);
    println!("{}", render::render_view(&view, format, &config.output)?);
    Ok(())
}

/// Comma-separated names, or `all` / `none`.
fn parse_names(input: &str, all: &[&str]) -> Vec<String> {
    match input.trim().to_lowercase().as_str() {
        "all" | "*" => all.iter().map(|s| s.to_string()).collect(),
        "" | "none" => Vec::new(),
        _ => input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    }
}

fn parse_metrics(input: &str) -> rpf_lab_core::Result<Vec<Metric>> {
    match input.trim().to_lowercase().as_str() {
        "all" | "*" => Ok(Metric::pairwise().to_vec()),
        "" | "none" => Ok(Vec::new()),
        _ => input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<Metric>)
            .collect(),
    }
}

fn warn_unknown(names: &[String], known: &[&str]) {
    for name in names {
        if !known.contains(&name.as_str()) {
            println!("  Note: '{}' is not in the table", name);
        }
    }
}

fn display_selection(selection: &Selection) {
    let join = |items: &[String]| {
        if items.is_empty() {
            "None".to_string()
        } else {
            items.join(", ")
        }
    };
    let metrics: Vec<String> = selection.metrics.iter().map(|m| m.to_string()).collect();
    println!("  Datasets: {}", join(&selection.datasets));
    println!("  Methods:  {}", join(&selection.methods));
    println!("  Metrics:  {}", join(&metrics));
}

fn display_welcome() {
    println!();
    println!("  Rectified Point Flow: Point Cloud Pose Estimation Lab");
    println!();
    println!("  Compare registration metrics for RPF and baseline methods.");
    println!("  Type 'help' for commands, 'show' to render the current page.");
    println!();
}

fn display_help() {
    println!();
    println!("Available Commands:");
    println!("  show, s                  Render the current page");
    println!("  page, p <compare|rigidity>");
    println!("                           Switch page and render it");
    println!("  datasets, ds <a, b|all|none>");
    println!("                           Select datasets (comma-separated)");
    println!("  methods, mt <a, b|all|none>");
    println!("                           Select methods (comma-separated)");
    println!("  metrics, mx <RE, TE|all|none>");
    println!("                           Select metrics for the comparison page");
    println!("  format, f <table|json|csv>");
    println!("                           Set output format");
    println!("  table, t [pairwise|rigidity]");
    println!("                           Print the benchmark table");
    println!("  list, ls                 List datasets, methods and metrics");
    println!("  reset                    Restore the default selection");
    println!("  clear, cls               Clear screen");
    println!("  help, h                  Show this help message");
    println!("  exit, quit, q            Leave");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MetricsTable {
        MetricsTable::builtin().unwrap()
    }

    #[test]
    fn test_parse_names() {
        let all = ["TUD-L", "ModelNet 40"];
        assert_eq!(parse_names("all", &all), vec!["TUD-L", "ModelNet 40"]);
        assert!(parse_names("none", &all).is_empty());
        assert_eq!(
            parse_names(" RPF (Single) , GARF,", &all),
            vec!["RPF (Single)", "GARF"]
        );
    }

    #[test]
    fn test_parse_metrics() {
        assert_eq!(
            parse_metrics("re, recall@1cm").unwrap(),
            vec![Metric::RotationError, Metric::Recall1Cm]
        );
        assert_eq!(parse_metrics("all").unwrap().len(), 4);
        assert!(parse_metrics("re, iou").is_err());
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::parse_from([
            "rpf-lab", "compare", "-d", "TUD-L", "-m", "GARF", "-k", "RMSE", "-o", "csv",
        ]);
        let Some(Commands::Compare { filter, metrics }) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(filter.output, Some(OutputFormat::Csv));

        let selection = selection_from_args(&table(), &RpfLabConfig::default(), &filter, metrics);
        assert_eq!(selection.datasets, vec!["TUD-L"]);
        assert_eq!(selection.methods, vec!["GARF"]);
        assert_eq!(selection.metrics, vec![Metric::Rmse]);
    }

    #[test]
    fn test_all_methods_flag() {
        let cli = Cli::parse_from(["rpf-lab", "rigidity", "--all-methods", "--no-scene"]);
        let Some(Commands::Rigidity { filter, no_scene }) = cli.command else {
            panic!("expected rigidity");
        };
        assert!(no_scene);

        let selection = selection_from_args(&table(), &RpfLabConfig::default(), &filter, Vec::new());
        assert_eq!(selection.methods.len(), 8);
        assert_eq!(selection.datasets.len(), 2);
    }

    #[test]
    fn test_table_view_arg() {
        let cli = Cli::parse_from(["rpf-lab", "table", "--view", "pairwise"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Table {
                view: TableView::Pairwise,
                output: None
            })
        ));
    }
}
