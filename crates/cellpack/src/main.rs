use anyhow::{Context, Result};
use cellpack::{
    Config, LayoutMemory, LayoutSummary, constants::DEFAULT_CONFIG_PATH, pack_with_report,
    render_text,
};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Replay a packing scenario step by step", long_about = None)]
struct Args {
    /// Scenario file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pack every step from scratch instead of reusing the previous layout
    #[arg(long)]
    no_memory: bool,
}

fn main() -> Result<()> {
    // RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let config = Config::load_from_file(&args.config)
        .with_context(|| format!("Failed to load scenario {}", args.config.display()))?;
    let capacity = config.grid.capacity;
    info!(
        "Grid of {} cells, {} columns, {} steps",
        capacity,
        config.columns(),
        config.steps.len()
    );

    let mut memory = LayoutMemory::new();
    let mut summaries = Vec::with_capacity(config.steps.len());
    let mut previous = None;

    for (n, step) in config.steps.iter().enumerate() {
        let label = step.label(n);
        let items = step.to_items()?;
        let report = if args.no_memory {
            pack_with_report(&items, capacity, None, &config.grid.columns)
        } else {
            memory.pack_with(capacity, &items, capacity, &config.grid.columns)
        };

        debug!("{label}: {:?}", report.strategy);
        if let Some(before) = &previous {
            let moved = report.grid.moved_since(before);
            if !moved.is_empty() {
                info!("{label}: {} item(s) moved: {}", moved.len(), moved.join(", "));
            }
        }
        for id in &report.dropped {
            warn!("{label}: '{id}' does not fit");
        }

        match args.format {
            OutputFormat::Text => {
                println!("== {label} ({:?}, {} free)", report.strategy, report.grid.free_count());
                print!("{}", render_text(&report.grid));
                println!();
            }
            OutputFormat::Json => summaries.push(LayoutSummary::from_report(&report)),
        }
        previous = Some(report.grid);
    }

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    Ok(())
}
