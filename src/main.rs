use anyhow::{Context, Result};
use bcd_query::cli::{Cli, OutputFormat};
use bcd_query::compat_data::CompatData;
use bcd_query::config::QueryConfig;
use bcd_query::csv_output::CsvOutput;
use bcd_query::filter_def::run_query;
use bcd_query::json_output::JsonOutput;
use bcd_query::release::ReleaseCatalogue;
use bcd_query::{projector, text_output};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => QueryConfig::from_file(path)?,
        None => QueryConfig::default(),
    };

    let data = CompatData::from_file(&args.data)
        .with_context(|| format!("Failed to load {}", args.data.display()))?;
    let releases = ReleaseCatalogue::from_browsers(&data.browsers);

    if args.show_versions {
        print!("{}", text_output::render_versions(&releases));
        return Ok(());
    }

    let state = args.resolve_query(config.query_state()?, &releases)?;
    if state.filter.needs_releases() && releases.is_empty() {
        anyhow::bail!(
            "The {} filter needs the browsers section of the compat data",
            state.filter.kind()
        );
    }

    if args.print_query {
        println!("?{}", state.to_query_string());
    }

    let categories = args.categories.as_ref().unwrap_or(&config.categories);
    let tree = projector::project_categories(&data, categories)?;
    tracing::debug!(nodes = tree.node_count(), "projected compat data");

    let result = run_query(&tree, &state.filter, &state.title, &releases);
    tracing::debug!(
        nodes = result.node_count(),
        leaves = result.leaf_count(),
        "query complete"
    );

    match args.format.or(config.format).unwrap_or(OutputFormat::Text) {
        OutputFormat::Text => print!("{}", text_output::render_tree(&result)),
        OutputFormat::Json => println!("{}", JsonOutput::new(&state, &result).to_json()?),
        OutputFormat::Csv => print!("{}", CsvOutput::from_tree(&result).to_csv()),
    }

    Ok(())
}
