use blogindex::build::build_index;
use blogindex::config::Config;
use clap::{App, Arg};
use std::error::Error;
use std::path::Path;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let matches = App::new("blogindex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a category-filtered blog index page")
        .arg(
            Arg::with_name("project")
                .long("project")
                .short("p")
                .takes_value(true)
                .default_value(".")
                .help("The project directory (or any of its subdirectories)"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .short("o")
                .takes_value(true)
                .default_value("_output")
                .help("The directory the index page is written to"),
        )
        .arg(
            Arg::with_name("query")
                .long("query")
                .short("q")
                .takes_value(true)
                .default_value("")
                .help("The page's query string, e.g. `?category=Web`"),
        )
        .get_matches();

    if let Err(e) = run(
        Path::new(matches.value_of("project").unwrap_or(".")),
        Path::new(matches.value_of("output").unwrap_or("_output")),
        matches.value_of("query").unwrap_or(""),
    ) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(project: &Path, output: &Path, query: &str) -> Result<(), Box<dyn Error>> {
    let config = Config::from_directory(project, output)?;
    build_index(&config, query)?;
    Ok(())
}
