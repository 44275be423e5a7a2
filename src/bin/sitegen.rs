//! sitegen - render a content directory to static HTML pages
//!
//! Usage:
//!   sitegen
//!   sitegen --content-root docs/content --output-dir public
//!   sitegen --config sitegen.json

use std::env;
use std::path::PathBuf;

use clap::Parser;
use html_sitegen::config::CliOptions;
use html_sitegen::{GeneratorConfig, PageRenderer, RenderReport, SiteBuilder};

#[derive(Parser, Debug)]
#[command(name = "sitegen", version, about = "Render a page tree of templated sources to HTML")]
struct Args {
    /// Directory holding the page sources (default: ./content, then ../content)
    #[arg(long)]
    content_root: Option<PathBuf>,

    /// Layout directive (default: <content>/directives/layout.md)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Template directive (default: <content>/directives/templates.md)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Directory the pages are written to (default: site/ next to the content)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// File the warnings are written to (default: warnings.txt next to the content)
    #[arg(long)]
    warnings_file: Option<PathBuf>,

    /// JSON configuration file; replaces every path option above
    #[arg(long, conflicts_with_all = ["content_root", "layout", "templates", "output_dir", "warnings_file"])]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> html_sitegen::Result<GeneratorConfig> {
        if let Some(path) = self.config {
            return GeneratorConfig::from_json_file(path);
        }
        let options = CliOptions {
            content_root: self.content_root,
            layout: self.layout,
            templates: self.templates,
            output_dir: self.output_dir,
            warnings_file: self.warnings_file,
        };
        Ok(options.resolve(env::current_dir()?))
    }
}

fn run(args: Args) -> html_sitegen::Result<RenderReport> {
    let config = args.into_config()?;
    log::debug!("Using configuration {:?}", config);

    let site = SiteBuilder::from_config(&config).build()?;
    PageRenderer::new(&site, &config).render()
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "html_sitegen=info,sitegen=info");
    }
    env_logger::init();

    let args = Args::parse();

    match run(args) {
        Ok(report) => {
            println!(
                "Generated {} pages ({} warnings)",
                report.pages.len(),
                report.warnings.len()
            );
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
