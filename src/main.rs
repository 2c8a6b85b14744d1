use std::fs;
use std::path::PathBuf;

use clap::Parser;
use puredoc::{Config, OrderedListStyle};

#[derive(Parser)]
#[command(name = "puredoc")]
#[command(about = "Convert Markdown files to Word documents")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output DOCX file (defaults to input name with .docx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Word document whose styles are used for the export
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Settings file
    #[arg(short, long, default_value = "puredoc.toml")]
    config: PathBuf,

    /// Keep the "•" glyph on bullet list items
    #[arg(long)]
    keep_bullets: bool,

    /// Ordered list numbering: text, list or none
    #[arg(long, value_name = "STYLE")]
    ordered_style: Option<OrderedListStyle>,

    /// Print the normalized Markdown preview instead of exporting
    #[arg(long)]
    preview: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };

    // Command line flags win over the settings file
    let mut settings = config.render;
    if cli.keep_bullets {
        settings.ignore_bullets = false;
    }
    if let Some(style) = cli.ordered_style {
        settings.ordered_list_style = style;
    }
    let template = cli.template.or(config.export.template);

    // Read input file
    let markdown = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    if cli.preview {
        println!("{}", puredoc::markdown_to_preview(&markdown, &settings));
        return;
    }

    // Determine output path
    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("docx"));

    if let Err(e) = puredoc::export_docx(&markdown, &output, &settings, template.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("Created {}", output.display());
}
