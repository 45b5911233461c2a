use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use markdown_html::{render_from_path, render_from_reader, HeadingOverflow, ParseOptions};
use markdown_html_config::{Config, LoadOptions};
use std::{
    fs,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Markdown file to convert ('-' reads stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    path: PathBuf,

    /// Write HTML to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Config file applied on top of the discovered ones
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How to treat lines starting with more than six '#'
    #[arg(long, value_enum, value_name = "POLICY")]
    heading_overflow: Option<OverflowArg>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OverflowArg {
    Paragraph,
    Clamp,
}

impl From<OverflowArg> for HeadingOverflow {
    fn from(value: OverflowArg) -> Self {
        match value {
            OverflowArg::Paragraph => HeadingOverflow::Paragraph,
            OverflowArg::Clamp => HeadingOverflow::Clamp,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("markdown-html error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut load_options = LoadOptions::default();
    if let Some(path) = &cli.config {
        load_options = load_options.with_override_path(path);
    }
    let config = Config::load(load_options).context("Unable to load configuration")?;

    init_logging(cli.verbose, config.log.level);
    debug!(
        layers = config.sources.layers.len(),
        overflow = %config.render.heading_overflow,
        "configuration loaded"
    );

    let mut options = config.render.parse_options();
    if let Some(overflow) = cli.heading_overflow {
        options = options.with_heading_overflow(overflow.into());
    }

    let html = render(&cli.path, &options).with_context(|| {
        format!(
            "Unable to render markdown at path or stream: {}",
            cli.path.display()
        )
    })?;

    match &cli.output {
        Some(path) => fs::write(path, &html)
            .with_context(|| format!("Failed to write HTML to {}", path.display())),
        None => print_html(&html),
    }
}

fn init_logging(verbose: bool, configured: LevelFilter) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(configured.into())
            .from_env_lossy()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render(path: &Path, options: &ParseOptions) -> Result<String> {
    if path == Path::new("-") {
        let stdin = io::stdin();
        let mut reader = BufReader::new(stdin.lock());
        Ok(render_from_reader(&mut reader, options)?)
    } else {
        Ok(render_from_path(path, options)?)
    }
}

fn print_html(html: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match handle.write_all(html.as_bytes()) {
        Ok(_) => {}
        Err(err) if should_ignore_pipe_error(&err) => return Ok(()),
        Err(err) => return Err(err).context("Failed to write HTML to stdout"),
    }

    match handle.flush() {
        Ok(_) => Ok(()),
        Err(err) if should_ignore_pipe_error(&err) => Ok(()),
        Err(err) => Err(err).context("Failed to flush stdout"),
    }
}

fn should_ignore_pipe_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::WouldBlock
    )
}
