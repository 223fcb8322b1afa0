use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "tocspy")]
#[command(about = "Scroll-aware table of contents for HTML pages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file(s), applied in order (defaults to ./tocspy.{yml,yaml,toml,json})
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Vec<PathBuf>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false, global = true)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Silence everything but errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Render the table of contents into a page
    #[command(alias = "g")]
    Generate {
        /// Input HTML file (`-` for stdin)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Selector of the content root
        #[arg(long, value_name = "SELECTOR")]
        content: Option<String>,

        /// Selector of the list container
        #[arg(long, value_name = "SELECTOR")]
        container: Option<String>,
    },

    /// Simulate scrolling and entry clicks, reporting the active entry
    Spy {
        /// Input HTML file (`-` for stdin)
        input: PathBuf,

        /// Steps to run in order: `scroll:<Y>` or `click:<ID>`
        #[arg(short, long = "step", value_name = "STEP")]
        steps: Vec<String>,

        /// Visible height of the simulated window
        #[arg(long, value_name = "PX")]
        viewport_height: Option<f64>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Selector of the content root
        #[arg(long, value_name = "SELECTOR")]
        content: Option<String>,

        /// Selector of the list container
        #[arg(long, value_name = "SELECTOR")]
        container: Option<String>,
    },

    /// List the headings that would get entries
    #[command(alias = "h")]
    Headings {
        /// Input HTML file (`-` for stdin)
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Selector of the content root
        #[arg(long, value_name = "SELECTOR")]
        content: Option<String>,
    },

    /// Print the identifier derived from each text
    Slug {
        #[arg(required = true)]
        text: Vec<String>,
    },
}
