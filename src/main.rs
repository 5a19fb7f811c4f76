use anyhow::Result;
use clap::Parser;
use pkgmeta::commands::{self, OutputFormat, TemplateOptions};
use std::path::PathBuf;

/// pkgmeta - metadata processors for software-packaging recipes
///
/// Each subcommand runs one processor and prints its output variables.
///
/// Examples:
///   pkgmeta filemaker-url --major-version 19
///   pkgmeta template-version --mount-point /Volumes/Templates
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGMETA_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for processor variables
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Find the newest FileMaker Pro updater for a major version
    FilemakerUrl(FilemakerArgs),

    /// Version a template directory and detect changes since the saved checksum
    TemplateVersion(TemplateArgs),

    /// Show the input and output variables of a processor
    Describe(DescribeArgs),
}

#[derive(clap::Args, Debug)]
pub struct FilemakerArgs {
    /// The major version for which the updater should be found (e.g. "19")
    #[arg(long, value_name = "VERSION")]
    pub major_version: String,

    /// Look for a full installer instead of the updater
    #[arg(long)]
    pub full_installer: bool,

    /// Update feed URL (also via PKGMETA_FEED_URL)
    #[arg(long, env = "PKGMETA_FEED_URL", value_name = "URL")]
    pub feed_url: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Directory containing the templates
    #[arg(long, value_name = "PATH")]
    pub mount_point: PathBuf,

    /// File name glob to leave out of the checksum (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub file_exclusions: Vec<String>,

    /// Save the given checksum to the cache instead of checking for changes
    #[arg(long, requires = "checksum")]
    pub save_checksum: bool,

    /// Checksum to save
    #[arg(long, value_name = "CHECKSUM")]
    pub checksum: Option<String>,

    /// Recipe cache directory (defaults to RECIPE_CACHE_DIR, then the user cache dir)
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct DescribeArgs {
    /// Processor name (filemaker-url or template-version)
    #[arg(value_name = "PROCESSOR")]
    pub processor: String,
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(cli.verbose)),
    )
    .init();
    let runtime = pkgmeta::runtime::RealRuntime;

    match cli.command {
        Commands::FilemakerUrl(args) => {
            commands::filemaker_url(
                runtime,
                &args.major_version,
                args.full_installer,
                args.feed_url,
                cli.format,
            )
            .await?
        }
        Commands::TemplateVersion(args) => {
            let options = TemplateOptions {
                mount_point: args.mount_point,
                file_exclusions: args.file_exclusions,
                save_checksum: args.save_checksum,
                checksum: args.checksum,
                cache_dir: args.cache_dir,
            };
            commands::template_version(runtime, options, cli.format).await?
        }
        Commands::Describe(args) => commands::describe(&args.processor)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_filemaker_parsing() {
        let cli = Cli::try_parse_from([
            "pkgmeta",
            "filemaker-url",
            "--major-version",
            "19",
            "--full-installer",
        ])
        .unwrap();
        match cli.command {
            Commands::FilemakerUrl(args) => {
                assert_eq!(args.major_version, "19");
                assert!(args.full_installer);
            }
            _ => panic!("Expected FilemakerUrl command"),
        }
        assert_eq!(cli.format, OutputFormat::Plain);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_filemaker_requires_major_version() {
        let result = Cli::try_parse_from(["pkgmeta", "filemaker-url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_template_parsing() {
        let cli = Cli::try_parse_from([
            "pkgmeta",
            "--format",
            "json",
            "template-version",
            "--mount-point",
            "/Volumes/Templates",
            "--exclude",
            ".DS_Store",
            "--exclude",
            "~$*",
            "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::TemplateVersion(args) => {
                assert_eq!(args.mount_point, PathBuf::from("/Volumes/Templates"));
                assert_eq!(args.file_exclusions, vec![".DS_Store", "~$*"]);
                assert!(!args.save_checksum);
            }
            _ => panic!("Expected TemplateVersion command"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_save_checksum_requires_checksum() {
        let result = Cli::try_parse_from([
            "pkgmeta",
            "template-version",
            "--mount-point",
            "/Volumes/Templates",
            "--save-checksum",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["pkgmeta"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(5), "debug");
    }
}
