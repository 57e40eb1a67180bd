use crate::component::FileRenamer;
use crate::component::file_renamer::{
    MAX_ZERO_PAD_WIDTH, RenameOptions, RenamePolicy, RenameRequest, SortPolicy,
};
use crate::config::{Config, Language};
use crate::menu::show_main_menu;
use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use console::{Term, style};
use log::{info, warn};
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Batch rename the files of a folder using a sort order and a naming strategy
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Interface language (en-US, ru-RU); defaults to the saved setting
    #[arg(long, global = true)]
    pub language: Option<Language>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rename every file in a folder without prompting
    Rename(RenameArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RenameArgs {
    /// Folder containing the files to rename
    pub folder: PathBuf,

    /// How to sort files before renaming: name | number
    pub sort_type: SortPolicy,

    /// How to build new names: sequential | numbers_only | text_only | numbers_only_at_end
    pub rename_type: RenamePolicy,

    /// Text added before each new name
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Text added after each new name (before the extension)
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Zero padding for numeric names: 0 = none, 1 = 09, 2 = 009 (at most 16)
    #[arg(
        long = "zero-num",
        visible_alias = "zero_num",
        default_value_t = 0,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_ZERO_PAD_WIDTH as u64)
    )]
    pub zero_num: usize,

    /// Show what would be renamed without touching any file
    #[arg(long)]
    pub dry_run: bool,
}

impl RenameArgs {
    #[must_use]
    pub fn to_request(&self) -> RenameRequest {
        RenameRequest {
            directory: self.folder.clone(),
            sort_policy: self.sort_type,
            rename_policy: self.rename_type,
            options: RenameOptions {
                prefix: self.prefix.clone(),
                suffix: self.suffix.clone(),
                zero_pad_width: self.zero_num,
                dry_run: self.dry_run,
            },
        }
    }
}

impl Cli {
    pub fn run(&self, shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
        match &self.command {
            Some(Commands::Rename(args)) => run_rename(args, shutdown_signal, config),
            None => run_interactive(shutdown_signal, config),
        }
    }
}

fn run_interactive(shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
    let term = Term::stdout();

    loop {
        match show_main_menu(&term, shutdown_signal, config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(t!("common.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}

fn run_rename(
    args: &RenameArgs,
    shutdown_signal: &Arc<AtomicBool>,
    config: &Config,
) -> Result<()> {
    let request = args.to_request();
    print_configuration(&request);

    let renamer = FileRenamer::new(config.clone(), Arc::clone(shutdown_signal));
    renamer.execute(&request)?;

    Ok(())
}

fn print_configuration(request: &RenameRequest) {
    println!("{}", style(t!("rename.configuration")).cyan().bold());
    println!("  {}", t!("rename.folder_label", folder = request.directory.display()));
    println!("  {}", t!("rename.sort_label", value = request.sort_policy));
    println!("  {}", t!("rename.rename_label", value = request.rename_policy));

    let options = &request.options;
    if !options.prefix.is_empty() {
        println!("  {}", t!("rename.prefix_label", value = options.prefix));
    }
    if !options.suffix.is_empty() {
        println!("  {}", t!("rename.suffix_label", value = options.suffix));
    }
    if options.zero_pad_width > 0 {
        println!(
            "  {}",
            t!("rename.zero_padding_label", value = options.zero_pad_width)
        );
    }
    if options.dry_run {
        println!("  {}", t!("rename.mode_preview"));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename_command() {
        let cli = Cli::try_parse_from([
            "batch_renamer",
            "rename",
            "/videos",
            "number",
            "numbers_only_at_end",
            "--prefix",
            "ep_",
            "--zero-num",
            "1",
            "--dry-run",
        ])
        .unwrap();

        let Some(Commands::Rename(args)) = cli.command else {
            panic!("expected rename command");
        };
        let request = args.to_request();

        assert_eq!(request.directory, PathBuf::from("/videos"));
        assert_eq!(request.sort_policy, SortPolicy::ByNaturalNumber);
        assert_eq!(request.rename_policy, RenamePolicy::TrailingNumber);
        assert_eq!(request.options.prefix, "ep_");
        assert_eq!(request.options.suffix, "");
        assert_eq!(request.options.zero_pad_width, 1);
        assert!(request.options.dry_run);
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["batch_renamer", "rename", "/docs", "name", "sequential"])
            .unwrap();
        let Some(Commands::Rename(args)) = cli.command else {
            panic!("expected rename command");
        };
        assert_eq!(args.zero_num, 0);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_rejects_unknown_policies() {
        let parse = |args: &[&str]| {
            let mut argv = vec!["batch_renamer", "rename", "/d"];
            argv.extend_from_slice(args);
            Cli::try_parse_from(argv)
        };

        assert!(parse(&["size", "sequential"]).is_err());
        assert!(parse(&["name", "reverse"]).is_err());
        assert!(parse(&["name", "sequential", "--zero-num", "-1"]).is_err());
    }

    #[test]
    fn test_zero_num_is_bounded() {
        let parse = |width: &str| {
            Cli::try_parse_from([
                "batch_renamer",
                "rename",
                "/d",
                "number",
                "sequential",
                "--zero-num",
                width,
            ])
        };

        let Some(Commands::Rename(args)) = parse("16").unwrap().command else {
            panic!("expected rename command");
        };
        assert_eq!(args.zero_num, MAX_ZERO_PAD_WIDTH);
        assert!(parse("17").is_err());
        assert!(parse("18446744073709551615").is_err());
    }

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["batch_renamer", "--language", "ru"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.language, Some(Language::RuRu));
    }
}
