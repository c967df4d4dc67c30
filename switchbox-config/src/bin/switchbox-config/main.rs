use clap::{Args, Parser, Subcommand, ValueEnum};
use switchbox_config::{
    describe, event_code, find_events, pretty_compile, EventCodec, MappingSet, Table,
};
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use anyhow::{anyhow, Result};

/// Validate and inspect switchbox mapping files
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a mapping file
    Validate(ValidateArgs),
    /// Print the pages, switches and shortcuts of a mapping file
    Show(ShowArgs),
    /// List event names
    EventsList(ListEventsArgs),
}

#[derive(Copy, Clone, ValueEnum)]
enum TableArg {
    Keyboard,
    Consumer,
    Special,
    Alias,
}
impl TableArg {
    fn table(self) -> Table {
        match self {
            TableArg::Keyboard => Table::Keyboard,
            TableArg::Consumer => Table::Consumer,
            TableArg::Special => Table::Special,
            TableArg::Alias => Table::Alias,
        }
    }
}

#[derive(Args)]
struct ValidateArgs {
    /// Display information about the mapping file
    #[clap(long, short)]
    verbose: bool,

    /// Fail if any mapping uses this switch number
    #[clap(long, short)]
    control_switch: Option<usize>,

    /// mapping file
    file: PathBuf,
}

#[derive(Args)]
struct ShowArgs {
    /// mapping file
    file: PathBuf,
}

#[derive(Args)]
struct ListEventsArgs {
    /// Include the table and event each name resolves to
    #[clap(long, short)]
    verbose: bool,

    /// Limit to one table
    #[clap(long, short)]
    table: Option<TableArg>,

    /// Only list names that contain pattern (case insensitive). If pattern starts with 0x then
    /// names for that code will be shown.
    #[clap()]
    pattern: Option<String>,
}

fn compile_file(file: &Path, control_switch: Option<usize>) -> Result<MappingSet> {
    let src = fs::read_to_string(file)
        .map_err(|err| anyhow!("Failed to read \"{}\"!\n    {err}", file.display()))?;
    pretty_compile(file, &src, control_switch)
        .map_err(|err| anyhow!("Failed to compile \"{}\"!\n    {err}", file.display()))
}

fn validate(args: &ValidateArgs) -> Result<()> {
    let set = compile_file(&args.file, args.control_switch)?;
    if args.verbose {
        let switches: usize = set.pages().iter().map(|p| p.switch_count()).sum();
        let shortcuts: usize = set
            .pages()
            .iter()
            .flat_map(|p| p.switches())
            .map(|s| s.shortcuts().len())
            .sum();
        println!("mode:      {:?}", set.mode());
        println!("pages:     {}", set.pages().len());
        println!("switches:  {switches}");
        println!("shortcuts: {shortcuts}");
    }
    Ok(())
}

fn show(args: &ShowArgs) -> Result<String> {
    let set = compile_file(&args.file, None)?;
    Ok(describe(&set))
}

fn list_events(args: &ListEventsArgs) -> Result<Vec<String>> {
    let codec = EventCodec::default();
    let entries = find_events(
        codec.registry(),
        args.pattern.as_deref(),
        args.table.map(TableArg::table),
    )?;
    log::debug!("{} matching events", entries.len());

    Ok(entries
        .iter()
        .map(|e| {
            if args.verbose {
                let code = event_code(e.event).map_or(String::new(), |c| format!("{c:#06x}"));
                format!(
                    "{:<24} {:<9} {:<14} {code}",
                    e.name,
                    format!("{:?}", e.table),
                    e.event.to_string()
                )
            } else {
                e.name.to_string()
            }
        })
        .collect())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = run(&cli);

    if let Err(message) = result {
        eprintln!("{message}");
        process::exit(1);
    };
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Validate(args) => validate(args),
        Commands::Show(args) => {
            print!("{}", show(args)?);
            Ok(())
        }
        Commands::EventsList(args) => {
            for line in list_events(args)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join(name)
    }

    #[test]
    fn validate_cmd() {
        for name in ["switches.txt", "shortcuts.txt"] {
            let args = ValidateArgs {
                verbose: true,
                control_switch: Some(0),
                file: fixture(name),
            };

            validate(&args).expect("to be valid");
        }
    }

    #[test]
    fn validate_reports_bad_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "page-1 \"p\"\nswitch-1 \"x\" ctrl-nope")?;

        let args = ValidateArgs {
            verbose: false,
            control_switch: None,
            file: file.path().to_path_buf(),
        };
        let err = validate(&args).unwrap_err().to_string();

        assert!(err.starts_with("Failed to compile"), "{err}");
        assert!(err.contains("Unknown event 'nope'"), "{err}");
        Ok(())
    }

    #[test]
    fn validate_control_switch_conflict() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("map.txt");
        fs::write(&path, "0 a ; a\n")?;

        let mut args = ValidateArgs {
            verbose: false,
            control_switch: None,
            file: path,
        };
        validate(&args)?;
        args.control_switch = Some(0);
        let err = validate(&args).unwrap_err().to_string();
        assert!(err.contains("reserved"), "{err}");
        Ok(())
    }

    #[test]
    fn validate_missing_file() {
        let args = ValidateArgs {
            verbose: false,
            control_switch: None,
            file: fixture("no-such-file.txt"),
        };
        let err = validate(&args).unwrap_err().to_string();
        assert!(err.starts_with("Failed to read"), "{err}");
    }

    #[test]
    fn show_cmd() {
        let text = show(&ShowArgs {
            file: fixture("shortcuts.txt"),
        })
        .unwrap();

        assert!(text.starts_with("mode: cycling\n"));
        assert!(text.contains("    \"left drag\": LEFT_BUTTON-HOLD_MOUSE\n"), "{text}");
    }

    #[test]
    fn events_list_cmd() {
        let args = ListEventsArgs {
            verbose: false,
            table: Some(TableArg::Consumer),
            pattern: Some("volume".into()),
        };
        assert_eq!(
            list_events(&args).unwrap(),
            ["VOLUME_DECREMENT", "VOLUME_INCREMENT"]
        );

        let args = ListEventsArgs {
            verbose: true,
            table: None,
            pattern: Some("0xe2".into()),
        };
        let lines = list_events(&args).unwrap();
        // OPTION, ALT, LEFT_ALT and MUTE
        assert_eq!(lines.len(), 4, "{lines:?}");
        assert!(lines.iter().any(|l| l.starts_with("ALT ")), "{lines:?}");
        assert!(lines.iter().any(|l| l.starts_with("MUTE ") && l.ends_with("0x00e2")));
    }
}
