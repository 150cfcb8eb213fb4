//! Command dispatch: one function per subcommand

use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{SessionOutcome, SessionService};
use crate::application::{ApplicationError, COMMAND_HELP};
use crate::cli::args::{Cli, Commands, ConfigCommands, StartArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, validate_total, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::infrastructure::InfraError;

const PROMPT: &str = "billsplit>";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Split { start, steps }) => {
            let container = ServiceContainer::new(load_settings(cli.config.as_deref(), start)?);
            cmd_split(&container, steps)
        }
        Some(Commands::Session { start, script }) => {
            let container = ServiceContainer::new(load_settings(cli.config.as_deref(), start)?);
            cmd_session(&container, script.as_deref())
        }
        Some(Commands::Config { command }) => cmd_config(cli.config.as_deref(), command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given (try 'billsplit --help')".to_string(),
        )),
    }
}

/// Load layered settings and apply command line flags on top.
pub fn load_settings(config_file: Option<&Path>, start: &StartArgs) -> CliResult<Settings> {
    let mut settings = Settings::load(config_file)?;
    apply_start_args(&mut settings, start)?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Flags replace whatever config and environment specified.
pub fn apply_start_args(settings: &mut Settings, start: &StartArgs) -> CliResult<()> {
    if let Some(total) = start.total {
        settings.total_bill =
            validate_total(total).map_err(|e| CliError::InvalidArgs(format!("--total: {e}")))?;
    }
    if let Some(people) = start.people {
        settings.people = people;
    }
    if let Some(currency) = start.currency {
        settings.currency = currency;
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_split(container: &ServiceContainer, steps: &[String]) -> CliResult<()> {
    let mut session = container.session();
    for step in steps {
        match session.run_line(step)? {
            SessionOutcome::Help => output::info(COMMAND_HELP),
            SessionOutcome::Quit => break,
            SessionOutcome::Updated | SessionOutcome::Unchanged | SessionOutcome::Show => {}
        }
    }
    output::render_split(session.split());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_session(container: &ServiceContainer, script: Option<&Path>) -> CliResult<()> {
    let mut session = container.session();
    let (rejected, interactive) = match script {
        Some(path) => {
            let content = container.fs.read_to_string(path).map_err(|e| {
                InfraError::io(format!("read script {}", path.display()), e)
            })?;
            (run_session(&mut session, content.as_bytes(), false)?, false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            (run_session(&mut session, stdin.lock(), interactive)?, interactive)
        }
    };
    // at a prompt, rejected lines were already reported one by one
    if rejected > 0 && !interactive {
        return Err(CliError::RejectedLines(rejected));
    }
    Ok(())
}

/// Feed lines into the session, rendering after every change.
///
/// Invalid lines are reported and skipped. Returns the number of rejected
/// lines.
pub fn run_session<R: BufRead>(
    session: &mut SessionService,
    reader: R,
    interactive: bool,
) -> CliResult<usize> {
    let mut rejected = 0;
    output::render_split(session.split());
    if interactive {
        output::prompt(PROMPT);
    }

    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| InfraError::io("read command", e))?;
        match session.run_line(&line) {
            Ok(SessionOutcome::Updated) | Ok(SessionOutcome::Show) => {
                output::render_split(session.split())
            }
            Ok(SessionOutcome::Unchanged) => {}
            Ok(SessionOutcome::Help) => output::info(COMMAND_HELP),
            Ok(SessionOutcome::Quit) => return Ok(rejected),
            Err(e) => {
                rejected += 1;
                debug!("rejected line {}: {}", number + 1, e);
                if interactive {
                    output::error(&e);
                } else {
                    output::error(&format!("line {}: {}", number + 1, e));
                }
            }
        }
        if interactive {
            output::prompt(PROMPT);
        }
    }

    if interactive {
        output::info("");
    }
    Ok(rejected)
}

fn cmd_config(config_file: Option<&Path>, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(config_file)?;
            output::info(settings.to_toml()?.trim_end());
            Ok(())
        }
        ConfigCommands::Path => {
            output::info(&config_path(config_file)?.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = config_path(config_file)?;
            init_config(&RealFileSystem, &path, *force)?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

/// The explicit `--config` file, else the global config path.
fn config_path(config_file: Option<&Path>) -> CliResult<PathBuf> {
    match config_file {
        Some(path) => Ok(path.to_path_buf()),
        None => global_config_path().ok_or_else(|| {
            CliError::from(ApplicationError::Config {
                message: "cannot determine config directory".to_string(),
            })
        }),
    }
}

/// Write the config template to `path`, refusing to overwrite unless forced.
pub fn init_config(fs: &dyn FileSystem, path: &Path, force: bool) -> CliResult<()> {
    if fs.exists(path) && !force {
        return Err(CliError::Usage(format!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }
    fs.ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create directory for {}", path.display()), e))?;
    fs.write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use std::num::NonZeroUsize;
    use tempfile::TempDir;

    fn session(people: usize) -> SessionService {
        let settings = Settings {
            people: NonZeroUsize::new(people).unwrap(),
            total_bill: 100.0,
            ..Settings::default()
        };
        ServiceContainer::new(settings).session()
    }

    #[test]
    fn given_script_when_running_session_then_applies_lines_in_order() {
        let mut session = session(2);
        let script = "set 1 70\nadd\n# comment\ncurrency EUR\nshow\n";

        let rejected = run_session(&mut session, script.as_bytes(), false).unwrap();

        assert_eq!(rejected, 0);
        let split = session.split();
        assert_eq!(split.num_people(), 3);
        assert_eq!(split.currency(), Currency::Eur);
        assert!((split.percentages()[1] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn given_invalid_lines_when_running_session_then_skipped_and_counted() {
        let mut session = session(2);
        let script = "set 5 10\nbogus\npeople 4\n";

        let rejected = run_session(&mut session, script.as_bytes(), false).unwrap();

        assert_eq!(rejected, 2);
        assert_eq!(session.split().num_people(), 4);
    }

    #[test]
    fn given_quit_when_running_session_then_later_lines_ignored() {
        let mut session = session(2);
        let script = "people 3\nquit\npeople 5\n";

        run_session(&mut session, script.as_bytes(), false).unwrap();

        assert_eq!(session.split().num_people(), 3);
    }

    #[test]
    fn given_script_with_rejected_lines_when_session_then_data_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.txt");
        std::fs::write(&path, "bogus\nset 9 10\ntotal lots\n").unwrap();
        let container = ServiceContainer::new(Settings::default());

        let err = cmd_session(&container, Some(&path)).unwrap_err();

        assert!(matches!(err, CliError::RejectedLines(3)));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_clean_script_when_session_then_succeeds() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("good.txt");
        std::fs::write(&path, "total 30\nset 1 60\n").unwrap();
        let container = ServiceContainer::new(Settings::default());

        cmd_session(&container, Some(&path)).unwrap();
    }

    #[test]
    fn given_flags_when_applied_then_override_settings() {
        let mut settings = Settings::default();
        let start = StartArgs {
            total: Some(80.0),
            people: NonZeroUsize::new(4),
            currency: Some(Currency::Cad),
        };

        apply_start_args(&mut settings, &start).unwrap();

        assert_eq!(settings.total_bill, 80.0);
        assert_eq!(settings.people.get(), 4);
        assert_eq!(settings.currency, Currency::Cad);
    }

    #[test]
    fn given_negative_total_flag_then_invalid_args() {
        let mut settings = Settings::default();
        let start = StartArgs {
            total: Some(-1.0),
            ..StartArgs::default()
        };

        let err = apply_start_args(&mut settings, &start).unwrap_err();

        assert!(matches!(err, CliError::InvalidArgs(_)));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_existing_config_when_init_without_force_then_refuses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf/billsplit.toml");

        init_config(&RealFileSystem, &path, false).unwrap();
        assert!(path.exists());

        let err = init_config(&RealFileSystem, &path, false).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));

        init_config(&RealFileSystem, &path, true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, Settings::template());
    }
}
