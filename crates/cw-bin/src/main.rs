//! Consolewrap entrypoint: run a console-wrap command against a file.
use anyhow::{Context as _, Result, bail};
use clap::{ArgGroup, Parser};
use core_actions::{ConsoleActionCommand, ConsoleWrapCommand, Context, DispatchResult};
use core_config::load_from;
use core_view::{BufferView, View};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "consolewrap.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "consolewrap", version, about = "Insert and manage console log statements")]
#[command(group(ArgGroup::new("op").required(true).args(["wrap", "action", "supported"])))]
struct Args {
    /// File to operate on (UTF-8 text). Its name selects the syntax.
    pub path: PathBuf,
    /// Caret position as a char offset (`42`) or 1-based `LINE:COL`. Repeat for multiple carets.
    #[arg(long = "at")]
    pub at: Vec<CaretSpec>,
    /// Insert a log statement for the expression under each caret.
    #[arg(long)]
    pub wrap: bool,
    /// With `--wrap`, insert above the caret line instead of below.
    #[arg(long, requires = "wrap")]
    pub before: bool,
    /// Run a named action: remove_logs, comment_logs, show_quick_nav.
    #[arg(long)]
    pub action: Option<String>,
    /// Report whether the action command is enabled for the carets (exit status 1 if not).
    #[arg(long)]
    pub supported: bool,
    /// Optional configuration file path (overrides discovery of `consolewrap.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Write the result back to the file instead of printing it.
    #[arg(long)]
    pub in_place: bool,
    /// Directory for `consolewrap.log` (defaults to the working directory).
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,
}

/// A caret requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaretSpec {
    Offset(usize),
    /// 1-based line and column.
    LineCol(usize, usize),
}

impl FromStr for CaretSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((line, col)) => {
                let line: usize = line.trim().parse().context("invalid caret line")?;
                let col: usize = col.trim().parse().context("invalid caret column")?;
                if line == 0 || col == 0 {
                    bail!("caret line and column are 1-based");
                }
                Ok(CaretSpec::LineCol(line, col))
            }
            None => Ok(CaretSpec::Offset(
                s.trim().parse().context("invalid caret offset")?,
            )),
        }
    }
}

impl CaretSpec {
    fn offset(self, view: &BufferView) -> usize {
        match self {
            CaretSpec::Offset(offset) => offset,
            CaretSpec::LineCol(line, col) => view.text_point(line - 1, col - 1),
        }
    }
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self, dir: Option<&Path>) -> Result<()> {
        let log_dir = dir.unwrap_or_else(|| Path::new("."));
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn load_view(path: &Path, carets: &[CaretSpec]) -> Result<BufferView> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    let mut view = BufferView::new(name, &content)?;
    let offsets: Vec<usize> = carets.iter().map(|c| c.offset(&view)).collect();
    view.set_carets(&offsets);
    tracing::debug!(
        target: "io",
        file = %path.display(),
        size_chars = view.size(),
        carets = offsets.len(),
        "file_read_ok"
    );
    Ok(view)
}

fn report(view: &BufferView, result: Option<&DispatchResult>) {
    for msg in view.status_messages() {
        eprintln!("{msg}");
    }
    for item in view.quick_panel() {
        eprintln!("{:>5}: {}", item.line + 1, item.text);
    }
    if let Some(result) = result {
        info!(
            target: "runtime",
            cursors = result.cursors,
            invoked = result.invoked,
            unsupported = result.unsupported,
            unregistered = result.unregistered,
            "command_complete"
        );
    }
}

fn run(args: Args) -> Result<bool> {
    let config = load_from(args.config.clone())?;
    let ctx = Context::from_config(&config)?;
    let mut view = load_view(&args.path, &args.at)?;

    if args.supported {
        let enabled = ConsoleActionCommand::new(&ctx).is_enabled(&mut view);
        println!("{}", if enabled { "supported" } else { "unsupported" });
        return Ok(enabled);
    }

    let result = if args.wrap {
        ConsoleWrapCommand::new(&ctx).run(&mut view, args.before)?
    } else if let Some(action) = args.action.as_deref() {
        ConsoleActionCommand::new(&ctx).run(&mut view, action)?
    } else {
        bail!("no operation requested");
    };
    report(&view, Some(&result));

    if args.in_place {
        if !view.history().is_empty() {
            std::fs::write(&args.path, view.text())
                .with_context(|| format!("failed to write {}", args.path.display()))?;
            info!(target: "io", file = %args.path.display(), "file_write_ok");
        }
    } else {
        print!("{}", view.text());
    }
    Ok(true)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging(args.log_dir.as_deref())?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", path = %args.path.display(), "startup");

    // Returning keeps `startup` alive until the log writer has flushed.
    match run(args) {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::from(1)),
        Err(e) => {
            error!(target: "runtime", error = %e, "command_failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_spec_parses_offset_and_line_col() {
        assert_eq!("42".parse::<CaretSpec>().unwrap(), CaretSpec::Offset(42));
        assert_eq!("3:7".parse::<CaretSpec>().unwrap(), CaretSpec::LineCol(3, 7));
        assert!("0:1".parse::<CaretSpec>().is_err());
        assert!("x".parse::<CaretSpec>().is_err());
    }

    #[test]
    fn caret_line_col_maps_to_offset() {
        let view = BufferView::new("a.js", "ab\ncdef\n").unwrap();
        assert_eq!(CaretSpec::LineCol(2, 3).offset(&view), 5);
        assert_eq!(CaretSpec::Offset(1).offset(&view), 1);
    }

    #[test]
    fn args_require_exactly_one_operation() {
        assert!(Args::try_parse_from(["consolewrap", "a.js"]).is_err());
        assert!(Args::try_parse_from(["consolewrap", "a.js", "--wrap", "--action", "remove_logs"]).is_err());
        assert!(Args::try_parse_from(["consolewrap", "a.js", "--before"]).is_err());
        let args = Args::try_parse_from(["consolewrap", "a.js", "--wrap", "--before", "--at", "2:1"]).unwrap();
        assert!(args.wrap && args.before);
        assert_eq!(args.at, vec![CaretSpec::LineCol(2, 1)]);
    }

    #[test]
    fn unsupported_file_reports_false_without_exiting() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("demo.rb");
        std::fs::write(&file, "x = 1\n").unwrap();
        let args = Args::try_parse_from([
            "consolewrap",
            file.to_str().unwrap(),
            "--supported",
            "--config",
            dir.path().join("missing.toml").to_str().unwrap(),
        ])
        .unwrap();
        assert!(!run(args).unwrap());
    }

    #[test]
    fn run_prints_and_writes_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("demo.js");
        std::fs::write(&file, "const total = 1;\n").unwrap();
        let args = Args::try_parse_from([
            "consolewrap",
            file.to_str().unwrap(),
            "--wrap",
            "--at",
            "1:8",
            "--in-place",
            "--config",
            dir.path().join("missing.toml").to_str().unwrap(),
        ])
        .unwrap();
        assert!(run(args).unwrap());
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "const total = 1;\nconsole.log(\"total\", total);\n"
        );
    }
}
