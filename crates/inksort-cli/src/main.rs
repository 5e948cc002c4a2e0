use futures::executor::block_on;
use inksort::render::{
    HeadlessError, OutputFormat, RenderError, Session, SessionOptions, TextSource,
    read_text_input, render_output, sort_precomputed, sort_text_input,
};
use inksort::{DEFAULT_FREQUENCY_MAP_PATH, FontSpec, count_characters, write_frequency_map};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(inksort::Error),
    Headless(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Headless(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<inksort::Error> for CliError {
    fn from(value: inksort::Error) -> Self {
        Self::Core(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Headless(HeadlessError::Render(value))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Sort,
    Precomputed,
    Count,
    Metrics,
    Weights,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    count_out: Option<String>,
    format: OutputFormat,
    out: Option<String>,
    pretty: bool,
    font_family: Option<String>,
    font_size: Option<f32>,
    font_files: Vec<PathBuf>,
    no_system_fonts: bool,
}

fn usage() -> &'static str {
    "inksort\n\
\n\
USAGE:\n\
  inksort [sort] [--format text|html] [--out <path>] [FONT OPTIONS] [<path>|-]\n\
  inksort precomputed [--format text|html] [--out <path>] [FONT OPTIONS] [<frequency-map.json>]\n\
  inksort count <corpus> [<out.json>]\n\
  inksort metrics [--pretty] [FONT OPTIONS]\n\
  inksort weights [--pretty] [FONT OPTIONS] [<path>|-]\n\
\n\
FONT OPTIONS:\n\
  --font-family <css-family-list>   default: \"Courier New\", Courier, monospace\n\
  --font-size <px>                  default: 72\n\
  --font-file <path>                load an extra font file (repeatable)\n\
  --no-system-fonts                 only use --font-file fonts\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - sort drops newlines and prints the characters ordered by glyph ink weight.\n\
  - precomputed reads ./deconstructed.json unless a path is given.\n\
  - count writes ./deconstructed.json unless <out.json> is given.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut positionals = Vec::new();
    let mut command_seen = false;

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "sort" if !command_seen && positionals.is_empty() => {
                args.command = Command::Sort;
                command_seen = true;
            }
            "precomputed" if !command_seen && positionals.is_empty() => {
                args.command = Command::Precomputed;
                command_seen = true;
            }
            "count" if !command_seen && positionals.is_empty() => {
                args.command = Command::Count;
                command_seen = true;
            }
            "metrics" if !command_seen && positionals.is_empty() => {
                args.command = Command::Metrics;
                command_seen = true;
            }
            "weights" if !command_seen && positionals.is_empty() => {
                args.command = Command::Weights;
                command_seen = true;
            }
            "--pretty" => args.pretty = true,
            "--no-system-fonts" => args.no_system_fonts = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--font-family" => {
                let Some(family) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.font_family = Some(family.clone());
            }
            "--font-size" => {
                let Some(size) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let size = size.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(size.is_finite() && size > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.font_size = Some(size);
            }
            "--font-file" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.font_files.push(PathBuf::from(path));
            }
            "--" => {
                positionals.extend(it.by_ref().cloned());
            }
            "-" => positionals.push(a.clone()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => positionals.push(path.to_string()),
        }
    }

    let max_positionals = match args.command {
        Command::Count => 2,
        Command::Metrics => 0,
        _ => 1,
    };
    if positionals.len() > max_positionals {
        return Err(CliError::Usage(usage()));
    }
    let mut positionals = positionals.into_iter();
    args.input = positionals.next();
    args.count_out = positionals.next();

    if matches!(args.command, Command::Count) && args.input.is_none() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn session_options(args: &Args) -> SessionOptions {
    let defaults = FontSpec::default();
    SessionOptions {
        font: FontSpec {
            family: args.font_family.clone().unwrap_or(defaults.family),
            size_px: args.font_size.unwrap_or(defaults.size_px),
        },
        font_files: args.font_files.clone(),
        skip_system_fonts: args.no_system_fonts,
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Count => {
            let source = TextSource::from_arg(args.input.as_deref());
            let corpus = block_on(read_text_input(source))?;
            let map = count_characters(&corpus);
            let out = PathBuf::from(
                args.count_out
                    .as_deref()
                    .unwrap_or(DEFAULT_FREQUENCY_MAP_PATH),
            );
            write_frequency_map(&out, &map)?;
            tracing::info!(
                distinct = map.len(),
                total = map.total(),
                out = %out.display(),
                "wrote frequency map"
            );
            Ok(())
        }
        Command::Metrics => {
            let session = Session::initialize(session_options(&args))?;
            write_json(session.geometry(), args.pretty)?;
            session.teardown();
            Ok(())
        }
        Command::Weights => {
            let mut session = Session::initialize(session_options(&args))?;
            let text = block_on(read_text_input(TextSource::from_arg(args.input.as_deref())))?;
            let mut weights = Map::new();
            for (ch, weight) in session.weigh(&text)? {
                weights
                    .entry(ch.to_string())
                    .or_insert_with(|| Value::from(weight));
            }
            write_json(&weights, args.pretty)?;
            session.teardown();
            Ok(())
        }
        Command::Sort => {
            let mut session = Session::initialize(session_options(&args))?;
            let source = TextSource::from_arg(args.input.as_deref());
            let sorted = block_on(sort_text_input(&mut session, source))?;
            let rendered = render_output(&sorted, session.font(), args.format);
            write_text(&rendered, args.out.as_deref())?;
            let measured = session.teardown();
            tracing::debug!(measured, "sorted text input");
            Ok(())
        }
        Command::Precomputed => {
            let mut session = Session::initialize(session_options(&args))?;
            let path = PathBuf::from(args.input.as_deref().unwrap_or(DEFAULT_FREQUENCY_MAP_PATH));
            let sorted = block_on(sort_precomputed(&mut session, path))?;
            let rendered = render_output(&sorted, session.font(), args.format);
            write_text(&rendered, args.out.as_deref())?;
            let measured = session.teardown();
            tracing::debug!(measured, "sorted precomputed frequency map");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
