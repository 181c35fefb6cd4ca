use std::{
    env,
    fs::{read_to_string, write},
    path::{Path, PathBuf},
    process::exit,
    rc::Rc,
    time::Instant,
};

use scriptc::{
    compiler::compiler::compile,
    config::{CompileOptions, Target},
    errors::errors::Error,
    format_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{builtins::root_environment, type_checker::type_check},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: scriptc <file> [--target <js|py|lua>] [--output <path>] [--indent <n>]";

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    options: CompileOptions,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut input = None;
    let mut output = None;
    let mut options = CompileOptions::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--target" | "--output" | "--indent" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("missing value for {}", arg))?;

                match arg.as_str() {
                    "--target" => {
                        options.target = value
                            .parse::<Target>()
                            .map_err(|err| err.to_string())?;
                    }
                    "--output" => output = Some(PathBuf::from(value)),
                    _ => {
                        options.indent_width = value
                            .parse()
                            .map_err(|_| format!("invalid indent width: {}", value))?;
                    }
                }
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument: {}", extra)),
        }
    }

    Ok(Args {
        input: input.ok_or_else(|| String::from("no input file given"))?,
        output,
        options,
    })
}

/// Runs every stage over `source`, logging how long each one took.
fn run(source: &str, file_name: &str, options: &CompileOptions) -> Result<String, Error> {
    let start = Instant::now();

    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    info!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    let parse_start = Instant::now();
    let mut program = parse(tokens, Rc::new(file_name.to_string()))?;
    info!(elapsed = ?parse_start.elapsed(), "parsed");

    let type_check_start = Instant::now();
    let root = root_environment();
    type_check(&mut program, &root)?;
    info!(elapsed = ?type_check_start.elapsed(), "type checked");

    let compile_start = Instant::now();
    let output = compile(&program, options)?;
    info!(elapsed = ?compile_start.elapsed(), "generated");

    info!(elapsed = ?start.elapsed(), "total");
    Ok(output)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            exit(1);
        }
    };

    let source = match read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read {}: {}", args.input.display(), err);
            exit(1);
        }
    };

    let output = match run(&source, &file_name(&args.input), &args.options) {
        Ok(output) => output,
        Err(err) => {
            eprint!("{}", format_error(&err, &source));
            exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(err) = write(&path, output) {
                eprintln!("Failed to write {}: {}", path.display(), err);
                exit(1);
            }
        }
        None => print!("{}", output),
    }
}
