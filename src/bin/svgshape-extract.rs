use std::path::PathBuf;
use std::process::ExitCode;

use svgshape::{SvgShape, SvgShapeError};

const USAGE: &str = "usage: svgshape-extract -f|--file <svg> [--allow-dtd] \
[--debug-log <path>] [--perf-log <path>]";

struct Args {
    file: PathBuf,
    allow_dtd: bool,
    debug_log: Option<PathBuf>,
    perf_log: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut file = None;
    let mut allow_dtd = false;
    let mut debug_log = None;
    let mut perf_log = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" | "--file" => file = args.next().map(PathBuf::from),
            "--allow-dtd" => allow_dtd = true,
            "--debug-log" => debug_log = args.next().map(PathBuf::from),
            "--perf-log" => perf_log = args.next().map(PathBuf::from),
            other => return Err(format!("unexpected argument '{other}'")),
        }
    }
    let file = file.ok_or_else(|| "missing required -f/--file".to_string())?;
    Ok(Args {
        file,
        allow_dtd,
        debug_log,
        perf_log,
    })
}

fn run(args: Args) -> Result<String, SvgShapeError> {
    let mut builder = SvgShape::builder().allow_dtd(args.allow_dtd);
    if let Some(path) = args.debug_log {
        builder = builder.debug_log(path);
    }
    if let Some(path) = args.perf_log {
        builder = builder.perf_log(path);
    }
    let engine = builder.build()?;
    let result = engine
        .extract_file(&args.file)
        .and_then(|doc| doc.to_json_pretty());
    engine.flush();
    result
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    match run(args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
