use std::process::ExitCode;

use svgshape::{ColorLiteral, normalize};

const USAGE: &str = "usage: svgshape-color <color> [-d|--debug]\n\
  e.g. '#FF0000', 'rgb(255,0,0)', 'hsl(0,100%,50%)', 'red'";

fn main() -> ExitCode {
    let mut color: Option<String> = None;
    let mut debug = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-d" | "--debug" => debug = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            _ if color.is_none() => color = Some(arg),
            _ => {
                eprintln!("unexpected argument '{arg}'\n{USAGE}");
                return ExitCode::from(2);
            }
        }
    }
    let Some(color) = color else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let literal = ColorLiteral::classify(&color);
    match normalize(&literal) {
        Ok(value) => {
            println!("RGBA: {value}");
            if debug {
                println!("Input color: {color}");
                println!("Color type: {}", literal.kind());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
