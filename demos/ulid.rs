//! Simple command that prints one or '-n count' ULID strings, or inspects one with '-d ULID'

use std::{env, io, io::Write, process::ExitCode};

use pgulid::Ulid;

enum Command {
    Generate(usize),
    Decode(Ulid),
}

fn main() -> io::Result<ExitCode> {
    let command = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count | -d ULID]",
                    program.as_deref().unwrap_or("ulid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    match command {
        Command::Generate(count) => {
            for _ in 0..count {
                writeln!(buf, "{}", pgulid::ulid())?;
            }
        }
        Command::Decode(value) => {
            writeln!(buf, "unix_ts_ms: {}", value.unix_ts_ms())?;
            writeln!(buf, "pg_micros:  {}", value.to_timestamp().as_micros())?;
            writeln!(buf, "randomness: {:020x}", value.randomness())?;
            writeln!(buf, "bytes:      {:032x}", u128::from(value))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut command = None;
    while let Some(arg) = args.next() {
        if arg != "-n" && arg != "-d" {
            return Err(format!("unrecognized argument '{}'", arg));
        }
        if command.is_some() {
            return Err("options 'n' and 'd' given more than once".to_owned());
        }
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", &arg[1..]));
        };
        command = Some(if arg == "-n" {
            let Ok(count) = value.parse() else {
                return Err(format!("invalid argument to option 'n': '{}'", value));
            };
            Command::Generate(count)
        } else {
            match value.parse() {
                Ok(decoded) => Command::Decode(decoded),
                Err(err) => return Err(format!("invalid argument to option 'd': {}", err)),
            }
        });
    }
    Ok(command.unwrap_or(Command::Generate(1)))
}
