use std::process::ExitCode;

fn main() -> ExitCode {
    codeviz::cli::run()
}
