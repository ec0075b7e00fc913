use std::process::ExitCode;

fn main() -> ExitCode {
    haru_cli::run()
}
