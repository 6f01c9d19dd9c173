use std::process::ExitCode;

fn main() -> ExitCode {
    catenc::cli::init_tracing();
    match catenc::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
