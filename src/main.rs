use std::process::ExitCode;

fn main() -> ExitCode {
    match roibridge::run() {
        Ok(()) => ExitCode::SUCCESS,
        // The report has already been printed.
        Err(roibridge::RoiBridgeError::ValidationFailed { .. }) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
