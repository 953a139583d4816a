pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod gtfs;
pub mod municipal;
pub mod output;

use std::{error::Error, process};

use crate::error::ProcessingError;

/// The error message followed by each of its causes.
pub fn describe_error(err: &ProcessingError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

/// Process exit status for a finished job, logging the failure if any.
pub fn exit_code(result: &error::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{}", describe_error(err));
            1
        }
    }
}

pub fn exit_on_error(result: error::Result<()>) {
    let code = exit_code(&result);
    if code != 0 {
        process::exit(code);
    }
}
