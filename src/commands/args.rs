//! `args` command: sanitize options and print the argument vector

use crate::args::{build, ArgumentList};
use crate::config::Config;
use crate::sanitize::sanitize;
use crate::types::RoboError;

use super::print_json;

/// Sanitize the configured options and build the robocopy arguments.
pub fn build_arguments(config: &Config) -> Result<ArgumentList, RoboError> {
    config.validate()?;
    let request = sanitize(&config.raw_options)?;
    Ok(build(&request))
}

pub fn run(config: &Config) -> Result<ArgumentList, RoboError> {
    let args = build_arguments(config)?;
    if config.json {
        print_json(&args)?;
    } else {
        println!("{} {}", config.program, args);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_arguments_from_raw_options() {
        let config = Config {
            raw_options: json!({
                "source": "C:\\data",
                "destination": "E:\\backup",
                "mirrorMode": true,
                "threads": 16,
                "multiThread": true,
            }),
            ..Config::default()
        };
        let args = build_arguments(&config).unwrap();
        assert_eq!(
            args.as_slice(),
            ["C:\\data", "E:\\backup", "/MIR", "/R:1000000", "/W:30", "/MT:16"]
        );
    }

    #[test]
    fn test_build_arguments_rejects_unsafe_source() {
        let config = Config {
            raw_options: json!({ "source": "C:\\a & del *", "destination": "D:\\b" }),
            ..Config::default()
        };
        let err = build_arguments(&config).unwrap_err();
        assert!(err.is_validation_error());
    }
}
