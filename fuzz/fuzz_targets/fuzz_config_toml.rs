#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing and validating deploy.toml should never panic
        if let Ok(config) = toml::from_str::<sitedeploy::DeployConfig>(content) {
            let path = Path::new("deploy.toml");
            let _ = config.parameter_specs(path);
            let _ = config.into_target(path);
        }
    }
});
