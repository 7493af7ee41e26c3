#![no_main]

use libfuzzer_sys::fuzz_target;
use sitedeploy::{Template, TemplateContext};

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let template = Template::new("fuzz", source);
        // Bind every other placeholder so both render paths are exercised
        let ctx: TemplateContext = template
            .placeholders()
            .into_iter()
            .step_by(2)
            .map(|name| (name, "value"))
            .collect();
        let _ = template.render(&ctx);
    }
});
