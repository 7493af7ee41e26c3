//! Property tests for template rendering.

use proptest::prelude::*;

use sitedeploy::{DeployError, Template, TemplateContext};

fn ident() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_][a-z0-9_]{0,8}").unwrap()
}

fn value() -> impl Strategy<Value = String> {
    // Values may contain braces; they must be copied verbatim
    proptest::string::string_regex("[A-Za-z0-9 /:.{}_-]{0,16}").unwrap()
}

fn text() -> impl Strategy<Value = String> {
    // Literal text without braces so placeholders are the only substitutions
    proptest::string::string_regex("[A-Za-z0-9 =:;#\\n-]{0,20}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: With every placeholder bound, rendering substitutes each one.
    #[test]
    fn property_render_replaces_every_placeholder(
        parts in proptest::collection::vec((text(), ident(), value()), 1..6),
        tail in text(),
    ) {
        let mut source = String::new();
        let mut expected = String::new();
        let mut ctx = TemplateContext::new();
        for (literal, name, val) in &parts {
            // First binding of a name wins in both source and expectation
            let bound = ctx.get(name).map(str::to_string).unwrap_or_else(|| val.clone());
            ctx.insert_default(name.as_str(), val.as_str());
            source.push_str(literal);
            source.push('{');
            source.push_str(name);
            source.push('}');
            expected.push_str(literal);
            expected.push_str(&bound);
        }
        source.push_str(&tail);
        expected.push_str(&tail);

        let rendered = Template::new("prop", source).render(&ctx).unwrap();
        prop_assert_eq!(rendered, expected);
    }

    /// PROPERTY: A missing placeholder is a Template error naming it.
    #[test]
    fn property_missing_placeholder_is_reported(
        literal in text(),
        name in ident(),
    ) {
        let source = format!("{}{{{}}}", literal, name);
        let err = Template::new("prop", source).render(&TemplateContext::new()).unwrap_err();

        match err {
            DeployError::Template { message, .. } => {
                let needle = format!("{{{}}}", name);
                prop_assert!(message.contains(&needle));
            }
            other => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// PROPERTY: Escaped braces render as single literal braces.
    #[test]
    fn property_escaped_braces_are_literal(literal in text()) {
        let source = format!("{{{{{}}}}}", literal);
        let rendered = Template::new("prop", source).render(&TemplateContext::new()).unwrap();
        prop_assert_eq!(rendered, format!("{{{}}}", literal));
    }

    /// PROPERTY: Rendering arbitrary input never panics.
    #[test]
    fn property_render_never_panics(source in ".{0,64}", name in ident(), val in value()) {
        let ctx = TemplateContext::new().with(name, val);
        let _ = Template::new("prop", source).render(&ctx);
    }
}
