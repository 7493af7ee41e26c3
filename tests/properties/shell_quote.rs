//! Property tests for shell quoting.

use proptest::prelude::*;

use sitedeploy::domain::shell_quote;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: sh reads a quoted word back as exactly the original word.
    #[cfg(unix)]
    #[test]
    fn property_quoted_word_survives_sh(word in "[ -~]{0,24}") {
        let script = format!("printf %s {}", shell_quote(&word));
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(&script)
            .output()
            .unwrap();

        prop_assert!(output.status.success(), "script failed: {}", script);
        prop_assert_eq!(String::from_utf8_lossy(&output.stdout).to_string(), word);
    }

    /// PROPERTY: Quoting is the identity only for words without shell syntax.
    #[test]
    fn property_bare_words_have_no_metacharacters(word in ".{0,24}") {
        let quoted = shell_quote(&word);
        if quoted == word {
            prop_assert!(!word.is_empty());
            prop_assert!(
                !word.chars().any(|c| " \t\n'\"\\$`;&|<>()*?[]{}#~!".contains(c)),
                "bare word {:?} has shell metacharacters",
                word
            );
        } else {
            prop_assert!(quoted.starts_with('\'') && quoted.ends_with('\''));
        }
    }
}
