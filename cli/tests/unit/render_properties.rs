//! Property-based tests for descriptor rendering.
//!
//! Uses `proptest` to verify invariants across many random environments.

#![allow(clippy::expect_used)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use agentctl::domain::{Environment, LaunchError, RunMode, render_descriptor};
use proptest::prelude::*;

fn run_mode() -> impl Strategy<Value = RunMode> {
    prop_oneof![
        Just(RunMode::Prod),
        Just(RunMode::Staging),
        Just(RunMode::Devel),
    ]
}

prop_compose! {
    fn valid_environment()(
        label in "[a-z][a-z0-9]{0,10}(\\.[a-z][a-z0-9]{0,10}){1,3}",
        program in "(/[a-zA-Z0-9_-]{1,12}){1,4}",
        args in prop::collection::vec("[ -~]{0,16}", 0..4),
        env in prop::collection::btree_map("[A-Z][A-Z0-9_]{0,8}", "[ -~]{0,16}", 0..4),
        log_dir in prop::option::of("(/[a-z]{1,8}){1,3}"),
        run_mode in run_mode(),
        keep_alive in any::<bool>(),
        run_at_load in any::<bool>(),
    ) -> Environment {
        let env: BTreeMap<String, String> = env
            .into_iter()
            .filter(|(k, _)| k != "RUN_MODE" && k != "LAUNCHD_LABEL")
            .collect();
        Environment {
            label,
            run_mode,
            program: PathBuf::from(program),
            args,
            working_dir: None,
            log_dir: log_dir.map(PathBuf::from),
            env,
            keep_alive,
            run_at_load,
        }
    }
}

proptest! {
    /// Identical input yields byte-identical output.
    #[test]
    fn prop_render_is_deterministic(env in valid_environment()) {
        let first = render_descriptor(&env).expect("valid environment renders");
        let second = render_descriptor(&env.clone()).expect("valid environment renders");
        prop_assert_eq!(first, second);
    }

    /// Every rendering is a complete plist carrying the label.
    #[test]
    fn prop_render_is_well_formed(env in valid_environment()) {
        let plist = render_descriptor(&env).expect("valid environment renders");
        let label_line = format!("<string>{}</string>", env.label);
        prop_assert!(plist.starts_with("<?xml"));
        prop_assert!(plist.ends_with("</plist>\n"));
        prop_assert!(plist.contains(&label_line));
        prop_assert_eq!(plist.matches("<dict>").count(), plist.matches("</dict>").count());
    }

    /// Control characters outside tab/newline/CR never reach the plist,
    /// whether they appear in an argument or an environment value.
    #[test]
    fn prop_control_characters_rejected(
        env in valid_environment(),
        prefix in "[ -~]{0,8}",
        control in prop::char::range('\u{0}', '\u{1f}')
            .prop_filter("XML whitespace", |c| !matches!(*c, '\t' | '\n' | '\r')),
        in_env in any::<bool>(),
    ) {
        let mut env = env;
        let value = format!("{prefix}{control}");
        if in_env {
            env.env.insert("TAINTED".to_string(), value);
        } else {
            env.args.push(value);
        }
        prop_assert!(matches!(render_descriptor(&env), Err(LaunchError::DescriptorGeneration(_))));
    }

    /// A relative program path is always rejected.
    #[test]
    fn prop_relative_program_rejected(
        env in valid_environment(),
        rel in "[a-z]{1,8}/[a-z]{1,8}",
    ) {
        let mut env = env;
        env.program = PathBuf::from(rel);
        prop_assert!(matches!(render_descriptor(&env), Err(LaunchError::DescriptorGeneration(_))));
    }

    /// Labels with a path separator never render.
    #[test]
    fn prop_label_with_separator_rejected(
        env in valid_environment(),
        a in "[a-z]{1,6}",
        b in "[a-z]{1,6}",
    ) {
        let mut env = env;
        env.label = format!("{a}/{b}");
        prop_assert!(render_descriptor(&env).is_err());
    }
}
