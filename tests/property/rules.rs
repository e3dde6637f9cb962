//! Properties of the rule engine that hold for arbitrary inputs.

use proptest::prelude::*;
use repscan::RuleStore;

proptest! {
    /// `check_pattern` is the unrefined content rule: same pattern, no
    /// whitelist, no blacklist, same capture semantics.
    #[test]
    fn check_pattern_equals_unrefined_rule(content in "[ -~]{0,200}") {
        let pattern = r"key=([a-z0-9]{4,16})";
        let via_check = RuleStore::check_pattern(content.as_bytes(), pattern).unwrap();

        let mut store = RuleStore::new();
        store.add_content_rule("probe", pattern, &[], &[]).unwrap();
        let via_rule: Vec<String> = store
            .scan_content(content.as_bytes())
            .into_iter()
            .map(|m| m.text)
            .collect();

        prop_assert_eq!(via_check, via_rule);
    }

    /// Every reported capture re-matches its own rule pattern, and the
    /// pattern's capture of the evidence equals the evidence.
    #[test]
    fn emitted_matches_satisfy_their_rule(content in "[ -~]{0,200}") {
        let pattern = r"key=([a-z0-9]{4,16})";
        let regex = regex::Regex::new(pattern).unwrap();

        let mut store = RuleStore::new();
        store.add_content_rule("probe", pattern, &[], &[]).unwrap();

        for found in store.scan_content(content.as_bytes()) {
            let haystack = format!("key={}", found.text);
            let caps = regex.captures(&haystack);
            let recaptured = caps.and_then(|c| c.get(1)).map(|m| m.as_str().to_string());
            prop_assert_eq!(recaptured, Some(found.text));
        }
    }

    /// A path containing any ignored fragment is never eligible, no matter
    /// what surrounds the fragment.
    #[test]
    fn ignored_fragment_always_excludes(
        prefix in "[a-zA-Z0-9_/]{0,30}",
        suffix in "[a-zA-Z0-9_/.]{0,30}",
    ) {
        let mut store = RuleStore::new();
        store.add_ignored_file_path("node_modules").unwrap();

        let path = format!("{prefix}node_modules{suffix}");
        prop_assert!(!store.should_scan_file_path(&path));
    }

    /// An ignored extension excludes exactly the paths whose last-dot
    /// suffix equals it.
    #[test]
    fn ignored_extension_matches_last_dot_suffix(stem in "[a-zA-Z0-9_.]{1,30}") {
        let mut store = RuleStore::new();
        store.add_ignored_file_extension("pem").unwrap();

        let path = format!("{stem}.pem");
        prop_assert!(!store.should_scan_file_path(&path));

        let other = format!("{stem}.pem.txt");
        prop_assert!(store.should_scan_file_path(&other));
    }

    /// Blacklisted candidates never survive, whatever the buffer looks like.
    #[test]
    fn blacklist_always_suppresses(content in "[ -~]{0,200}") {
        let mut store = RuleStore::new();
        store
            .add_content_rule(
                "probe",
                r"key=([A-Za-z0-9_]+)",
                &[],
                &["EXAMPLE".to_string()],
            )
            .unwrap();

        let seeded = format!("{content} key=EXAMPLE_abc123");
        for found in store.scan_content(seeded.as_bytes()) {
            prop_assert!(!found.text.contains("EXAMPLE"));
        }
    }
}
