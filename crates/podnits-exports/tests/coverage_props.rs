use std::collections::BTreeSet;
use std::path::Path;

use podnits_core::{CheckContext, Report};
use podnits_exports::{check_coverage, ExportManifest};
use proptest::prelude::*;

proptest! {
    #[test]
    fn undocumented_is_manifest_minus_index(
        exported in prop::collection::btree_set("[A-Z]{1,3}_[a-z]{1,6}", 0..20),
        documented in prop::collection::btree_set("[A-Z]{1,3}_[a-z]{1,6}", 0..20),
    ) {
        let text: String = exported.iter().map(|sym| format!("{sym} 1 1_1_0 EXIST::FUNCTION:\n")).collect();
        let manifest = ExportManifest::parse("lib.num", &text);
        let mut context = CheckContext::new();
        for name in &documented {
            context.documented.record(name.as_str(), Path::new("doc/man3/x.pod"));
        }
        let mut report = Report::new();
        let count = check_coverage(&manifest, "lib", &context, &[], &mut report);

        let reported: BTreeSet<String> = report
            .undocumented_symbols()
            .map(|(_, symbol)| symbol.to_string())
            .collect();
        let expected: BTreeSet<String> = exported.difference(&documented).cloned().collect();
        prop_assert_eq!(count, expected.len());
        prop_assert_eq!(reported, expected);
    }
}
