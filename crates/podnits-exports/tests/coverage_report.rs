use std::fs;
use std::path::{Path, PathBuf};

use podnits_core::{CheckContext, Config, ManifestSpec, NitsError, Report};
use podnits_exports::{check_coverage, index_manual_dir, is_exempt, report_undocumented, ExportManifest};

fn manifest(symbols: &[&str]) -> ExportManifest {
    let text: String = symbols
        .iter()
        .enumerate()
        .map(|(idx, sym)| format!("{sym} {} 1_1_0 EXIST::FUNCTION:\n", idx + 1))
        .collect();
    ExportManifest::parse("util/libcrypto.num", &text)
}

#[test]
fn only_undocumented_symbols_are_reported() {
    let mut context = CheckContext::new();
    context.documented.record("A", Path::new("doc/man3/A.pod"));
    let mut report = Report::new();
    let count = check_coverage(&manifest(&["A", "B", "C"]), "crypto", &context, &[], &mut report);
    assert_eq!(count, 2);
    assert_eq!(
        report.render_lines(),
        vec![
            "crypto:B".to_string(),
            "crypto:C".to_string(),
            "# Found 2 missing from util/libcrypto.num".to_string(),
        ]
    );
}

#[test]
fn exempt_prefixes_are_skipped() {
    let exempt = vec!["ASN1_".to_string()];
    assert!(is_exempt("ASN1_item_new", &exempt));
    assert!(!is_exempt("X509_ASN1_thing", &exempt));

    let context = CheckContext::new();
    let mut report = Report::new();
    let count = check_coverage(
        &manifest(&["ASN1_item_new", "EVP_md5"]),
        "crypto",
        &context,
        &exempt,
        &mut report,
    );
    assert_eq!(count, 1);
    let symbols: Vec<(&str, &str)> = report.undocumented_symbols().collect();
    assert_eq!(symbols, vec![("crypto", "EVP_md5")]);
}

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, text).expect("write");
}

#[test]
fn index_notes_names_claimed_twice() {
    let dir = tempfile::tempdir().expect("tempdir");
    let man3 = dir.path().join("man3");
    write(&man3.join("a.pod"), "=pod\n\n=head1 NAME\n\nFOO_new,\nFOO_free - make\n\n=cut\n");
    write(&man3.join("b.pod"), "=pod\n\n=head1 NAME\n\nFOO_free - release\n\n=cut\n");
    write(&man3.join("notes.txt"), "=head1 NAME\n\nIGNORED - x\n");

    let mut context = CheckContext::new();
    let mut report = Report::new();
    let pages = index_manual_dir(&mut context.documented, &man3, "pod", &mut report).expect("index");
    assert_eq!(pages, 2);
    assert!(context.documented.contains("FOO_new"));
    assert!(!context.documented.contains("IGNORED"));
    assert_eq!(
        context.documented.page_for("FOO_free"),
        Some(man3.join("b.pod").as_path())
    );
    assert_eq!(
        report.render_lines(),
        vec![format!(
            "# Duplicate FOO_free in {} and {}",
            man3.join("b.pod").display(),
            man3.join("a.pod").display()
        )]
    );
}

fn project(root: &Path) -> Config {
    write(&root.join("doc/man3/EVP_md5.pod"), "=pod\n\n=head1 NAME\n\nEVP_md5, EVP_sha1 - digests\n\n=cut\n");
    write(
        &root.join("util/libcrypto.num"),
        "EVP_md5 1 1_1_0 EXIST::FUNCTION:\nEVP_sha1 2 1_1_0 EXIST::FUNCTION:\nEVP_sm3 3 1_1_0 EXIST::FUNCTION:SM3\n",
    );
    write(&root.join("util/libssl.num"), "SSL_new 1 1_1_0 EXIST::FUNCTION:\n");
    Config {
        root: root.to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn full_pass_covers_every_manifest_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = project(dir.path());
    let mut report = Report::new();
    report_undocumented(&config, &mut CheckContext::new(), &mut report).expect("coverage");

    let crypto = dir.path().join("util/libcrypto.num");
    let ssl = dir.path().join("util/libssl.num");
    assert_eq!(
        report.render_lines(),
        vec![
            format!("# Found 3 in {}", crypto.display()),
            "crypto:EVP_sm3".to_string(),
            format!("# Found 1 missing from {}", crypto.display()),
            format!("# Found 1 in {}", ssl.display()),
            "ssl:SSL_new".to_string(),
            format!("# Found 1 missing from {}", ssl.display()),
        ]
    );
}

#[test]
fn unreadable_manifest_aborts_the_pass() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = project(dir.path());
    config.manifests.push(ManifestSpec::new("extra", PathBuf::from("util/libextra.num")));
    let err = report_undocumented(&config, &mut CheckContext::new(), &mut Report::new()).unwrap_err();
    assert!(matches!(err, NitsError::Parse(_)));
}
