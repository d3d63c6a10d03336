use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const FOO_BAR: &str = "=pod

=head1 NAME

FOO_bar - does a thing

=head1 SYNOPSIS

 #include <openssl/foo.h>

 int FOO_bar(int x);

=head1 DESCRIPTION

Does a thing.

=head1 RETURN VALUES

Zero.

=head1 COPYRIGHT

Copyright 2016 The OpenSSL Project Authors. All Rights Reserved.

=cut
";

const FOO_BAZ: &str = "=pod

=head1 NAME

FOO_baz - does another thing

=head1 SYNOPSIS

 #include <openssl/foo.h>

 int FOO_qux(void);

=head1 DESCRIPTION

Does another thing.

=head1 COPYRIGHT

Copyright 2016 The OpenSSL Project Authors. All Rights Reserved.

=cut
";

const TOOL: &str = "=pod

=head1 NAME

openssl-tool - runs things

=head1 SYNOPSIS

B<openssl tool>

=head1 DESCRIPTION

Runs things.

=head1 OPTIONS

None.

=head1 COPYRIGHT

Copyright 2016 The OpenSSL Project Authors. All Rights Reserved.

=cut
";

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, text).expect("write fixture");
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path();
    write(root, "doc/man3/FOO_bar.pod", FOO_BAR);
    write(root, "doc/man3/FOO_baz.pod", FOO_BAZ);
    write(root, "doc/man1/tool.pod", TOOL);
    write(
        root,
        "util/libcrypto.num",
        "FOO_bar 1 1_1_0 EXIST::FUNCTION:\n\
         FOO_baz 2 1_1_0 EXIST::FUNCTION:\n\
         FOO_gone 3 1_1_0 NOEXIST::FUNCTION:\n\
         FOO_undoc 4 1_1_0 EXIST::FUNCTION:\n",
    );
    write(root, "util/libssl.num", "SSL_x 1 1_1_0 EXIST::FUNCTION:\n");
    tmp
}

fn podnits(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("podnits").expect("bin");
    cmd.current_dir(dir).env_remove("PODNITS_LOG");
    cmd
}

fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = podnits(dir).args(args).output().expect("run podnits");
    assert!(output.status.success(), "podnits {args:?} failed");
    String::from_utf8(output.stdout).expect("utf8")
}

const NITS: &str = "\
doc/man3/FOO_baz.pod:1: FOO_qux missing from NAME section
doc/man3/FOO_baz.pod:1: FOO_baz missing from SYNOPSIS
";

const UNDOCUMENTED: &str = "\
# Found 3 in util/libcrypto.num
crypto:FOO_undoc
# Found 1 missing from util/libcrypto.num
# Found 1 in util/libssl.num
ssl:SSL_x
# Found 1 missing from util/libssl.num
";

#[test]
fn no_action_prints_usage() {
    let tmp = fixture();
    podnits(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn nits_report_only_inconsistent_pages() {
    let tmp = fixture();
    assert_eq!(stdout_of(tmp.path(), &["-n"]), NITS);
}

#[test]
fn undocumented_exports_are_listed_per_library() {
    let tmp = fixture();
    assert_eq!(stdout_of(tmp.path(), &["-u"]), UNDOCUMENTED);
}

#[test]
fn coverage_runs_before_nits() {
    let tmp = fixture();
    assert_eq!(
        stdout_of(tmp.path(), &["-n", "-u"]),
        format!("{UNDOCUMENTED}{NITS}")
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let tmp = fixture();
    let first = stdout_of(tmp.path(), &["-n", "-u"]);
    let second = stdout_of(tmp.path(), &["-n", "-u"]);
    assert_eq!(first, second);
}

#[test]
fn explicit_pages_replace_the_glob() {
    let tmp = fixture();
    assert_eq!(stdout_of(tmp.path(), &["-n", "doc/man3/FOO_bar.pod"]), "");
}

#[test]
fn root_flag_points_at_another_tree() {
    let tmp = fixture();
    let elsewhere = TempDir::new().expect("tempdir");
    let root = tmp.path().to_str().expect("utf-8 root");
    let out = stdout_of(elsewhere.path(), &["-n", "--root", root]);
    let baz = tmp.path().join("doc/man3/FOO_baz.pod");
    assert_eq!(
        out,
        format!(
            "{0}:1: FOO_qux missing from NAME section\n{0}:1: FOO_baz missing from SYNOPSIS\n",
            baz.display()
        )
    );
}

#[test]
fn unreadable_page_aborts_with_an_error() {
    let tmp = fixture();
    podnits(tmp.path())
        .args(["-n", "doc/man3/FOO_baz.pod", "doc/man3/missing.pod"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FOO_baz missing from SYNOPSIS"))
        .stderr(predicate::str::contains("podnits: io error: couldn't open doc/man3/missing.pod"))
        .stderr(predicate::str::contains("ErrorInfo {").not());
}

#[test]
fn non_utf8_byte_does_not_stop_the_run() {
    let tmp = fixture();
    let mut bytes = FOO_BAR.replace("Does a thing.", "Does a caf\u{0}.").into_bytes();
    let pos = bytes.iter().position(|b| *b == 0).expect("placeholder");
    bytes[pos] = 0xE9;
    fs::write(tmp.path().join("doc/man3/FOO_bar.pod"), bytes).expect("write page");

    assert_eq!(stdout_of(tmp.path(), &["-n"]), NITS);
    assert_eq!(stdout_of(tmp.path(), &["-u"]), UNDOCUMENTED);
}

#[test]
fn strict_mode_checks_sections_and_survives_a_missing_checker() {
    let tmp = fixture();
    write(
        tmp.path(),
        "podnits.yaml",
        "external_checker:\n  program: podnits-no-such-checker\n",
    );
    podnits(tmp.path())
        .args(["-s", "--config", "podnits.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "doc/man3/FOO_baz.pod:1: missing RETURN VALUES head1 section",
        ))
        .stdout(predicate::str::contains("FOO_bar.pod").not())
        .stdout(predicate::str::contains("tool.pod").not())
        .stderr(predicate::str::contains("external checker failed"));
}

#[test]
fn json_report_carries_every_entry() {
    let tmp = fixture();
    let out = stdout_of(tmp.path(), &["-n", "-u", "--format", "json"]);
    let value: Value = serde_json::from_str(&out).expect("json");
    let entries = value["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 8);
    assert_eq!(entries[0]["kind"], "note");
    assert_eq!(entries[1]["kind"], "undocumented");
    assert_eq!(entries[1]["symbol"], "FOO_undoc");
    assert_eq!(entries[7]["kind"], "page");
    assert_eq!(entries[7]["location"]["line"], 1);
}
