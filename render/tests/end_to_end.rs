//! End-to-end: JUnit files on disk → detail pages + summary table.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use cireport_render::{
    generate, render_step_summary, render_summary_table, FootnoteStyle, HtmlDetailTemplate,
    MuteRulesLink,
};
use cireport_results::{ResultSet, Summary};
use pulldown_cmark::{Event, Options, Parser, Tag};

const URL_PREFIX: &str = "https://storage.example/run-42/";

fn write_junit(dir: &Path, passed: usize, failed: usize) {
    let mut xml = String::from("<testsuite name=\"suite\">\n");
    for i in 0..passed {
        xml.push_str(&format!(
            "  <testcase classname=\"cloud/tests\" name=\"pass_{i:02}\" time=\"0.{i}\"/>\n"
        ));
    }
    for i in 0..failed {
        xml.push_str(&format!(
            "  <testcase classname=\"cloud/tests\" name=\"fail_{i:02}\" time=\"3\">\
             <failure>assertion failed</failure></testcase>\n"
        ));
    }
    xml.push_str("</testsuite>\n");
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("junit.xml"), xml).unwrap();
}

/// Counts body rows of the first markdown table.
fn table_body_rows(markdown: &str) -> usize {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    Parser::new_ext(markdown, opts)
        .filter(|e| matches!(e, Event::Start(Tag::TableRow)))
        .count()
}

fn run(sets: &[&str], out: &Path) -> Summary {
    let sets = ResultSet::from_triples(sets).unwrap();
    generate(&sets, URL_PREFIX, out, &HtmlDetailTemplate).unwrap()
}

#[test]
fn empty_configuration_leaves_no_trace() {
    let tmp = tempfile::tempdir().unwrap();
    let x64 = tmp.path().join("x64");
    let arm = tmp.path().join("arm");
    write_junit(&x64, 9, 1);
    fs::create_dir_all(&arm).unwrap();
    let out = tmp.path().join("out");

    let summary = run(
        &[
            "linux-x64",
            "x64.html",
            x64.to_str().unwrap(),
            "linux-arm",
            "arm.html",
            arm.to_str().unwrap(),
        ],
        &out,
    );

    assert_eq!(summary.lines().len(), 1);
    assert_eq!(summary.lines()[0].title, "linux-x64");
    assert!(summary.is_failed());
    assert!(out.join("x64.html").exists());
    assert!(!out.join("arm.html").exists());

    let table = render_summary_table(&summary, FootnoteStyle::Reference, &MuteRulesLink::default())
        .join("\n");
    assert_eq!(table_body_rows(&table), 1);
    assert!(!table.contains("linux-arm"));
    assert!(table.contains("[10](https://storage.example/run-42/x64.html)"));
    assert!(table.contains("[9](https://storage.example/run-42/x64.html#PASS)"));
    assert!(table.contains("[1](https://storage.example/run-42/x64.html#FAIL)"));

    let page = fs::read_to_string(out.join("x64.html")).unwrap();
    assert!(page.find("id=\"FAIL\"").unwrap() < page.find("id=\"PASS\"").unwrap());
    assert!(page.contains(&format!("href=\"{URL_PREFIX}\"")));
}

#[test]
fn all_passing_configuration() {
    let tmp = tempfile::tempdir().unwrap();
    let x64 = tmp.path().join("x64");
    write_junit(&x64, 5, 0);

    let summary = run(&["linux-x64", "x64.html", x64.to_str().unwrap()], &tmp.path().join("out"));

    assert!(!summary.is_failed());
    let line = &summary.lines()[0];
    assert_eq!(line.test_count(), 5);
    assert_eq!(line.counters().pass, 5);
    assert_eq!(line.counters().total() - line.counters().pass, 0);

    let table = render_summary_table(&summary, FootnoteStyle::Reference, &MuteRulesLink::default());
    assert_eq!(
        table[2],
        "| [5](https://storage.example/run-42/x64.html) \
         | [5](https://storage.example/run-42/x64.html#PASS) | 0 | 0 | 0 | 0 | 0 |"
    );
    assert_eq!(table_body_rows(&table.join("\n")), 1);
}

#[test]
fn step_summary_is_a_well_formed_table_with_footnote() {
    let tmp = tempfile::tempdir().unwrap();
    let x64 = tmp.path().join("x64");
    let arm = tmp.path().join("arm");
    write_junit(&x64, 3, 0);
    write_junit(&arm, 1, 2);

    let summary = run(
        &[
            "linux-x64",
            "x64.html",
            x64.to_str().unwrap(),
            "linux-arm",
            "arm.html",
            arm.to_str().unwrap(),
        ],
        &tmp.path().join("out"),
    );

    let text = render_step_summary(&summary, &MuteRulesLink::default());
    assert_eq!(table_body_rows(&text), 2);

    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    let has_footnote = Parser::new_ext(&text, opts)
        .any(|e| matches!(e, Event::Start(Tag::FootnoteDefinition(_))));
    assert!(has_footnote);
}

#[test]
fn nothing_found_anywhere() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing");
    let summary = run(
        &["linux-x64", "x64.html", missing.to_str().unwrap()],
        &tmp.path().join("out"),
    );
    assert!(summary.is_empty());
    assert!(!summary.is_failed());
    assert!(render_step_summary(&summary, &MuteRulesLink::default())
        .starts_with(":red_circle: Test run completed, no test results found."));
}
