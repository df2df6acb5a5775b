//! End-to-end conversions on disk.

use flate2::write::GzEncoder;
use flate2::Compression;
use gls_stardict::gls::GlsParser;
use gls_stardict::{
    convert, ConvertOptions, Direction, Error, FileKind, PackOutcome, ParseErrorKind,
};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

const SAMPLE: &str = "### Glossary title:Test\n\nfoo|Foo\nA test word.\n\nbar\nAnother.\n\n";

fn options() -> ConvertOptions {
    ConvertOptions::without_packing()
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn headword_sets(text: &str) -> Vec<(BTreeSet<String>, String)> {
    GlsParser::parse(text.as_bytes())
        .unwrap()
        .entries
        .into_iter()
        .map(|e| (e.headwords.into_iter().collect(), e.definition))
        .collect()
}

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_gls_to_stardict_and_back() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("sample.gls");
    fs::write(&gls, SAMPLE).unwrap();

    let report = convert(&gls, &options()).unwrap();
    assert_eq!(report.direction, Direction::GlsToStarDict);
    assert_eq!(report.entry_count, 2);
    assert_eq!(report.synonym_count, 1);
    assert_eq!(report.pack, PackOutcome::Skipped);

    assert_eq!(
        file_names(dir.path()),
        set(&[
            "sample.gls",
            "sample.ifo",
            "sample.idx.gz",
            "sample.dict",
            "sample.syn"
        ])
    );

    let ifo = fs::read_to_string(dir.path().join("sample.ifo")).unwrap();
    assert!(ifo.starts_with("StarDict's dict ifo file\nversion=2.4.2\nbookname=Test\n"));
    assert!(ifo.contains("\nwordcount=2\n"));
    assert!(ifo.contains("\nsynwordcount=1\n"));
    assert!(ifo.contains("\nsametypesequence=h\n"));

    assert_eq!(
        fs::read(dir.path().join("sample.dict")).unwrap(),
        b"Another.A test word."
    );

    // Back to text, next to the original
    fs::remove_file(&gls).unwrap();
    let report = convert(&dir.path().join("sample.ifo"), &options()).unwrap();
    assert_eq!(report.direction, Direction::StarDictToGls);
    assert_eq!(report.written, vec![gls.clone()]);

    let text = fs::read_to_string(&gls).unwrap();
    assert!(text.starts_with("\u{FEFF}### Glossary title:Test\n"));
    assert!(text.contains("### Glossary section:\n\n"));
    assert_eq!(
        headword_sets(&text),
        vec![
            (set(&["bar"]), "Another.".to_string()),
            (set(&["foo", "Foo"]), "A test word.".to_string()),
        ]
    );
}

#[test]
fn test_article_on_first_line_writes_nothing() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("bad.gls");
    fs::write(&gls, "foo\nA definition.\n\n").unwrap();

    let err = convert(&gls, &options()).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse {
            line: 1,
            kind: ParseErrorKind::NoEmptyLineBeforeArticle
        }
    ));
    assert_eq!(err.to_string(), "Error: no empty line before article at line 1.");
    assert_eq!(file_names(dir.path()), set(&["bad.gls"]));
}

#[test]
fn test_late_parse_error_writes_nothing() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("late.gls");
    let mut text = String::from("\n");
    for i in 0..50 {
        text.push_str(&format!("word{}\ndef {}\n\n", i, i));
    }
    text.push_str(&format!("{}\ndef\n", "x".repeat(300)));
    fs::write(&gls, text).unwrap();

    let err = convert(&gls, &options()).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse {
            line: 152,
            kind: ParseErrorKind::HeadwordTooLong { .. }
        }
    ));
    assert_eq!(file_names(dir.path()), set(&["late.gls"]));
}

#[test]
fn test_empty_gls_writes_nothing() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("empty.gls");
    fs::write(&gls, "### Glossary title: Nothing\n\n").unwrap();

    let report = convert(&gls, &ConvertOptions::default()).unwrap();
    assert_eq!(report.entry_count, 0);
    assert!(report.written.is_empty());
    assert_eq!(report.pack, PackOutcome::Skipped);
    assert_eq!(file_names(dir.path()), set(&["empty.gls"]));
}

#[test]
fn test_wrong_extension_is_usage_error() {
    let dir = tempdir().unwrap();
    let txt = dir.path().join("dict.txt");
    fs::write(&txt, SAMPLE).unwrap();

    assert!(matches!(convert(&txt, &options()), Err(Error::Usage(_))));
    assert_eq!(file_names(dir.path()), set(&["dict.txt"]));
}

#[test]
fn test_failed_packing_is_not_fatal() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("sample.gls");
    fs::write(&gls, SAMPLE).unwrap();

    let options = ConvertOptions {
        packer: "gls-stardict-missing-packer".to_string(),
        ..ConvertOptions::default()
    };
    let report = convert(&gls, &options).unwrap();

    assert!(report.pack.is_failed());
    assert!(dir.path().join("sample.dict").is_file());
    assert!(dir.path().join("sample.ifo").is_file());
}

#[test]
fn test_output_stem_and_kept_index() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("sample.gls");
    fs::write(&gls, SAMPLE).unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();

    let options = ConvertOptions {
        output: Some(dir.path().join("out").join("renamed")),
        keep_uncompressed_index: true,
        ..ConvertOptions::without_packing()
    };
    convert(&gls, &options).unwrap();

    let names = file_names(&dir.path().join("out"));
    assert!(names.contains("renamed.ifo"));
    assert!(names.contains("renamed.idx"));
    assert!(names.contains("renamed.idx.gz"));

    // Title still comes from the directive
    let ifo = fs::read_to_string(dir.path().join("out").join("renamed.ifo")).unwrap();
    assert!(ifo.contains("\nbookname=Test\n"));
}

#[test]
fn test_title_defaults_to_file_name() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("my_glossary.gls");
    fs::write(&gls, "### Author: A\n\nw\nd\n").unwrap();

    convert(&gls, &options()).unwrap();
    let ifo = fs::read_to_string(dir.path().join("my_glossary.ifo")).unwrap();
    assert!(ifo.contains("\nbookname=my_glossary\n"));
    assert!(ifo.ends_with("\nauthor=A\n"));
}

#[test]
fn test_read_compressed_stardict() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("d.gls");
    fs::write(&gls, SAMPLE).unwrap();
    convert(&gls, &options()).unwrap();
    fs::remove_file(&gls).unwrap();

    // Simulate dictzip: replace .dict with a gzip-compatible .dict.dz
    let dict = fs::read(dir.path().join("d.dict")).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&dict).unwrap();
    fs::write(dir.path().join("d.dict.dz"), encoder.finish().unwrap()).unwrap();
    fs::remove_file(dir.path().join("d.dict")).unwrap();

    let report = convert(&dir.path().join("d.ifo"), &options()).unwrap();
    assert_eq!(report.entry_count, 2);
    assert_eq!(report.synonym_count, 1);

    let text = fs::read_to_string(&gls).unwrap();
    assert!(text.contains("\nbar\nAnother.\n\nfoo|Foo\nA test word.\n\n"));
}

#[test]
fn test_missing_stardict_components() {
    let dir = tempdir().unwrap();
    let ifo = dir.path().join("d.ifo");

    assert!(matches!(
        convert(&ifo, &options()),
        Err(Error::MissingFile(FileKind::Ifo))
    ));

    fs::write(&ifo, "StarDict's dict ifo file\nsametypesequence=h\n").unwrap();
    assert!(matches!(
        convert(&ifo, &options()),
        Err(Error::MissingFile(FileKind::Idx))
    ));

    fs::write(dir.path().join("d.idx"), b"").unwrap();
    assert!(matches!(
        convert(&ifo, &options()),
        Err(Error::MissingFile(FileKind::Dict))
    ));
    assert!(!dir.path().join("d.gls").exists());
}

#[test]
fn test_unsupported_same_type_sequence() {
    let dir = tempdir().unwrap();
    let ifo = dir.path().join("d.ifo");
    fs::write(&ifo, "StarDict's dict ifo file\nsametypesequence=tm\n").unwrap();
    fs::write(dir.path().join("d.idx"), b"").unwrap();
    fs::write(dir.path().join("d.dict"), b"").unwrap();

    assert!(matches!(
        convert(&ifo, &options()),
        Err(Error::UnsupportedFormat(_))
    ));
    assert!(!dir.path().join("d.gls").exists());
}

#[test]
fn test_metadata_round_trip_through_ifo() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("m.gls");
    fs::write(
        &gls,
        "### Glossary title:Meta\n### Author:Jane Doe\n### Source language:en\n### Glossary section:\n\nw\nd\n",
    )
    .unwrap();

    convert(&gls, &options()).unwrap();
    fs::remove_file(&gls).unwrap();
    convert(&dir.path().join("m.ifo"), &options()).unwrap();

    let text = fs::read_to_string(&gls).unwrap();
    assert_eq!(
        text,
        "\u{FEFF}### Glossary title:Meta\n\
         ### Author:Jane Doe\n\
         ### Source language:en\n\
         ### Glossary section:\n\n\
         w\nd\n\n"
    );
}

#[test]
fn test_classic_mac_line_endings_convert() {
    let dir = tempdir().unwrap();
    let gls = dir.path().join("mac.gls");
    fs::write(&gls, "### Glossary title:Mac\r\rfoo|Foo\rA test word.\r\rbar\rAnother.\r").unwrap();

    let report = convert(&gls, &options()).unwrap();
    assert_eq!(report.entry_count, 2);
    assert_eq!(report.synonym_count, 1);
    assert_eq!(
        fs::read(dir.path().join("mac.dict")).unwrap(),
        b"Another.A test word."
    );
}
