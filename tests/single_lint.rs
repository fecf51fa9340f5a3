mod common;

use common::{SharedBuf, records, write_fastq};
use fqlint::{
    ErrorKind, FastqFile, LintError, LintMode, LintOptions, Location, ValidationLevel, lint_single,
};
use tempfile::tempdir;

fn opts(level: ValidationLevel, mode: LintMode) -> LintOptions {
    LintOptions {
        single_read_validation_level: level,
        lint_mode: mode,
        ..LintOptions::default()
    }
}

#[test]
fn wellformed_file_is_clean() {
    let dir = tempdir().unwrap();
    let path = write_fastq(dir.path(), "R1.fastq", &records(5, "/1"));

    let out = SharedBuf::default();
    let o = opts(ValidationLevel::High, LintMode::Report);
    let summary = lint_single(&path, &o, out.clone()).unwrap();
    assert_eq!(summary.records, 5);
    assert!(summary.is_clean());
    assert_eq!(out.contents(), "");
}

#[test]
fn bad_plusline_is_structural() {
    let dir = tempdir().unwrap();
    let path = write_fastq(dir.path(), "R1.fastq", ">r1\nACGT\nr1 again\nFFFF\n");

    let o = opts(ValidationLevel::Minimum, LintMode::Error);
    let mut f = FastqFile::from_path(&path, &o).unwrap();
    let err = f.next().unwrap().unwrap_err();
    let d = err.diagnostic().unwrap();
    assert_eq!(d.kind, ErrorKind::Structural);
    assert_eq!(d.code, "S001");
    assert_eq!(d.read_name, ">r1");
    assert!(f.next().is_none());
}

#[test]
fn alphabet_depends_on_level() {
    let dir = tempdir().unwrap();
    let path = write_fastq(dir.path(), "R1.fastq", "@r1\nACGTX\n+\nFFFFF\n");

    let err = lint_single(&path, &opts(ValidationLevel::Low, LintMode::Error), std::io::sink())
        .unwrap_err();
    let d = err.diagnostic().unwrap();
    assert_eq!(d.code, "S002");
    assert_eq!(d.kind, ErrorKind::Content);
    assert!(d.description.contains("ACGTX"));

    let o = opts(ValidationLevel::Minimum, LintMode::Error);
    let summary = lint_single(&path, &o, std::io::sink()).unwrap();
    assert_eq!(summary.records, 1);
    assert!(summary.is_clean());
}

#[test]
fn report_lines_carry_file_code_and_line() {
    let dir = tempdir().unwrap();
    let data = "\
@r1
ACGT
+
FFFF
r2
ACGT
+
FFFF
@r3
ACGTX
-
FFFFF
@r4
ACGT
+
FFF
";
    let path = write_fastq(dir.path(), "sample.fastq", data);

    let out = SharedBuf::default();
    let o = opts(ValidationLevel::High, LintMode::Report);
    let summary = lint_single(&path, &o, out.clone()).unwrap();
    assert_eq!(summary.records, 4);
    assert_eq!(summary.diagnostics, 3);
    assert!(!summary.is_clean());
    assert_eq!(
        out.contents(),
        "sample.fastq:S003:8: Read name must start with @\n\
         sample.fastq:S001:12: The plusline is not formatted correctly. It's possible this is a \
         FastA file or that the reads are not correctly formed.\n\
         sample.fastq:S005:16: Sequence and quality lengths do not match (sequence 4, quality 3)\n"
    );
}

#[test]
fn truncated_final_record_is_reported() {
    let dir = tempdir().unwrap();
    let path = write_fastq(dir.path(), "R1.fastq", "@r1\nACGT\n+\nFFFF\n@r2\nAC\n");

    let err = lint_single(&path, &opts(ValidationLevel::Low, LintMode::Error), std::io::sink())
        .unwrap_err();
    let d = err.diagnostic().unwrap();
    // The plus line is checked first, and it is the first absent field.
    assert_eq!(d.code, "S001");
    assert_eq!(
        d.location,
        Location::Single(fqlint::FileContext {
            filename: "R1.fastq".to_string(),
            line_num: 6,
        })
    );
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempdir().unwrap();
    let path = write_fastq(
        dir.path(),
        "R1.fastq",
        "@r1\nAXGT\n+\nFFFF\nr2\nACGT\n+\nFFFF\n@r3\nACGT\n+\n",
    );
    let o = opts(ValidationLevel::High, LintMode::Report);

    let first = SharedBuf::default();
    let second = SharedBuf::default();
    let a = lint_single(&path, &o, first.clone()).unwrap();
    let b = lint_single(&path, &o, second.clone()).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.contents(), second.contents());
    assert_eq!(a.diagnostics, 3);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = lint_single(dir.path().join("nope.fastq"), &LintOptions::default(), std::io::sink())
        .unwrap_err();
    assert!(matches!(err, LintError::Io { .. }));
}

#[test]
fn unknown_disabled_validator_is_config_error() {
    let dir = tempdir().unwrap();
    let path = write_fastq(dir.path(), "R1.fastq", &records(1, ""));
    let o = LintOptions::default().with_disabled_validators(["S042"]);
    assert!(matches!(
        FastqFile::from_path(&path, &o),
        Err(LintError::Config(fqlint::ConfigError::UnknownValidator(_)))
    ));
}

#[test]
fn disabled_validator_is_skipped() {
    let dir = tempdir().unwrap();
    let path = write_fastq(dir.path(), "R1.fastq", "@r1\nACGTX\n+\nFFFFF\n");
    let o = opts(ValidationLevel::High, LintMode::Error).with_disabled_validators(["S002"]);
    let summary = lint_single(&path, &o, std::io::sink()).unwrap();
    assert!(summary.is_clean());
}

#[test]
fn corrupt_bytes_are_reported_per_record() {
    let dir = tempdir().unwrap();
    let path = write_fastq(
        dir.path(),
        "R1.fastq",
        b"@r1\nAC\xffGT\n+\nFFFFF\n@r2\nACGT\n+\nFF\xe9F\n@r3\nACGT\n+\nFFFF\n",
    );

    let mut f = FastqFile::from_path(&path, &opts(ValidationLevel::Low, LintMode::Report))
        .unwrap()
        .with_sink(std::io::sink());
    let names: Vec<String> = f
        .by_ref()
        .map(|r| r.unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["@r1", "@r2", "@r3"]);
    assert_eq!(f.reported(), 2);

    let out = SharedBuf::default();
    let summary =
        lint_single(&path, &opts(ValidationLevel::Low, LintMode::Report), out.clone()).unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.diagnostics, 2);
    let report = out.contents();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "R1.fastq:S002:4: Non-ACGTN base found in sequence AC\u{FFFD}GT");
    assert!(lines[1].starts_with("R1.fastq:S006:8: Invalid character"));

    let err = lint_single(&path, &opts(ValidationLevel::Low, LintMode::Error), std::io::sink())
        .unwrap_err();
    let d = err.diagnostic().unwrap();
    assert_eq!((d.code, d.read_name.as_str()), ("S002", "@r1"));
}

#[test]
fn duplicate_names_are_reported_on_second_pass() {
    let dir = tempdir().unwrap();
    let path = write_fastq(
        dir.path(),
        "R1.fastq",
        "@r1\nACGT\n+\nFFFF\n@r2\nACGT\n+\nFFFF\n@r1\nACGT\n+\nFFFF\n",
    );

    let out = SharedBuf::default();
    let summary =
        lint_single(&path, &opts(ValidationLevel::High, LintMode::Report), out.clone()).unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.diagnostics, 1);
    assert_eq!(out.contents(), "R1.fastq:S007:12: Duplicate read name: @r1\n");

    let err = lint_single(&path, &opts(ValidationLevel::High, LintMode::Error), std::io::sink())
        .unwrap_err();
    let d = err.diagnostic().unwrap();
    assert_eq!(d.code, "S007");
    assert_eq!(d.kind, ErrorKind::Content);

    // Below high, or with S007 disabled, duplicates are not looked for.
    let summary =
        lint_single(&path, &opts(ValidationLevel::Low, LintMode::Error), std::io::sink()).unwrap();
    assert!(summary.is_clean());
    let o = opts(ValidationLevel::High, LintMode::Error).with_disabled_validators(["S007"]);
    assert!(lint_single(&path, &o, std::io::sink()).unwrap().is_clean());
}
