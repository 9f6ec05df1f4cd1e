use std::fs;

use netharvest::endpoint::{HostResult, HostStatus, PortResult, PortState};
use netharvest::error::ScanError;
use netharvest::report::{
    list_report_files, text, ReportWriter, ScanReport, WriteMode, RUNNING_LOG_JSON,
    RUNNING_LOG_TEXT,
};

fn sample_report(range: &str) -> ScanReport {
    let mut report = ScanReport::new(range.to_string());
    report.hosts = vec![
        HostResult {
            address: "192.168.1.5".parse().unwrap(),
            status: HostStatus::Up,
            hostname: "gateway.lan".to_string(),
            os_guesses: vec!["Linux 5.x".to_string()],
            ports: vec![PortResult {
                port: 22,
                state: PortState::Open,
                service: "ssh".to_string(),
            }],
        },
        HostResult {
            address: "192.168.1.9".parse().unwrap(),
            status: HostStatus::Up,
            hostname: String::new(),
            os_guesses: Vec::new(),
            ports: Vec::new(),
        },
    ];
    report
}

/// Field-by-field comparison of a persisted entry against its source report.
fn assert_matches_report(entry: &serde_json::Value, report: &ScanReport, scan_time: &str) {
    assert_eq!(entry["scan_time"], scan_time);
    assert_eq!(entry["network_range"], report.range.as_str());
    let hosts = entry["hosts"].as_array().unwrap();
    assert_eq!(hosts.len(), report.hosts.len());
    for (got, want) in hosts.iter().zip(&report.hosts) {
        assert_eq!(got["host"], want.address.to_string());
        assert_eq!(got["status"], want.status.as_str());
        assert_eq!(got["hostname"], want.hostname.as_str());
        let os = got["os"].as_array().unwrap();
        assert_eq!(os.len(), want.os_guesses.len());
        let ports = got["ports"].as_array().unwrap();
        assert_eq!(ports.len(), want.ports.len());
        for (gp, wp) in ports.iter().zip(&want.ports) {
            assert_eq!(gp["port"], wp.port);
            assert_eq!(gp["state"], wp.state.as_str());
            assert_eq!(gp["service"], wp.service.as_str());
        }
    }
}

#[test]
fn timestamped_mode_writes_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let report = sample_report("192.168.1.0/24");
    let writer = ReportWriter::new(dir.path());

    let paths = writer.write(&report, WriteMode::TimestampedFiles).unwrap();

    let stamp = report.file_timestamp();
    assert_eq!(
        paths.json_path.file_name().unwrap().to_str().unwrap(),
        format!("{}_scan_results.json", stamp)
    );
    assert_eq!(
        paths.text_path.file_name().unwrap().to_str().unwrap(),
        format!("{}_scan_results.txt", stamp)
    );

    let json_text = fs::read_to_string(&paths.json_path).unwrap();
    // 4-space indent is part of the persisted format
    assert!(json_text.contains("\n    \"scan_time\""));
    let doc: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    assert_matches_report(&doc, &report, &stamp);

    let text_out = fs::read_to_string(&paths.text_path).unwrap();
    assert!(text_out.starts_with(&format!("Network Scan Results ({})", stamp)));
    assert!(text_out.contains("Host: 192.168.1.5\n"));
    assert!(text_out.contains("  No open ports detected.\n"));
}

#[test]
fn append_mode_twice_keeps_both_entries_intact() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());
    let first = sample_report("192.168.1.0/24");
    let second = sample_report("10.0.0.0/24");

    let paths = writer.write(&first, WriteMode::AppendToRunningLog).unwrap();
    writer.write(&second, WriteMode::AppendToRunningLog).unwrap();

    assert_eq!(paths.json_path.file_name().unwrap().to_str().unwrap(), RUNNING_LOG_JSON);
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.json_path).unwrap()).unwrap();
    let scans = doc["scans"].as_array().unwrap();
    assert_eq!(scans.len(), 2);
    assert_matches_report(&scans[0], &first, &first.log_timestamp());
    assert_matches_report(&scans[1], &second, &second.log_timestamp());
}

#[test]
fn append_mode_treats_corrupt_log_as_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(RUNNING_LOG_JSON), "not json at all{{{").unwrap();

    let writer = ReportWriter::new(dir.path());
    let report = sample_report("192.168.1.0/24");
    let paths = writer.write(&report, WriteMode::AppendToRunningLog).unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.json_path).unwrap()).unwrap();
    assert_eq!(doc["scans"].as_array().unwrap().len(), 1);
}

#[test]
fn append_mode_text_log_only_grows() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());
    let report = sample_report("192.168.1.0/24");

    writer.write(&report, WriteMode::AppendToRunningLog).unwrap();
    let after_one = fs::read_to_string(dir.path().join(RUNNING_LOG_TEXT)).unwrap();
    writer.write(&report, WriteMode::AppendToRunningLog).unwrap();
    let after_two = fs::read_to_string(dir.path().join(RUNNING_LOG_TEXT)).unwrap();

    assert!(after_two.starts_with(&after_one));
    assert_eq!(after_two.matches("Network Scan Results").count(), 2);
}

#[test]
fn unwritable_destination_surfaces_as_destination_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a plain file").unwrap();

    let writer = ReportWriter::new(blocker.join("nested"));
    let report = sample_report("192.168.1.0/24");
    match writer.write(&report, WriteMode::TimestampedFiles) {
        Err(ScanError::DestinationUnwritable { .. }) => {}
        other => panic!("expected DestinationUnwritable, got {:?}", other.err()),
    }
}

#[test]
fn list_report_files_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("2026-02-01_10-00-00_scan_results.txt"), "b").unwrap();
    fs::write(dir.path().join("2026-01-01_10-00-00_scan_results.json"), "a").unwrap();
    fs::write(dir.path().join("notes.log"), "ignored").unwrap();
    fs::create_dir(dir.path().join("subdir")).unwrap();

    let files = list_report_files(dir.path());
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "2026-01-01_10-00-00_scan_results.json",
            "2026-02-01_10-00-00_scan_results.txt",
        ]
    );
}

#[test]
fn list_report_files_of_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_report_files(&dir.path().join("nope")).is_empty());
}

#[test]
fn rendered_text_has_blank_line_between_hosts() {
    let report = sample_report("192.168.1.0/24");
    let rendered = text::render(&report, "2026-08-07 12:00:00");
    assert!(rendered.contains("Service: ssh\n\nHost: 192.168.1.9\n"));
    assert!(rendered.ends_with("\n\n"));
}
