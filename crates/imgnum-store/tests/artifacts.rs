//! Container and seal files written and read back through the store.

use std::fs;

use chrono::{TimeZone, Utc};
use imgnum_core::{check_seal, fingerprint, reconstruct, Header, SealCertificate};
use imgnum_store::{read_container, read_seal, write_container, write_seal, StoreError};

fn frame() -> Header {
    let mut stream = vec![0u8; 4 * 4 * 3];
    for (i, b) in stream.iter_mut().enumerate().skip(7) {
        *b = (i * 13 % 251) as u8;
    }
    Header::from_pixel_stream(4, 4, &stream).unwrap()
}

#[test]
fn seal_written_beside_container_checks_out() {
    let dir = tempfile::tempdir().unwrap();
    let container = dir.path().join("frame.imgnum");
    let seal = dir.path().join("frame.imgnum.seal");

    write_container(&container, &frame()).unwrap();
    let header = read_container(&container).unwrap();
    let fp = fingerprint(&reconstruct(&header).unwrap());
    let at = Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0).unwrap();
    write_seal(&seal, &SealCertificate::issue(&header, &fp, "frame.imgnum", at)).unwrap();

    let cert = read_seal(&seal).unwrap();
    assert_eq!(cert.source_name.as_deref(), Some("frame.imgnum"));
    assert!(check_seal(&cert, &header).unwrap().is_match());
}

#[test]
fn seal_with_wrong_header_line_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let seal = dir.path().join("x.seal");
    fs::write(&seal, "SOMETHING_ELSE\nsha256=abcdefabcdef\n").unwrap();
    assert!(matches!(read_seal(&seal), Err(StoreError::Format(_))));
}

#[test]
fn truncated_container_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.imgnum");
    write_container(&path, &frame()).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 2]).unwrap();
    let err = read_container(&path).unwrap_err();
    assert!(err.to_string().contains("payload length invalid"));
}
