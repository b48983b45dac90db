//! Batch sealing over folders of good and bad containers.

use std::fs;

use imgnum::core::SealCertificate;
use imgnum::store::StoreError;
use imgnum::{Imgnum, ImgnumConfig, ImgnumError};
use imgnum_testkit::TestFixture;

#[test]
fn valid_and_junk_files_are_counted_separately() {
    let fx = TestFixture::new();
    for i in 0..3 {
        fx.write_container(&format!("good{i}.imgnum"), 3 + i, 2);
    }
    fx.write_junk("junk0.imgnum");
    fx.write_junk("junk1.imgnum");
    fx.write_text("readme.txt", "not picked up");

    let bench = Imgnum::default();
    let summary = bench.batch_seal(fx.path(), false, None).unwrap();
    assert_eq!(summary.found, 5);
    assert_eq!(summary.sealed, 3);
    assert_eq!(summary.failed, 2);
    assert!(!summary.all_sealed());

    let index = fs::read_to_string(&summary.index).unwrap();
    let rows: Vec<&str> = index.lines().skip(1).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows.iter().filter(|r| r.contains(",ERROR,")).count(), 2);
    assert_eq!(rows.iter().filter(|r| r.ends_with(".imgnum.seal")).count(), 3);

    for i in 0..3 {
        let container = fx.path().join(format!("good{i}.imgnum"));
        let seal = bench.batch_seal_path(&container);
        assert!(bench.check_seal(&container, &seal).unwrap().is_match());
    }
}

#[test]
fn recursion_is_opt_in() {
    let fx = TestFixture::new();
    fx.write_container("top.imgnum", 2, 2);
    fx.write_container("sub/deep.imgnum", 2, 2);
    let bench = Imgnum::default();

    let flat = bench.batch_seal(fx.path(), false, None).unwrap();
    assert_eq!(flat.found, 1);
    assert!(!fx.path().join("sub/deep.imgnum.seal").exists());

    let deep = bench.batch_seal(fx.path(), true, None).unwrap();
    assert_eq!((deep.found, deep.sealed), (2, 2));
    assert!(deep.all_sealed());

    let index = fs::read_to_string(&deep.index).unwrap();
    let nested = std::path::Path::new("sub").join("deep.imgnum");
    assert!(index.contains(&nested.display().to_string()));

    let cert = SealCertificate::parse(
        &fs::read_to_string(fx.path().join("sub/deep.imgnum.seal")).unwrap(),
    )
    .unwrap();
    assert_eq!(cert.source_name.as_deref(), Some("deep.imgnum"));
}

#[test]
fn explicit_index_path_and_extension() {
    let fx = TestFixture::new();
    fx.write_container("a.img", 2, 2);
    fx.write_container("b.imgnum", 2, 2);
    let index = fx.join("out/report.csv");

    let bench = Imgnum::new(ImgnumConfig {
        container_extension: "img".into(),
        ..ImgnumConfig::default()
    });
    let summary = bench.batch_seal(fx.path(), false, Some(&index)).unwrap();
    assert_eq!(summary.index, index);
    assert_eq!(summary.found, 1);
    assert!(fs::read_to_string(&index)
        .unwrap()
        .starts_with("file,id,sha256,width,height,totalBytes,seal\na.img,"));
}

#[test]
fn empty_folder_writes_header_only() {
    let fx = TestFixture::new();
    let summary = Imgnum::default().batch_seal(fx.path(), false, None).unwrap();
    assert_eq!((summary.found, summary.sealed, summary.failed), (0, 0, 0));
    assert_eq!(
        fs::read_to_string(&summary.index).unwrap(),
        "file,id,sha256,width,height,totalBytes,seal\n"
    );
}

#[test]
fn missing_folder_is_an_error() {
    let fx = TestFixture::new();
    let err = Imgnum::default()
        .batch_seal(&fx.path().join("absent"), false, None)
        .unwrap_err();
    assert!(matches!(
        err,
        ImgnumError::Store(StoreError::NotADirectory(_))
    ));
    assert!(!fx.path().join("absent").join("imgnum_index.csv").exists());
}
