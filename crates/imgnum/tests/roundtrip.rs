//! Image to container to image, through the public API.

use image::RgbImage;
use imgnum::{Imgnum, VerifyReport};
use imgnum_testkit::{ramp_image, TestFixture};

#[test]
fn png_survives_encode_and_decode() {
    let fx = TestFixture::new();
    let source = fx.write_image("in.png", 7, 5);
    let container = fx.join("in.imgnum");
    let restored = fx.join("out.png");
    let bench = Imgnum::default();

    let encoded = bench.encode(&source, &container).unwrap();
    assert_eq!((encoded.width, encoded.height), (7, 5));
    assert_eq!(encoded.total_bytes, 7 * 5 * 3);
    assert!(encoded.payload_bytes < encoded.total_bytes);

    bench.decode(&container, &restored).unwrap();
    let back: RgbImage = image::open(&restored).unwrap().to_rgb8();
    assert_eq!(back, ramp_image(7, 5));
}

#[test]
fn black_image_roundtrip() {
    let fx = TestFixture::new();
    let source = fx.join("black.png");
    RgbImage::new(6, 4).save(&source).unwrap();
    let container = fx.join("black.imgnum");
    let bench = Imgnum::default();

    let encoded = bench.encode(&source, &container).unwrap();
    assert_eq!(encoded.payload_bytes, 1);
    assert_eq!(
        std::fs::metadata(&container).unwrap().len(),
        imgnum::core::HEADER_LEN as u64 + 1
    );

    let restored = fx.join("black_out.bmp");
    bench.decode(&container, &restored).unwrap();
    let back = image::open(&restored).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (6, 4));
    assert!(back.as_raw().iter().all(|&b| b == 0));
}

#[test]
fn verify_matches_source_image() {
    let fx = TestFixture::new();
    let source = fx.write_image("in.png", 5, 5);
    let container = fx.join("in.imgnum");
    let bench = Imgnum::default();
    bench.encode(&source, &container).unwrap();

    let report = bench.verify(&container, &source).unwrap();
    assert!(report.is_match());
    match report {
        VerifyReport::Compared {
            container, image, ..
        } => assert_eq!(container, image),
        other => panic!("unexpected report {other:?}"),
    }
}

#[test]
fn verify_reports_changed_pixel() {
    let fx = TestFixture::new();
    let source = fx.write_image("in.png", 5, 5);
    let container = fx.join("in.imgnum");
    let bench = Imgnum::default();
    bench.encode(&source, &container).unwrap();

    let mut edited = ramp_image(5, 5);
    edited.get_pixel_mut(4, 4).0[1] ^= 0x01;
    let other = fx.join("edited.png");
    edited.save(&other).unwrap();

    let report = bench.verify(&container, &other).unwrap();
    assert!(!report.is_match());
    assert!(matches!(report, VerifyReport::Compared { matched: false, .. }));
}

#[test]
fn verify_reports_dimension_mismatch_first() {
    let fx = TestFixture::new();
    let container = fx.write_container("a.imgnum", 4, 4);
    let other = fx.write_image("b.png", 4, 3);

    let report = Imgnum::default().verify(&container, &other).unwrap();
    assert_eq!(
        report,
        VerifyReport::DimensionMismatch {
            container: (4, 4),
            image: (4, 3),
        }
    );
}

#[test]
fn hash_is_stable_and_matches_info() {
    let fx = TestFixture::new();
    let container = fx.write_container("a.imgnum", 9, 3);
    let bench = Imgnum::default();

    let first = bench.hash(&container).unwrap();
    let second = bench.hash(&container).unwrap();
    assert_eq!(first, second);
    assert_eq!(bench.info(&container).unwrap().fingerprint, first.fingerprint);
}

#[test]
fn info_serializes_as_json() {
    let fx = TestFixture::new();
    let container = fx.write_container("a.imgnum", 2, 2);

    let info = Imgnum::default().info(&container).unwrap();
    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["width"], 2);
    assert_eq!(json["totalBytes"], 12);
    assert_eq!(json["id"], info.fingerprint.short_id.as_str());
    assert_eq!(json["sha256"], info.fingerprint.digest.to_hex());
}
