//! Plain-text reports printed on stdout.

use std::fmt::Write;

use imgnum::{
    BatchSummary, ContainerInfo, DecimalReport, DecodeReport, EncodeReport, HashReport,
    SealOutcome, SealReport, VerifyReport,
};

pub fn encode(r: &EncodeReport) -> String {
    format!(
        "Encoded: {}\nSize:    {}x{}\nBytes:   {}\nSaved:   {} (payload bytes={})\n",
        r.input.display(),
        r.width,
        r.height,
        r.total_bytes,
        r.output.display(),
        r.payload_bytes
    )
}

pub fn decode(r: &DecodeReport) -> String {
    format!(
        "Decoded: {}\nWrote:   {}\n",
        r.input.display(),
        r.output.display()
    )
}

pub fn decimal(r: &DecimalReport) -> String {
    format!(
        "Wrote decimal integer to: {} ({} digits)\n",
        r.output.display(),
        r.digits
    )
}

pub fn info(r: &ContainerInfo) -> String {
    let mut out = String::from("ImgNum info\n");
    let _ = writeln!(out, "File:         {}", r.file.display());
    let _ = writeln!(out, "Version:      {}", r.version);
    let _ = writeln!(out, "Size:         {} x {}", r.width, r.height);
    let _ = writeln!(out, "Channels:     {} (RGB8)", r.channels);
    let _ = writeln!(out, "Order:        {}", r.order_text);
    let _ = writeln!(out, "TotalBytes:   {}", r.total_bytes);
    let _ = writeln!(out, "PayloadBytes: {}", r.payload_bytes);
    let _ = writeln!(out, "BitLength:    {}", r.bit_length);
    let _ = writeln!(
        out,
        "Digits(~):    {} (approx, integer payload only)",
        r.approx_digits
    );
    let _ = writeln!(out, "ID:           {}", r.fingerprint.short_id);
    let _ = writeln!(out, "SHA256:       {}", r.fingerprint.digest);
    out
}

pub fn hash(r: &HashReport) -> String {
    format!(
        "ImgNum hash\nFile:   {}\nID:     {}\nSHA256: {}\n",
        r.file.display(),
        r.fingerprint.short_id,
        r.fingerprint.digest
    )
}

pub fn verify(r: &VerifyReport) -> String {
    match r {
        VerifyReport::DimensionMismatch { container, image } => format!(
            "VERIFY: NO MATCH\nReason: Dimension mismatch. imgnum={}x{}, image={}x{}\n",
            container.0, container.1, image.0, image.1
        ),
        VerifyReport::Compared {
            matched,
            container,
            image,
        } => format!(
            "VERIFY: {}\nIMGNUM ID:     {}\nIMAGE  ID:     {}\nIMGNUM SHA256: {}\nIMAGE  SHA256: {}\n",
            if *matched { "MATCH" } else { "NO MATCH" },
            container.short_id,
            image.short_id,
            container.digest,
            image.digest
        ),
    }
}

pub fn seal(r: &SealOutcome) -> String {
    format!(
        "SEAL: CREATED\nImgnum: {}\nSeal:   {}\nID:     {}\nSHA256: {}\n",
        r.container.display(),
        r.seal.display(),
        r.fingerprint.short_id,
        r.fingerprint.digest
    )
}

pub fn check_seal(r: &SealReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "CHECKSEAL: {}",
        if r.is_match() { "MATCH" } else { "NO MATCH" }
    );
    let _ = writeln!(
        out,
        "Expected ID:     {}",
        r.expected_short_id.as_deref().unwrap_or("(missing in seal)")
    );
    let _ = writeln!(out, "Actual   ID:     {}", r.actual.short_id);
    let _ = writeln!(out, "Expected SHA256: {}", r.expected_sha256);
    let _ = writeln!(out, "Actual   SHA256: {}", r.actual.digest);

    if !r.digest_match {
        let _ = writeln!(out, "Digest mismatch detected.");
    }
    if !r.metadata_match() {
        let _ = writeln!(out, "Metadata mismatch detected:");
        for m in &r.metadata_mismatches {
            let _ = writeln!(
                out,
                "  {}: seal={} container={}",
                m.field, m.declared, m.actual
            );
        }
    }
    if !r.short_id_match {
        let _ = writeln!(out, "shortId mismatch detected.");
    }
    out
}

pub fn batch(r: &BatchSummary) -> String {
    format!(
        "BATCHSEAL: DONE\nFolder:     {}\nRecursive:  {}\nIndex:      {}\nFound:      {}\nSealed:     {}\nFailed:     {}\n",
        r.folder.display(),
        r.recursive,
        r.index.display(),
        r.found,
        r.sealed,
        r.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgnum::core::fingerprint;
    use std::path::PathBuf;

    #[test]
    fn test_dimension_mismatch_text() {
        let text = verify(&VerifyReport::DimensionMismatch {
            container: (4, 4),
            image: (4, 3),
        });
        assert_eq!(
            text,
            "VERIFY: NO MATCH\nReason: Dimension mismatch. imgnum=4x4, image=4x3\n"
        );
    }

    #[test]
    fn test_batch_text() {
        let text = batch(&BatchSummary {
            folder: PathBuf::from("frames"),
            recursive: true,
            index: PathBuf::from("frames/imgnum_index.csv"),
            found: 3,
            sealed: 2,
            failed: 1,
        });
        assert!(text.starts_with("BATCHSEAL: DONE\n"));
        assert!(text.contains("Recursive:  true\n"));
        assert!(text.ends_with("Failed:     1\n"));
    }

    #[test]
    fn test_hash_text_shows_both_forms() {
        let fp = fingerprint(b"abc");
        let text = hash(&HashReport {
            file: PathBuf::from("a.imgnum"),
            fingerprint: fp,
        });
        assert!(text.contains("ID:     BA7816BF8F01CFEA\n"));
        assert!(text.contains(
            "SHA256: ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\n"
        ));
    }
}
