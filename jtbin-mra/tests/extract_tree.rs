use std::path::Path;

use jtbin_mra::{ExtractOptions, ExtractSummary, run_extract};

fn write_mra(dir: &Path, rel: &str, rbf: &str, setname: &str, region0: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let xml = format!(
        r#"<misterromdescription>
    <name>{setname}</name>
    <setname>{setname}</setname>
    <rbf>{rbf}</rbf>
    <rom index="0" zip="{setname}.zip">
{region0}
    </rom>
    <rom index="1"><part>AA BB</part></rom>
</misterromdescription>
"#
    );
    std::fs::write(path, xml).unwrap();
}

fn header_and(data: &str) -> String {
    let header = (0..17)
        .map(|i| format!("{:02x}", i))
        .collect::<Vec<_>>()
        .join(" ");
    format!("        <part>{header}</part>\n        <part>{data}</part>")
}

fn run(options: &ExtractOptions) -> (String, ExtractSummary) {
    let mut out = Vec::new();
    let summary = run_extract(options, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

fn options_for(dir: &Path) -> ExtractOptions {
    ExtractOptions {
        descriptor_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_rows_and_skips_in_walk_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_mra(root, "sf2.mra", "jtcps1", "sf2", &header_and("30 31\n32 ff ff"));
    write_mra(
        root,
        "_alternatives/_Final Fight/ffightj.mra",
        "jtcps1",
        "ffightj",
        "        <part>00 01 02</part>",
    );
    write_mra(root, "ssf2.mra", "jtcps2", "ssf2", &header_and("40"));

    let (out, summary) = run(&options_for(root));
    assert_eq!(
        out,
        "# skipping ffightj ([00 01 02])\n\
         \t{ setname=\"sf2\",         pointer=16, data=\"30 31 32\" },\n"
    );
    assert_eq!(
        summary,
        ExtractSummary {
            scanned: 3,
            matched: 2,
            rows: 1,
            skipped: 1,
            errors: 0,
        }
    );
}

#[test]
fn test_other_board_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    write_mra(dir.path(), "pang3.mra", "jtcps15", "pang3", &header_and("01"));

    let (out, summary) = run(&options_for(dir.path()));
    assert!(out.is_empty());
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.matched, 0);
}

#[test]
fn test_board_option_selects_descriptors() {
    let dir = tempfile::tempdir().unwrap();
    write_mra(dir.path(), "pang3.mra", "jtcps15", "pang3", &header_and("01"));

    let options = ExtractOptions {
        board: "jtcps15".to_string(),
        ..options_for(dir.path())
    };
    let (out, _) = run(&options);
    assert_eq!(out, "\t{ setname=\"pang3\",       pointer=16, data=\"01\" },\n");
}

#[test]
fn test_broken_file_is_reported_and_walk_continues() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("a_broken.mra"), "<misterromdescription><rbf>jtcps1</setname>").unwrap();
    write_mra(root, "b_sf2.mra", "jtcps1", "sf2", &header_and("55"));

    let (out, summary) = run(&options_for(root));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("a_broken.mra: "));
    assert_eq!(lines[1], "\t{ setname=\"sf2\",         pointer=16, data=\"55\" },");
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.rows, 1);
}

#[test]
fn test_oversized_repeat_part_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let region = format!(
        "{}\n        <part repeat=\"0x101\">77</part>",
        header_and("66")
    );
    write_mra(dir.path(), "sf2.mra", "jtcps1", "sf2", &region);

    let (out, _) = run(&options_for(dir.path()));
    assert_eq!(out, "\t{ setname=\"sf2\",         pointer=16, data=\"66\" },\n");
}

#[test]
fn test_non_descriptor_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not xml").unwrap();
    std::fs::write(dir.path().join("sf2.MRA"), "not xml either").unwrap();

    let (out, summary) = run(&options_for(dir.path()));
    assert!(out.is_empty());
    assert_eq!(summary.scanned, 0);
}

#[test]
fn test_missing_descriptor_dir() {
    let dir = tempfile::tempdir().unwrap();
    let (out, summary) = run(&options_for(&dir.path().join("mra")));
    assert!(out.is_empty());
    assert_eq!(summary, ExtractSummary::default());
}

#[test]
fn test_padded_board_id_matches() {
    let dir = tempfile::tempdir().unwrap();
    write_mra(dir.path(), "sf2.mra", " jtcps1\n", " sf2 ", &header_and("42"));

    let (out, summary) = run(&options_for(dir.path()));
    assert_eq!(out, "\t{ setname=\"sf2\",         pointer=16, data=\"42\" },\n");
    assert_eq!(summary.rows, 1);
}
