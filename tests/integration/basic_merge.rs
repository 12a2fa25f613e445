//! Integration tests for end-to-end merge runs.

use pdfbundle::config::Config;
use pdfbundle::io::{FixedClock, PdfWriter};
use pdfbundle::pipeline::{RunOutcome, run, run_with_writer};

use crate::common::{Workspace, page_sizes, page_widths, write_pdf, write_png};

#[tokio::test]
async fn test_merge_pdfs_in_listing_order() {
    let ws = Workspace::new();
    write_pdf(&ws.input_file("b.pdf"), &[201, 202]);
    write_pdf(&ws.input_file("a.pdf"), &[101, 102, 103]);
    write_pdf(&ws.input_file("c.pdf"), &[301]);

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    let RunOutcome::Merged { output, statistics } = outcome else {
        panic!("expected a merged document");
    };
    assert_eq!(statistics.documents_merged, 3);
    assert_eq!(statistics.total_pages, 6);
    assert_eq!(ws.outputs(), vec![output.path.clone()]);
    assert_eq!(page_widths(&output.path), vec![101, 102, 103, 201, 202, 301]);
}

#[tokio::test]
async fn test_mixed_pdfs_and_image() {
    let ws = Workspace::new();
    write_pdf(&ws.input_file("1-first.pdf"), &[11, 12, 13]);
    write_pdf(&ws.input_file("2-second.pdf"), &[21, 22, 23, 24, 25]);
    write_png(&ws.input_file("3-photo.png"), 640, 480);

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    let RunOutcome::Merged { output, statistics } = outcome else {
        panic!("expected a merged document");
    };
    assert_eq!(statistics.total_pages, 9);
    assert_eq!(
        page_widths(&output.path),
        vec![11, 12, 13, 21, 22, 23, 24, 25, 640]
    );
    assert_eq!(page_sizes(&output.path)[8], [640, 480]);
}

#[tokio::test]
async fn test_images_interleave_with_pdfs() {
    let ws = Workspace::new();
    write_png(&ws.input_file("a.png"), 10, 20);
    write_pdf(&ws.input_file("b.pdf"), &[500, 501]);
    write_png(&ws.input_file("c.PNG"), 30, 40);

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    let RunOutcome::Merged { output, .. } = outcome else {
        panic!("expected a merged document");
    };
    assert_eq!(
        page_sizes(&output.path),
        vec![[10, 20], [500, 500], [501, 500], [30, 40]]
    );
}

#[tokio::test]
async fn test_unsupported_entries_are_skipped() {
    let ws = Workspace::new();
    std::fs::write(ws.input_file("notes.txt"), b"hello").unwrap();
    std::fs::write(ws.input_file("animation.gif"), b"GIF89a").unwrap();
    std::fs::create_dir(ws.input_file("nested")).unwrap();
    write_pdf(&ws.input.join("nested").join("hidden.pdf"), &[999]);
    write_pdf(&ws.input_file("doc.PDF"), &[7]);

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    let RunOutcome::Merged { output, statistics } = outcome else {
        panic!("expected a merged document");
    };
    assert_eq!(statistics.documents_merged, 1);
    assert_eq!(page_widths(&output.path), vec![7]);
}

#[tokio::test]
async fn test_output_named_after_timestamp() {
    let ws = Workspace::new();
    write_pdf(&ws.input_file("a.pdf"), &[1]);

    let writer = PdfWriter::with_clock(FixedClock(1_234_567_890_123));
    let outcome = run_with_writer(&Config::new(&ws.input, &ws.output), &writer)
        .await
        .unwrap();

    let RunOutcome::Merged { output, .. } = outcome else {
        panic!("expected a merged document");
    };
    assert_eq!(output.path, ws.output.join("1234567890123.pdf"));
    assert_eq!(output.size, std::fs::metadata(&output.path).unwrap().len());
}

#[tokio::test]
async fn test_runs_in_same_millisecond_collide() {
    let ws = Workspace::new();
    let config = Config::new(&ws.input, &ws.output);
    let writer = PdfWriter::with_clock(FixedClock(5));

    write_pdf(&ws.input_file("a.pdf"), &[1]);
    run_with_writer(&config, &writer).await.unwrap();

    write_pdf(&ws.input_file("b.pdf"), &[2, 3]);
    run_with_writer(&config, &writer).await.unwrap();

    let outputs = ws.outputs();
    assert_eq!(outputs, vec![ws.output.join("5.pdf")]);
    // The second run silently replaced the first.
    assert_eq!(page_widths(&outputs[0]), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_empty_folder_writes_nothing() {
    let ws = Workspace::new();

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    assert_eq!(outcome, RunOutcome::NothingToMerge);
    assert!(ws.outputs().is_empty());
}

#[tokio::test]
async fn test_only_unsupported_files_writes_nothing() {
    let ws = Workspace::new();
    std::fs::write(ws.input_file("a.txt"), b"a").unwrap();
    std::fs::write(ws.input_file("b.docx"), b"b").unwrap();
    std::fs::write(ws.input_file(".pdf"), b"dotfile").unwrap();

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    assert_eq!(outcome, RunOutcome::NothingToMerge);
    assert!(ws.outputs().is_empty());
}
