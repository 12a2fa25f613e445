//! Integration tests for image conversion inside a run.

use image::ImageFormat;
use pdfbundle::classify::ImageEncoding;
use pdfbundle::config::Config;
use pdfbundle::convert::convert_image;
use pdfbundle::pipeline::{RunOutcome, run};
use rstest::rstest;

use crate::common::{Workspace, image_bytes, page_sizes, write_jpeg};

#[rstest]
#[case("photo.jpg", ImageFormat::Jpeg, 800, 600)]
#[case("photo.JPEG", ImageFormat::Jpeg, 17, 333)]
#[case("diagram.png", ImageFormat::Png, 1024, 1)]
#[case("diagram.Png", ImageFormat::Png, 2, 2)]
#[tokio::test]
async fn test_image_page_matches_pixels(
    #[case] name: &str,
    #[case] format: ImageFormat,
    #[case] width: u32,
    #[case] height: u32,
) {
    let ws = Workspace::new();
    std::fs::write(ws.input_file(name), image_bytes(width, height, format)).unwrap();

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    let RunOutcome::Merged { output, statistics } = outcome else {
        panic!("expected a merged document");
    };
    assert_eq!(statistics.total_pages, 1);
    assert_eq!(
        page_sizes(&output.path),
        vec![[i64::from(width), i64::from(height)]]
    );
}

#[tokio::test]
async fn test_several_images_one_page_each() {
    let ws = Workspace::new();
    write_jpeg(&ws.input_file("01.jpg"), 100, 50);
    write_jpeg(&ws.input_file("02.jpeg"), 50, 100);

    let outcome = run(&Config::new(&ws.input, &ws.output)).await.unwrap();

    let RunOutcome::Merged { output, .. } = outcome else {
        panic!("expected a merged document");
    };
    assert_eq!(page_sizes(&output.path), vec![[100, 50], [50, 100]]);
}

#[tokio::test]
async fn test_convert_image_directly() {
    let ws = Workspace::new();
    let path = ws.input_file("cover.png");
    std::fs::write(&path, image_bytes(210, 297, ImageFormat::Png)).unwrap();

    let handle = convert_image(&path, ImageEncoding::Png).await.unwrap();

    assert_eq!(handle.page_count(), 1);
    assert_eq!(handle.source(), path.as_path());
}
