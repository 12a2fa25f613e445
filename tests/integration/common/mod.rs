//! Shared helpers for integration tests.
//!
//! Fixtures are generated on the fly: PDFs with `lopdf`, images with `image`.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::{Document, Object, dictionary};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Input and output folders for one run.
pub struct Workspace {
    _root: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let input = root.path().join("input_files");
        let output = root.path().join("output_files");
        std::fs::create_dir(&input).unwrap();
        std::fs::create_dir(&output).unwrap();
        Self {
            _root: root,
            input,
            output,
        }
    }

    pub fn input_file(&self, name: &str) -> PathBuf {
        self.input.join(name)
    }

    /// Files currently in the output folder.
    pub fn outputs(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = std::fs::read_dir(&self.output)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        paths.sort();
        paths
    }
}

/// Write a PDF whose pages have the given MediaBox widths, in order.
///
/// The width doubles as a page label so tests can check output order.
pub fn write_pdf(path: &Path, widths: &[i64]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = widths
        .iter()
        .map(|&width| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), 500.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => widths.len() as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path).unwrap();
}

/// Encode a solid RGB image of the given size.
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 60, 90])));
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::write(path, image_bytes(width, height, ImageFormat::Png)).unwrap();
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, image_bytes(width, height, ImageFormat::Jpeg)).unwrap();
}

/// `[width, height]` of every page of the PDF at `path`, in page order.
pub fn page_sizes(path: &Path) -> Vec<[i64; 2]> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .into_values()
        .map(|id| {
            let media_box = doc
                .get_dictionary(id)
                .unwrap()
                .get(b"MediaBox")
                .and_then(Object::as_array)
                .unwrap();
            [media_box[2].as_i64().unwrap(), media_box[3].as_i64().unwrap()]
        })
        .collect()
}

/// Page widths of the PDF at `path`, in page order.
pub fn page_widths(path: &Path) -> Vec<i64> {
    page_sizes(path).into_iter().map(|[width, _]| width).collect()
}
