//! Page concatenation.
//!
//! Every source document is renumbered into its own object id range, its
//! pages are re-parented under one flat `Pages` node, and a fresh catalog is
//! written on top. Source catalogs and intermediate page-tree nodes are
//! dropped.

use lopdf::{Document, Object, ObjectId, dictionary};
use std::path::Path;
use tracing::{debug, info};

use crate::document::DocumentHandle;
use crate::error::{BundleError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against `Parent` cycles in damaged page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStatistics {
    /// Number of source documents merged.
    pub documents_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,
}

/// The output of a merge.
#[derive(Debug)]
pub struct MergedDocument {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Concatenates the pages of several documents into one.
#[derive(Debug, Clone, Default)]
pub struct Merger;

impl Merger {
    /// Create a new merger.
    pub fn new() -> Self {
        Self
    }

    /// Merge `handles` in order.
    ///
    /// The output holds every page of the first handle, then every page of the
    /// second, and so on, each in its source order.
    ///
    /// # Errors
    ///
    /// - [`BundleError::NoFilesToMerge`] if `handles` is empty.
    /// - [`BundleError::MalformedPdf`] if a source page tree cannot be walked.
    /// - [`BundleError::MergeFailed`] if the output structure cannot be built.
    pub fn merge(&self, handles: Vec<DocumentHandle>) -> Result<MergedDocument> {
        if handles.is_empty() {
            return Err(BundleError::NoFilesToMerge);
        }

        let documents_merged = handles.len();
        let mut merged = Document::with_version("1.5");
        let mut page_ids: Vec<ObjectId> = Vec::new();
        let mut next_id = 1;

        for (idx, handle) in handles.into_iter().enumerate() {
            let source = handle.source().to_path_buf();
            let mut doc = handle.into_document();

            // Avoid object id collisions by renumbering the incoming document
            doc.renumber_objects_with(next_id);
            next_id = doc.max_id + 1;

            let doc_pages = Self::detach_pages(&mut doc, &source)?;
            debug!(
                "[{}/{}] {} → {} pages",
                idx + 1,
                documents_merged,
                source.display(),
                doc_pages.len()
            );

            merged.objects.extend(doc.objects);
            page_ids.extend(doc_pages);
        }

        merged.max_id = next_id - 1;
        Self::build_page_tree(&mut merged, &page_ids)?;

        merged.prune_objects();
        merged.renumber_objects();
        merged.compress();

        let total_pages = merged.get_pages().len();
        info!(documents = documents_merged, pages = total_pages, "merged documents");

        Ok(MergedDocument {
            document: merged,
            statistics: MergeStatistics {
                documents_merged,
                total_pages,
            },
        })
    }

    /// Collect the page ids of `doc` in order and make each page standalone.
    ///
    /// Inherited attributes are copied onto the pages, then the catalog and
    /// every `Pages` node are removed from `doc`.
    fn detach_pages(doc: &mut Document, source: &Path) -> Result<Vec<ObjectId>> {
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        for &page_id in &page_ids {
            let inherited = Self::inherited_attributes(doc, page_id)
                .map_err(|err| BundleError::malformed_pdf(source, err.to_string()))?;

            let page = doc
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|err| BundleError::malformed_pdf(source, err.to_string()))?;
            for (key, value) in inherited {
                page.set(key, value);
            }
        }

        doc.objects.retain(|_, object| {
            !matches!(node_type(object), Some(b"Catalog") | Some(b"Pages"))
        });

        Ok(page_ids)
    }

    /// Values for inheritable attributes the page lacks, taken from the
    /// nearest ancestor that defines them.
    fn inherited_attributes(
        doc: &Document,
        page_id: ObjectId,
    ) -> lopdf::Result<Vec<(Vec<u8>, Object)>> {
        let page = doc.get_dictionary(page_id)?;
        let mut missing: Vec<&[u8]> = INHERITABLE_ATTRIBUTES
            .into_iter()
            .filter(|key| !page.has(key))
            .collect();
        let mut found = Vec::new();

        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        for _ in 0..MAX_TREE_DEPTH {
            let Some(node_id) = parent else { break };
            if missing.is_empty() {
                break;
            }

            let node = doc.get_dictionary(node_id)?;
            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    found.push((key.to_vec(), value.clone()));
                    false
                }
                Err(_) => true,
            });
            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        }

        Ok(found)
    }

    /// Add a single `Pages` node holding `page_ids` and a catalog pointing at it.
    fn build_page_tree(merged: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
        let pages_id = merged.new_object_id();

        for &page_id in page_ids {
            merged
                .get_object_mut(page_id)?
                .as_dict_mut()?
                .set("Parent", pages_id);
        }

        let kids: Vec<Object> = page_ids.iter().copied().map(Object::Reference).collect();
        merged.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }
            .into(),
        );

        let catalog_id = merged.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        merged.trailer.set("Root", catalog_id);

        Ok(())
    }
}

fn node_type(object: &Object) -> Option<&[u8]> {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .ok()
}
