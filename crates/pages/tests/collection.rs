use pagestack::{
    BackendError, DocumentBackend, NoticeLevel, PageCollection, PageError, PageId, Preview,
    Source,
};
use std::cell::RefCell;

/// In-memory documents: a source is `%PDF-` followed by one byte per page.
/// Page byte `b'x'` fails extraction, page byte `b'!'` extracts into a
/// document with no pages.
#[derive(Default)]
struct FakeBackend {
    appended: RefCell<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
struct FakeDoc {
    pages: Vec<u8>,
}

impl DocumentBackend for FakeBackend {
    type Document = FakeDoc;

    fn load(&self, bytes: &[u8]) -> Result<FakeDoc, BackendError> {
        let body = &bytes[5..];
        if body.first() == Some(&b'?') {
            return Err(BackendError::new("corrupt xref"));
        }
        Ok(FakeDoc {
            pages: body.to_vec(),
        })
    }

    fn page_count(&self, doc: &FakeDoc) -> usize {
        doc.pages.len()
    }

    fn extract_page(&self, doc: &FakeDoc, index: usize) -> Result<FakeDoc, BackendError> {
        match doc.pages[index] {
            b'x' => Err(BackendError::new("bad page")),
            b'!' => Ok(FakeDoc { pages: Vec::new() }),
            page => Ok(FakeDoc { pages: vec![page] }),
        }
    }

    fn preview(&self, _doc: &FakeDoc, index: usize) -> Option<Preview> {
        Some(Preview {
            width: 10,
            height: 10,
            caption: format!("Page {}", index + 1),
            image: None,
        })
    }

    fn new_document(&self) -> FakeDoc {
        FakeDoc { pages: Vec::new() }
    }

    fn append_page(&self, out: &mut FakeDoc, single: &FakeDoc) -> Result<(), BackendError> {
        self.appended.borrow_mut().push(single.pages[0]);
        out.pages.extend_from_slice(&single.pages);
        Ok(())
    }

    fn save(&self, doc: &mut FakeDoc) -> Result<Vec<u8>, BackendError> {
        Ok(doc.pages.clone())
    }
}

fn source(name: &str, pages: &str) -> Source {
    let mut bytes = b"%PDF-".to_vec();
    bytes.extend_from_slice(pages.as_bytes());
    Source::new(name, bytes)
}

fn loaded(sources: &[Source]) -> PageCollection<FakeBackend> {
    let mut collection = PageCollection::new(FakeBackend::default());
    collection.extract(sources, |_| {});
    collection
}

fn merged(collection: &PageCollection<FakeBackend>) -> Vec<u8> {
    collection.merge().expect("merge").bytes
}

#[test]
fn extraction_keeps_source_then_page_order() {
    let mut collection = PageCollection::new(FakeBackend::default());
    let mut progress = Vec::new();
    let report = collection.extract(&[source("a.pdf", "abc"), source("b.pdf", "de")], |p| {
        progress.push((p.done, p.total))
    });

    assert_eq!(report.added.len(), 5);
    assert_eq!(report.files, 2);
    assert_eq!(report.total_pages, 5);
    assert!(report.failures.is_empty());
    assert_eq!(progress, vec![(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);

    let labels: Vec<String> = collection.records().iter().map(|r| r.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Page 1 of a.pdf",
            "Page 2 of a.pdf",
            "Page 3 of a.pdf",
            "Page 1 of b.pdf",
            "Page 2 of b.pdf",
        ]
    );
    assert_eq!(merged(&collection), b"abcde".to_vec());

    let notice = report.notice();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(
        notice.message,
        "Successfully processed 5 pages from 2 file(s)"
    );
}

#[test]
fn ids_are_unique_across_extractions() {
    let mut collection = loaded(&[source("a.pdf", "ab")]);
    collection.extract(&[source("a.pdf", "ab")], |_| {});
    let mut ids = collection.ids();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn non_pdf_sources_are_rejected_without_aborting() {
    let mut collection = PageCollection::new(FakeBackend::default());
    let report = collection.extract(
        &[
            Source::new("notes.txt", b"hello".to_vec()),
            source("a.pdf", "ab"),
        ],
        |_| {},
    );
    assert_eq!(collection.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source_name, "notes.txt");
    assert_eq!(report.failures[0].reason, "Only PDF files are supported");
    assert_eq!(report.notice().level, NoticeLevel::Warning);
}

#[test]
fn unreadable_sources_and_pages_are_reported() {
    let mut collection = PageCollection::new(FakeBackend::default());
    let report = collection.extract(&[source("bad.pdf", "?"), source("a.pdf", "axb")], |_| {});
    assert_eq!(collection.len(), 2);
    assert_eq!(report.files, 1);
    assert_eq!(report.total_pages, 3);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].page_number, None);
    assert_eq!(report.failures[1].page_number, Some(2));
}

#[test]
fn everything_failing_is_an_error_notice() {
    let mut collection = PageCollection::new(FakeBackend::default());
    let report = collection.extract(&[Source::new("x.png", vec![0x89, b'P'])], |_| {});
    assert!(collection.is_empty());
    let notice = report.notice();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.starts_with("Error processing PDF files"));
}

#[test]
fn move_to_reorders_the_merge() {
    let mut collection = loaded(&[source("a.pdf", "abc")]);
    let ids = collection.ids();
    collection.move_to(ids[2], 0).expect("move");
    assert_eq!(merged(&collection), b"cab".to_vec());
    collection.move_to_bottom(ids[2]).expect("bottom");
    assert_eq!(merged(&collection), b"abc".to_vec());
    collection.move_to_top(ids[1]).expect("top");
    assert_eq!(merged(&collection), b"bac".to_vec());

    assert_eq!(
        collection.move_to(ids[0], 3),
        Err(PageError::PositionOutOfRange { index: 3, len: 3 })
    );
}

#[test]
fn apply_order_requires_a_permutation() {
    let mut collection = loaded(&[source("a.pdf", "abc")]);
    let ids = collection.ids();
    collection
        .apply_order(&[ids[1], ids[2], ids[0]])
        .expect("order");
    assert_eq!(merged(&collection), b"bca".to_vec());

    assert_eq!(
        collection.apply_order(&[ids[0], ids[0], ids[1]]),
        Err(PageError::NotAPermutation)
    );
    assert_eq!(
        collection.apply_order(&[ids[0], ids[1]]),
        Err(PageError::NotAPermutation)
    );
    assert_eq!(merged(&collection), b"bca".to_vec());
}

#[test]
fn removed_pages_leave_the_merge_and_release_previews() {
    let mut collection = loaded(&[source("a.pdf", "abc")]);
    let ids = collection.ids();
    assert!(collection.get(ids[1]).and_then(|r| r.preview.as_ref()).is_some());

    let removed = collection.remove(ids[1]).expect("remove");
    assert!(removed.preview.is_none());
    assert_eq!(merged(&collection), b"ac".to_vec());
    assert!(collection.get(ids[1]).is_none());
    assert!(matches!(
        collection.remove(ids[1]),
        Err(PageError::UnknownPage(id)) if id == ids[1]
    ));
}

#[test]
fn clear_asks_first() {
    let mut collection = loaded(&[source("a.pdf", "abc")]);
    assert_eq!(collection.clear(|_| false), 0);
    assert_eq!(collection.len(), 3);

    let mut asked = None;
    assert_eq!(
        collection.clear(|count| {
            asked = Some(count);
            true
        }),
        3
    );
    assert_eq!(asked, Some(3));
    assert!(collection.is_empty());

    assert_eq!(collection.clear(|_| panic!("empty collection asked")), 0);
}

#[test]
fn empty_merge_is_a_warning() {
    let collection = PageCollection::new(FakeBackend::default());
    let err = collection.merge().expect_err("empty");
    assert_eq!(err, PageError::NoPages);
    let notice = err.notice();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "No pages to merge");
}

#[test]
fn pages_without_a_document_are_skipped() {
    let collection = loaded(&[source("a.pdf", "a!c")]);
    let ids = collection.ids();
    let output = collection.merge().expect("merge");
    assert_eq!(output.bytes, b"ac".to_vec());
    assert_eq!(output.pages, 2);
    assert_eq!(output.skipped, vec![ids[1]]);
    assert_eq!(output.notice().level, NoticeLevel::Warning);
    assert_eq!(*collection.backend().appended.borrow(), b"ac".to_vec());
}

#[test]
fn nothing_valid_to_merge_is_an_error() {
    let collection = loaded(&[source("a.pdf", "!!")]);
    let err = collection.merge().expect_err("nothing merged");
    assert_eq!(err, PageError::NothingMerged { skipped: 2 });
    assert_eq!(err.notice().level, NoticeLevel::Error);
}

#[test]
fn merge_notice_counts_pages() {
    let collection = loaded(&[source("a.pdf", "abcd")]);
    let output = collection.merge().expect("merge");
    let notice = output.notice();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Successfully merged PDF with 4 pages");
}

#[test]
fn page_ids_display_with_a_hash() {
    let collection = loaded(&[source("a.pdf", "a")]);
    let id: PageId = collection.ids()[0];
    assert_eq!(id.to_string(), format!("#{}", id.get()));
}
