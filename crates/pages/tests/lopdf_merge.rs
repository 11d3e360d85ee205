use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use pagestack::{DocumentBackend, LopdfBackend, PageCollection, Source};

/// Builds a PDF whose pages are told apart by MediaBox width.
/// Resources live on the page tree node so pages must inherit them.
fn build_pdf(widths: &[i64]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter([(
        "Font",
        Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(font_id))])),
    )]));

    let mut kids = Vec::new();
    for (index, width) in widths.iter().enumerate() {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![20.into(), 100.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("page {}", index + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
            (
                "MediaBox",
                Object::Array(vec![0.into(), 0.into(), (*width).into(), 400.into()]),
            ),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter([
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
            ("Resources", Object::Reference(resources_id)),
        ])),
    );
    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save fixture");
    bytes
}

fn page_widths(bytes: &[u8]) -> Vec<u32> {
    let backend = LopdfBackend {
        thumbnail_scale: 1.0,
    };
    let doc = backend.load(bytes).expect("load merged");
    (0..backend.page_count(&doc))
        .map(|index| backend.preview(&doc, index).expect("preview").width)
        .collect()
}

#[test]
fn extracted_pages_are_single_page_documents() {
    let backend = LopdfBackend::default();
    let doc = backend.load(&build_pdf(&[100, 200, 300])).expect("load");
    assert_eq!(backend.page_count(&doc), 3);

    let single = backend.extract_page(&doc, 1).expect("extract");
    assert_eq!(backend.page_count(&single), 1);

    let page_id = *single.get_pages().get(&1).expect("page");
    let page = single.get_dictionary(page_id).expect("page dict");
    assert!(page.has(b"Resources"));

    assert!(backend.extract_page(&doc, 3).is_err());
}

#[test]
fn previews_scale_the_media_box() {
    let backend = LopdfBackend::default();
    let doc = backend.load(&build_pdf(&[100, 200])).expect("load");
    let preview = backend.preview(&doc, 1).expect("preview");
    assert_eq!(preview.width, 60);
    assert_eq!(preview.height, 120);
    assert_eq!(preview.caption, "Page 2");
    assert!(backend.preview(&doc, 5).is_none());
}

#[test]
fn merge_follows_display_order() {
    let mut collection = PageCollection::new(LopdfBackend::default());
    let report = collection.extract(
        &[
            Source::new("a.pdf", build_pdf(&[100, 200])),
            Source::new("b.pdf", build_pdf(&[300])),
        ],
        |_| {},
    );
    assert!(report.failures.is_empty());
    assert_eq!(collection.len(), 3);

    let output = collection.merge().expect("merge");
    assert_eq!(output.pages, 3);
    assert!(output.bytes.starts_with(b"%PDF-"));
    assert_eq!(page_widths(&output.bytes), vec![100, 200, 300]);

    let ids = collection.ids();
    collection.move_to_top(ids[2]).expect("move");
    collection.remove(ids[0]).expect("remove");
    let output = collection.merge().expect("merge again");
    assert_eq!(page_widths(&output.bytes), vec![300, 200]);
}

#[test]
fn garbage_after_the_magic_adds_nothing() {
    let mut collection = PageCollection::new(LopdfBackend::default());
    let report = collection.extract(
        &[Source::new("broken.pdf", b"%PDF-1.5\nnot really".to_vec())],
        |_| {},
    );
    assert!(collection.is_empty());
    assert!(report.added.is_empty());
}

#[test]
fn merged_document_keeps_one_page_tree() {
    let mut collection = PageCollection::new(LopdfBackend::default());
    collection.extract(
        &[
            Source::new("a.pdf", build_pdf(&[100, 200])),
            Source::new("b.pdf", build_pdf(&[300])),
        ],
        |_| {},
    );
    let output = collection.merge().expect("merge");
    let doc = LopdfBackend::default().load(&output.bytes).expect("load merged");

    let count_of = |wanted: &str| {
        doc.objects
            .values()
            .filter(|object| object.type_name().map(|name| name == wanted).unwrap_or(false))
            .count()
    };
    assert_eq!(count_of("Catalog"), 1);
    assert_eq!(count_of("Pages"), 1);
    assert_eq!(count_of("Page"), 3);
}
