use crate::{BackendError, DocumentBackend, Preview, PREVIEW_SCALE};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITED: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Parent chains deeper than this are treated as broken.
const MAX_TREE_DEPTH: usize = 32;

/// US Letter, used when a page carries no usable MediaBox.
const DEFAULT_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

#[derive(Debug, Clone)]
pub struct LopdfBackend {
    pub thumbnail_scale: f64,
}

impl Default for LopdfBackend {
    fn default() -> Self {
        Self {
            thumbnail_scale: PREVIEW_SCALE,
        }
    }
}

impl DocumentBackend for LopdfBackend {
    type Document = Document;

    fn load(&self, bytes: &[u8]) -> Result<Document, BackendError> {
        Ok(Document::load_mem(bytes)?)
    }

    fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    fn extract_page(&self, doc: &Document, index: usize) -> Result<Document, BackendError> {
        let page_id = page_id_at(doc, index)?;
        let mut single = doc.clone();
        inline_inherited(&mut single, page_id)?;

        let pages_id = pages_root_id(&single)?;
        {
            let pages = single.get_object_mut(pages_id)?.as_dict_mut()?;
            pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
            pages.set("Count", Object::Integer(1));
        }
        single
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Parent", Object::Reference(pages_id));

        single.prune_objects();
        single.renumber_objects();
        Ok(single)
    }

    fn preview(&self, doc: &Document, index: usize) -> Option<Preview> {
        let page_id = page_id_at(doc, index).ok()?;
        let media_box = inherited(doc, page_id, b"MediaBox")
            .and_then(|object| rect(doc, &object))
            .unwrap_or(DEFAULT_MEDIA_BOX);
        let width = (media_box[2] - media_box[0]).abs() * self.thumbnail_scale;
        let height = (media_box[3] - media_box[1]).abs() * self.thumbnail_scale;
        Some(Preview {
            width: width.round() as u32,
            height: height.round() as u32,
            caption: format!("Page {}", index + 1),
            image: None,
        })
    }

    fn new_document(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter([
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(Vec::new())),
                ("Count", Object::Integer(0)),
            ])),
        );
        let catalog_id = doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc
    }

    fn append_page(&self, out: &mut Document, single: &Document) -> Result<(), BackendError> {
        let mut page_doc = single.clone();
        page_doc.renumber_objects_with(out.max_id + 1);
        let page_id = page_id_at(&page_doc, 0)?;
        inline_inherited(&mut page_doc, page_id)?;

        let pages_id = pages_root_id(out)?;
        for (object_id, object) in page_doc.objects {
            match object.type_name().unwrap_or("") {
                "Catalog" | "Pages" | "Outlines" | "Outline" => {}
                _ => {
                    out.objects.insert(object_id, object);
                }
            }
        }
        out.get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Parent", Object::Reference(pages_id));

        let pages = out.get_object_mut(pages_id)?.as_dict_mut()?;
        let kids = pages.get_mut(b"Kids")?.as_array_mut()?;
        kids.push(Object::Reference(page_id));
        let count = kids.len() as i64;
        pages.set("Count", Object::Integer(count));

        out.max_id = out.max_id.max(page_doc.max_id);
        Ok(())
    }

    fn save(&self, doc: &mut Document) -> Result<Vec<u8>, BackendError> {
        doc.compress();
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|err| BackendError::new(format!("failed to save PDF: {err}")))?;
        Ok(bytes)
    }
}

fn page_id_at(doc: &Document, index: usize) -> Result<ObjectId, BackendError> {
    let pages = doc.get_pages();
    let number = u32::try_from(index + 1)
        .map_err(|_| BackendError::new(format!("page index {index} too large")))?;
    pages.get(&number).copied().ok_or_else(|| {
        BackendError::new(format!(
            "page {} not found ({} pages)",
            index + 1,
            pages.len()
        ))
    })
}

fn pages_root_id(doc: &Document) -> Result<ObjectId, BackendError> {
    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    Ok(doc.get_dictionary(catalog_id)?.get(b"Pages")?.as_reference()?)
}

/// Looks `key` up on the page, then up its Parent chain.
fn inherited(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

/// Copies inherited attributes onto the page so it survives losing its parent.
fn inline_inherited(doc: &mut Document, page_id: ObjectId) -> Result<(), BackendError> {
    let mut found = Vec::new();
    for key in INHERITED {
        if doc.get_dictionary(page_id)?.has(key) {
            continue;
        }
        if let Some(value) = inherited(doc, page_id, key) {
            found.push((key.to_vec(), value));
        }
    }
    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    for (key, value) in found {
        page.set(key, value);
    }
    Ok(())
}

fn rect(doc: &Document, object: &Object) -> Option<[f64; 4]> {
    let array = match object {
        Object::Array(array) => array,
        Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
        _ => return None,
    };
    if array.len() != 4 {
        return None;
    }
    let mut out = [0.0; 4];
    for (slot, value) in out.iter_mut().zip(array) {
        *slot = match value {
            Object::Integer(i) => *i as f64,
            Object::Real(r) => f64::from(*r),
            _ => return None,
        };
    }
    Some(out)
}
