use crate::{DocumentBackend, Notice, PageError, Preview};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

impl PageId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named input file.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Source {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.bytes.starts_with(PDF_MAGIC)
    }
}

#[derive(Debug)]
pub struct PageRecord<D> {
    pub id: PageId,
    pub source_name: String,
    /// 1-based page number within the source.
    pub page_number: usize,
    pub document: D,
    pub preview: Option<Preview>,
}

impl<D> PageRecord<D> {
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_number, self.source_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.done as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractFailure {
    pub source_name: String,
    /// `None` when the whole source was rejected.
    pub page_number: Option<usize>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub added: Vec<PageId>,
    pub files: usize,
    pub total_pages: usize,
    pub failures: Vec<ExtractFailure>,
}

impl ExtractReport {
    pub fn notice(&self) -> Notice {
        if self.failures.is_empty() {
            return Notice::success(format!(
                "Successfully processed {} pages from {} file(s)",
                self.added.len(),
                self.files
            ));
        }
        let first = &self.failures[0];
        if self.added.is_empty() {
            return Notice::error(format!(
                "Error processing PDF files: {}: {}",
                first.source_name, first.reason
            ));
        }
        Notice::warning(format!(
            "Processed {} pages from {} file(s); {} problem(s), first: {}: {}",
            self.added.len(),
            self.files,
            self.failures.len(),
            first.source_name,
            first.reason
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub skipped: Vec<PageId>,
}

impl MergeOutput {
    pub fn notice(&self) -> Notice {
        if self.skipped.is_empty() {
            Notice::success(format!(
                "Successfully merged PDF with {} pages",
                self.pages
            ))
        } else {
            Notice::warning(format!(
                "Merged PDF with {} pages; skipped {}",
                self.pages,
                self.skipped.len()
            ))
        }
    }
}

impl PageError {
    pub fn notice(&self) -> Notice {
        match self {
            PageError::NoPages => Notice::warning("No pages to merge"),
            other => Notice::error(format!("Error creating merged PDF: {other}")),
        }
    }
}

/// File name for a merge made on `date`.
pub fn merged_file_name(date: NaiveDate) -> String {
    format!("merged-pdf-{}.pdf", date.format("%Y-%m-%d"))
}

pub fn merged_file_name_today() -> String {
    merged_file_name(chrono::Local::now().date_naive())
}

/// The ordered page sequence. Its order is the merge order.
pub struct PageCollection<B: DocumentBackend> {
    backend: B,
    records: Vec<PageRecord<B::Document>>,
    next_id: u64,
}

impl<B: DocumentBackend> PageCollection<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PageRecord<B::Document>] {
        &self.records
    }

    pub fn ids(&self) -> Vec<PageId> {
        self.records.iter().map(|record| record.id).collect()
    }

    pub fn get(&self, id: PageId) -> Option<&PageRecord<B::Document>> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Appends one record per page of every source, in source order.
    /// Non-PDF inputs and unreadable sources or pages are reported, not fatal.
    pub fn extract<F>(&mut self, sources: &[Source], mut on_progress: F) -> ExtractReport
    where
        F: FnMut(Progress),
    {
        let mut report = ExtractReport::default();

        let mut loaded = Vec::new();
        for source in sources {
            if !source.is_pdf() {
                tracing::warn!(source = %source.name, "skipping non-PDF source");
                report.failures.push(ExtractFailure {
                    source_name: source.name.clone(),
                    page_number: None,
                    reason: "Only PDF files are supported".to_string(),
                });
                continue;
            }
            match self.backend.load(&source.bytes) {
                Ok(doc) => {
                    let count = self.backend.page_count(&doc);
                    report.total_pages += count;
                    loaded.push((source, doc, count));
                }
                Err(err) => {
                    tracing::warn!(source = %source.name, error = %err, "failed to load source");
                    report.failures.push(ExtractFailure {
                        source_name: source.name.clone(),
                        page_number: None,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let mut done = 0;
        for (source, doc, count) in loaded {
            report.files += 1;
            for index in 0..count {
                let page_number = index + 1;
                match self.backend.extract_page(&doc, index) {
                    Ok(single) => {
                        let id = self.alloc_id();
                        self.records.push(PageRecord {
                            id,
                            source_name: source.name.clone(),
                            page_number,
                            document: single,
                            preview: self.backend.preview(&doc, index),
                        });
                        report.added.push(id);
                    }
                    Err(err) => {
                        tracing::warn!(
                            source = %source.name,
                            page = page_number,
                            error = %err,
                            "failed to extract page"
                        );
                        report.failures.push(ExtractFailure {
                            source_name: source.name.clone(),
                            page_number: Some(page_number),
                            reason: err.to_string(),
                        });
                    }
                }
                done += 1;
                on_progress(Progress {
                    done,
                    total: report.total_pages,
                });
            }
        }

        tracing::info!(
            added = report.added.len(),
            files = report.files,
            failures = report.failures.len(),
            "pages extracted"
        );
        report
    }

    /// Moves a page so it ends up at `index` in the sequence.
    pub fn move_to(&mut self, id: PageId, index: usize) -> Result<(), PageError> {
        let from = self.position(id)?;
        let len = self.records.len();
        if index >= len {
            return Err(PageError::PositionOutOfRange { index, len });
        }
        let record = self.records.remove(from);
        self.records.insert(index, record);
        Ok(())
    }

    pub fn move_to_top(&mut self, id: PageId) -> Result<(), PageError> {
        self.move_to(id, 0)
    }

    pub fn move_to_bottom(&mut self, id: PageId) -> Result<(), PageError> {
        let last = self.records.len().saturating_sub(1);
        self.move_to(id, last)
    }

    /// Replaces the order wholesale, as a drag-and-drop list reports it.
    /// `order` must name every current page exactly once.
    pub fn apply_order(&mut self, order: &[PageId]) -> Result<(), PageError> {
        if order.len() != self.records.len() {
            return Err(PageError::NotAPermutation);
        }
        let wanted: HashSet<PageId> = order.iter().copied().collect();
        if wanted.len() != order.len() || self.records.iter().any(|r| !wanted.contains(&r.id)) {
            return Err(PageError::NotAPermutation);
        }
        let mut by_id: HashMap<PageId, PageRecord<B::Document>> = self
            .records
            .drain(..)
            .map(|record| (record.id, record))
            .collect();
        self.records = order.iter().filter_map(|id| by_id.remove(id)).collect();
        Ok(())
    }

    /// Removes one page; its preview is released before it is handed back.
    pub fn remove(&mut self, id: PageId) -> Result<PageRecord<B::Document>, PageError> {
        let index = self.position(id)?;
        let mut record = self.records.remove(index);
        record.preview = None;
        tracing::debug!(page = %id, "page removed");
        Ok(record)
    }

    /// Empties the collection if `confirm` agrees. Returns the number of
    /// pages dropped; an empty collection never asks.
    pub fn clear<F>(&mut self, confirm: F) -> usize
    where
        F: FnOnce(usize) -> bool,
    {
        let count = self.records.len();
        if count == 0 || !confirm(count) {
            return 0;
        }
        self.records.clear();
        tracing::debug!(count, "pages cleared");
        count
    }

    /// Concatenates every intact page in display order. Broken records are
    /// logged and skipped; merging nothing is an error, not an empty file.
    pub fn merge(&self) -> Result<MergeOutput, PageError> {
        if self.records.is_empty() {
            return Err(PageError::NoPages);
        }

        let mut out = self.backend.new_document();
        let mut pages = 0;
        let mut skipped = Vec::new();
        for record in &self.records {
            if self.backend.page_count(&record.document) != 1 {
                tracing::warn!(page = %record.id, label = %record.label(), "skipping page without an intact single-page document");
                skipped.push(record.id);
                continue;
            }
            match self.backend.append_page(&mut out, &record.document) {
                Ok(()) => pages += 1,
                Err(err) => {
                    tracing::warn!(page = %record.id, label = %record.label(), error = %err, "failed to copy page");
                    skipped.push(record.id);
                }
            }
        }

        if pages == 0 {
            return Err(PageError::NothingMerged {
                skipped: skipped.len(),
            });
        }
        let bytes = self.backend.save(&mut out)?;
        tracing::info!(pages, skipped = skipped.len(), bytes = bytes.len(), "pages merged");
        Ok(MergeOutput {
            bytes,
            pages,
            skipped,
        })
    }

    fn position(&self, id: PageId) -> Result<usize, PageError> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(PageError::UnknownPage(id))
    }

    fn alloc_id(&mut self) -> PageId {
        let id = PageId(self.next_id);
        self.next_id += 1;
        id
    }
}
