//! Document upload orchestration.

use std::borrow::Cow;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::events::{failure_message, UploadEvent};
use super::item::{DocItem, IdGenerator, MonotonicIds, UploadStatus};
use super::preview::PreviewRegistry;
use super::target::UploadTarget;
use crate::api::percent_of;
use crate::file::FileHandle;
use crate::http::{HttpClient, MultipartForm, ProgressFn};
use crate::signer::{Signer, SignerUpdate};

type EmitFn = Arc<dyn Fn(UploadEvent) + Send + Sync>;

/// Outcome counts of one `upload_all` batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items that were pending when the batch started.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Drives document uploads against the backend.
///
/// Owns no items itself: callers keep the collection and lend it to each
/// operation. Within one call, uploads run concurrently on the calling task
/// and report back through events, so the collection always has a single
/// writer.
#[derive(Clone)]
pub struct UploadManager {
    http: HttpClient,
    ids: Arc<dyn IdGenerator>,
    previews: PreviewRegistry,
}

impl UploadManager {
    /// Create a manager with counter-based ids and its own preview registry.
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            ids: Arc::new(MonotonicIds::new()),
            previews: PreviewRegistry::new(),
        }
    }

    /// Use a different id source.
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Share an existing preview registry.
    pub fn with_previews(mut self, previews: PreviewRegistry) -> Self {
        self.previews = previews;
        self
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Build a pending item for a selected file.
    pub fn create_doc_item(&self, file: FileHandle, index: usize) -> DocItem {
        let id = format!("doc-{}-{}-{}", self.ids.next_id(), index, file.name());
        DocItem::new(id, file)
    }

    /// Append files whose names are not already present.
    ///
    /// Names compare exactly. Returns the borrowed input when nothing was
    /// added.
    pub fn add_files<'a, I>(&self, existing: &'a [DocItem], candidates: I) -> Cow<'a, [DocItem]>
    where
        I: IntoIterator<Item = FileHandle>,
    {
        let mut seen: HashSet<String> = existing.iter().map(|d| d.name.clone()).collect();
        let accepted: Vec<FileHandle> = candidates
            .into_iter()
            .filter(|f| seen.insert(f.name().to_string()))
            .collect();

        if accepted.is_empty() {
            return Cow::Borrowed(existing);
        }

        let mut items = existing.to_vec();
        items.extend(
            accepted
                .into_iter()
                .enumerate()
                .map(|(idx, file)| self.create_doc_item(file, idx)),
        );
        Cow::Owned(items)
    }

    /// Append a signer to a document, returning the created signer.
    pub fn add_signer(&self, doc: &mut DocItem, name: &str, email: &str) -> Signer {
        let id = format!("signer-{}", self.ids.next_id());
        doc.signers.add(id, name, email).clone()
    }

    /// Change a signer's name and/or email. Returns false for an unknown id.
    pub fn update_signer(&self, doc: &mut DocItem, signer_id: &str, update: SignerUpdate) -> bool {
        doc.signers.update(signer_id, update)
    }

    pub fn remove_signer(&self, doc: &mut DocItem, signer_id: &str) -> Option<Signer> {
        doc.signers.remove(signer_id)
    }

    /// Move a signer between positions; out-of-range indices do nothing.
    pub fn reorder_signers(&self, doc: &mut DocItem, from: isize, to: isize) -> bool {
        doc.signers.reorder(from, to)
    }

    /// Upload one document, notifying `on_update` after every state change.
    ///
    /// Placeholder items complete immediately without a request. Failures
    /// are recorded on the item rather than returned.
    pub async fn upload_document<'a, F>(
        &self,
        doc: &'a mut DocItem,
        target: &UploadTarget,
        mut on_update: F,
    ) -> &'a DocItem
    where
        F: FnMut(&DocItem),
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let emit: EmitFn = Arc::new(move |event| {
            let _ = tx.send(event);
        });
        let work = self.run_upload(doc.name.clone(), doc.file.clone(), target, emit);

        drive(work, &mut rx, |event| {
            doc.apply(&event);
            on_update(&*doc);
        })
        .await;

        doc
    }

    /// Upload every pending item concurrently.
    ///
    /// `on_batch_update` receives the whole collection after each state
    /// change of any item, and once more after every upload has settled.
    /// A failed item never affects the others.
    pub async fn upload_all<F>(
        &self,
        items: &mut [DocItem],
        target: &UploadTarget,
        mut on_batch_update: F,
    ) -> BatchSummary
    where
        F: FnMut(&[DocItem]),
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, UploadEvent)>();

        let jobs: Vec<_> = items
            .iter()
            .enumerate()
            .filter(|(_, doc)| doc.is_pending())
            .map(|(idx, doc)| {
                let tx = tx.clone();
                let emit: EmitFn = Arc::new(move |event| {
                    let _ = tx.send((idx, event));
                });
                self.run_upload(doc.name.clone(), doc.file.clone(), target, emit)
            })
            .collect();
        drop(tx);

        let pending: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, doc)| doc.is_pending())
            .map(|(idx, _)| idx)
            .collect();

        tracing::info!(count = jobs.len(), endpoint = %target.endpoint, "uploading documents");

        drive(futures::future::join_all(jobs), &mut rx, |(idx, event)| {
            items[idx].apply(&event);
            on_batch_update(&*items);
        })
        .await;

        on_batch_update(&*items);

        let summary = BatchSummary {
            attempted: pending.len(),
            succeeded: pending
                .iter()
                .filter(|&&idx| items[idx].status == UploadStatus::Done)
                .count(),
            failed: pending
                .iter()
                .filter(|&&idx| items[idx].status == UploadStatus::Error)
                .count(),
        };
        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "upload batch settled"
        );
        summary
    }

    /// The cached preview reference, creating one if the item has content.
    pub fn ensure_preview_url(&self, doc: &mut DocItem) -> Option<String> {
        if let Some(url) = &doc.preview_url {
            return Some(url.clone());
        }
        let url = self.previews.create(doc.file.as_ref()?);
        doc.preview_url = Some(url.clone());
        Some(url)
    }

    /// Revoke and clear the item's preview reference, if any.
    pub fn release_preview_url(&self, doc: &mut DocItem) {
        if let Some(url) = doc.preview_url.take() {
            self.previews.revoke(&url);
        }
    }

    /// Release every preview reference, e.g. when the owning view closes.
    pub fn release_all(&self, items: &mut [DocItem]) {
        for doc in items.iter_mut() {
            self.release_preview_url(doc);
        }
    }

    /// Remove an item by id, releasing its preview first.
    pub fn remove_item(&self, items: &mut Vec<DocItem>, id: &str) -> Option<DocItem> {
        let index = items.iter().position(|d| d.id == id)?;
        let mut removed = items.remove(index);
        self.release_preview_url(&mut removed);
        Some(removed)
    }

    /// Upload future for one item, independent of the item itself.
    fn run_upload(
        &self,
        name: String,
        file: Option<FileHandle>,
        target: &UploadTarget,
        emit: EmitFn,
    ) -> impl Future<Output = ()> {
        let http = self.http.clone();
        let target = target.clone();

        async move {
            let Some(file) = file else {
                tracing::debug!(name = %name, "placeholder item, nothing to send");
                emit(UploadEvent::Finished(Ok(())));
                return;
            };

            emit(UploadEvent::Started);

            let mut form = MultipartForm::new(file);
            for (key, value) in &target.fields {
                form = form.text(key.clone(), value.clone());
            }

            let progress_emit = emit.clone();
            let on_progress: ProgressFn = Arc::new(move |loaded, total| {
                if let Some(percent) = percent_of(loaded, total) {
                    progress_emit(UploadEvent::Progress(percent));
                }
            });

            match http.upload(&target.endpoint, form, Some(on_progress)).await {
                Ok(_) => {
                    tracing::info!(name = %name, "upload complete");
                    emit(UploadEvent::Finished(Ok(())));
                }
                Err(e) => {
                    let message = failure_message(&e);
                    tracing::warn!(name = %name, error = %message, "upload failed");
                    emit(UploadEvent::Finished(Err(message)));
                }
            }
        }
    }
}

/// Pending seed items used before the user selects real files.
pub fn seed_documents() -> Vec<DocItem> {
    (1..=3)
        .map(|n| DocItem::placeholder(format!("seed-{}", n), format!("Document{}.pdf", n)))
        .collect()
}

/// True when there is at least one item and every item is done.
pub fn all_uploaded(items: &[DocItem]) -> bool {
    !items.is_empty() && items.iter().all(|d| d.status == UploadStatus::Done)
}

/// Return failed items to pending so the next batch retries them.
///
/// Returns how many items were reset.
pub fn retry_failed(items: &mut [DocItem]) -> usize {
    let mut reset = 0;
    for doc in items
        .iter_mut()
        .filter(|d| d.status == UploadStatus::Error)
    {
        doc.status = UploadStatus::Pending;
        doc.progress = 0;
        doc.error = None;
        reset += 1;
    }
    reset
}

/// Run `work` to completion, handing every event it emits to `on_event`.
///
/// Events are drained before returning, so nothing emitted by `work` is lost.
async fn drive<W, T, F>(work: W, events: &mut mpsc::UnboundedReceiver<T>, mut on_event: F) -> W::Output
where
    W: Future,
    F: FnMut(T),
{
    tokio::pin!(work);
    let output = loop {
        tokio::select! {
            biased;
            Some(event) = events.recv() => on_event(event),
            output = &mut work => break output,
        }
    };
    while let Ok(event) = events.try_recv() {
        on_event(event);
    }
    output
}
