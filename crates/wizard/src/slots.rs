//! File slots and the preview URLs they own.
//!
//! A [`PreviewUrl`] is not `Clone` and [`PreviewRegistry::release`] takes it by
//! value, so a URL can only be handed back once.

use base64::Engine as _;
use std::collections::HashSet;
use std::sync::Arc;

/// A file chosen by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PickedFile {
    /// Build a picked file, guessing the content type from the extension when
    /// the platform did not report one.
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let content_type = content_type
            .map(|ct| ct.trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| guess_content_type(&name).to_string());
        Self {
            name,
            content_type,
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type == "application/pdf"
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Content type from a file name, `application/octet-stream` when unknown.
pub fn guess_content_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

// ── Preview registry ────────────────────────────────────────────────

/// A displayable URL for a picked file. Owned by exactly one slot.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewUrl {
    id: u64,
    href: Arc<str>,
}

impl PreviewUrl {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// The href as a shared handle. A photo's `data:` URL runs to megabytes,
    /// so views hold this instead of a copy.
    pub fn shared_href(&self) -> Arc<str> {
        Arc::clone(&self.href)
    }
}

/// Creates and releases preview URLs.
pub trait PreviewRegistry {
    fn create(&mut self, file: &PickedFile) -> PreviewUrl;
    fn release(&mut self, url: PreviewUrl);
}

/// Registry producing `data:` URLs.
///
/// Each href carries a `#p<id>` fragment so two previews of identical bytes
/// are still distinct URLs.
#[derive(Debug, Default)]
pub struct DataUrlPreviews {
    next_id: u64,
    live: HashSet<u64>,
    released_total: u64,
    double_releases: u64,
}

impl DataUrlPreviews {
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, id: u64) -> bool {
        self.live.contains(&id)
    }

    pub fn released_total(&self) -> u64 {
        self.released_total
    }

    /// Releases of ids that were not live. Stays zero unless ownership is broken.
    pub fn double_releases(&self) -> u64 {
        self.double_releases
    }
}

impl PreviewRegistry for DataUrlPreviews {
    fn create(&mut self, file: &PickedFile) -> PreviewUrl {
        self.next_id += 1;
        let id = self.next_id;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        self.live.insert(id);
        tracing::trace!(id, name = %file.name, "preview created");
        PreviewUrl {
            id,
            href: format!("data:{};base64,{}#p{}", file.content_type, encoded, id).into(),
        }
    }

    fn release(&mut self, url: PreviewUrl) {
        if self.live.remove(&url.id) {
            self.released_total += 1;
            tracing::trace!(id = url.id, "preview released");
        } else {
            self.double_releases += 1;
            tracing::warn!(id = url.id, "preview released twice");
        }
    }
}

// ── Slots ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// The evidence photo being prepared for upload.
    EvidenceImage,
    /// The signed document as a PDF.
    DocumentPdf,
    /// The signed document as one or more photos.
    DocumentImages,
}

pub const ALL_SLOTS: &[SlotKind] = &[
    SlotKind::EvidenceImage,
    SlotKind::DocumentPdf,
    SlotKind::DocumentImages,
];

impl SlotKind {
    /// Value for the file input's `accept` attribute.
    pub fn accept(&self) -> &'static str {
        match self {
            SlotKind::EvidenceImage | SlotKind::DocumentImages => "image/*",
            SlotKind::DocumentPdf => "application/pdf",
        }
    }

    pub fn multiple(&self) -> bool {
        matches!(self, SlotKind::DocumentImages)
    }

    /// Whether this slot can show `file` inline.
    pub fn can_preview(&self, file: &PickedFile) -> bool {
        match self {
            SlotKind::EvidenceImage | SlotKind::DocumentImages => file.is_image(),
            SlotKind::DocumentPdf => file.is_pdf(),
        }
    }

    fn index(&self) -> usize {
        match self {
            SlotKind::EvidenceImage => 0,
            SlotKind::DocumentPdf => 1,
            SlotKind::DocumentImages => 2,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    files: Vec<PickedFile>,
    preview: Option<PreviewUrl>,
}

/// The three independent file slots and their previews.
#[derive(Debug)]
pub struct FileSlots<P: PreviewRegistry> {
    registry: P,
    slots: [Slot; 3],
}

impl<P: PreviewRegistry> FileSlots<P> {
    pub fn new(registry: P) -> Self {
        Self {
            registry,
            slots: Default::default(),
        }
    }

    pub fn registry(&self) -> &P {
        &self.registry
    }

    fn release_preview(&mut self, kind: SlotKind) {
        if let Some(url) = self.slots[kind.index()].preview.take() {
            self.registry.release(url);
        }
    }

    /// Replace the slot's selection. Single-file slots keep the first file.
    pub fn pick(&mut self, kind: SlotKind, mut files: Vec<PickedFile>) {
        self.release_preview(kind);
        if !kind.multiple() {
            files.truncate(1);
        }
        tracing::debug!(?kind, count = files.len(), "slot picked");
        self.slots[kind.index()].files = files;
    }

    /// Preview URL for the slot, created on first request.
    ///
    /// Multi-file slots preview their first file. Files the slot cannot show
    /// yield `None`.
    pub fn preview(&mut self, kind: SlotKind) -> Option<&str> {
        let idx = kind.index();
        if self.slots[idx].preview.is_none() {
            let file = self.slots[idx].files.first()?;
            if !kind.can_preview(file) {
                return None;
            }
            let url = self.registry.create(file);
            self.slots[idx].preview = Some(url);
        }
        self.slots[idx].preview.as_ref().map(PreviewUrl::href)
    }

    /// Already created preview, without creating one.
    pub fn current_preview(&self, kind: SlotKind) -> Option<&PreviewUrl> {
        self.slots[kind.index()].preview.as_ref()
    }

    pub fn clear(&mut self, kind: SlotKind) {
        self.release_preview(kind);
        self.slots[kind.index()].files.clear();
    }

    pub fn clear_all(&mut self) {
        for kind in ALL_SLOTS {
            self.clear(*kind);
        }
    }

    pub fn files(&self, kind: SlotKind) -> &[PickedFile] {
        &self.slots[kind.index()].files
    }

    pub fn first(&self, kind: SlotKind) -> Option<&PickedFile> {
        self.slots[kind.index()].files.first()
    }

    pub fn count(&self, kind: SlotKind) -> usize {
        self.slots[kind.index()].files.len()
    }

    pub fn is_empty(&self, kind: SlotKind) -> bool {
        self.count(kind) == 0
    }

    /// "Preview of file 1 of N" caption for multi-file slots holding more than
    /// one file.
    pub fn preview_caption(&self, kind: SlotKind) -> Option<String> {
        let n = self.count(kind);
        (kind.multiple() && n > 1).then(|| format!("Preview of file 1 of {n}"))
    }
}

impl<P: PreviewRegistry> Drop for FileSlots<P> {
    fn drop(&mut self) {
        for kind in ALL_SLOTS {
            self.release_preview(*kind);
        }
    }
}
