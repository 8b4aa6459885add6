/// Indexing failures. Fatal for the call that raised them; the previously
/// published index is never corrupted.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("duplicate document id: {id}")]
    DuplicateDocument { id: String },

    #[error("document with empty id")]
    EmptyDocumentId,

    #[error("unknown content type: {name}")]
    UnknownContentType { name: String },

    #[error("reindex already in progress")]
    ReindexInProgress,
}
