//! Sequential upload of rendered documents into one vector store.

use std::io::Write;

use tempfile::NamedTempFile;

use super::render::RenderedDocument;
use crate::vector_store::{VectorStoreClient, VectorStoreError};

/// Upload each rendered document into the target vector store.
///
/// Documents are uploaded strictly one at a time; the first failure aborts
/// the remaining documents of this batch and surfaces to the caller. In dry
/// run mode no network call is made and one log line is emitted per
/// document.
///
/// Each blob is staged in a named temporary file for the multipart upload.
/// The file is removed on every exit path when the handle drops; removal
/// failures are swallowed there rather than surfaced.
pub async fn upload_documents(
    client: &VectorStoreClient,
    store_id: &str,
    documents: &[RenderedDocument],
    dry_run: bool,
) -> Result<(), VectorStoreError> {
    for document in documents {
        if dry_run {
            tracing::info!(
                document_id = %document.document_id,
                chars = document.text.chars().count(),
                store_id,
                "Dry run: would upload document"
            );
            continue;
        }

        let mut staged = NamedTempFile::new()?;
        staged.write_all(document.text.as_bytes())?;
        staged.flush()?;

        let filename = format!("{}.txt", document.document_id);
        let file = client
            .upload_and_poll(store_id, staged.path(), &filename)
            .await?;
        tracing::info!(
            document_id = %document.document_id,
            file_id = %file.id,
            store_id,
            "Uploaded document to vector store"
        );
    }

    Ok(())
}
