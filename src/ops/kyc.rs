//! KYC document operations: upload, listing, review, and download.

use crate::api::client::{FilePayload, ProgressCallback};
use crate::api::envelope::ApiResponse;
use crate::api::types::{EvaluateKycRequest, KycFile, KycFileKind};
use crate::app::App;
use crate::state::op;

const BASE_PATH: &str = "/kyc";

/// POST /kyc/upload/{userId} — multipart upload of a verification document.
///
/// The optional callback receives a progress report per transmitted chunk.
/// The accepted document is prepended to the member's list.
pub async fn upload_file(
    app: &App,
    user_id: u64,
    kind: KycFileKind,
    payload: FilePayload,
    progress: Option<ProgressCallback>,
) {
    app.kyc.write().await.upload.pending();

    let result = app
        .api
        .upload::<KycFile>(
            &format!("{}/upload/{}", BASE_PATH, user_id),
            payload,
            &[("fileType", kind.as_str().to_string())],
            progress,
        )
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.kyc.write().await;
    match result {
        Ok(file) => {
            if let Some(file) = file {
                slice.file_uploaded(file);
            }
            slice.upload.fulfilled();
        }
        Err(e) => slice
            .upload
            .rejected(e.message_or("failed to upload KYC document")),
    }
}

/// DELETE /kyc/{id} — remove a document.
///
/// The response carries no body; the id from the request parameters drives
/// the removal from every loaded collection.
pub async fn delete_file(app: &App, file_id: u64) {
    app.kyc.write().await.delete.pending();

    let result = app
        .api
        .delete::<String>(&format!("{}/{}", BASE_PATH, file_id))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.kyc.write().await;
    match result {
        Ok(_) => {
            slice.file_deleted(file_id);
            slice.delete.fulfilled();
        }
        Err(e) => slice
            .delete
            .rejected(e.message_or("failed to delete KYC document")),
    }
}

/// GET /kyc/user/{userId} — the member's uploaded documents.
pub async fn fetch_user_files(app: &App, user_id: u64) {
    app.kyc.write().await.my_files_op.pending();

    let result = app
        .api
        .get::<Vec<KycFile>>(&format!("{}/user/{}", BASE_PATH, user_id))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.kyc.write().await;
    match result {
        Ok(files) => {
            op::replace(&mut slice.my_files, files.unwrap_or_default());
            slice.my_files_op.fulfilled();
        }
        Err(e) => slice
            .my_files_op
            .rejected(e.message_or("failed to fetch KYC documents")),
    }
}

/// GET /kyc/pending — documents awaiting review (admin).
pub async fn fetch_pending_files(app: &App) {
    app.kyc.write().await.pending_files_op.pending();

    let result = app
        .api
        .get::<Vec<KycFile>>(&format!("{}/pending", BASE_PATH))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.kyc.write().await;
    match result {
        Ok(files) => {
            op::replace(&mut slice.pending_files, files.unwrap_or_default());
            slice.pending_files_op.fulfilled();
        }
        Err(e) => slice
            .pending_files_op
            .rejected(e.message_or("failed to fetch pending KYC documents")),
    }
}

/// PUT /kyc/{id}/evaluate — record a review verdict (admin).
///
/// The updated document replaces every loaded copy, including the current
/// selection when it matches.
pub async fn evaluate_file(app: &App, file_id: u64, request: EvaluateKycRequest) {
    app.kyc.write().await.evaluate.pending();

    let result = app
        .api
        .put::<KycFile, _>(&format!("{}/{}/evaluate", BASE_PATH, file_id), &request)
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.kyc.write().await;
    match result {
        Ok(file) => {
            if let Some(ref file) = file {
                slice.file_evaluated(file);
            }
            slice.evaluate.fulfilled();
        }
        Err(e) => slice
            .evaluate
            .rejected(e.message_or("failed to evaluate KYC document")),
    }
}

/// GET /kyc/file/{fileName} — fetch a document's bytes.
///
/// The payload is returned to the caller (and, as a convenience, saved to
/// the downloads directory by the dispatcher). A failure is recorded on the
/// download record and yields `None`.
pub async fn download_file(app: &App, file_name: &str) -> Option<Vec<u8>> {
    app.kyc.write().await.download.pending();

    let path = format!("{}/file/{}", BASE_PATH, urlencoding::encode(file_name));
    match app.api.download(&path, Some(file_name)).await {
        Ok(bytes) => {
            app.kyc.write().await.download.fulfilled();
            Some(bytes)
        }
        Err(e) => {
            app.kyc
                .write()
                .await
                .download
                .rejected(e.message_or("failed to download KYC document"));
            None
        }
    }
}
