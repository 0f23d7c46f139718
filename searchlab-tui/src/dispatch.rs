//! Gateway calls issued by pages and the outcomes they report back.
//!
//! A [`Dispatch`] is produced by the UI thread and executed on a spawned
//! task; its [`Outcome`] comes back through the event channel carrying the
//! same page, target and ticket so the page can discard stale replies.

use crate::api_client::{ApiClientError, GatewayClient};
use crate::nav::Page;
use searchlab_core::{
    AckEnvelope, FailureKind, ProductForm, SearchEnvelope, SearchRequest, Session, Ticket,
    VectorMode,
};
use tracing::{info, warn};

/// Which part of a page an outcome updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Results,
    Suggestions,
    Leg(VectorMode),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Search(SearchRequest),
    CreateIndex,
    DeleteIndex,
    VectorizeIndex,
    DeleteVectorIndex,
    Upload(ProductForm),
}

impl GatewayCall {
    pub fn name(&self) -> &'static str {
        match self {
            GatewayCall::Search(request) => request.kind(),
            GatewayCall::CreateIndex => "create_index",
            GatewayCall::DeleteIndex => "delete_index",
            GatewayCall::VectorizeIndex => "vectorize_index",
            GatewayCall::DeleteVectorIndex => "delete_vector_index",
            GatewayCall::Upload(_) => "upload_product",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub page: Page,
    pub target: Target,
    pub ticket: Ticket,
    pub call: GatewayCall,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Search(SearchEnvelope),
    Ack(AckEnvelope),
    Uploaded,
}

/// Why a call produced no usable reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    /// The gateway answered with a non-2xx status.
    Backend(FailureKind),
    /// The request never completed or the reply could not be read.
    Transport(String),
}

impl From<ApiClientError> for CallFailure {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Backend(kind) => CallFailure::Backend(kind),
            other => CallFailure::Transport(other.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub page: Page,
    pub target: Target,
    pub ticket: Ticket,
    pub result: Result<Reply, CallFailure>,
}

/// Run one dispatch to completion. Never panics and never retries.
pub async fn execute(client: &GatewayClient, session: &Session, dispatch: Dispatch) -> Outcome {
    let Dispatch {
        page,
        target,
        ticket,
        call,
    } = dispatch;
    let name = call.name();

    let result = match call {
        GatewayCall::Search(request) => client
            .search(session, &request)
            .await
            .map(Reply::Search)
            .map_err(CallFailure::from),
        GatewayCall::CreateIndex => ack(client.create_index(session).await),
        GatewayCall::DeleteIndex => ack(client.delete_index(session).await),
        GatewayCall::VectorizeIndex => ack(client.vectorize_index(session).await),
        GatewayCall::DeleteVectorIndex => ack(client.delete_vector_index(session).await),
        GatewayCall::Upload(form) => upload_product(client, session, &form)
            .await
            .map(|_| Reply::Uploaded),
    };

    match &result {
        Ok(_) => info!(page = page.title(), call = name, ticket = ticket.value(), "call succeeded"),
        Err(failure) => warn!(
            page = page.title(),
            call = name,
            ticket = ticket.value(),
            failure = ?failure,
            "call failed"
        ),
    }

    Outcome {
        page,
        target,
        ticket,
        result,
    }
}

fn ack(result: Result<AckEnvelope, ApiClientError>) -> Result<Reply, CallFailure> {
    result.map(Reply::Ack).map_err(CallFailure::from)
}

/// Presigned URL, storage upload, then the catalog document.
async fn upload_product(
    client: &GatewayClient,
    session: &Session,
    form: &ProductForm,
) -> Result<(), CallFailure> {
    let local = |e: searchlab_core::UploadError| CallFailure::Transport(e.to_string());

    let presign = form.presigned_request().map_err(local)?;
    let path = form.file().map_err(local)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CallFailure::Transport(format!("failed to read {}: {}", path.display(), e)))?;

    let upload = client.presigned_url(session, &presign).await?;
    let document = form.to_document(&upload).map_err(local)?;
    client
        .upload_to_presigned(&upload, &presign.filename, &presign.content_type, bytes)
        .await?;

    let ack = client
        .index_custom_document(session, std::slice::from_ref(&document))
        .await?;
    if ack.is_success() {
        Ok(())
    } else {
        Err(CallFailure::Transport(
            ack.error_message
                .unwrap_or_else(|| "document was not indexed".to_string()),
        ))
    }
}
