//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! The wire types here are deliberate mirrors of the core domain structs so
//! the `virasat_core` crate stays free of web and schema concerns.

use crate::adapters::ocr::PIPELINE_STAGES;
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;
use virasat_core::domain::{
    Category, Contribution, DocumentPreset, HeritageItem, MediaType, MintedRecord,
    NewContribution, OcrExtraction, VerifiedRecord,
};
use virasat_core::ledger::LedgerError;
use virasat_core::ports::{CatalogFilter, PortError};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_items_handler,
        get_item_handler,
        list_categories_handler,
        list_presets_handler,
        analyze_preset_handler,
        verify_item_handler,
        mint_item_handler,
        get_provenance_handler,
        submit_contribution_handler,
        list_contributions_handler,
    ),
    components(
        schemas(
            ItemSummary,
            ItemDetail,
            CategoryResponse,
            PresetResponse,
            AnalysisResponse,
            ExtractionResponse,
            VerifyRequest,
            VerifiedResponse,
            MintRequest,
            NftResponse,
            ProvenanceResponse,
            ContributionRequest,
            ContributionResponse,
        )
    ),
    tags(
        (name = "Virasat API", description = "API endpoints for the heritage documentation demo.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A catalog item as listed by the explore endpoint, with its current
/// preservation status attached.
#[derive(Serialize, ToSchema)]
pub struct ItemSummary {
    id: String,
    title: String,
    description: String,
    category: String,
    region: String,
    language: String,
    media_type: String,
    tags: Vec<String>,
    thumbnail: String,
    contributor: String,
    date: String,
    verified: bool,
    minted: bool,
}

impl ItemSummary {
    fn from_item(item: HeritageItem, verified: bool, minted: bool) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            category: item.category,
            region: item.region,
            language: item.language,
            media_type: item.media_type.as_str().to_string(),
            tags: item.tags,
            thumbnail: item.thumbnail,
            contributor: item.contributor,
            date: item.date,
            verified,
            minted,
        }
    }
}

/// The full detail view for one catalog item: the item itself, its canned AI
/// material, and any preservation records.
#[derive(Serialize, ToSchema)]
pub struct ItemDetail {
    item: ItemSummary,
    insights: Vec<String>,
    transcript: Option<String>,
    nft: Option<NftResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    slug: String,
    title: String,
    description: String,
    item_count: usize,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            slug: c.slug,
            title: c.title,
            description: c.description,
            item_count: c.item_count,
        }
    }
}

/// A demo document offered for analysis, with its preservation status so a
/// client can badge already-processed documents.
#[derive(Serialize, ToSchema)]
pub struct PresetResponse {
    key: String,
    label: String,
    description: String,
    verified: bool,
    minted: bool,
}

/// The outcome of a (simulated) OCR run.
#[derive(Serialize, ToSchema)]
pub struct AnalysisResponse {
    /// The pipeline stages that "ran", in order.
    pipeline: Vec<String>,
    extraction: ExtractionResponse,
}

#[derive(Serialize, ToSchema)]
pub struct ExtractionResponse {
    title: String,
    text: String,
    language: String,
    confidence: f64,
    tags: Vec<String>,
    category: String,
    region: String,
}

impl From<OcrExtraction> for ExtractionResponse {
    fn from(e: OcrExtraction) -> Self {
        Self {
            title: e.title,
            text: e.text,
            language: e.language,
            confidence: e.confidence,
            tags: e.tags,
            category: e.category,
            region: e.region,
        }
    }
}

/// The payload for marking an item's extracted content as verified.
#[derive(Deserialize, ToSchema)]
pub struct VerifyRequest {
    pub title: String,
    pub extracted_text: String,
    pub language: String,
    pub tags: Vec<String>,
    pub confidence: f64,
}

#[derive(Serialize, ToSchema)]
pub struct VerifiedResponse {
    item_id: String,
    title: String,
    extracted_text: String,
    language: String,
    tags: Vec<String>,
    confidence: f64,
    verified_at: DateTime<Utc>,
}

impl From<VerifiedRecord> for VerifiedResponse {
    fn from(r: VerifiedRecord) -> Self {
        Self {
            item_id: r.item_id,
            title: r.title,
            extracted_text: r.extracted_text,
            language: r.language,
            tags: r.tags,
            confidence: r.confidence,
            verified_at: r.verified_at,
        }
    }
}

/// The payload for minting a demo NFT.
#[derive(Deserialize, ToSchema)]
pub struct MintRequest {
    pub owner: String,
}

#[derive(Serialize, ToSchema)]
pub struct NftResponse {
    item_id: String,
    nft_id: String,
    owner: String,
    blockchain: String,
    minted_at: DateTime<Utc>,
    tx_hash: String,
}

impl From<MintedRecord> for NftResponse {
    fn from(r: MintedRecord) -> Self {
        Self {
            item_id: r.item_id,
            nft_id: r.nft_id,
            owner: r.owner,
            blockchain: r.blockchain,
            minted_at: r.minted_at,
            tx_hash: r.tx_hash,
        }
    }
}

/// Both preservation records for an item id, either of which may be absent.
#[derive(Serialize, ToSchema)]
pub struct ProvenanceResponse {
    verified: Option<VerifiedResponse>,
    minted: Option<NftResponse>,
}

#[derive(Deserialize, ToSchema)]
pub struct ContributionRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub region: String,
    pub language: String,
    /// One of `audio`, `video`, `text`, `image`.
    #[schema(value_type = String)]
    pub media_type: MediaType,
    pub contributor: String,
}

#[derive(Serialize, ToSchema)]
pub struct ContributionResponse {
    id: Uuid,
    title: String,
    description: String,
    category: String,
    region: String,
    language: String,
    media_type: String,
    contributor: String,
    submitted_at: DateTime<Utc>,
}

impl From<Contribution> for ContributionResponse {
    fn from(c: Contribution) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            category: c.category,
            region: c.region,
            language: c.language,
            media_type: c.media_type.as_str().to_string(),
            contributor: c.contributor,
            submitted_at: c.submitted_at,
        }
    }
}

/// Query parameters accepted by the item listing endpoint.
#[derive(Deserialize, IntoParams)]
pub struct ListItemsQuery {
    /// Free-text search over titles and tags.
    q: Option<String>,
    /// Category slug, e.g. `oral-traditions`.
    category: Option<String>,
    language: Option<String>,
    /// Media type: `audio`, `video`, `text`, or `image`.
    #[serde(rename = "type")]
    media_type: Option<String>,
}

//=========================================================================================
// Error Mapping Helpers
//=========================================================================================

type HandlerError = (StatusCode, String);

fn port_error(e: PortError) -> HandlerError {
    match e {
        PortError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
        PortError::InvalidInput(why) => (StatusCode::BAD_REQUEST, why),
        PortError::Unexpected(why) => {
            error!("Unexpected port error: {}", why);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
        }
    }
}

fn ledger_error(e: LedgerError) -> HandlerError {
    match e {
        LedgerError::EmptyItemId => (StatusCode::BAD_REQUEST, e.to_string()),
        LedgerError::NotVerified(_) => (StatusCode::CONFLICT, e.to_string()),
    }
}

/// Locks the shared ledger, translating a poisoned lock into a 500 rather
/// than panicking in the handler.
fn lock_ledger(
    state: &AppState,
) -> Result<std::sync::MutexGuard<'_, virasat_core::ledger::PreservationLedger>, HandlerError> {
    state.ledger.lock().map_err(|_| {
        error!("Ledger mutex poisoned");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error".to_string(),
        )
    })
}

//=========================================================================================
// Catalog Handlers
//=========================================================================================

/// List heritage items, optionally filtered.
#[utoipa::path(
    get,
    path = "/items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Matching catalog items", body = [ItemSummary]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_items_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ListItemsQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let filter = CatalogFilter {
        query: query.q,
        category: query.category,
        language: query.language,
        media_type: query.media_type,
    };
    let items = app_state
        .catalog
        .list_items(&filter)
        .await
        .map_err(port_error)?;

    let ledger = lock_ledger(&app_state)?;
    let summaries: Vec<ItemSummary> = items
        .into_iter()
        .map(|item| {
            let verified = ledger.is_verified(&item.id);
            let minted = ledger.is_minted(&item.id);
            ItemSummary::from_item(item, verified, minted)
        })
        .collect();
    Ok(Json(summaries))
}

/// Fetch one heritage item with its AI material and preservation status.
#[utoipa::path(
    get,
    path = "/items/{id}",
    responses(
        (status = 200, description = "The item detail", body = ItemDetail),
        (status = 404, description = "No such item"),
    ),
    params(
        ("id" = String, Path, description = "The catalog item id.")
    )
)]
pub async fn get_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let item = app_state.catalog.get_item(&id).await.map_err(port_error)?;
    let insights = app_state
        .analysis
        .insights(&id)
        .await
        .map_err(port_error)?;
    let transcript = app_state
        .analysis
        .transcript(&id)
        .await
        .map_err(port_error)?;

    let ledger = lock_ledger(&app_state)?;
    let verified = ledger.is_verified(&id);
    let minted = ledger.is_minted(&id);
    let nft = ledger.get_minted(&id).cloned().map(NftResponse::from);

    Ok(Json(ItemDetail {
        item: ItemSummary::from_item(item, verified, minted),
        insights,
        transcript,
        nft,
    }))
}

/// List the heritage categories with their item counts.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryResponse])
    )
)]
pub async fn list_categories_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let categories = app_state
        .catalog
        .list_categories()
        .await
        .map_err(port_error)?;
    Ok(Json(
        categories
            .into_iter()
            .map(CategoryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

//=========================================================================================
// Analysis Handlers
//=========================================================================================

/// List the demo documents available for OCR analysis.
#[utoipa::path(
    get,
    path = "/presets",
    responses(
        (status = 200, description = "The demo documents", body = [PresetResponse])
    )
)]
pub async fn list_presets_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let presets = app_state
        .analysis
        .list_presets()
        .await
        .map_err(port_error)?;

    let ledger = lock_ledger(&app_state)?;
    let response: Vec<PresetResponse> = presets
        .into_iter()
        .map(|DocumentPreset { key, label, description }| PresetResponse {
            verified: ledger.is_verified(&key),
            minted: ledger.is_minted(&key),
            key,
            label,
            description,
        })
        .collect();
    Ok(Json(response))
}

/// Run the (simulated) OCR pipeline over a preset document.
///
/// The handler sleeps for the configured analysis delay to imitate a real
/// pipeline, then returns the canned extraction for the preset.
#[utoipa::path(
    post,
    path = "/presets/{key}/analyze",
    responses(
        (status = 200, description = "Analysis complete", body = AnalysisResponse),
        (status = 404, description = "Unknown preset document"),
    ),
    params(
        ("key" = String, Path, description = "The preset document key.")
    )
)]
pub async fn analyze_preset_handler(
    State(app_state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    info!(preset = %key, "Starting document analysis");
    let extraction = app_state
        .analysis
        .analyze(&key)
        .await
        .map_err(port_error)?;
    info!(preset = %key, language = %extraction.language, "Analysis complete");

    Ok(Json(AnalysisResponse {
        pipeline: PIPELINE_STAGES.iter().map(|s| s.to_string()).collect(),
        extraction: extraction.into(),
    }))
}

//=========================================================================================
// Ledger Handlers
//=========================================================================================

/// Mark an item's extracted content as verified.
///
/// The ledger does not require the id to exist in the catalog; preset
/// document keys are valid targets too. Re-verifying overwrites the prior
/// record.
#[utoipa::path(
    post,
    path = "/items/{id}/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "The stored verification record", body = VerifiedResponse),
        (status = 400, description = "Empty item id"),
    ),
    params(
        ("id" = String, Path, description = "The item or preset id to verify.")
    )
)]
pub async fn verify_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<VerifyRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let record = VerifiedRecord {
        item_id: id.clone(),
        title: payload.title,
        extracted_text: payload.extracted_text,
        language: payload.language,
        tags: payload.tags,
        confidence: payload.confidence,
        verified_at: Utc::now(),
    };

    let mut ledger = lock_ledger(&app_state)?;
    ledger.verify(record.clone()).map_err(ledger_error)?;
    info!(item = %id, confidence = record.confidence, "Item verified");
    Ok(Json(VerifiedResponse::from(record)))
}

/// Mint a demo NFT for an item.
///
/// Under the `require_verified` policy this answers 409 until the item has
/// been verified. Minting again issues a fresh id and hash and overwrites
/// the previous record.
#[utoipa::path(
    post,
    path = "/items/{id}/mint",
    request_body = MintRequest,
    responses(
        (status = 201, description = "The freshly minted record", body = NftResponse),
        (status = 400, description = "Empty item id"),
        (status = 409, description = "Item not verified under the current policy"),
    ),
    params(
        ("id" = String, Path, description = "The item or preset id to mint.")
    )
)]
pub async fn mint_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<MintRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let mut ledger = lock_ledger(&app_state)?;
    let record = ledger.mint(&id, &payload.owner).map_err(ledger_error)?;
    info!(item = %id, nft = %record.nft_id, "Demo NFT minted");
    Ok((StatusCode::CREATED, Json(NftResponse::from(record))))
}

/// Fetch the preservation records for an item. Absent records are `null`,
/// never an error.
#[utoipa::path(
    get,
    path = "/items/{id}/provenance",
    responses(
        (status = 200, description = "The item's preservation records", body = ProvenanceResponse),
    ),
    params(
        ("id" = String, Path, description = "The item or preset id.")
    )
)]
pub async fn get_provenance_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let ledger = lock_ledger(&app_state)?;
    Ok(Json(ProvenanceResponse {
        verified: ledger.get_verified(&id).cloned().map(VerifiedResponse::from),
        minted: ledger.get_minted(&id).cloned().map(NftResponse::from),
    }))
}

//=========================================================================================
// Contribution Handlers
//=========================================================================================

/// Submit a community heritage contribution for review.
#[utoipa::path(
    post,
    path = "/contributions",
    request_body = ContributionRequest,
    responses(
        (status = 201, description = "Contribution accepted", body = ContributionResponse),
        (status = 400, description = "Missing required fields"),
    )
)]
pub async fn submit_contribution_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ContributionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let submission = NewContribution {
        title: payload.title,
        description: payload.description,
        category: payload.category,
        region: payload.region,
        language: payload.language,
        media_type: payload.media_type,
        contributor: payload.contributor,
    };
    let contribution = app_state
        .contributions
        .submit(submission)
        .await
        .map_err(port_error)?;
    info!(id = %contribution.id, "Contribution received");
    Ok((
        StatusCode::CREATED,
        Json(ContributionResponse::from(contribution)),
    ))
}

/// List the pending contributions.
#[utoipa::path(
    get,
    path = "/contributions",
    responses(
        (status = 200, description = "All pending contributions", body = [ContributionResponse])
    )
)]
pub async fn list_contributions_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let contributions = app_state
        .contributions
        .list()
        .await
        .map_err(port_error)?;
    Ok(Json(
        contributions
            .into_iter()
            .map(ContributionResponse::from)
            .collect::<Vec<_>>(),
    ))
}
