//! Campaign publishing: pushes a campaign's ad sets and variants to their
//! delivery platforms through the connected accounts.
//!
//! Publishing is per-ad-set: one platform rejection fails that ad set's
//! outcome and the rest continue, so a campaign split across Meta and
//! TikTok can go live on one platform while the other is being fixed.
//! Remote objects are created `PAUSED`; going live on spend is a deliberate
//! step taken in the platform's own tooling.

use adops_core::error::CoreError;
use adops_core::events;
use adops_core::provider::Provider;
use adops_core::status;
use adops_core::types::DbId;
use adops_db::models::ad_set::AdSet;
use adops_db::models::ad_variant::AdVariant;
use adops_db::models::campaign::Campaign;
use adops_db::repositories::{AdSetRepo, AdVariantRepo, AssetRepo, CampaignRepo};
use adops_events::PlatformEvent;
use serde::Serialize;
use serde_json::json;
use ts_rs::TS;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::tokens;

/// Per-ad-set outcome statuses in a publish report.
pub mod outcome {
    pub const PUBLISHED: &str = "published";
    pub const SKIPPED: &str = "skipped";
    pub const FAILED: &str = "failed";
}

/// What happened to one ad set during a publish.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct PublishOutcome {
    pub ad_set_id: DbId,
    pub ad_set_name: String,
    pub platform: String,
    /// `published`, `skipped`, or `failed`.
    pub status: String,
    /// Remote id the platform assigned (the ad set on Meta, the campaign
    /// on TikTok).
    pub remote_id: Option<String>,
    /// Platform rejection message when `status` is `failed`.
    pub error: Option<String>,
    /// Ads created for this ad set's variants (Meta only).
    pub variants_published: i32,
}

/// The full result of a publish call, one entry per ad set.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct PublishReport {
    pub campaign_id: DbId,
    pub outcomes: Vec<PublishOutcome>,
}

struct PushResult {
    remote_id: String,
    variants_published: i32,
    /// False when every remote object already existed.
    newly_published: bool,
}

/// Publish every ad set of `campaign_id`, returning per-ad-set outcomes.
///
/// The campaign transitions to `active` and `campaign.published` goes out
/// once at least one ad set publishes. Re-running is safe: remote ids
/// recorded on earlier runs are reused, not recreated.
pub async fn publish_campaign(state: &AppState, campaign_id: DbId) -> AppResult<PublishReport> {
    let mut campaign = CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    if campaign.status == status::campaign::ARCHIVED {
        return Err(AppError::Core(CoreError::Validation(
            "Archived campaigns cannot be published".to_string(),
        )));
    }

    let ad_sets = AdSetRepo::list_by_campaign(&state.pool, campaign.id).await?;
    if ad_sets.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Campaign has no ad sets to publish".to_string(),
        )));
    }

    let mut outcomes = Vec::with_capacity(ad_sets.len());
    for ad_set in &ad_sets {
        outcomes.push(publish_ad_set(state, &mut campaign, ad_set).await?);
    }

    let published = count_status(&outcomes, outcome::PUBLISHED);
    let failed = count_status(&outcomes, outcome::FAILED);
    let skipped = outcomes.len() as i64 - published - failed;

    if published > 0 {
        CampaignRepo::set_status(&state.pool, campaign.id, status::campaign::ACTIVE).await?;
        state.event_bus.publish(
            PlatformEvent::new(events::CAMPAIGN_PUBLISHED)
                .with_source("campaign", campaign.id)
                .with_payload(json!({
                    "name": campaign.name,
                    "published": published,
                    "failed": failed,
                    "skipped": skipped,
                })),
        );
    }
    tracing::info!(
        campaign_id = campaign.id,
        published,
        failed,
        skipped,
        "Publish finished"
    );

    Ok(PublishReport {
        campaign_id: campaign.id,
        outcomes,
    })
}

/// Push one ad set. Platform and precondition errors land in the outcome
/// row; database errors abort the whole publish.
async fn publish_ad_set(
    state: &AppState,
    campaign: &mut Campaign,
    ad_set: &AdSet,
) -> AppResult<PublishOutcome> {
    let result = match ad_set.platform.as_str() {
        "meta_ads" => publish_to_meta(state, campaign, ad_set).await,
        "tiktok_ads" => publish_to_tiktok(state, campaign, ad_set).await,
        other => Err(AppError::Core(CoreError::Validation(format!(
            "Unknown delivery platform: {other}"
        )))),
    };

    let mut outcome = PublishOutcome {
        ad_set_id: ad_set.id,
        ad_set_name: ad_set.name.clone(),
        platform: ad_set.platform.clone(),
        status: outcome::FAILED.to_string(),
        remote_id: ad_set.remote_id.clone(),
        error: None,
        variants_published: 0,
    };

    match result {
        Ok(push) => {
            outcome.status = if push.newly_published {
                outcome::PUBLISHED.to_string()
            } else {
                outcome::SKIPPED.to_string()
            };
            outcome.remote_id = Some(push.remote_id);
            outcome.variants_published = push.variants_published;
        }
        Err(AppError::Database(err)) => return Err(AppError::Database(err)),
        Err(err) => {
            tracing::warn!(ad_set_id = ad_set.id, error = %err, "Ad set publish failed");
            outcome.error = Some(err.to_string());
        }
    }

    Ok(outcome)
}

/// Meta: remote campaign, then the ad set, then one ad per variant.
async fn publish_to_meta(
    state: &AppState,
    campaign: &mut Campaign,
    ad_set: &AdSet,
) -> AppResult<PushResult> {
    let (integration, token) = tokens::valid_access_token(state, Provider::MetaAds).await?;
    let client = &state.connectors.meta_ads;
    let account_id = integration.account_id.as_str();

    let campaign_remote = match remote_campaign_id(campaign, Provider::MetaAds) {
        Some(id) => id,
        None => {
            let created = client
                .create_campaign(
                    &token,
                    account_id,
                    &campaign.name,
                    meta_objective(&campaign.objective),
                    campaign.budget_cents,
                )
                .await?;
            record_remote_campaign(state, campaign, Provider::MetaAds, &created.id).await?;
            created.id
        }
    };

    let mut newly_published = false;
    let remote_ad_set_id = match &ad_set.remote_id {
        Some(id) => id.clone(),
        None => {
            let created = client
                .create_ad_set(
                    &token,
                    account_id,
                    &campaign_remote,
                    &ad_set.name,
                    meta_optimization_goal(&campaign.objective),
                    ad_set.budget_cents,
                    &meta_targeting(&ad_set.audience),
                )
                .await?;
            AdSetRepo::set_remote_id(&state.pool, ad_set.id, &created.id).await?;
            newly_published = true;
            created.id
        }
    };

    // Variants without a remote id get their ad created now. Reruns pick
    // up variants added after the ad set first went live.
    let mut variants_published = 0;
    for variant in AdVariantRepo::list_by_ad_set(&state.pool, ad_set.id).await? {
        if variant.remote_id.is_some() {
            continue;
        }
        let creative = meta_creative(state, &variant).await?;
        let created = client
            .create_ad(&token, account_id, &remote_ad_set_id, &variant.name, &creative)
            .await?;
        AdVariantRepo::set_remote_id(&state.pool, variant.id, &created.id).await?;
        variants_published += 1;
    }
    if variants_published > 0 {
        newly_published = true;
    }

    Ok(PushResult {
        remote_id: remote_ad_set_id,
        variants_published,
        newly_published,
    })
}

/// TikTok: the integration stops at campaign creation, so an ad set is
/// live once its remote campaign exists; its remote id records the
/// TikTok campaign id.
async fn publish_to_tiktok(
    state: &AppState,
    campaign: &mut Campaign,
    ad_set: &AdSet,
) -> AppResult<PushResult> {
    let (integration, token) = tokens::valid_access_token(state, Provider::TiktokAds).await?;
    let client = &state.connectors.tiktok_ads;

    let mut newly_published = false;
    let campaign_remote = match remote_campaign_id(campaign, Provider::TiktokAds) {
        Some(id) => id,
        None => {
            let created = client
                .create_campaign(
                    &token,
                    &integration.account_id,
                    &campaign.name,
                    tiktok_objective(&campaign.objective),
                    campaign.budget_cents.map(cents_to_units),
                )
                .await?;
            record_remote_campaign(state, campaign, Provider::TiktokAds, &created.campaign_id)
                .await?;
            newly_published = true;
            created.campaign_id
        }
    };

    if ad_set.remote_id.is_none() {
        AdSetRepo::set_remote_id(&state.pool, ad_set.id, &campaign_remote).await?;
        newly_published = true;
    }

    Ok(PushResult {
        remote_id: campaign_remote,
        variants_published: 0,
        newly_published,
    })
}

/// Remote id this campaign already has on `provider`, if any.
fn remote_campaign_id(campaign: &Campaign, provider: Provider) -> Option<String> {
    campaign
        .remote_ids
        .get(provider.as_str())
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}

/// Persist a newly assigned remote campaign id and mirror it into the
/// in-memory row so later ad sets in the same publish reuse it.
async fn record_remote_campaign(
    state: &AppState,
    campaign: &mut Campaign,
    provider: Provider,
    remote_id: &str,
) -> AppResult<()> {
    CampaignRepo::merge_remote_id(&state.pool, campaign.id, provider.as_str(), remote_id).await?;
    if let Some(map) = campaign.remote_ids.as_object_mut() {
        map.insert(provider.as_str().to_string(), json!(remote_id));
    }
    Ok(())
}

/// Link-ad creative spec for a variant. The referenced asset's image URL
/// rides along when the variant has one.
async fn meta_creative(state: &AppState, variant: &AdVariant) -> AppResult<serde_json::Value> {
    let mut link_data = serde_json::Map::new();
    link_data.insert(
        "name".to_string(),
        json!(variant.headline.clone().unwrap_or_else(|| variant.name.clone())),
    );
    if let Some(text) = &variant.primary_text {
        link_data.insert("message".to_string(), json!(text));
    }
    if let Some(url) = &variant.landing_url {
        link_data.insert("link".to_string(), json!(url));
    }
    if let Some(cta) = &variant.call_to_action {
        link_data.insert("call_to_action".to_string(), json!({ "type": meta_cta(cta) }));
    }
    if let Some(asset_id) = variant.asset_id {
        if let Some(asset) = AssetRepo::find_by_id(&state.pool, asset_id).await? {
            if let Some(url) = asset.thumbnail_url.or(asset.web_view_url) {
                link_data.insert("picture".to_string(), json!(url));
            }
        }
    }

    Ok(json!({
        "name": variant.name,
        "object_story_spec": { "link_data": link_data },
    }))
}

/// Meta rejects ad sets without targeting; an empty audience falls back
/// to a broad US geo.
fn meta_targeting(audience: &serde_json::Value) -> serde_json::Value {
    match audience.as_object() {
        Some(map) if !map.is_empty() => audience.clone(),
        _ => json!({ "geo_locations": { "countries": ["US"] } }),
    }
}

/// Normalize a stored call-to-action label (`"Learn More"`) to Meta's
/// enum form (`LEARN_MORE`).
fn meta_cta(cta: &str) -> String {
    cta.trim().to_uppercase().replace(' ', "_")
}

/// Map our objective onto Meta's outcome-based campaign objectives.
fn meta_objective(objective: &str) -> &'static str {
    match objective {
        status::objective::AWARENESS => "OUTCOME_AWARENESS",
        status::objective::CONVERSIONS => "OUTCOME_SALES",
        status::objective::ENGAGEMENT => "OUTCOME_ENGAGEMENT",
        _ => "OUTCOME_TRAFFIC",
    }
}

/// Optimization goal paired with each objective on Meta ad sets.
fn meta_optimization_goal(objective: &str) -> &'static str {
    match objective {
        status::objective::AWARENESS => "REACH",
        status::objective::CONVERSIONS => "OFFSITE_CONVERSIONS",
        status::objective::ENGAGEMENT => "POST_ENGAGEMENT",
        _ => "LINK_CLICKS",
    }
}

/// Map our objective onto TikTok's campaign objective types.
fn tiktok_objective(objective: &str) -> &'static str {
    match objective {
        status::objective::AWARENESS => "REACH",
        status::objective::CONVERSIONS => "WEB_CONVERSIONS",
        status::objective::ENGAGEMENT => "COMMUNITY_INTERACTION",
        _ => "TRAFFIC",
    }
}

/// Budgets are stored in cents; TikTok takes whole currency units.
fn cents_to_units(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn count_status(outcomes: &[PublishOutcome], status: &str) -> i64 {
    outcomes.iter().filter(|o| o.status == status).count() as i64
}
