// src/handlers/dashboard/admin.rs
// DOCUMENTATION: Admin dashboard
// PURPOSE: Tables and actions for every managed resource plus CMS content

use crate::errors::PortalError;
use crate::handlers::dashboard::{count_query, total};
use crate::handlers::session::{current_href, DashboardSession};
use crate::models::{
    conversion_rate, visible_faq, CampaignRequest, CreateAgentRequest, FaqRequest,
    InfluencerRequest, KycUpdateRequest, RejectSubmissionRequest, ShortLinkRequest,
    StatusUpdateRequest, UpdateAgentRequest, UpdateClientRequest, UpdateFooterSettingsRequest,
    UpdateSiteSettingsRequest,
};
use crate::services::{
    AgentService, ApiQuery, CampaignService, ClientService, InfluencerService, PartnerService,
    PropertyService, SettingsService, ShortLinkService, SubmissionService,
};
use crate::state::AppState;
use crate::views::{profiles, to_api_query, ListParams};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use validator::Validate;

type Filters = web::Query<HashMap<String, String>>;

// Overview

/// Headline counters; a counter whose request failed is null
#[derive(Debug, Serialize)]
pub struct OverviewStats {
    pub agents: Option<i64>,
    pub clients: Option<i64>,
    pub properties: Option<i64>,
    pub campaigns: Option<i64>,
    pub marketers: Option<i64>,
    pub pending_submissions: Option<i64>,
    pub pending_kyc: Option<i64>,
}

/// GET /dashboard/admin
/// All counters are fetched concurrently from the list endpoints
pub async fn overview(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let any = count_query(&[]);
    let pending = count_query(&[("status", "pending")]);
    let pending_kyc = count_query(&[("kyc_status", "pending")]);

    let (agents, clients, properties, campaigns, marketers, submissions, kyc) = futures::join!(
        AgentService::list(&api, &any),
        ClientService::list(&api, &any),
        PropertyService::list(&api, &any),
        CampaignService::list(&api, &any),
        PartnerService::list_marketers(&api, &any),
        SubmissionService::list(&api, &pending),
        AgentService::list(&api, &pending_kyc),
    );

    let stats = OverviewStats {
        agents: total("agents", agents),
        clients: total("clients", clients),
        properties: total("properties", properties),
        campaigns: total("campaigns", campaigns),
        marketers: total("marketers", marketers),
        pending_submissions: total("submissions", submissions),
        pending_kyc: total("kyc", kyc),
    };

    let body = json!({ "user": dash.user(), "stats": stats });
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

// Agents

pub async fn list_agents(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(&ListParams::from(filters.into_inner()), &profiles::AGENTS);

    let list = state
        .in_flight
        .run(
            dash.fetch_key("agents"),
            AgentService::list(&api, &query),
            &current_href(&req),
            |a| a.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn get_agent(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let agent = AgentService::get(&dash.api(&state), path.into_inner()).await?;
    let body = json!({ "agent": agent, "row": agent.to_row() });
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

pub async fn create_agent(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: web::Json<CreateAgentRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let agent = AgentService::create(&dash.api(&state), &req).await?;
    Ok(dash
        .finish(&state, HttpResponse::Created().json(agent.to_row()))
        .await)
}

pub async fn update_agent(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<UpdateAgentRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let agent = AgentService::update(&dash.api(&state), path.into_inner(), &req).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(agent.to_row())).await)
}

pub async fn delete_agent(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    AgentService::delete(&dash.api(&state), path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::NoContent().finish()).await)
}

/// PATCH /dashboard/admin/agents/{id}/kyc
pub async fn update_agent_kyc(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<KycUpdateRequest>,
) -> Result<HttpResponse, PortalError> {
    let agent = AgentService::set_kyc_status(&dash.api(&state), path.into_inner(), &req).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(agent.to_row())).await)
}

/// PATCH /dashboard/admin/agents/{id}/status
/// Flips active and inactive
pub async fn toggle_agent_status(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let agent = AgentService::toggle_status(&dash.api(&state), path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(agent.to_row())).await)
}

// Clients

pub async fn list_clients(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(&ListParams::from(filters.into_inner()), &profiles::CLIENTS);

    let list = state
        .in_flight
        .run(
            dash.fetch_key("clients"),
            ClientService::list(&api, &query),
            &current_href(&req),
            |c| c.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn get_client(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let client = ClientService::get(&dash.api(&state), path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(client.to_row())).await)
}

pub async fn update_client(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<UpdateClientRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let client = ClientService::update(&dash.api(&state), path.into_inner(), &req).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(client.to_row())).await)
}

pub async fn set_client_status(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, PortalError> {
    let client =
        ClientService::set_status(&dash.api(&state), path.into_inner(), &req.status).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(client.to_row())).await)
}

// Campaigns

pub async fn list_campaigns(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(&ListParams::from(filters.into_inner()), &profiles::CAMPAIGNS);

    let list = state
        .in_flight
        .run(
            dash.fetch_key("campaigns"),
            CampaignService::list(&api, &query),
            &current_href(&req),
            |c| c.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn create_campaign(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: web::Json<CampaignRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let campaign = CampaignService::create(&dash.api(&state), &req).await?;
    Ok(dash
        .finish(&state, HttpResponse::Created().json(campaign.to_row()))
        .await)
}

pub async fn update_campaign(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<CampaignRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let campaign = CampaignService::update(&dash.api(&state), path.into_inner(), &req).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(campaign.to_row()))
        .await)
}

pub async fn delete_campaign(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    CampaignService::delete(&dash.api(&state), path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::NoContent().finish()).await)
}

pub async fn publish_campaign(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let id = path.into_inner();
    let api = dash.api(&state);
    CampaignService::publish(&api, id).await?;
    let campaign = CampaignService::get(&api, id).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(campaign.to_row()))
        .await)
}

// Influencers

pub async fn list_influencers(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(
        &ListParams::from(filters.into_inner()),
        &profiles::INFLUENCERS,
    );

    let list = state
        .in_flight
        .run(
            dash.fetch_key("influencers"),
            InfluencerService::list(&api, &query),
            &current_href(&req),
            |i| i.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn create_influencer(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: web::Json<InfluencerRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let influencer = InfluencerService::create(&dash.api(&state), &req).await?;
    Ok(dash
        .finish(&state, HttpResponse::Created().json(influencer.to_row()))
        .await)
}

pub async fn get_influencer(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let influencer = InfluencerService::get(&dash.api(&state), path.into_inner()).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(influencer.to_row()))
        .await)
}

pub async fn update_influencer(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<InfluencerRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let influencer =
        InfluencerService::update(&dash.api(&state), path.into_inner(), &req).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(influencer.to_row()))
        .await)
}

pub async fn delete_influencer(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    InfluencerService::delete(&dash.api(&state), path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::NoContent().finish()).await)
}

// Marketers and partners

pub async fn list_marketers(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(&ListParams::from(filters.into_inner()), &profiles::MARKETERS);

    let list = state
        .in_flight
        .run(
            dash.fetch_key("marketers"),
            PartnerService::list_marketers(&api, &query),
            &current_href(&req),
            |m| m.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn approve_marketer(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let id = path.into_inner();
    let api = dash.api(&state);
    PartnerService::approve(&api, id).await?;
    let marketer = PartnerService::get_marketer(&api, id).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(marketer.to_row()))
        .await)
}

pub async fn set_marketer_status(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, PortalError> {
    let marketer =
        PartnerService::set_status(&dash.api(&state), path.into_inner(), &req.status).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(marketer.to_row()))
        .await)
}

pub async fn list_partners(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(&ListParams::from(filters.into_inner()), &profiles::PARTNERS);

    let list = state
        .in_flight
        .run(
            dash.fetch_key("partners"),
            PartnerService::list_partners(&api, &query),
            &current_href(&req),
            |p| p.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

/// GET /dashboard/admin/partners/{id}/stats?from=&to=
pub async fn partner_stats(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let params = ListParams::from(filters.into_inner());
    let mut query = ApiQuery::new();
    if let Some(from) = params.date("from") {
        query.push((profiles::PARTNERS.date_from_key.to_string(), from.to_string()));
    }
    if let Some(to) = params.date("to") {
        query.push((profiles::PARTNERS.date_to_key.to_string(), to.to_string()));
    }

    let stats = PartnerService::partner_stats(&dash.api(&state), path.into_inner(), &query).await?;
    let body = json!({
        "conversion_rate": conversion_rate(stats.conversions, stats.unique_visitors),
        "stats": stats,
    });
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

// Short links

pub async fn list_short_links(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(
        &ListParams::from(filters.into_inner()),
        &profiles::SHORT_LINKS,
    );
    let base = &state.config.short_link_base_url;

    let list = state
        .in_flight
        .run(
            dash.fetch_key("short_links"),
            ShortLinkService::list(&api, &query),
            &current_href(&req),
            |s| s.to_row(base),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn create_short_link(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: web::Json<ShortLinkRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let link = ShortLinkService::create(&dash.api(&state), &req).await?;
    let row = link.to_row(&state.config.short_link_base_url);
    Ok(dash.finish(&state, HttpResponse::Created().json(row)).await)
}

pub async fn update_short_link(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<ShortLinkRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let link = ShortLinkService::update(&dash.api(&state), path.into_inner(), &req).await?;
    let row = link.to_row(&state.config.short_link_base_url);
    Ok(dash.finish(&state, HttpResponse::Ok().json(row)).await)
}

pub async fn delete_short_link(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    ShortLinkService::delete(&dash.api(&state), path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::NoContent().finish()).await)
}

// Listing requests

pub async fn list_submissions(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: HttpRequest,
    filters: Filters,
) -> Result<HttpResponse, PortalError> {
    let api = dash.api(&state);
    let query = to_api_query(
        &ListParams::from(filters.into_inner()),
        &profiles::SUBMISSIONS,
    );

    let list = state
        .in_flight
        .run(
            dash.fetch_key("submissions"),
            SubmissionService::list(&api, &query),
            &current_href(&req),
            |s| s.to_row(),
        )
        .await;
    Ok(dash.finish(&state, HttpResponse::Ok().json(list)).await)
}

pub async fn approve_submission(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    let id = path.into_inner();
    let api = dash.api(&state);
    SubmissionService::approve(&api, id).await?;
    let submission = SubmissionService::get(&api, id).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(submission.to_row()))
        .await)
}

pub async fn reject_submission(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<RejectSubmissionRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let id = path.into_inner();
    let api = dash.api(&state);
    SubmissionService::reject(&api, id, &req).await?;
    let submission = SubmissionService::get(&api, id).await?;
    Ok(dash
        .finish(&state, HttpResponse::Ok().json(submission.to_row()))
        .await)
}

// CMS

pub async fn site_settings(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let site = SettingsService::site(&dash.api(&state), &state.content).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(site)).await)
}

pub async fn update_site_settings(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: web::Json<UpdateSiteSettingsRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let site = SettingsService::update_site(&dash.api(&state), &state.content, &req).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(site)).await)
}

pub async fn footer_settings(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let footer = SettingsService::footer(&dash.api(&state), &state.content).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(footer)).await)
}

pub async fn update_footer_settings(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: web::Json<UpdateFooterSettingsRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let footer = SettingsService::update_footer(&dash.api(&state), &state.content, &req).await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(footer)).await)
}

/// GET /dashboard/admin/faq
/// Inactive entries included; the public page filters them
pub async fn list_faq(
    state: web::Data<AppState>,
    dash: DashboardSession,
) -> Result<HttpResponse, PortalError> {
    let mut entries = SettingsService::faq(&dash.api(&state), &state.content).await?;
    entries.sort_by_key(|f| (f.sort_order, f.id));
    let visible = visible_faq(entries.clone()).len();

    let body = json!({ "entries": entries, "visible": visible });
    Ok(dash.finish(&state, HttpResponse::Ok().json(body)).await)
}

pub async fn create_faq(
    state: web::Data<AppState>,
    dash: DashboardSession,
    req: web::Json<FaqRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let faq = SettingsService::create_faq(&dash.api(&state), &state.content, &req).await?;
    Ok(dash.finish(&state, HttpResponse::Created().json(faq)).await)
}

pub async fn update_faq(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
    req: web::Json<FaqRequest>,
) -> Result<HttpResponse, PortalError> {
    req.validate()?;
    let faq =
        SettingsService::update_faq(&dash.api(&state), &state.content, path.into_inner(), &req)
            .await?;
    Ok(dash.finish(&state, HttpResponse::Ok().json(faq)).await)
}

pub async fn delete_faq(
    state: web::Data<AppState>,
    dash: DashboardSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, PortalError> {
    SettingsService::delete_faq(&dash.api(&state), &state.content, path.into_inner()).await?;
    Ok(dash.finish(&state, HttpResponse::NoContent().finish()).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("", web::get().to(overview))
            .route("/agents", web::get().to(list_agents))
            .route("/agents", web::post().to(create_agent))
            .route("/agents/{id}", web::get().to(get_agent))
            .route("/agents/{id}", web::patch().to(update_agent))
            .route("/agents/{id}", web::delete().to(delete_agent))
            .route("/agents/{id}/kyc", web::patch().to(update_agent_kyc))
            .route("/agents/{id}/status", web::patch().to(toggle_agent_status))
            .route("/clients", web::get().to(list_clients))
            .route("/clients/{id}", web::get().to(get_client))
            .route("/clients/{id}", web::patch().to(update_client))
            .route("/clients/{id}/status", web::patch().to(set_client_status))
            .route("/campaigns", web::get().to(list_campaigns))
            .route("/campaigns", web::post().to(create_campaign))
            .route("/campaigns/{id}", web::patch().to(update_campaign))
            .route("/campaigns/{id}", web::delete().to(delete_campaign))
            .route("/campaigns/{id}/publish", web::post().to(publish_campaign))
            .route("/influencers", web::get().to(list_influencers))
            .route("/influencers", web::post().to(create_influencer))
            .route("/influencers/{id}", web::get().to(get_influencer))
            .route("/influencers/{id}", web::patch().to(update_influencer))
            .route("/influencers/{id}", web::delete().to(delete_influencer))
            .route("/marketers", web::get().to(list_marketers))
            .route("/marketers/{id}/approve", web::post().to(approve_marketer))
            .route("/marketers/{id}/status", web::patch().to(set_marketer_status))
            .route("/partners", web::get().to(list_partners))
            .route("/partners/{id}/stats", web::get().to(partner_stats))
            .route("/short-links", web::get().to(list_short_links))
            .route("/short-links", web::post().to(create_short_link))
            .route("/short-links/{id}", web::patch().to(update_short_link))
            .route("/short-links/{id}", web::delete().to(delete_short_link))
            .route("/submissions", web::get().to(list_submissions))
            .route("/submissions/{id}/approve", web::post().to(approve_submission))
            .route("/submissions/{id}/reject", web::post().to(reject_submission))
            .route("/settings/site", web::get().to(site_settings))
            .route("/settings/site", web::patch().to(update_site_settings))
            .route("/settings/footer", web::get().to(footer_settings))
            .route("/settings/footer", web::patch().to(update_footer_settings))
            .route("/faq", web::get().to(list_faq))
            .route("/faq", web::post().to(create_faq))
            .route("/faq/{id}", web::patch().to(update_faq))
            .route("/faq/{id}", web::delete().to(delete_faq)),
    );
}
