// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod agent_service;
pub mod api_client;
pub mod appointment_service;
pub mod auth_service;
pub mod cache;
pub mod campaign_service;
pub mod client_service;
pub mod content_cache;
pub mod favorite_service;
pub mod influencer_service;
pub mod master_data_service;
pub mod notification_service;
pub mod partner_service;
pub mod property_service;
pub mod role_guard;
pub mod session;
pub mod settings_service;
pub mod short_link_service;
pub mod submission_service;
pub mod tracking_service;

pub use agent_service::AgentService;
pub use api_client::{ApiClient, ApiQuery};
pub use appointment_service::AppointmentService;
pub use auth_service::AuthService;
pub use cache::start_cleanup_task;
pub use campaign_service::CampaignService;
pub use client_service::ClientService;
pub use content_cache::ContentCache;
pub use favorite_service::FavoriteService;
pub use influencer_service::InfluencerService;
pub use master_data_service::MasterDataService;
pub use notification_service::NotificationService;
pub use partner_service::PartnerService;
pub use property_service::PropertyService;
pub use session::{BrowserState, SessionStore};
pub use settings_service::SettingsService;
pub use short_link_service::ShortLinkService;
pub use submission_service::SubmissionService;
pub use tracking_service::TrackingService;
