// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod agent;
pub mod appointment;
pub mod campaign;
pub mod common;
pub mod favorite;
pub mod influencer;
pub mod master_data;
pub mod notification;
pub mod partner;
pub mod property;
pub mod settings;
pub mod short_link;
pub mod submission;
pub mod tracking;
pub mod user;

pub use agent::*;
pub use appointment::*;
pub use campaign::*;
pub use common::*;
pub use favorite::*;
pub use influencer::*;
pub use master_data::*;
pub use notification::*;
pub use partner::*;
pub use property::*;
pub use settings::*;
pub use short_link::*;
pub use submission::*;
pub use tracking::*;
pub use user::*;
