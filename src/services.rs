// src/services.rs

pub mod access_group_options;
pub mod access_point_service;
pub mod account_service;
pub mod location_service;
pub mod member_actions;
pub mod organization_service;
pub mod preferences;
pub mod scan_data;
pub mod table_view;
pub mod tags;

pub use access_point_service::AccessPointService;
pub use account_service::AccountService;
pub use location_service::LocationService;
pub use organization_service::OrganizationService;
pub use preferences::PreferenceStore;
