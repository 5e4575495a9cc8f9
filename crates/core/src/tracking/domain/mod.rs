pub mod region_tracker;
pub mod tracked_region;
pub mod tracker_config;
pub mod ttl_region_tracker;
