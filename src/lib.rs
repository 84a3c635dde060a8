#![allow(async_fn_in_trait)]
pub mod acquisition;
pub mod aoi;
pub mod catalog;
pub mod error;
pub mod job_config;
pub mod logging;
pub mod pairing;
pub mod query;
pub mod report;
pub mod scene;
pub mod search;
pub mod search_parameters;
pub mod up42;
