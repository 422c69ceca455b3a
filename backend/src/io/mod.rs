//! Edges of the service: the upstream content-API client and the REST
//! interface exposed to the dashboard.

pub mod cms;
pub mod rest;
