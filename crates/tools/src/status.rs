use std::time::Instant;

use serde::Serialize;
use voxgate_config::StatusConfig;

/// Number of feature endpoints advertised by the status payload
pub const FEATURE_COUNT: usize = 5;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: bool,
    pub creator: String,
    pub result: StatusResult,
}

#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub status: &'static str,
    pub totalrequest: u64,
    pub totalfitur: usize,
    pub runtime: String,
    pub domain: String,
}

impl StatusResponse {
    pub fn new(config: &StatusConfig, started: Instant) -> Self {
        Self {
            status: true,
            creator: config.creator.clone(),
            result: StatusResult {
                status: "Ready",
                totalrequest: 0,
                totalfitur: FEATURE_COUNT,
                runtime: format!("{}s", started.elapsed().as_secs()),
                domain: config.domain.clone(),
            },
        }
    }
}
