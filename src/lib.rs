// Clima Agora backend - forecast aggregation behind a credential-hiding proxy
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
