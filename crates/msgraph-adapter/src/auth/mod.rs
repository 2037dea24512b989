/*
[INPUT]:  Static tokens or Entra ID application credentials
[OUTPUT]: Bearer access tokens for Graph requests
[POS]:    Auth layer - token acquisition and caching
[UPDATE]: When auth flows or token storage change
*/

pub mod client_credentials;
pub mod token;

pub use client_credentials::{ClientCredentialsProvider, DEFAULT_AUTHORITY, GRAPH_DEFAULT_SCOPE, TokenResponse};
pub use token::{AccessTokenProvider, StaticTokenProvider, TokenCache, TokenData};
