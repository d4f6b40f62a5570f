mod config;
mod credential_store;
mod dispatcher;
mod error;
mod helpers;
mod relay;
mod storage;
