mod company;
mod credentials;
mod data_mode;
mod query_result;
