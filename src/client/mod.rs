mod clob;

pub use clob::ClobClient;
