//! Query-string construction for the filtered CLOB endpoints.
//!
//! Values are appended verbatim: ids, addresses, and cursors are already
//! URL-safe on this API.

use crate::types::{
    BalanceAllowanceParams, DropNotificationParams, OpenOrderParams, OrderScoringParams,
    OrdersScoringParams, TradeParams,
};

/// Cursor of the first page of a paginated listing
pub const INITIAL_CURSOR: &str = "MA==";

/// Cursor returned once the last page has been read
pub const END_CURSOR: &str = "LTE=";

/// Append `param=val`, directly after a trailing `?` or joined with `&`
pub fn build_query_params(url: &str, param: &str, val: &str) -> String {
    if url.ends_with('?') {
        format!("{}{}={}", url, param, val)
    } else {
        format!("{}&{}={}", url, param, val)
    }
}

pub fn add_query_trade_params(
    base_url: &str,
    params: Option<&TradeParams>,
    next_cursor: &str,
) -> String {
    match params {
        Some(params) => with_cursor(base_url, params.to_query_params(), next_cursor),
        None => base_url.to_string(),
    }
}

pub fn add_query_open_orders_params(
    base_url: &str,
    params: Option<&OpenOrderParams>,
    next_cursor: &str,
) -> String {
    match params {
        Some(params) => with_cursor(base_url, params.to_query_params(), next_cursor),
        None => base_url.to_string(),
    }
}

pub fn drop_notifications_query_params(
    base_url: &str,
    params: Option<&DropNotificationParams>,
) -> String {
    match params {
        Some(params) => append_all(base_url, params.to_query_params()),
        None => base_url.to_string(),
    }
}

pub fn add_balance_allowance_params_to_url(
    base_url: &str,
    params: Option<&BalanceAllowanceParams>,
) -> String {
    match params {
        Some(params) => append_all(base_url, params.to_query_params()),
        None => base_url.to_string(),
    }
}

pub fn add_order_scoring_params_to_url(
    base_url: &str,
    params: Option<&OrderScoringParams>,
) -> String {
    match params {
        Some(params) => append_all(base_url, params.to_query_params()),
        None => base_url.to_string(),
    }
}

pub fn add_orders_scoring_params_to_url(
    base_url: &str,
    params: Option<&OrdersScoringParams>,
) -> String {
    match params {
        Some(params) => append_all(base_url, params.to_query_params()),
        None => base_url.to_string(),
    }
}

fn with_cursor(
    base_url: &str,
    mut params: Vec<(&'static str, String)>,
    next_cursor: &str,
) -> String {
    if !next_cursor.is_empty() {
        params.push(("next_cursor", next_cursor.to_string()));
    }
    append_all(base_url, params)
}

/// Start a query string and append every pair in order
fn append_all(base_url: &str, params: Vec<(&'static str, String)>) -> String {
    let start = format!("{}?", base_url);
    params
        .iter()
        .fold(start, |url, (key, value)| build_query_params(&url, key, value))
}
