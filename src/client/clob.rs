use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::request::{
    add_balance_allowance_params_to_url, add_order_scoring_params_to_url,
    add_orders_scoring_params_to_url, add_query_open_orders_params, add_query_trade_params,
    drop_notifications_query_params,
};
use crate::types::{
    BalanceAllowanceParams, DropNotificationParams, OpenOrderParams, OrderId, OrderScoringParams,
    OrdersScoringParams, TokenId, TradeParams,
};

/// Client for the CLOB REST API
///
/// Responses are returned as raw JSON. Endpoints that need L2 authentication
/// take the signed headers from the caller; this client never holds keys.
#[derive(Debug, Clone)]
pub struct ClobClient {
    http_client: HttpClient,
}

impl ClobClient {
    /// Create a ClobClient on top of an existing transport
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Build the transport from settings and wrap it
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::new(config)?))
    }

    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Check if the server is responsive
    pub async fn get_ok(&self) -> Result<Value> {
        self.http_client.get("/", None).await
    }

    /// Get current server time
    pub async fn get_server_time(&self) -> Result<Value> {
        self.http_client.get("/time", None).await
    }

    /// Get the minimum tick size for a token
    ///
    /// Feed the `minimum_tick_size` field to
    /// [`RoundConfig::for_tick_size`](crate::orders::RoundConfig::for_tick_size).
    pub async fn get_tick_size(&self, token_id: &TokenId) -> Result<Value> {
        let path = format!("/tick-size?token_id={}", token_id.as_str());
        self.http_client.get(&path, None).await
    }

    /// Get open orders (L2 authentication required)
    ///
    /// # Arguments
    /// * `params` - Optional filters
    /// * `next_cursor` - Page cursor, [`INITIAL_CURSOR`](crate::request::INITIAL_CURSOR)
    ///   for the first page
    /// * `headers` - L2 authentication headers
    pub async fn get_open_orders(
        &self,
        params: Option<&OpenOrderParams>,
        next_cursor: &str,
        headers: HeaderMap,
    ) -> Result<Value> {
        let path = add_query_open_orders_params("/data/orders", params, next_cursor);
        self.http_client.get(&path, Some(headers)).await
    }

    /// Get trade history (L2 authentication required)
    pub async fn get_trades(
        &self,
        params: Option<&TradeParams>,
        next_cursor: &str,
        headers: HeaderMap,
    ) -> Result<Value> {
        let path = add_query_trade_params("/data/trades", params, next_cursor);
        self.http_client.get(&path, Some(headers)).await
    }

    /// Get balance and allowance information (L2 authentication required)
    pub async fn get_balance_allowance(
        &self,
        params: Option<&BalanceAllowanceParams>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let path = add_balance_allowance_params_to_url("/balance-allowance", params);
        self.http_client.get(&path, Some(headers)).await
    }

    /// Drop (delete) notifications (L2 authentication required)
    pub async fn drop_notifications(
        &self,
        params: Option<&DropNotificationParams>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let path = drop_notifications_query_params("/notifications", params);
        self.http_client.delete(&path, Some(headers)).await
    }

    /// Check if an order is scoring
    pub async fn is_order_scoring(
        &self,
        params: Option<&OrderScoringParams>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let path = add_order_scoring_params_to_url("/order-scoring", params);
        self.http_client.get(&path, Some(headers)).await
    }

    /// Check if multiple orders are scoring
    pub async fn are_orders_scoring(
        &self,
        params: Option<&OrdersScoringParams>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let path = add_orders_scoring_params_to_url("/orders-scoring", params);
        self.http_client.get(&path, Some(headers)).await
    }

    /// Cancel a specific order
    pub async fn cancel(&self, order_id: &OrderId, headers: HeaderMap) -> Result<Value> {
        let body = serde_json::json!({ "orderID": order_id.as_str() });
        self.http_client
            .delete_with_body("/order", &body, Some(headers))
            .await
    }

    /// Cancel all orders
    pub async fn cancel_all(&self, headers: HeaderMap) -> Result<Value> {
        self.http_client.delete("/cancel-all", Some(headers)).await
    }
}
