use super::{AssetType, ConditionId, OrderId, TokenId};

/// Filters for `/data/trades`
#[derive(Debug, Clone, Default)]
pub struct TradeParams {
    pub id: Option<String>,
    pub maker_address: Option<String>,
    pub market: Option<ConditionId>,
    pub asset_id: Option<TokenId>,
    /// Unix timestamp (seconds); `0` means unbounded and is not sent
    pub before: Option<u64>,
    /// Unix timestamp (seconds); `0` means unbounded and is not sent
    pub after: Option<u64>,
}

impl TradeParams {
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_str(&mut params, "market", self.market.as_ref().map(|m| m.as_str()));
        push_str(&mut params, "asset_id", self.asset_id.as_ref().map(|a| a.as_str()));
        if let Some(after) = self.after.filter(|&t| t != 0) {
            params.push(("after", after.to_string()));
        }
        if let Some(before) = self.before.filter(|&t| t != 0) {
            params.push(("before", before.to_string()));
        }
        push_str(&mut params, "maker_address", self.maker_address.as_deref());
        push_str(&mut params, "id", self.id.as_deref());
        params
    }
}

/// Filters for `/data/orders`
#[derive(Debug, Clone, Default)]
pub struct OpenOrderParams {
    pub id: Option<OrderId>,
    pub market: Option<ConditionId>,
    pub asset_id: Option<TokenId>,
}

impl OpenOrderParams {
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_str(&mut params, "market", self.market.as_ref().map(|m| m.as_str()));
        push_str(&mut params, "asset_id", self.asset_id.as_ref().map(|a| a.as_str()));
        push_str(&mut params, "id", self.id.as_ref().map(|id| id.as_str()));
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct DropNotificationParams {
    pub ids: Vec<String>,
}

impl DropNotificationParams {
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        joined("ids", &self.ids)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BalanceAllowanceParams {
    pub asset_type: Option<AssetType>,
    pub token_id: Option<TokenId>,
    /// Sent whenever present, including `0` (EOA)
    pub signature_type: Option<u8>,
}

impl BalanceAllowanceParams {
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(asset_type) = self.asset_type {
            params.push(("asset_type", asset_type.to_string()));
        }
        push_str(&mut params, "token_id", self.token_id.as_ref().map(|t| t.as_str()));
        if let Some(signature_type) = self.signature_type {
            params.push(("signature_type", signature_type.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderScoringParams {
    pub order_id: Option<OrderId>,
}

impl OrderScoringParams {
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_str(&mut params, "order_id", self.order_id.as_ref().map(|id| id.as_str()));
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrdersScoringParams {
    pub order_ids: Vec<OrderId>,
}

impl OrdersScoringParams {
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let ids: Vec<&str> = self.order_ids.iter().map(|id| id.as_str()).collect();
        joined("order_ids", &ids)
    }
}

/// Empty strings are treated as absent
fn push_str(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

fn joined<S: AsRef<str>>(key: &'static str, values: &[S]) -> Vec<(&'static str, String)> {
    if values.is_empty() {
        return Vec::new();
    }
    let value = values.iter().map(|v| v.as_ref()).collect::<Vec<_>>().join(",");
    vec![(key, value)]
}
