//! @ai:module:intent Labeled token records and the request view sent to the oracle
//! @ai:module:layer domain
//! @ai:module:public_api TokenSample, ClassificationRequest
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent A meme token from the reference corpus with its verified outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSample {
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub creation_date: Option<String>,
    pub holder_count: u64,
    pub twitter_mentions: u64,
    pub smart_money_buys: u64,
    /// Liquidity in USD
    pub liquidity: f64,
    /// 24h price change in percent
    pub price_change_24h: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Historically verified ground truth
    pub is_scam: bool,
}

impl TokenSample {
    /// @ai:intent Ground-truth label: true when the token is reliable
    /// @ai:effects pure
    pub fn actual_label(&self) -> bool {
        !self.is_scam
    }

    /// @ai:intent Project the features the oracle is allowed to see
    ///            The scam label is never part of the request
    /// @ai:effects pure
    pub fn to_request(&self) -> ClassificationRequest {
        ClassificationRequest {
            token_address: self.token_address.clone(),
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            holder_count: self.holder_count,
            twitter_mentions: self.twitter_mentions,
            smart_money_buys: self.smart_money_buys,
            liquidity: self.liquidity,
            price_change_24h: self.price_change_24h,
        }
    }

    /// @ai:intent Human label used in reports and logs
    /// @ai:effects pure
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// @ai:intent Features sent to the classification oracle for one call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRequest {
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    pub holder_count: u64,
    pub twitter_mentions: u64,
    pub smart_money_buys: u64,
    pub liquidity: f64,
    pub price_change_24h: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(is_scam: bool) -> TokenSample {
        TokenSample {
            token_address: "0xabc".to_string(),
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            creation_date: None,
            holder_count: 500,
            twitter_mentions: 300,
            smart_money_buys: 10,
            liquidity: 100_000.0,
            price_change_24h: 5.2,
            market_cap: Some(1_000_000.0),
            is_scam,
        }
    }

    #[test]
    fn test_actual_label_inverts_scam_flag() {
        assert!(sample(false).actual_label());
        assert!(!sample(true).actual_label());
    }

    #[test]
    fn test_request_carries_features() {
        let request = sample(true).to_request();
        assert_eq!(request.token_address, "0xabc");
        assert_eq!(request.holder_count, 500);
        assert!((request.price_change_24h - 5.2).abs() < f64::EPSILON);

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("is_scam"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(sample(false).display_name(), "Test (TST)");
    }
}
