//! @ai:module:intent Typed schema and validation for oracle responses
//! @ai:module:layer domain
//! @ai:module:public_api TokenAnalysis, Recommendation, parse_analysis
//! @ai:module:stateless true

use crate::error::OracleError;
use serde::{Deserialize, Serialize};

/// @ai:intent Five-level investment recommendation returned by the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    #[serde(alias = "strong buy", alias = "Strong Buy", alias = "strongly recommend")]
    StrongBuy,
    #[serde(alias = "Buy", alias = "recommend")]
    Buy,
    #[serde(alias = "Neutral")]
    Neutral,
    #[serde(alias = "Avoid", alias = "not recommended")]
    Avoid,
    #[serde(alias = "strong avoid", alias = "Strong Avoid", alias = "strongly avoid")]
    StrongAvoid,
}

impl Recommendation {
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "strong_buy",
            Recommendation::Buy => "buy",
            Recommendation::Neutral => "neutral",
            Recommendation::Avoid => "avoid",
            Recommendation::StrongAvoid => "strong_avoid",
        }
    }

    /// @ai:intent Map a reliability score onto the five levels
    /// @ai:effects pure
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.8 => Recommendation::StrongBuy,
            s if s > 0.6 => Recommendation::Buy,
            s if s > 0.4 => Recommendation::Neutral,
            s if s > 0.2 => Recommendation::Avoid,
            _ => Recommendation::StrongAvoid,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Reliability assessment of one token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAnalysis {
    #[serde(alias = "tokenAddress")]
    pub token_address: String,
    pub name: String,
    /// 0-1, higher is more reliable
    #[serde(alias = "reliabilityScore")]
    pub reliability_score: f64,
    pub recommendation: Recommendation,
    #[serde(default, alias = "riskFactors")]
    pub risk_factors: Vec<String>,
    #[serde(default, alias = "positiveFactors")]
    pub positive_factors: Vec<String>,
    /// Oracle's confidence in its own assessment, 0-1
    pub confidence: f64,
}

impl TokenAnalysis {
    /// @ai:intent Enforce the numeric ranges of the schema
    /// @ai:effects pure
    pub fn validate(&self) -> Result<(), OracleError> {
        check_unit_interval("reliability_score", self.reliability_score)?;
        check_unit_interval("confidence", self.confidence)?;
        Ok(())
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), OracleError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(OracleError::InvalidField {
            field,
            reason: format!("{} is outside [0, 1]", value),
        })
    }
}

/// @ai:intent Extract JSON object from response that may contain extra text or code fences
/// @ai:effects pure
fn extract_json(response: &str) -> Result<&str, OracleError> {
    let start = response
        .find('{')
        .ok_or_else(|| OracleError::MalformedResponse("no JSON object found in response".to_string()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| OracleError::MalformedResponse("no JSON object end found in response".to_string()))?;

    if end <= start {
        return Err(OracleError::MalformedResponse(
            "invalid JSON structure in response".to_string(),
        ));
    }

    Ok(&response[start..=end])
}

/// @ai:intent Parse and validate raw model output into a TokenAnalysis
/// @ai:effects pure
pub fn parse_analysis(response: &str) -> Result<TokenAnalysis, OracleError> {
    let json = extract_json(response)?;
    let analysis: TokenAnalysis =
        serde_json::from_str(json).map_err(|e| OracleError::MalformedResponse(e.to_string()))?;
    analysis.validate()?;
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VALID: &str = r#"{
        "token_address": "0x123456789",
        "name": "Test Coin",
        "reliability_score": 0.7,
        "recommendation": "neutral",
        "risk_factors": ["low liquidity", "quiet community"],
        "positive_factors": ["clear utility"],
        "confidence": 0.8
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let analysis = parse_analysis(VALID).unwrap();
        assert_eq!(analysis.reliability_score, 0.7);
        assert_eq!(analysis.recommendation, Recommendation::Neutral);
        assert_eq!(analysis.risk_factors, vec!["low liquidity", "quiet community"]);
        assert_eq!(analysis.positive_factors, vec!["clear utility"]);
    }

    #[test]
    fn test_parse_fenced_camel_case_response() {
        let response = r#"Here is the analysis:
```json
{"tokenAddress": "0x1", "name": "X", "reliabilityScore": 0.2,
 "recommendation": "Strong Avoid", "riskFactors": ["fake hype"], "confidence": 0.9}
```"#;
        let analysis = parse_analysis(response).unwrap();
        assert_eq!(analysis.token_address, "0x1");
        assert_eq!(analysis.recommendation, Recommendation::StrongAvoid);
        assert!(analysis.positive_factors.is_empty());
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_analysis("I cannot help with that.").unwrap_err();
        assert!(matches!(err, OracleError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = parse_analysis(r#"{"name": "X", "reliability_score": 0.5}"#).unwrap_err();
        assert!(matches!(err, OracleError::MalformedResponse(_)));
    }

    #[test]
    fn test_unknown_recommendation_is_malformed() {
        let response = VALID.replace("\"neutral\"", "\"moon\"");
        assert!(matches!(
            parse_analysis(&response),
            Err(OracleError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let response = VALID.replace("0.7", "1.4");
        let err = parse_analysis(&response).unwrap_err();
        assert_eq!(
            err,
            OracleError::InvalidField {
                field: "reliability_score",
                reason: "1.4 is outside [0, 1]".to_string(),
            }
        );
    }

    #[test]
    fn test_recommendation_from_score() {
        assert_eq!(Recommendation::from_score(0.95), Recommendation::StrongBuy);
        assert_eq!(Recommendation::from_score(0.65), Recommendation::Buy);
        assert_eq!(Recommendation::from_score(0.5), Recommendation::Neutral);
        assert_eq!(Recommendation::from_score(0.3), Recommendation::Avoid);
        assert_eq!(Recommendation::from_score(0.0), Recommendation::StrongAvoid);
    }
}
