//! @ai:module:intent Prompt rendering for token reliability classification
//! @ai:module:layer application
//! @ai:module:public_api SYSTEM_PROMPT, build_prompt
//! @ai:module:stateless true

use crate::corpus::ClassificationRequest;

pub const SYSTEM_PROMPT: &str = "You are a crypto meme token analyst focused on fast \
reliability assessment of newly launched tokens. You answer with strict JSON only.";

/// @ai:intent Render the user prompt for one classification request
/// @ai:effects pure
pub fn build_prompt(request: &ClassificationRequest) -> String {
    format!(
        "Assess the reliability of the following meme token.\n\n\
         Token address: {}\n\
         Name: {}\n\
         Symbol: {}\n\
         Holder count: {}\n\
         Twitter mentions: {}\n\
         Smart money buys: {}\n\
         Liquidity (USD): {}\n\
         24h price change (%): {}\n\n\
         Focus on risk indicators and abnormal patterns. Respond ONLY with a JSON object \
         with these fields:\n\
         - token_address: the token address\n\
         - name: the token name\n\
         - reliability_score: number from 0 to 1, higher is more reliable\n\
         - recommendation: one of \"strong_buy\", \"buy\", \"neutral\", \"avoid\", \"strong_avoid\"\n\
         - risk_factors: array of strings\n\
         - positive_factors: array of strings\n\
         - confidence: your confidence in this assessment, from 0 to 1",
        request.token_address,
        request.name,
        request.symbol,
        request.holder_count,
        request.twitter_mentions,
        request.smart_money_buys,
        request.liquidity,
        request.price_change_24h,
    )
}
