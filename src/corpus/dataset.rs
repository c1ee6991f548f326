//! @ai:module:intent Built-in reference corpus and sample selection
//! @ai:module:layer domain
//! @ai:module:public_api builtin_corpus, reliable, scams, curated_sample, random_sample
//! @ai:module:stateless true

use crate::corpus::token::TokenSample;
use rand::seq::SliceRandom;

struct SeedToken {
    address: &'static str,
    name: &'static str,
    symbol: &'static str,
    created: &'static str,
    holders: u64,
    mentions: u64,
    smart_buys: u64,
    liquidity: f64,
    change_24h: f64,
    market_cap: Option<f64>,
    is_scam: bool,
}

const SEED: &[SeedToken] = &[
    SeedToken {
        address: "0x6982508145454ce325ddbe47a25d4ec3d2311933",
        name: "Pepe",
        symbol: "PEPE",
        created: "2023-04-14",
        holders: 144_500,
        mentions: 47_800,
        smart_buys: 230,
        liquidity: 12_500_000.0,
        change_24h: 5.2,
        market_cap: Some(485_000_000.0),
        is_scam: false,
    },
    SeedToken {
        address: "0x761d38e5ddf6ccf6cf7c55759d5210750b5d60f3",
        name: "Dogecoin",
        symbol: "DOGE",
        created: "2013-12-06",
        holders: 4_850_000,
        mentions: 125_000,
        smart_buys: 1_240,
        liquidity: 240_000_000.0,
        change_24h: -2.1,
        market_cap: Some(10_500_000_000.0),
        is_scam: false,
    },
    SeedToken {
        address: "0xba2ae424d960c26247dd6c32edc70b295c744c43",
        name: "Shiba Inu",
        symbol: "SHIB",
        created: "2020-08-01",
        holders: 1_240_000,
        mentions: 89_000,
        smart_buys: 450,
        liquidity: 98_000_000.0,
        change_24h: 1.8,
        market_cap: Some(7_200_000_000.0),
        is_scam: false,
    },
    SeedToken {
        address: "0x2b591e99afe9f32eaa6214f7b7629768c40eeb39",
        name: "HEX",
        symbol: "HEX",
        created: "2019-12-02",
        holders: 240_000,
        mentions: 12_000,
        smart_buys: 10,
        liquidity: 2_500_000.0,
        change_24h: -5.4,
        market_cap: Some(6_800_000_000.0),
        is_scam: true,
    },
    SeedToken {
        address: "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce",
        name: "SAFE MOON",
        symbol: "SAFEMOON",
        created: "2021-03-08",
        holders: 2_900_000,
        mentions: 75_000,
        smart_buys: 5,
        liquidity: 1_800_000.0,
        change_24h: -12.4,
        market_cap: Some(280_000_000.0),
        is_scam: true,
    },
    // Inflated social activity, abnormal 24h pump
    SeedToken {
        address: "0xf4d2888d29d722226fafa5d9b24f9164c092421e",
        name: "ScamToken",
        symbol: "SCAM",
        created: "2023-06-12",
        holders: 250,
        mentions: 12_000,
        smart_buys: 3,
        liquidity: 12_000.0,
        change_24h: 145.8,
        market_cap: None,
        is_scam: true,
    },
    SeedToken {
        address: "0x74232704659ef37d08ce21d9c958917eb3ea2844",
        name: "MoonPump",
        symbol: "MPUMP",
        created: "2023-01-05",
        holders: 580,
        mentions: 35_000,
        smart_buys: 2,
        liquidity: 45_000.0,
        change_24h: 87.3,
        market_cap: None,
        is_scam: true,
    },
    SeedToken {
        address: "0xd78c475133731cd54dadcb430f7aa9f5a09af998",
        name: "Floki Inu",
        symbol: "FLOKI",
        created: "2021-06-28",
        holders: 450_000,
        mentions: 42_000,
        smart_buys: 180,
        liquidity: 28_000_000.0,
        change_24h: 3.1,
        market_cap: Some(1_200_000_000.0),
        is_scam: false,
    },
    SeedToken {
        address: "0x4a080377f83d669d7bb83b3184a8a5e61b500608",
        name: "Wojak",
        symbol: "WOJAK",
        created: "2022-11-14",
        holders: 15_800,
        mentions: 8_900,
        smart_buys: 25,
        liquidity: 1_200_000.0,
        change_24h: 0.8,
        market_cap: Some(35_000_000.0),
        is_scam: false,
    },
    SeedToken {
        address: "0x8e3bcc334657560253b83f08331d85267316e08a",
        name: "ButtCoin",
        symbol: "BUTT",
        created: "2022-04-01",
        holders: 7_800,
        mentions: 5_600,
        smart_buys: 8,
        liquidity: 450_000.0,
        change_24h: -2.3,
        market_cap: Some(12_000_000.0),
        is_scam: false,
    },
];

impl From<&SeedToken> for TokenSample {
    fn from(seed: &SeedToken) -> Self {
        TokenSample {
            token_address: seed.address.to_string(),
            name: seed.name.to_string(),
            symbol: seed.symbol.to_string(),
            creation_date: Some(seed.created.to_string()),
            holder_count: seed.holders,
            twitter_mentions: seed.mentions,
            smart_money_buys: seed.smart_buys,
            liquidity: seed.liquidity,
            price_change_24h: seed.change_24h,
            market_cap: seed.market_cap,
            is_scam: seed.is_scam,
        }
    }
}

/// @ai:intent Historical tokens with verified scam labels
/// @ai:effects pure
pub fn builtin_corpus() -> Vec<TokenSample> {
    SEED.iter().map(TokenSample::from).collect()
}

/// @ai:intent Tokens verified as reliable, in corpus order
/// @ai:effects pure
pub fn reliable(corpus: &[TokenSample]) -> Vec<TokenSample> {
    corpus.iter().filter(|t| !t.is_scam).cloned().collect()
}

/// @ai:intent Tokens verified as scams, in corpus order
/// @ai:effects pure
pub fn scams(corpus: &[TokenSample]) -> Vec<TokenSample> {
    corpus.iter().filter(|t| t.is_scam).cloned().collect()
}

/// @ai:intent Class-balanced sample: first N reliable followed by first M scam tokens
/// @ai:effects pure
pub fn curated_sample(corpus: &[TokenSample], reliable_count: usize, scam_count: usize) -> Vec<TokenSample> {
    let mut sample: Vec<TokenSample> = reliable(corpus).into_iter().take(reliable_count).collect();
    sample.extend(scams(corpus).into_iter().take(scam_count));
    sample
}

/// @ai:intent Random subset of at most `count` tokens
/// @ai:effects random
pub fn random_sample(corpus: &[TokenSample], count: usize) -> Vec<TokenSample> {
    let mut shuffled = corpus.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled.truncate(count.min(corpus.len()));
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_corpus_is_labeled_both_ways() {
        let corpus = builtin_corpus();
        assert_eq!(corpus.len(), 10);
        assert_eq!(reliable(&corpus).len(), 6);
        assert_eq!(scams(&corpus).len(), 4);
    }

    #[test]
    fn test_curated_sample_orders_reliable_first() {
        let corpus = builtin_corpus();
        let sample = curated_sample(&corpus, 3, 2);

        let symbols: Vec<_> = sample.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["PEPE", "DOGE", "SHIB", "HEX", "SAFEMOON"]);
    }

    #[test]
    fn test_curated_sample_caps_at_available() {
        let corpus = builtin_corpus();
        let sample = curated_sample(&corpus, 100, 100);
        assert_eq!(sample.len(), corpus.len());
    }

    #[test]
    fn test_random_sample_size() {
        let corpus = builtin_corpus();
        assert_eq!(random_sample(&corpus, 4).len(), 4);
        assert_eq!(random_sample(&corpus, 50).len(), 10);
        assert!(random_sample(&[], 3).is_empty());
    }

    #[test]
    fn test_random_sample_has_no_duplicates() {
        let corpus = builtin_corpus();
        let mut addresses: Vec<_> = random_sample(&corpus, 10)
            .into_iter()
            .map(|t| t.token_address)
            .collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), 10);
    }
}
