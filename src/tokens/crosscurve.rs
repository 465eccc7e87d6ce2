//! Tokens routed by the CrossCurve bridge.

use alloy::primitives::{address, Address};

/// CrossCurve unified router (v2), deployed at the same address on every chain.
pub const UNIFIED_ROUTER_V2: Address = address!("A2A786ff9148f7C88EE93372Db8CBe9e94585c74");

/// (chain, ticker, contract, decimals)
pub(crate) const CROSSCURVE_TOKENS: &[(&str, &str, Address, u8)] = &[
    ("ethereum", "USDC", address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"), 6),
    ("ethereum", "USDT", address!("dac17f958d2ee523a2206206994597c13d831ec7"), 6),
    ("ethereum", "DAI", address!("6b175474e89094c44da98b954eedeac495271d0f"), 18),
    ("arbitrum", "USDC.e", address!("ff970a61a04b1ca14834a43f5de4533ebddb5cc8"), 6),
    ("arbitrum", "USDT", address!("fd086bc7cd5c481dcc9c85ebe478a1c0b69fcbb9"), 6),
    // Same contract as optimism DAI; kept as published by the router.
    ("optimism", "USDC.e", address!("da10009cbd5d07dd0cecc66161fc93d7c9000da1"), 18),
    ("optimism", "USDT", address!("94b008aa00579c1307b0ef2c499ad98a8ce58e58"), 6),
    ("optimism", "DAI", address!("da10009cbd5d07dd0cecc66161fc93d7c9000da1"), 18),
    ("avalanche", "DAI.e", address!("d586e7f844cea2f87f50152665bcbc2c279d8d70"), 18),
    ("avalanche", "USDC.e", address!("a7d7079b0fead91f3e65f86e8915cb59c1a4c664"), 6),
    ("avalanche", "USDT.e", address!("c7198437980c041c805a1edcba50c1ce5db95118"), 6),
    ("avalanche", "avDAI", address!("47afa96cdc9fab46904a55a6ad4bf6660b53c38a"), 18),
    ("avalanche", "avUSDC", address!("46a51127c3ce23fb7ab1de06226147f446e4a857"), 6),
    ("avalanche", "avUSDT", address!("532e6537fea298397212f09a61e03311686f548e"), 6),
    ("polygon", "USDC.e", address!("2791bca1f2de4661ed88a30c99a7a9449aa84174"), 6),
    ("polygon", "amUSDC", address!("1a13f4ca1d028320a707d99520abfefca3998b7f"), 6),
    ("polygon", "DAI", address!("8f3cf7ad23cd3cadbd9735aff958023239c6a063"), 18),
    ("polygon", "amDAI", address!("27f8d03b3a2196956ed754badc28d73be8830a6e"), 18),
    ("polygon", "USDT", address!("c2132d05d31c914a87c6611c10748aeb04b58e8f"), 6),
    ("polygon", "amUSDT", address!("60d55f02a771d515e077c9c2403a1ef324885cec"), 6),
    ("bsc", "USDC", address!("8ac76a51cc950d9822d68b83fe1ad97b32cd580d"), 18),
    ("bsc", "USDT", address!("55d398326f99059ff775485246999027b3197955"), 18),
    ("base", "USDbC", address!("d9aaec86b65d86f6a7b5b1b0c42ffa531710b6ca"), 6),
    ("base", "axlUSDC", address!("eb466342c4d449bc9f53a865d5cb90586f405215"), 6),
    ("base", "crvUSD", address!("417ac0e078398c154edfadd9ef675d30be60af93"), 18),
    ("base", "USDC", address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913"), 6),
    ("gnosis", "USDC", address!("ddafbb505ad214d7b80b1f830fccc89b60fb7a83"), 6),
    ("gnosis", "USDT", address!("4ecaba5870353805a9f068101a40e0f32ed605c6"), 6),
    ("gnosis", "WXDAI", address!("e91d153e0b41518a2ce8dd3d7944fa863463a97d"), 18),
];
