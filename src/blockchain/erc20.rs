//! ERC-20 ABI definitions using alloy's `sol!` macro.

use alloy::sol;

sol! {
    /// Standard fungible-token interface.
    #[derive(Debug)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use alloy::sol_types::SolCall;

    #[test]
    fn encode_approve() {
        let call = IERC20::approveCall {
            spender: Address::ZERO,
            amount: U256::MAX,
        };
        let encoded = call.abi_encode();
        assert_eq!(encoded.len(), 68);
        // approve(address,uint256)
        assert_eq!(&encoded[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn encode_transfer() {
        let call = IERC20::transferCall {
            to: Address::ZERO,
            amount: U256::from(1_500_000u64),
        };
        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(U256::from_be_slice(&encoded[36..68]), U256::from(1_500_000u64));
    }

    #[test]
    fn encode_allowance() {
        let call = IERC20::allowanceCall {
            owner: Address::ZERO,
            spender: Address::ZERO,
        };
        assert_eq!(&call.abi_encode()[..4], &[0xdd, 0x62, 0xed, 0x3e]);
    }

    #[test]
    fn decimals_selector() {
        assert_eq!(IERC20::decimalsCall::SELECTOR, [0x31, 0x3c, 0xe5, 0x67]);
    }

    #[test]
    fn decode_decimals_return() {
        let mut word = [0u8; 32];
        word[31] = 6;
        let decimals = IERC20::decimalsCall::abi_decode_returns(&word).unwrap();
        assert_eq!(decimals, 6);
    }

    #[test]
    fn decode_empty_return_fails() {
        assert!(IERC20::decimalsCall::abi_decode_returns(&[]).is_err());
    }
}
