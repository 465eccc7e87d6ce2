//! Transaction building, signing, and confirmation monitoring.
//!
//! # Responsibilities
//! - Resolve the nonce before anything is signed
//! - Estimate gas and apply the gas price policy
//! - Scale token amounts with decimals read from the contract
//! - Poll for receipts

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::ChainClient;
use crate::blockchain::erc20::IERC20;
use crate::blockchain::types::{ClientError, ClientResult, ConfirmationStatus};
use crate::blockchain::units::{to_base_units, NATIVE_DECIMALS};
use crate::observability::metrics;

const WEI_PER_GWEI: u128 = 1_000_000_000;

impl ChainClient {
    /// Send `amount` of the native currency (in ether) to `to`.
    #[tracing::instrument(skip(self), fields(from = %self.address()))]
    pub async fn send_native(&self, to: Address, amount: f64) -> ClientResult<TxHash> {
        let result = async {
            let value = to_base_units(amount, NATIVE_DECIMALS)?;
            let tx = TransactionRequest::default().with_to(to).with_value(value);
            self.submit("native", tx).await
        }
        .await;

        match &result {
            Ok(tx_hash) => tracing::info!(tx_hash = %tx_hash, "Native transfer sent"),
            Err(e) => tracing::warn!(error = %e, "Native transfer failed"),
        }
        result
    }

    /// Allow `spender` to move up to `amount` of `token` (whole units).
    #[tracing::instrument(skip(self), fields(owner = %self.address()))]
    pub async fn approve(&self, token: Address, spender: Address, amount: f64) -> ClientResult<TxHash> {
        let result = async {
            let decimals = self.get_decimals(token).await?;
            let amount = to_base_units(amount, decimals)?;
            tracing::debug!(decimals, base_units = %amount, "Scaled approve amount");

            let call = IERC20::approveCall { spender, amount };
            self.submit("approve", contract_call(token, call)).await
        }
        .await;

        match &result {
            Ok(tx_hash) => tracing::info!(tx_hash = %tx_hash, "Approve transaction sent"),
            Err(e) => tracing::warn!(error = %e, "Approve failed"),
        }
        result
    }

    /// Transfer `amount` of `token` (whole units) to `to`.
    #[tracing::instrument(skip(self), fields(from = %self.address()))]
    pub async fn transfer_token(&self, token: Address, to: Address, amount: f64) -> ClientResult<TxHash> {
        let result = async {
            let decimals = self.get_decimals(token).await?;
            let amount = to_base_units(amount, decimals)?;
            tracing::debug!(decimals, base_units = %amount, "Scaled transfer amount");

            let call = IERC20::transferCall { to, amount };
            self.submit("transfer", contract_call(token, call)).await
        }
        .await;

        match &result {
            Ok(tx_hash) => tracing::info!(tx_hash = %tx_hash, "Token transfer sent"),
            Err(e) => tracing::warn!(error = %e, "Token transfer failed"),
        }
        result
    }

    /// Current receipt state of a transaction.
    pub async fn get_transaction_status(&self, tx_hash: TxHash) -> ClientResult<ConfirmationStatus> {
        let status = match self.get_transaction_receipt(tx_hash).await? {
            None => ConfirmationStatus::Pending,
            Some(receipt) if !receipt.status() => {
                ConfirmationStatus::Failed("Transaction reverted".to_string())
            }
            Some(receipt) => ConfirmationStatus::Confirmed {
                block_number: receipt.block_number.unwrap_or_default(),
            },
        };
        Ok(status)
    }

    /// Wait for a transaction to be mined.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `timeout_secs` - Maximum time to wait
    pub async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        timeout_secs: u64,
    ) -> ClientResult<ConfirmationStatus> {
        let poll_interval = Duration::from_millis(self.config.receipt_poll_interval_ms);

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                match self.get_transaction_status(tx_hash).await? {
                    ConfirmationStatus::Pending => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    }
                    done => return Ok(done),
                }
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(ClientError::ConfirmationTimeout(timeout_secs)),
        }
    }

    /// Resolve the nonce, estimate gas, price it, then sign and submit.
    async fn submit(&self, kind: &'static str, tx: TransactionRequest) -> ClientResult<TxHash> {
        let nonce = self.next_nonce().await?;
        let tx = tx
            .with_from(self.address())
            .with_nonce(nonce)
            .with_chain_id(self.chain_id.0);

        let result = async {
            let gas_limit = self
                .rpc("eth_estimateGas", self.provider.estimate_gas(tx.clone()))
                .await?;
            let gas_price = self.gas_price().await?;
            tracing::debug!(nonce, gas_limit, gas_price, "Transaction priced");

            self.send_transaction(tx.with_gas_limit(gas_limit).with_gas_price(gas_price))
                .await
        }
        .await;

        match result {
            Ok(tx_hash) => {
                metrics::record_submission(kind);
                Ok(tx_hash)
            }
            Err(e) => {
                if let Some(nonces) = &self.nonces {
                    nonces.reset().await;
                }
                Err(e)
            }
        }
    }

    async fn next_nonce(&self) -> ClientResult<u64> {
        match &self.nonces {
            Some(nonces) => nonces.reserve(|| self.get_nonce(None)).await,
            None => self.get_nonce(None).await,
        }
    }

    /// Node gas price checked against the cap, then scaled by the multiplier.
    async fn gas_price(&self) -> ClientResult<u128> {
        let gas_price = self.rpc("eth_gasPrice", self.provider.get_gas_price()).await?;
        check_gas_price(
            gas_price,
            self.config.max_gas_price_gwei,
            self.config.gas_price_multiplier,
        )
    }
}

fn contract_call<C: SolCall>(contract: Address, call: C) -> TransactionRequest {
    TransactionRequest::default()
        .with_to(contract)
        .with_input(call.abi_encode())
}

/// Scale the node price and enforce the cap in wei.
///
/// The cap applies to both the node price and the price actually signed,
/// so a multiplier can never push a transaction over the configured maximum.
fn check_gas_price(gas_price: u128, max_gwei: u64, multiplier: f64) -> ClientResult<u128> {
    let scaled = if multiplier == 1.0 {
        gas_price
    } else {
        (gas_price as f64 * multiplier) as u128
    };

    let highest = gas_price.max(scaled);
    if max_gwei > 0 && highest > max_gwei as u128 * WEI_PER_GWEI {
        return Err(ClientError::GasPriceTooHigh {
            current_gwei: highest.div_ceil(WEI_PER_GWEI) as u64,
            max_gwei,
        });
    }

    Ok(scaled)
}
