//! # Replay
//!
//! A signed transaction is public once broadcast. Three replays are tried:
//!
//! - same chain, same block: caught by the sequence check
//! - another chain: the chain id is part of the signed bytes
//! - another account number: so is the account number, so a key reused
//!   for a recreated account cannot have old transactions replayed

#[cfg(test)]
mod tests {
    use crate::fixtures::{funded_service, Wallet, DENOM, STARTING_BALANCE};
    use gk_03_ante_handler::{
        AccountKeeper, AdmissionError, Admitted, AnteError, AnteMode, GatekeeperConfig,
        TxAdmissionApi,
    };
    use shared_types::Account;

    fn rejected_by(result: Result<Admitted, AdmissionError>) -> Option<(&'static str, AnteError)> {
        match result {
            Err(AdmissionError::Rejected(r)) => Some((r.decorator, r.error)),
            _ => None,
        }
    }

    #[test]
    fn test_same_chain_replay_hits_sequence() {
        let config = GatekeeperConfig::default();
        let chain_id = config.chain.chain_id.clone();
        let wallet = Wallet::new(1);
        let service = funded_service(config, &[wallet.account()]);

        let bytes = wallet.signed_send(&chain_id, 0, 500);
        service.deliver_tx(&bytes).unwrap();

        assert_eq!(
            rejected_by(service.deliver_tx(&bytes)),
            Some((
                "IncrementSequence",
                AnteError::WrongSequence {
                    address: wallet.address,
                    expected: 1,
                    actual: 0
                }
            ))
        );

        // Fee charged once.
        let ledger = service.ledger(AnteMode::Final);
        assert_eq!(ledger.get_balance(&wallet.address, DENOM), STARTING_BALANCE - 500);
        assert_eq!(ledger.get_account(&wallet.address).unwrap().sequence, 1);
    }

    #[test]
    fn test_replay_after_commit_in_mempool() {
        let config = GatekeeperConfig::default();
        let chain_id = config.chain.chain_id.clone();
        let wallet = Wallet::new(1);
        let service = funded_service(config, &[wallet.account()]);

        let bytes = wallet.signed_send(&chain_id, 0, 500);
        service.deliver_tx(&bytes).unwrap();
        service.commit(1);

        assert!(matches!(
            rejected_by(service.check_tx(&bytes)),
            Some(("IncrementSequence", AnteError::WrongSequence { .. }))
        ));
    }

    #[test]
    fn test_cross_chain_replay() {
        let wallet = Wallet::new(1);
        let home = funded_service(
            GatekeeperConfig::default().with_chain_id("home-1"),
            &[wallet.account()],
        );
        let foreign = funded_service(
            GatekeeperConfig::default().with_chain_id("foreign-1"),
            &[wallet.account()],
        );

        let bytes = wallet.signed_send("home-1", 0, 500);
        home.deliver_tx(&bytes).unwrap();

        assert!(matches!(
            rejected_by(foreign.deliver_tx(&bytes)),
            Some(("SigVerification", AnteError::Unauthorized(_)))
        ));
        let ledger = foreign.ledger(AnteMode::Final);
        assert_eq!(ledger.get_balance(&wallet.address, DENOM), STARTING_BALANCE);
    }

    #[test]
    fn test_account_number_replay() {
        let config = GatekeeperConfig::default();
        let chain_id = config.chain.chain_id.clone();
        let wallet = Wallet::new(1);

        // Signed while the address held account number 1.
        let bytes = wallet.signed_send(&chain_id, 0, 500);

        // The address now maps to a recreated account with sequence 0 again.
        let recreated = Account::new(wallet.address, 42);
        let service = funded_service(config, &[recreated]);

        assert!(matches!(
            rejected_by(service.deliver_tx(&bytes)),
            Some(("SigVerification", AnteError::Unauthorized(_)))
        ));
    }
}
