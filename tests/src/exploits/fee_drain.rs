//! # Fee Drain
//!
//! Attempts to make someone else pay, or to mint through the fee path:
//!
//! - naming a victim as signer while signing with the attacker's key
//! - naming a victim as signer with no public key declared
//! - naming a victim as fee granter without an allowance
//! - a negative fee, which a naive debit would turn into a credit
//!
//! The fee decorator runs before signature verification, so the debit
//! happens inside the run; each case also checks that neither branch
//! keeps it.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        funded_service, send_from, sign_and_encode, Wallet, DENOM, GAS, STARTING_BALANCE,
    };
    use gk_02_transaction::{MsgSend, TxBuilder};
    use gk_03_ante_handler::{
        AccountKeeper, AdmissionError, AdmissionService, AnteError, AnteMode, GatekeeperConfig,
        TxAdmissionApi,
    };
    use shared_types::Coin;

    fn assert_untouched(service: &AdmissionService, victim: &Wallet) {
        for mode in [AnteMode::Tentative, AnteMode::Final] {
            let ledger = service.ledger(mode);
            assert_eq!(ledger.get_balance(&victim.address, DENOM), STARTING_BALANCE);
            let account = ledger.get_account(&victim.address).unwrap();
            assert_eq!(account.sequence, 0);
            assert_eq!(account.public_key, None);
        }
    }

    fn setup() -> (AdmissionService, String, Wallet, Wallet) {
        let config = GatekeeperConfig::default();
        let chain_id = config.chain.chain_id.clone();
        let attacker = Wallet::new(1);
        let victim = Wallet::new(2);
        let service = funded_service(config, &[attacker.account(), victim.account()]);
        (service, chain_id, attacker, victim)
    }

    #[test]
    fn test_victim_as_signer_with_attacker_key() {
        let (service, chain_id, attacker, victim) = setup();

        let builder = send_from(victim.address, &attacker.key.public_key(), 0, 900_000);
        let bytes = sign_and_encode(builder, &attacker.key, &chain_id, victim.account_number);

        for result in [service.check_tx(&bytes), service.deliver_tx(&bytes)] {
            match result {
                Err(AdmissionError::Rejected(r)) => {
                    assert_eq!(r.decorator, "SigVerification");
                    assert!(matches!(r.error, AnteError::Unauthorized(_)));
                }
                other => panic!("expected a rejection, got {other:?}"),
            }
        }
        assert_untouched(&service, &victim);
    }

    #[test]
    fn test_victim_as_signer_without_public_key() {
        let (service, chain_id, attacker, victim) = setup();

        let builder = TxBuilder::new()
            .add_msg(&MsgSend {
                from_address: victim.address,
                to_address: attacker.address,
                amount: vec![Coin::new(DENOM, 1)],
            })
            .unwrap()
            .fee_amount(vec![Coin::new(DENOM, 900_000)])
            .gas_limit(GAS)
            .add_signer(None, 0);
        let bytes = sign_and_encode(builder, &attacker.key, &chain_id, victim.account_number);

        match service.deliver_tx(&bytes) {
            Err(AdmissionError::Rejected(r)) => {
                assert_eq!(r.decorator, "SigVerification");
                assert!(matches!(r.error, AnteError::Unauthorized(_)));
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
        assert_untouched(&service, &victim);
    }

    #[test]
    fn test_victim_as_granter_without_allowance() {
        let (service, chain_id, attacker, victim) = setup();
        let codec = service.config().address_codec().unwrap();

        let builder = attacker
            .send(0, 900_000)
            .granter(&codec, &victim.address);
        let bytes = sign_and_encode(builder, &attacker.key, &chain_id, attacker.account_number);

        match service.deliver_tx(&bytes) {
            Err(AdmissionError::Rejected(r)) => {
                assert_eq!(r.decorator, "DeductFee");
                assert!(matches!(r.error, AnteError::Unauthorized(_)));
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
        assert_untouched(&service, &victim);
    }

    #[test]
    fn test_negative_fee_cannot_mint() {
        let (service, chain_id, attacker, victim) = setup();

        let builder = send_from(attacker.address, &attacker.key.public_key(), 0, -1_000_000);
        let bytes = sign_and_encode(builder, &attacker.key, &chain_id, attacker.account_number);

        match service.deliver_tx(&bytes) {
            Err(AdmissionError::Rejected(r)) => {
                assert_eq!(r.decorator, "ValidateBasic");
                assert!(matches!(r.error, AnteError::InvalidRequest(_)));
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
        let ledger = service.ledger(AnteMode::Final);
        assert_eq!(ledger.get_balance(&attacker.address, DENOM), STARTING_BALANCE);
    }
}
