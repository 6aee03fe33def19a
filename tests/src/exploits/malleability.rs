//! # Signature Malleability
//!
//! For any valid ECDSA signature `(r, s)` over secp256k1, `(r, n - s)` is
//! also valid. If both were accepted, a relayer could rewrite a pending
//! transaction's bytes (and its hash) without the signer's key.
//!
//! Admission only accepts the low-S form, which is the only form
//! `shared_crypto::sign` produces.

#[cfg(test)]
mod tests {
    use crate::fixtures::{funded_service, Wallet, DENOM, STARTING_BALANCE};
    use gk_03_ante_handler::{
        AccountKeeper, AdmissionError, AnteError, AnteMode, GatekeeperConfig, TxAdmissionApi,
    };
    use shared_crypto::{is_low_s, negate_s, sign, verify, Signature, VerifyError};

    fn high_s(signature: &Signature) -> Vec<u8> {
        let mut bytes = signature.r().to_vec();
        bytes.extend_from_slice(&negate_s(&signature.s()));
        bytes
    }

    #[test]
    fn test_high_s_twin_rejected_by_primitive() {
        let wallet = Wallet::new(1);
        let message = b"transfer 100uatom";
        let signature = sign(&wallet.key, message);
        assert!(is_low_s(&signature.s()));

        let twin = high_s(&signature);
        assert!(!is_low_s(&twin[32..].try_into().unwrap()));
        assert!(verify(&wallet.key.public_key(), message, &signature.to_vec()).is_ok());
        assert_eq!(
            verify(&wallet.key.public_key(), message, &twin),
            Err(VerifyError::NonCanonical)
        );
    }

    #[test]
    fn test_high_s_twin_rejected_by_admission() {
        let config = GatekeeperConfig::default();
        let chain_id = config.chain.chain_id.clone();
        let wallet = Wallet::new(1);
        let service = funded_service(config, &[wallet.account()]);

        let mut builder = wallet.send(0, 100);
        let sign_bytes = builder
            .sign_bytes(0, &chain_id, wallet.account_number)
            .unwrap();
        let signature = sign(&wallet.key, &sign_bytes);
        builder.set_signature(0, high_s(&signature)).unwrap();

        match service.check_tx(&builder.encode().unwrap()) {
            Err(AdmissionError::Rejected(r)) => {
                assert_eq!(r.decorator, "SigVerification");
                assert!(matches!(r.error, AnteError::Unauthorized(_)));
            }
            other => panic!("expected a rejection, got {other:?}"),
        }

        // The fee debited earlier in the run never reaches the branch.
        let pending = service.ledger(AnteMode::Tentative);
        assert_eq!(pending.get_balance(&wallet.address, DENOM), STARTING_BALANCE);

        // The canonical twin is still good.
        builder.set_signature(0, signature.to_vec()).unwrap();
        service.check_tx(&builder.encode().unwrap()).unwrap();
    }

    #[test]
    fn test_padded_signature_rejected() {
        let config = GatekeeperConfig::default();
        let chain_id = config.chain.chain_id.clone();
        let wallet = Wallet::new(1);
        let service = funded_service(config, &[wallet.account()]);

        let mut builder = wallet.send(0, 100);
        let sign_bytes = builder
            .sign_bytes(0, &chain_id, wallet.account_number)
            .unwrap();
        let mut padded = sign(&wallet.key, &sign_bytes).to_vec();
        padded.push(0);
        builder.set_signature(0, padded).unwrap();

        assert!(matches!(
            service.deliver_tx(&builder.encode().unwrap()),
            Err(AdmissionError::Rejected(r)) if r.decorator == "SigVerification"
        ));
    }
}
