//! # Hardware-Signed Admission
//!
//! A transaction signed by a device account goes through the same
//! pipeline as one signed in-process:
//!
//! 1. Device derives the key at a BIP-44 path and reports its address
//! 2. The address is funded on the ledger
//! 3. `TxBuilder::sign_with` drives the device through `MessageSigner`
//! 4. `deliver_tx` admits it and advances the sequence

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        funded_service, send_from, sign_and_encode, DENOM, GAS, STARTING_BALANCE,
    };
    use gk_01_hardware_signer::{DerivationPath, HardwareSigner, MockDevice, SignerError};
    use gk_02_transaction::TxError;
    use gk_03_ante_handler::{AccountKeeper, AnteMode, GatekeeperConfig, TxAdmissionApi};
    use shared_crypto::{is_low_s, verify, MessageSigner};
    use shared_types::{Account, AddressCodec};
    use std::sync::atomic::Ordering;

    const COIN_TYPE: u32 = 118;

    fn path(index: u32) -> DerivationPath {
        DerivationPath::bip44(COIN_TYPE, 0, false, index)
    }

    #[test]
    fn test_device_signed_send_is_admitted() {
        let config = GatekeeperConfig::default();
        let signer = HardwareSigner::new(MockDevice::with_test_mnemonic().unwrap(), COIN_TYPE);
        let device_account = signer.account(path(0)).unwrap();
        let public_key = device_account.public_key().unwrap();
        let address = public_key.address();

        let service = funded_service(config.clone(), &[Account::new(address, 3)]);
        let bytes = sign_and_encode(
            send_from(address, &public_key, 0, 5_000),
            &device_account,
            &config.chain.chain_id,
            3,
        );

        let admitted = service.deliver_tx(&bytes).unwrap();
        assert_eq!(admitted.gas_wanted, GAS);

        let ledger = service.ledger(AnteMode::Final);
        let account = ledger.get_account(&address).unwrap();
        assert_eq!(account.sequence, 1);
        assert_eq!(account.public_key, Some(public_key.to_vec()));
        assert_eq!(ledger.get_balance(&address, DENOM), STARTING_BALANCE - 5_000);
    }

    #[test]
    fn test_device_address_matches_key_derived_address() {
        let signer = HardwareSigner::new(MockDevice::with_test_mnemonic().unwrap(), COIN_TYPE);
        let (public_key, bech32) = signer.get_address_and_public_key(&path(2), "cosmos").unwrap();

        let codec = AddressCodec::new("cosmos").unwrap();
        assert_eq!(codec.decode(&bech32).unwrap(), public_key.address());
        assert!(bech32.starts_with("cosmos1"));
    }

    #[test]
    fn test_device_signature_is_low_s_and_verifies() {
        let signer = HardwareSigner::new(MockDevice::with_test_mnemonic().unwrap(), COIN_TYPE);
        let device_account = signer.account(path(0)).unwrap();
        let public_key = device_account.public_key().unwrap();

        for i in 0..32u32 {
            let message = format!("sign doc {i}");
            let signature = device_account.sign_message(message.as_bytes()).unwrap();
            assert!(is_low_s(&signature.s()));
            assert!(verify(&public_key, message.as_bytes(), &signature.to_vec()).is_ok());
        }
    }

    #[test]
    fn test_foreign_coin_type_never_reaches_device() {
        let device = MockDevice::with_test_mnemonic().unwrap();
        let stats = device.stats();
        let signer = HardwareSigner::new(device, COIN_TYPE);

        let foreign = DerivationPath::bip44(60, 0, false, 0);
        assert!(matches!(
            signer.account(foreign),
            Err(SignerError::InvalidDerivationPath(_))
        ));
        assert!(matches!(
            signer.sign(&foreign, b"payload"),
            Err(SignerError::InvalidDerivationPath(_))
        ));
        assert_eq!(stats.requests.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_denied_confirmation_surfaces_as_signing_error() {
        let config = GatekeeperConfig::default();
        let device = MockDevice::with_test_mnemonic()
            .unwrap()
            .deny_confirmations(true);
        let signer = HardwareSigner::new(device, COIN_TYPE);
        let device_account = signer.account(path(0)).unwrap();
        let public_key = device_account.public_key().unwrap();

        let mut builder = send_from(public_key.address(), &public_key, 0, 5_000);
        let result = builder.sign_with(0, &device_account, &config.chain.chain_id, 0);
        assert!(matches!(result, Err(TxError::Signing(_))));
    }

    #[test]
    fn test_closed_session_rejects_requests() {
        let device = MockDevice::with_test_mnemonic().unwrap();
        let stats = device.stats();
        let signer = HardwareSigner::new(device, COIN_TYPE);

        signer.close().unwrap();
        assert!(!signer.is_open());
        assert!(matches!(
            signer.get_public_key(&path(0)),
            Err(SignerError::SessionClosed)
        ));
        assert!(matches!(signer.close(), Err(SignerError::SessionClosed)));
        assert_eq!(stats.closes.load(Ordering::SeqCst), 1);
    }
}
