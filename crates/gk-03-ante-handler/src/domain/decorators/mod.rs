//! The built-in decorators, in default pipeline order.

mod deduct_fee;
mod min_gas_price;
mod sequence;
mod sig_verify;
mod validate_basic;

pub use deduct_fee::DeductFeeDecorator;
pub use min_gas_price::MinGasPriceDecorator;
pub use sequence::IncrementSequenceDecorator;
pub use sig_verify::SigVerificationDecorator;
pub use validate_basic::ValidateBasicDecorator;
