pub mod cancel_presale;
pub mod claim_tokens;
pub mod claim_vested;
pub mod contribute;
pub mod contribute_token;
pub mod create_presale;
pub mod deposit_tokens;
pub mod extend_claim_deadline;
pub mod finalize;
pub mod finalize_pool;
pub mod lock_liquidity;
pub mod refund;
pub mod rescue_tokens;
pub mod set_merkle_root;
pub mod set_paused;
pub mod withdraw_locked_lp;

pub use cancel_presale::*;
pub use claim_tokens::*;
pub use claim_vested::*;
pub use contribute::*;
pub use contribute_token::*;
pub use create_presale::*;
pub use deposit_tokens::*;
pub use extend_claim_deadline::*;
pub use finalize::*;
pub use finalize_pool::*;
pub use lock_liquidity::*;
pub use refund::*;
pub use rescue_tokens::*;
pub use set_merkle_root::*;
pub use set_paused::*;
pub use withdraw_locked_lp::*;
