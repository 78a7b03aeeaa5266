use anchor_lang::prelude::*;

use crate::{
    error::LaunchpoolError,
    state::presale::{
        Presale,
        WhitelistKind,
    },
};

#[event]
pub struct MerkleRootUpdated {
    pub presale: Pubkey,
    pub root: [u8; 32],
}

#[derive(Accounts)]
pub struct SetMerkleRoot<'info> {
    #[account(
        mut,
        has_one = owner @ LaunchpoolError::NotOwner
    )]
    pub presale: Box<Account<'info, Presale>>,

    pub owner: Signer<'info>,
}

/// The root may change at any point, including mid-sale. Proofs are checked
/// against the stored root at contribution time only, so removing a leaf
/// invalidates its holder's future contributions without touching past ones.
pub fn set_merkle_root(ctx: Context<SetMerkleRoot>, root: [u8; 32]) -> Result<()> {
    let presale = &mut ctx.accounts.presale;

    require!(
        presale.whitelist_kind == WhitelistKind::Merkle,
        LaunchpoolError::InvalidWhitelistConfiguration
    );

    presale.merkle_root = root;

    emit!(MerkleRootUpdated {
        presale: presale.key(),
        root,
    });

    Ok(())
}
