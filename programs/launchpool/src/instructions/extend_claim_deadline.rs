use anchor_lang::prelude::*;

use crate::{
    error::LaunchpoolError,
    state::presale::{
        Lifecycle,
        Presale,
    },
};

#[event]
pub struct ClaimDeadlineExtended {
    pub new_deadline: i64,
}

#[derive(Accounts)]
pub struct ExtendClaimDeadline<'info> {
    #[account(
        mut,
        has_one = owner @ LaunchpoolError::NotOwner
    )]
    pub presale: Box<Account<'info, Presale>>,

    pub owner: Signer<'info>,
}

pub fn extend_claim_deadline(ctx: Context<ExtendClaimDeadline>, new_deadline: i64) -> Result<()> {
    let presale = &mut ctx.accounts.presale;

    require!(
        presale.lifecycle == Lifecycle::Finalized,
        LaunchpoolError::NotFinalized
    );
    require!(
        new_deadline > presale.claim_deadline,
        LaunchpoolError::DeadlineNotExtended
    );

    presale.claim_deadline = new_deadline;

    emit!(ClaimDeadlineExtended { new_deadline });

    Ok(())
}
