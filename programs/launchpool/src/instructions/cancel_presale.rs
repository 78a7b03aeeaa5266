use anchor_lang::prelude::*;

use crate::{
    error::LaunchpoolError,
    state::presale::{
        Lifecycle,
        Presale,
    },
};

#[event]
pub struct Canceled {
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct CancelPresale<'info> {
    #[account(
        mut,
        has_one = owner @ LaunchpoolError::NotOwner
    )]
    pub presale: Box<Account<'info, Presale>>,

    pub owner: Signer<'info>,
}

pub fn cancel_presale(ctx: Context<CancelPresale>) -> Result<()> {
    let presale = &mut ctx.accounts.presale;

    require!(
        presale.lifecycle != Lifecycle::Finalized,
        LaunchpoolError::AlreadyFinalized
    );
    require!(
        presale.lifecycle != Lifecycle::Canceled,
        LaunchpoolError::AlreadyCanceled
    );

    presale.lifecycle = Lifecycle::Canceled;

    emit!(Canceled {
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
