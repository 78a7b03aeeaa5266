use anchor_lang::prelude::*;

use crate::{
    error::LaunchpoolError,
    state::presale::Presale,
};

#[event]
pub struct Paused {
    pub timestamp: i64,
}

#[event]
pub struct Unpaused {
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        mut,
        has_one = owner @ LaunchpoolError::NotOwner
    )]
    pub presale: Box<Account<'info, Presale>>,

    pub owner: Signer<'info>,
}

/// Pausing gates the fund-moving entry points only; administrative and view
/// calls stay available.
pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    let now = Clock::get()?.unix_timestamp;

    if presale.paused == paused {
        return Ok(());
    }
    presale.paused = paused;

    if paused {
        emit!(Paused { timestamp: now });
    } else {
        emit!(Unpaused { timestamp: now });
    }

    Ok(())
}
