use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked,
    Mint,
    TokenAccount,
    TokenInterface,
    TransferChecked,
};

use crate::{
    constants::VESTING_SEED,
    error::LaunchpoolError,
    state::vesting::VestingSchedule,
};

#[event]
pub struct VestedTokensClaimed {
    pub beneficiary: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct ClaimVested<'info> {
    /// CHECK: presale the schedule hangs off, used only as a PDA seed
    pub presale: AccountInfo<'info>,

    #[account(
        mut,
        seeds = [VESTING_SEED, presale.key().as_ref()],
        bump,
        has_one = beneficiary @ LaunchpoolError::NotOwner,
        has_one = token
    )]
    pub vesting_schedule: Box<Account<'info, VestingSchedule>>,

    #[account(
        mut,
        constraint = vesting_vault_account.mint == token.key()
            && vesting_vault_account.owner == vesting_schedule.key()
    )]
    pub vesting_vault_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = token,
        associated_token::authority = beneficiary,
        associated_token::token_program = token_program
    )]
    pub beneficiary_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub beneficiary: Signer<'info>,

    pub token: InterfaceAccount<'info, Mint>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn claim_vested(ctx: Context<ClaimVested>) -> Result<()> {
    let schedule = &mut ctx.accounts.vesting_schedule;
    let now = Clock::get()?.unix_timestamp;

    let claimable = schedule.remaining_vested(now)?;
    require!(claimable > 0, LaunchpoolError::NothingToClaim);

    // Mark before transferring.
    schedule.released = schedule
        .released
        .checked_add(claimable)
        .ok_or(LaunchpoolError::ArithmeticOverflow)?;

    let presale_key = ctx.accounts.presale.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        VESTING_SEED,
        presale_key.as_ref(),
        &[ctx.bumps.vesting_schedule],
    ]];

    transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vesting_vault_account.to_account_info(),
                mint: ctx.accounts.token.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: schedule.to_account_info(),
            },
            signer_seeds,
        ),
        claimable,
        ctx.accounts.token.decimals,
    )?;

    emit!(VestedTokensClaimed {
        beneficiary: ctx.accounts.beneficiary.key(),
        amount: claimable,
    });

    Ok(())
}
